//! HTTP client wrapping reqwest.
//!
//! Handles redirects, timeouts, retry on 5xx, and backoff on 429. Network
//! errors are retried a bounded number of times and then surfaced to the
//! caller, which treats them as a failed candidate rather than a fatal error.

use anyhow::Result;
use std::time::Duration;

/// Response from an HTTP GET request. The body is kept as raw bytes because
/// the payload of interest is a PDF; index pages go through [`body_text`].
///
/// [`body_text`]: FetchResponse::body_text
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// Original requested URL.
    pub url: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Content-Type header, if present.
    pub content_type: Option<String>,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the payload is plausibly a PDF: the Content-Type mentions
    /// `pdf`, or the header is absent and the URL path ends in `.pdf`.
    pub fn looks_like_pdf(&self) -> bool {
        if let Some(ct) = &self.content_type {
            if ct.to_lowercase().contains("pdf") {
                return true;
            }
        }
        self.content_type.is_none() && self.url.to_lowercase().ends_with(".pdf")
    }

    /// Body decoded as UTF-8 text, lossily.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP client for the scrape pipeline.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a new client with a standard browser user-agent and a bounded
    /// redirect policy.
    pub fn new(timeout: Duration) -> Self {
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                  AppleWebKit/537.36 (KHTML, like Gecko) \
                  Chrome/91.0.4472.124 Safari/537.36";

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(ua)
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// Perform a single GET with retry on 5xx and backoff on 429.
    pub async fn get(&self, url: &str) -> Result<FetchResponse> {
        let mut retries = 0u32;
        let max_retries = 2;

        loop {
            let resp = self.client.get(url).send().await;

            match resp {
                Ok(r) => {
                    let status = r.status().as_u16();
                    let final_url = r.url().to_string();

                    // Retry on 5xx
                    if status >= 500 && retries < max_retries {
                        retries += 1;
                        let delay = Duration::from_millis(500 * 2u64.pow(retries - 1));
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    // Backoff on 429, honoring Retry-After up to a cap
                    if status == 429 && retries < max_retries {
                        retries += 1;
                        let retry_after = r
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|s| s.parse::<u64>().ok())
                            .unwrap_or(2);
                        tokio::time::sleep(Duration::from_secs(retry_after.min(10))).await;
                        continue;
                    }

                    let content_type = r
                        .headers()
                        .get("content-type")
                        .and_then(|v| v.to_str().ok())
                        .map(String::from);

                    let body = r.bytes().await.map(|b| b.to_vec()).unwrap_or_default();

                    return Ok(FetchResponse {
                        url: url.to_string(),
                        final_url,
                        status,
                        content_type,
                        body,
                    });
                }
                Err(e) => {
                    // Timeouts, connection errors, DNS failures
                    if retries < max_retries {
                        retries += 1;
                        let delay = Duration::from_millis(500 * 2u64.pow(retries - 1));
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }
    }
}
