//! Google Sheets row writer.
//!
//! Speaks the Sheets v4 REST API over `reqwest` with a bearer token supplied
//! in configuration. Opening the writer verifies access, creates the
//! "Park Data" worksheet when missing, and clears any previous rows; a
//! rejected credential or an unreachable spreadsheet surfaces as
//! `SinkError::AuthFailed` and aborts only the spreadsheet write.

use serde_json::json;
use tracing::{debug, info};

use crate::config::SheetRef;
use crate::sink::{RowWriter, SinkError};

/// Production API endpoint. Tests point `open_at` at a mock server.
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

/// Worksheet all rows are written to.
const WORKSHEET_TITLE: &str = "Park Data";

/// A long-lived authenticated connection to one spreadsheet, reused across
/// all row writes of a run.
#[derive(Debug)]
pub struct SheetsWriter {
    client: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    token: String,
}

impl SheetsWriter {
    /// Open the spreadsheet referenced by `sheet` against the production API.
    pub async fn open(sheet: &SheetRef) -> Result<Self, SinkError> {
        Self::open_at(DEFAULT_BASE_URL, sheet).await
    }

    /// Open against an explicit API base URL.
    pub async fn open_at(base_url: &str, sheet: &SheetRef) -> Result<Self, SinkError> {
        let writer = Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: parse_spreadsheet_id(&sheet.spreadsheet),
            token: sheet.token.clone(),
        };
        writer.ensure_worksheet().await?;
        info!(spreadsheet = %writer.spreadsheet_id, "spreadsheet sink ready");
        Ok(writer)
    }

    /// Verify access, create the worksheet if it does not exist, and clear
    /// any rows left from a previous run.
    async fn ensure_worksheet(&self) -> Result<(), SinkError> {
        let url = format!(
            "{}/v4/spreadsheets/{}?fields=sheets.properties.title",
            self.base_url, self.spreadsheet_id
        );
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| SinkError::WriteFailed(format!("metadata fetch: {e}")))?;

        match resp.status().as_u16() {
            200..=299 => {}
            401 | 403 | 404 => {
                return Err(SinkError::AuthFailed(format!(
                    "spreadsheet {} is not accessible (HTTP {})",
                    self.spreadsheet_id,
                    resp.status().as_u16()
                )))
            }
            s => {
                return Err(SinkError::WriteFailed(format!(
                    "metadata fetch returned HTTP {s}"
                )))
            }
        }

        let meta: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| SinkError::WriteFailed(format!("metadata decode: {e}")))?;
        let exists = meta["sheets"]
            .as_array()
            .map(|sheets| {
                sheets
                    .iter()
                    .any(|s| s["properties"]["title"].as_str() == Some(WORKSHEET_TITLE))
            })
            .unwrap_or(false);

        if !exists {
            debug!("worksheet '{WORKSHEET_TITLE}' missing, creating it");
            let url = format!(
                "{}/v4/spreadsheets/{}:batchUpdate",
                self.base_url, self.spreadsheet_id
            );
            let body = json!({
                "requests": [{ "addSheet": { "properties": { "title": WORKSHEET_TITLE } } }]
            });
            self.post_checked(&url, &body).await?;
        }

        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}:clear",
            self.base_url,
            self.spreadsheet_id,
            encoded_title()
        );
        self.post_checked(&url, &json!({})).await?;
        Ok(())
    }

    /// POST a JSON body, mapping auth rejections and other failures to the
    /// sink error taxonomy.
    async fn post_checked(&self, url: &str, body: &serde_json::Value) -> Result<(), SinkError> {
        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| SinkError::WriteFailed(format!("request: {e}")))?;
        check_status(resp.status().as_u16())
    }
}

#[async_trait::async_trait]
impl RowWriter for SheetsWriter {
    async fn write_header(&mut self, columns: &[&str]) -> Result<(), SinkError> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}!A1?valueInputOption=RAW",
            self.base_url,
            self.spreadsheet_id,
            encoded_title()
        );
        let body = json!({ "values": [columns] });
        let resp = self
            .client
            .put(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| SinkError::WriteFailed(format!("header write: {e}")))?;
        check_status(resp.status().as_u16())
    }

    async fn append_row(&mut self, values: &[String]) -> Result<(), SinkError> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}!A1:append?valueInputOption=RAW",
            self.base_url,
            self.spreadsheet_id,
            encoded_title()
        );
        let body = json!({ "values": [values] });
        self.post_checked(&url, &body).await
    }
}

/// Accept either a bare spreadsheet ID or a full
/// `docs.google.com/spreadsheets/d/<id>/...` URL.
fn parse_spreadsheet_id(reference: &str) -> String {
    if let Some(rest) = reference.split("/d/").nth(1) {
        if let Some(id) = rest.split('/').next() {
            return id.to_string();
        }
    }
    reference.to_string()
}

/// Worksheet title as a URL path segment.
fn encoded_title() -> String {
    WORKSHEET_TITLE.replace(' ', "%20")
}

fn check_status(status: u16) -> Result<(), SinkError> {
    match status {
        200..=299 => Ok(()),
        401 | 403 => Err(SinkError::AuthFailed(format!(
            "spreadsheet write rejected (HTTP {status})"
        ))),
        s => Err(SinkError::WriteFailed(format!(
            "spreadsheet write returned HTTP {s}"
        ))),
    }
}
