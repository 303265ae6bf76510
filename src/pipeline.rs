//! The sequential scrape pipeline.
//!
//! For each configured park: resolve candidate URLs (plus the index probe),
//! fetch, extract text, parse fields, record. Parks are processed strictly
//! one at a time in table order. Every per-park failure is converted into a
//! status tag on that park's record — nothing here aborts the batch.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};

use crate::acquisition::http_client::HttpClient;
use crate::acquisition::index_probe;
use crate::config::{ParkEntry, ScrapeConfig};
use crate::extraction::{self, fields};
use crate::model::{Aggregator, ParkRecord, ParkStatus};
use crate::progress::{self, ProgressSender, ScrapeEventKind};

/// Drives one scrape run over the configured park table.
pub struct Scraper {
    config: ScrapeConfig,
    client: HttpClient,
    progress: Option<ProgressSender>,
}

impl Scraper {
    pub fn new(config: ScrapeConfig) -> Self {
        let client = HttpClient::new(config.http_timeout);
        Self {
            config,
            client,
            progress: None,
        }
    }

    /// Attach a progress event sender. Without one, events are not emitted.
    pub fn with_progress(mut self, tx: ProgressSender) -> Self {
        self.progress = Some(tx);
        self
    }

    /// Process every configured park and return the aggregated records.
    ///
    /// Pacing: a park's first request begins no sooner than `delay` after
    /// the previous park's first request. Candidates within one park are not
    /// delayed against each other.
    pub async fn run(&self) -> Aggregator {
        let parks = self.config.parks();
        let total = parks.len();
        let mut aggregator = Aggregator::new();
        let mut seq = 0u64;
        let mut prev_start: Option<Instant> = None;

        info!(total, delay_secs = self.config.delay.as_secs(), "starting scrape run");

        for (index, park) in parks.iter().enumerate() {
            if let Some(started) = prev_start {
                let remaining = self.config.delay.saturating_sub(started.elapsed());
                if !remaining.is_zero() {
                    debug!(park = park.name, "pacing: waiting {remaining:?}");
                    tokio::time::sleep(remaining).await;
                }
            }
            prev_start = Some(Instant::now());

            progress::emit(
                &self.progress,
                &mut seq,
                ScrapeEventKind::ParkStarted {
                    name: park.name.to_string(),
                    index,
                    total,
                },
            );

            let record = self.scrape_park(park, &mut seq).await;
            info!(park = park.name, status = %record.status, "park recorded");

            progress::emit(
                &self.progress,
                &mut seq,
                ScrapeEventKind::ParkRecorded {
                    name: park.name.to_string(),
                    status: record.status,
                },
            );
            aggregator.push(record);
        }

        let ok = aggregator.ok_count();
        progress::emit(
            &self.progress,
            &mut seq,
            ScrapeEventKind::BatchComplete {
                ok,
                failed: aggregator.len() - ok,
            },
        );
        aggregator
    }

    /// Run one park through `resolved → downloaded → extracted → parsed`,
    /// exiting early with the matching status tag at the first failed stage.
    async fn scrape_park(&self, park: &ParkEntry, seq: &mut u64) -> ParkRecord {
        // Resolve. An empty candidate list is a normal outcome, not an error.
        let mut candidates = self.config.templates.candidate_urls(park);
        if candidates.is_empty() {
            return ParkRecord::failed(park.name, ParkStatus::NoUrlFound, None);
        }

        // The index page usually links the real brochure; try that first.
        let index_url = self.config.templates.index_page_url(park);
        if let Some(link) = index_probe::discover_brochure_link(&self.client, &index_url).await {
            progress::emit(
                &self.progress,
                seq,
                ScrapeEventKind::UrlDiscovered {
                    name: park.name.to_string(),
                    url: link.clone(),
                },
            );
            if !candidates.contains(&link) {
                candidates.insert(0, link);
            }
        }

        // Download: first candidate that answers 2xx with a PDF payload wins.
        let mut payload: Option<(String, Vec<u8>)> = None;
        let mut last_attempted = None;
        for url in &candidates {
            last_attempted = Some(url.clone());
            match self.client.get(url).await {
                Ok(resp) if resp.is_success() && resp.looks_like_pdf() => {
                    progress::emit(
                        &self.progress,
                        seq,
                        ScrapeEventKind::BrochureFetched {
                            name: park.name.to_string(),
                            url: url.clone(),
                            bytes: resp.body.len(),
                        },
                    );
                    payload = Some((url.clone(), resp.body));
                    break;
                }
                Ok(resp) => {
                    debug!(park = park.name, url = %url, status = resp.status, "candidate rejected");
                }
                Err(e) => {
                    debug!(park = park.name, url = %url, "candidate failed: {e}");
                }
            }
        }
        let Some((brochure_url, bytes)) = payload else {
            return ParkRecord::failed(park.name, ParkStatus::DownloadFailed, last_attempted);
        };

        // Extract. PDF decoding is CPU-bound, so run it off the async thread.
        let text = tokio::task::spawn_blocking(move || extraction::extract_text(&bytes))
            .await
            .unwrap_or(None);
        let Some(text) = text else {
            return ParkRecord::failed(park.name, ParkStatus::ExtractFailed, Some(brochure_url));
        };
        progress::emit(
            &self.progress,
            seq,
            ScrapeEventKind::TextExtracted {
                name: park.name.to_string(),
                chars: text.chars().count(),
            },
        );

        // Parse. Zero recovered fields is parse_partial, not an error.
        let fields = fields::parse_fields(&text);
        let status = if fields.any() {
            ParkStatus::Ok
        } else {
            ParkStatus::ParsePartial
        };
        let text_preview = if text.is_empty() {
            None
        } else {
            Some(text.chars().take(500).collect())
        };

        ParkRecord {
            name: park.name.to_string(),
            state: fields.state,
            established_year: fields.established_year,
            size: fields.size,
            brochure_url: Some(brochure_url),
            text_preview,
            scraped_at: Utc::now(),
            status,
        }
    }
}
