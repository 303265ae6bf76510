//! Park records and the run aggregator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Terminal outcome of processing one park.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParkStatus {
    /// At least one field was parsed from the brochure.
    Ok,
    /// The resolver produced no candidate URLs.
    NoUrlFound,
    /// Every candidate URL failed to yield a PDF payload.
    DownloadFailed,
    /// The PDF decoder rejected the downloaded bytes.
    ExtractFailed,
    /// Download and extraction succeeded but no field could be parsed.
    ParsePartial,
}

impl ParkStatus {
    /// Whether this status counts as a failure for reporting purposes.
    pub fn is_failure(self) -> bool {
        self != ParkStatus::Ok
    }
}

impl std::fmt::Display for ParkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::NoUrlFound => write!(f, "no_url_found"),
            Self::DownloadFailed => write!(f, "download_failed"),
            Self::ExtractFailed => write!(f, "extract_failed"),
            Self::ParsePartial => write!(f, "parse_partial"),
        }
    }
}

/// The structured outcome of processing one park, success or failure.
///
/// `name` is always present; every other field is best-effort. Absence is an
/// expected outcome, not an error. A record is mutated only during its park's
/// single pass through the pipeline and is immutable once appended to the
/// [`Aggregator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkRecord {
    pub name: String,
    pub state: Option<String>,
    pub established_year: Option<u16>,
    pub size: Option<String>,
    /// The URL that yielded usable content, or the last attempted URL.
    pub brochure_url: Option<String>,
    /// First 500 characters of extracted text, when extraction produced any.
    pub text_preview: Option<String>,
    pub scraped_at: DateTime<Utc>,
    pub status: ParkStatus,
}

impl ParkRecord {
    /// Create a failure record carrying only the park name and a status tag.
    pub fn failed(name: &str, status: ParkStatus, brochure_url: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            state: None,
            established_year: None,
            size: None,
            brochure_url,
            text_preview: None,
            scraped_at: Utc::now(),
            status,
        }
    }
}

/// Ordered collection of park records for one run.
///
/// One append per park processed, preserving input park order. Records are
/// never mutated after the append.
#[derive(Debug, Default)]
pub struct Aggregator {
    records: Vec<ParkRecord>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the record for the next park in input order.
    pub fn push(&mut self, record: ParkRecord) {
        self.records.push(record);
    }

    /// All records, in input order.
    pub fn records(&self) -> &[ParkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records with status `ok`.
    pub fn ok_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.status == ParkStatus::Ok)
            .count()
    }

    /// Failure counts keyed by status tag. The `ok` status never appears.
    pub fn failure_counts(&self) -> HashMap<ParkStatus, usize> {
        let mut counts = HashMap::new();
        for record in &self.records {
            if record.status.is_failure() {
                *counts.entry(record.status).or_insert(0) += 1;
            }
        }
        counts
    }
}
