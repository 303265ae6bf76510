//! Result sinks: JSON file backup and spreadsheet rows.
//!
//! The two sinks are independent — failure of one never blocks the other,
//! and neither touches the in-memory records. The spreadsheet side of the
//! pipeline depends only on the [`RowWriter`] capability, so the core has no
//! compile-time tie to any particular spreadsheet service.

pub mod json;
pub mod sheets;

use async_trait::async_trait;

use crate::model::ParkRecord;

/// Errors a sink can report. Per-park scrape failures never surface here —
/// they are status tags on the records themselves.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The spreadsheet service rejected the credential or the reference.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The sink could not be written (I/O, HTTP, serialization).
    #[error("write failed: {0}")]
    WriteFailed(String),
}

/// Spreadsheet column order. Row values are produced in exactly this order.
pub const SHEET_COLUMNS: [&str; 6] = [
    "Park Name",
    "State",
    "Established Year",
    "Size",
    "Brochure URL",
    "Scraped Date",
];

/// Abstract row-writing capability over an open worksheet.
#[async_trait]
pub trait RowWriter {
    async fn write_header(&mut self, columns: &[&str]) -> Result<(), SinkError>;
    async fn append_row(&mut self, values: &[String]) -> Result<(), SinkError>;
}

/// Format one record into the six-column row order, blanking absent fields.
pub fn record_row(record: &ParkRecord) -> Vec<String> {
    vec![
        record.name.clone(),
        record.state.clone().unwrap_or_default(),
        record
            .established_year
            .map(|y| y.to_string())
            .unwrap_or_default(),
        record.size.clone().unwrap_or_default(),
        record.brochure_url.clone().unwrap_or_default(),
        record.scraped_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]
}

/// Write the header row followed by one row per record, in record order.
pub async fn write_records<W: RowWriter + ?Sized>(
    writer: &mut W,
    records: &[ParkRecord],
) -> Result<(), SinkError> {
    writer.write_header(&SHEET_COLUMNS).await?;
    for record in records {
        writer.append_row(&record_row(record)).await?;
    }
    Ok(())
}
