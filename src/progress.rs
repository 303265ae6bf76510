//! Progress event types and broadcast channel for scrape telemetry.
//!
//! The pipeline emits `ScrapeEvent`s as each park moves through its stages,
//! which flow through a `tokio::sync::broadcast` channel to all subscribers
//! (the CLI progress display). When no subscriber exists, events are
//! silently dropped.

use serde::{Deserialize, Serialize};

use crate::model::ParkStatus;

/// A progress event emitted during a scrape run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeEvent {
    /// Monotonically increasing sequence number within the run.
    pub seq: u64,
    /// The kind of progress event.
    pub event: ScrapeEventKind,
}

/// The specific kind of progress event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScrapeEventKind {
    /// Processing of a park has begun.
    ParkStarted {
        name: String,
        index: usize,
        total: usize,
    },
    /// The index probe found a direct brochure link.
    UrlDiscovered { name: String, url: String },
    /// A candidate URL yielded a PDF payload.
    BrochureFetched {
        name: String,
        url: String,
        bytes: usize,
    },
    /// Text extraction finished for the downloaded brochure.
    TextExtracted { name: String, chars: usize },
    /// The park reached its terminal state and was recorded.
    ParkRecorded { name: String, status: ParkStatus },
    /// All parks have been processed.
    BatchComplete { ok: usize, failed: usize },
    /// A non-fatal warning occurred.
    Warning { message: String },
}

/// Sender handle for emitting scrape events.
pub type ProgressSender = tokio::sync::broadcast::Sender<ScrapeEvent>;

/// Receiver handle for consuming scrape events.
pub type ProgressReceiver = tokio::sync::broadcast::Receiver<ScrapeEvent>;

/// Create a new progress broadcast channel with a bounded buffer.
///
/// 256 events covers a full 30-park run (a handful of events per park).
pub fn channel() -> (ProgressSender, ProgressReceiver) {
    tokio::sync::broadcast::channel(256)
}

/// Emit a progress event, silently ignoring send errors (which occur when no
/// receivers are listening).
pub fn emit(tx: &Option<ProgressSender>, seq: &mut u64, event: ScrapeEventKind) {
    if let Some(sender) = tx {
        *seq += 1;
        let _ = sender.send(ScrapeEvent { seq: *seq, event });
    }
}
