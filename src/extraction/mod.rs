//! Best-effort PDF text extraction.
//!
//! Wraps the `pdf-extract` crate. Decode failures (encrypted, malformed, or
//! truncated byte streams) return `None` so the pipeline can tag the park
//! `extract_failed` and continue; an image-only scan decodes successfully to
//! an empty string, which the field parser treats as "nothing found". There
//! is no retry at this layer — re-decoding fixed bytes cannot change the
//! outcome.

pub mod fields;

use tracing::warn;

/// Decode PDF bytes into plain text. `None` means the decoder rejected the
/// payload; `Some("")` is a valid outcome for PDFs with no text layer.
pub fn extract_text(bytes: &[u8]) -> Option<String> {
    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!("pdf decode failed: {e}");
            None
        }
    }
}
