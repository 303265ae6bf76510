//! JSON file sink.
//!
//! Serializes the full record list — failed and partial records included —
//! to a pretty-printed file, overwriting any existing file at that path.

use std::path::Path;

use tracing::info;

use crate::model::ParkRecord;
use crate::sink::SinkError;

/// Write all records to `path`, overwriting. Parent directories are created
/// as needed.
pub fn write_json(path: &Path, records: &[ParkRecord]) -> Result<(), SinkError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SinkError::WriteFailed(format!("{}: {e}", parent.display())))?;
        }
    }

    let payload = serde_json::to_vec_pretty(records)
        .map_err(|e| SinkError::WriteFailed(format!("serialization: {e}")))?;
    std::fs::write(path, payload)
        .map_err(|e| SinkError::WriteFailed(format!("{}: {e}", path.display())))?;

    info!(path = %path.display(), count = records.len(), "wrote JSON backup");
    Ok(())
}
