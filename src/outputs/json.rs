//! JSON file I/O for journal entries.
//!
//! Entries are written as two-space indented UTF-8 JSON with non-ASCII text
//! kept verbatim. A write goes to a temporary sibling first and is renamed
//! into place, so a crash mid-write never leaves a truncated entry behind.

use crate::error::JournalError;
use crate::models::JournalEntry;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

/// Read the entry at `path`.
///
/// A missing file is `None`. So is an unreadable or corrupt one, with a
/// warning, since the run must still be able to write fresh output.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn read_entry(path: &Path) -> Option<JournalEntry> {
    let body = match fs::read_to_string(path).await {
        Ok(body) => body,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No existing journal entry");
            return None;
        }
        Err(e) => {
            warn!(error = %e, "Could not read existing journal entry; starting empty");
            return None;
        }
    };

    match serde_json::from_str(&body) {
        Ok(entry) => Some(entry),
        Err(e) => {
            warn!(error = %e, "Existing journal entry is corrupt; starting empty");
            None
        }
    }
}

/// Serialize `entry` and atomically replace the file at `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_entry(entry: &JournalEntry, path: &Path) -> Result<(), JournalError> {
    let json = serde_json::to_string_pretty(entry)?;

    let tmp_path = path.with_extension("json.tmp");
    let write_error = |source| JournalError::Write {
        path: path.to_path_buf(),
        source,
    };
    fs::write(&tmp_path, json).await.map_err(write_error)?;
    fs::rename(&tmp_path, path).await.map_err(write_error)?;

    info!(articles = entry.total_articles, "Wrote journal entry");
    Ok(())
}
