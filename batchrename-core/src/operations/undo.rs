use crate::undo::{undo, UndoReport};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// High-level undo operation - equivalent to `batchrename undo`.
///
/// Engine-level failures (missing log, missing backups, unreadable records)
/// live inside the report rather than in the `Err` channel.
pub fn undo_operation(directory: &Path, log_file: Option<PathBuf>) -> Result<UndoReport> {
    Ok(undo(directory, log_file))
}
