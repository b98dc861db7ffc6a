use crate::log::{find_latest_backup_dir, find_latest_log, RenameLog};
use crate::plan::RenameRecord;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Per-record status of the restoration pass.
#[derive(Debug, Clone, Serialize)]
pub struct RestoreDetail {
    pub original_name: String,
    pub status: String,
}

/// Result of an undo pass. `success` is true iff at least one record was
/// restored; all other failures are reported through `error` and `details`
/// rather than panicking or aborting the batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UndoReport {
    pub success: bool,
    pub restored_count: usize,
    pub skipped_count: usize,
    pub error: Option<String>,
    pub log_file: Option<PathBuf>,
    pub backup_dir: Option<PathBuf>,
    pub details: Vec<RestoreDetail>,
}

impl UndoReport {
    fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// Reverse the most recent apply operation in `directory`, or the one behind
/// an explicit log file.
///
/// Restoration is independent per record: one failing record is skipped with
/// its error captured in `details` and the rest of the batch continues. The
/// backup set is located as the most-recently-modified `backup_*` sibling of
/// the first record's original path, which is approximate when several apply
/// operations have run against the same directory.
pub fn undo(directory: &Path, log_file: Option<PathBuf>) -> UndoReport {
    let log_file = match log_file {
        Some(path) => path,
        None => match find_latest_log(directory) {
            Ok(path) => path,
            Err(e) => return UndoReport::failed(e.to_string()),
        },
    };

    let mut report = UndoReport {
        log_file: Some(log_file.clone()),
        ..UndoReport::default()
    };

    let log = match RenameLog::read(&log_file) {
        Ok(log) => log,
        Err(e) => {
            report.error = Some(e.to_string());
            return report;
        }
    };

    if log.renamed_files.is_empty() {
        report.error = Some("log file contains no rename records".to_string());
        return report;
    }

    let Some(parent) = log.renamed_files[0]
        .original_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
    else {
        report.error = Some("log file format invalid (missing original_path)".to_string());
        return report;
    };

    let backup_dir = match find_latest_backup_dir(&parent) {
        Ok(dir) => dir,
        Err(e) => {
            report.error = Some(e.to_string());
            return report;
        }
    };
    report.backup_dir = Some(backup_dir.clone());

    for record in &log.renamed_files {
        let (restored, status) = restore_record(record, &backup_dir);
        if restored {
            report.restored_count += 1;
        } else {
            report.skipped_count += 1;
        }
        report.details.push(RestoreDetail {
            original_name: record.original_name.clone(),
            status,
        });
    }

    report.success = report.restored_count > 0;
    if report.restored_count == 0 {
        report.error = Some("no files could be restored; check the backup directory".to_string());
    }

    report
}

/// Restore one record from its backup copy. Returns whether the record was
/// restored and the human-readable status for the report.
fn restore_record(record: &RenameRecord, backup_dir: &Path) -> (bool, String) {
    if record.is_skipped() {
        return (false, "Skipped (was not renamed)".to_string());
    }

    let backup_file = backup_dir.join(&record.original_name);
    if !backup_file.exists() {
        return (
            false,
            format!("Backup file not found: {}", record.original_name),
        );
    }

    if !record.new_path.exists() {
        return (false, format!("Current file missing: {}", record.new_name));
    }

    if let Err(e) = fs::copy(&backup_file, &record.original_path) {
        return (false, format!("Error: {e}"));
    }

    if record.new_path != record.original_path {
        if let Err(e) = fs::remove_file(&record.new_path) {
            return (false, format!("Error: {e}"));
        }
    }

    (true, "Restored successfully".to_string())
}
