use crate::config::RenameConfig;
use crate::error::{Error, Result};
use crate::log::{default_backup_dir, default_log_file, RenameLog, STAMP_FORMAT};
use crate::plan::{RecordOutcome, RenamePlan, RenameRecord};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Result of applying a plan.
///
/// `renamed_count` counts every processed record, including skipped ones;
/// subtract `skipped_count()` for the number of physical renames.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    pub renamed_count: usize,
    pub backup_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub dry_run: bool,
    pub records: Vec<RenameRecord>,
}

impl ApplyReport {
    /// Records that were physically renamed.
    pub fn applied_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_renamed()).count()
    }

    /// Records skipped because the name did not change.
    pub fn skipped_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_skipped()).count()
    }
}

/// Execute a plan: back up originals, rename, and persist the log.
///
/// Dry-run returns the records untouched and reports no artifacts. A
/// conflict aborts the remainder of the batch; records already renamed stay
/// renamed and no log is written for the aborted operation.
pub fn apply_plan(plan: &RenamePlan, config: &RenameConfig) -> Result<ApplyReport> {
    if config.dry_run {
        return Ok(ApplyReport {
            renamed_count: plan.records.len(),
            backup_dir: None,
            log_file: None,
            dry_run: true,
            records: plan.records.clone(),
        });
    }

    let backup_dir = config
        .backup_dir
        .clone()
        .unwrap_or_else(|| default_backup_dir(&plan.directory));
    let log_file = config
        .log_file
        .clone()
        .unwrap_or_else(|| default_log_file(&plan.directory));

    let mut records = Vec::with_capacity(plan.records.len());
    let mut backup_ready = false;

    for record in &plan.records {
        let mut record = record.clone();

        // Paths are both rooted at the canonicalized plan directory, so
        // equality means the computed name matches the current name.
        if record.new_path == record.original_path {
            record.outcome = Some(RecordOutcome::Skipped {
                skipped: "Name unchanged.".to_string(),
            });
            records.push(record);
            continue;
        }

        if record.new_path.exists() {
            return Err(Error::Conflict(record.new_path.clone()));
        }

        if !backup_ready {
            fs::create_dir_all(&backup_dir).map_err(|e| {
                Error::io(
                    format!("failed to create backup directory {}", backup_dir.display()),
                    e,
                )
            })?;
            backup_ready = true;
        }

        let backup_path = backup_dir.join(&record.original_name);
        fs::copy(&record.original_path, &backup_path).map_err(|e| {
            Error::io(
                format!(
                    "failed to back up {} to {}",
                    record.original_path.display(),
                    backup_path.display()
                ),
                e,
            )
        })?;

        fs::rename(&record.original_path, &record.new_path).map_err(|e| {
            Error::io(
                format!(
                    "failed to rename {} to {}",
                    record.original_path.display(),
                    record.new_path.display()
                ),
                e,
            )
        })?;

        record.outcome = Some(RecordOutcome::Renamed {
            renamed_at: chrono::Local::now().format(STAMP_FORMAT).to_string(),
        });
        records.push(record);
    }

    let log = RenameLog::new(records);
    log.write(&log_file)?;

    Ok(ApplyReport {
        renamed_count: log.renamed_files.len(),
        backup_dir: Some(backup_dir),
        log_file: Some(log_file),
        dry_run: false,
        records: log.renamed_files,
    })
}
