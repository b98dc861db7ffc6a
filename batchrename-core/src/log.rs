use crate::error::{Error, Result};
use crate::plan::RenameRecord;
use globset::Glob;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Glob matched by log-file auto-discovery.
pub const LOG_FILE_PATTERN: &str = "rename_log_*.json";
/// Glob matched by backup-directory auto-discovery.
pub const BACKUP_DIR_PATTERN: &str = "backup_*";

/// Wall-clock format used for `renamed_at` and `generated_at` stamps.
pub(crate) const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Persisted artifact of one apply operation. Written once at the end of a
/// non-dry-run apply, read (never mutated) by the undo engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameLog {
    pub renamed_files: Vec<RenameRecord>,
    pub generated_at: String,
}

impl RenameLog {
    pub fn new(records: Vec<RenameRecord>) -> Self {
        Self {
            renamed_files: records,
            generated_at: chrono::Local::now().format(STAMP_FORMAT).to_string(),
        }
    }

    /// Write pretty-printed JSON, overwriting any existing file.
    pub fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .map_err(|e| Error::io(format!("failed to create log file {}", path.display()), e))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| Error::io(format!("failed to write log file {}", path.display()), e.into()))
    }

    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| Error::io(format!("failed to read log file {}", path.display()), e))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| Error::Config(format!("failed to parse log file {}: {e}", path.display())))
    }
}

/// Default artifacts are stamped with unix epoch seconds. Two applies within
/// the same second can collide; the discovery globs above stay authoritative.
pub fn default_backup_dir(directory: &Path) -> PathBuf {
    directory.join(format!("backup_{}", chrono::Utc::now().timestamp()))
}

pub fn default_log_file(directory: &Path) -> PathBuf {
    directory.join(format!("rename_log_{}.json", chrono::Utc::now().timestamp()))
}

/// Most recently modified log file in `directory`.
pub fn find_latest_log(directory: &Path) -> Result<PathBuf> {
    find_latest_match(directory, LOG_FILE_PATTERN, false)?.ok_or_else(|| {
        Error::NotFound(format!(
            "no rename log files found in {}",
            directory.display()
        ))
    })
}

/// Most recently modified backup directory in `directory`.
pub fn find_latest_backup_dir(directory: &Path) -> Result<PathBuf> {
    find_latest_match(directory, BACKUP_DIR_PATTERN, true)?.ok_or_else(|| {
        Error::NotFound(format!(
            "no backup directories found in {}",
            directory.display()
        ))
    })
}

fn find_latest_match(directory: &Path, pattern: &str, want_dir: bool) -> Result<Option<PathBuf>> {
    let matcher = Glob::new(pattern)
        .map_err(|e| Error::Config(format!("invalid discovery pattern {pattern}: {e}")))?
        .compile_matcher();

    let entries = fs::read_dir(directory).map_err(|e| {
        Error::io(
            format!("failed to read directory {}", directory.display()),
            e,
        )
    })?;

    let mut latest: Option<(SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::io(
                format!("failed to read directory {}", directory.display()),
                e,
            )
        })?;

        if !matcher.is_match(Path::new(&entry.file_name())) {
            continue;
        }

        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() != want_dir {
            continue;
        }

        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        if latest.as_ref().is_none_or(|(t, _)| modified >= *t) {
            latest = Some((modified, entry.path()));
        }
    }

    Ok(latest.map(|(_, path)| path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::RecordOutcome;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    fn record(outcome: Option<RecordOutcome>) -> RenameRecord {
        RenameRecord {
            original_name: "a.txt".to_string(),
            new_name: "new_a.txt".to_string(),
            original_path: PathBuf::from("/work/a.txt"),
            new_path: PathBuf::from("/work/new_a.txt"),
            outcome,
        }
    }

    #[test]
    fn test_log_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rename_log_1.json");

        let log = RenameLog::new(vec![
            record(Some(RecordOutcome::Renamed {
                renamed_at: "2024-01-01 10:00:00".to_string(),
            })),
            record(Some(RecordOutcome::Skipped {
                skipped: "Name unchanged.".to_string(),
            })),
            record(None),
        ]);
        log.write(&path).unwrap();

        let loaded = RenameLog::read(&path).unwrap();
        assert_eq!(loaded.renamed_files.len(), 3);
        assert!(loaded.renamed_files[0].is_renamed());
        assert!(loaded.renamed_files[1].is_skipped());
        assert!(loaded.renamed_files[2].outcome.is_none());
        assert_eq!(loaded.generated_at, log.generated_at);
    }

    #[test]
    fn test_log_json_shape_is_stable() {
        let log = RenameLog {
            renamed_files: vec![record(Some(RecordOutcome::Renamed {
                renamed_at: "2024-01-01 10:00:00".to_string(),
            }))],
            generated_at: "2024-01-01 10:00:01".to_string(),
        };

        let value = serde_json::to_value(&log).unwrap();
        let entry = &value["renamed_files"][0];
        assert_eq!(entry["original_name"], "a.txt");
        assert_eq!(entry["new_name"], "new_a.txt");
        assert_eq!(entry["renamed_at"], "2024-01-01 10:00:00");
        assert!(entry.get("skipped").is_none());
        assert!(entry.get("outcome").is_none());
        assert_eq!(value["generated_at"], "2024-01-01 10:00:01");
    }

    #[test]
    fn test_log_parses_skipped_and_bare_records() {
        let json = r#"{
            "renamed_files": [
                {"original_name": "a.txt", "new_name": "a.txt",
                 "original_path": "/work/a.txt", "new_path": "/work/a.txt",
                 "skipped": "Name unchanged."},
                {"original_name": "b.txt", "new_name": "c.txt",
                 "original_path": "/work/b.txt", "new_path": "/work/c.txt"}
            ],
            "generated_at": "2024-01-01 10:00:00"
        }"#;

        let log: RenameLog = serde_json::from_str(json).unwrap();
        assert!(log.renamed_files[0].is_skipped());
        assert!(log.renamed_files[1].outcome.is_none());
    }

    #[test]
    fn test_read_rejects_missing_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rename_log_1.json");
        std::fs::write(&path, r#"{"renamed_files": [{"original_name": "a"}]}"#).unwrap();

        let err = RenameLog::read(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_find_latest_log_prefers_recent_mtime() {
        let temp = TempDir::new().unwrap();
        let older = temp.path().join("rename_log_100.json");
        let newer = temp.path().join("rename_log_50.json");
        std::fs::write(&older, "{}").unwrap();
        thread::sleep(Duration::from_millis(20));
        std::fs::write(&newer, "{}").unwrap();

        // Selection is by modification time, not by the epoch in the name.
        assert_eq!(find_latest_log(temp.path()).unwrap(), newer);
    }

    #[test]
    fn test_find_latest_log_ignores_other_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("notes.json"), "{}").unwrap();

        let err = find_latest_log(temp.path()).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_find_latest_backup_dir_wants_directories() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("backup_1"), "a file, not a dir").unwrap();
        std::fs::create_dir(temp.path().join("backup_2")).unwrap();

        let found = find_latest_backup_dir(temp.path()).unwrap();
        assert_eq!(found, temp.path().join("backup_2"));
    }
}
