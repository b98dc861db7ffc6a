use crate::config::RenameConfig;
use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Outcome stamped onto a record while the apply engine processes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Renamed { renamed_at: String },
    Skipped { skipped: String },
}

/// One row of a plan and, later, of the persisted log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "RecordWire", from = "RecordWire")]
pub struct RenameRecord {
    pub original_name: String,
    pub new_name: String,
    pub original_path: PathBuf,
    pub new_path: PathBuf,
    /// Absent during dry-run and before the apply engine reaches the record.
    pub outcome: Option<RecordOutcome>,
}

/// On-disk shape of a record. The optional `renamed_at` / `skipped` keys keep
/// the log format compatible with logs written by other producers.
#[derive(Serialize, Deserialize)]
struct RecordWire {
    original_name: String,
    new_name: String,
    original_path: PathBuf,
    new_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    renamed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    skipped: Option<String>,
}

impl From<RenameRecord> for RecordWire {
    fn from(record: RenameRecord) -> Self {
        let (renamed_at, skipped) = match record.outcome {
            Some(RecordOutcome::Renamed { renamed_at }) => (Some(renamed_at), None),
            Some(RecordOutcome::Skipped { skipped }) => (None, Some(skipped)),
            None => (None, None),
        };
        Self {
            original_name: record.original_name,
            new_name: record.new_name,
            original_path: record.original_path,
            new_path: record.new_path,
            renamed_at,
            skipped,
        }
    }
}

impl From<RecordWire> for RenameRecord {
    fn from(wire: RecordWire) -> Self {
        // A skip annotation wins if a record somehow carries both keys.
        let outcome = match (wire.skipped, wire.renamed_at) {
            (Some(skipped), _) => Some(RecordOutcome::Skipped { skipped }),
            (None, Some(renamed_at)) => Some(RecordOutcome::Renamed { renamed_at }),
            (None, None) => None,
        };
        Self {
            original_name: wire.original_name,
            new_name: wire.new_name,
            original_path: wire.original_path,
            new_path: wire.new_path,
            outcome,
        }
    }
}

impl RenameRecord {
    pub fn is_renamed(&self) -> bool {
        matches!(self.outcome, Some(RecordOutcome::Renamed { .. }))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, Some(RecordOutcome::Skipped { .. }))
    }
}

/// Ordered rename mappings for one directory. Record order is discovery
/// order and is the numbering source of truth, preserved into the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamePlan {
    /// Canonicalized target directory.
    pub directory: PathBuf,
    pub records: Vec<RenameRecord>,
}

impl RenamePlan {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose computed name matches the current name.
    pub fn unchanged_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.new_name == r.original_name)
            .count()
    }
}

/// Compute the rename plan for `config` without mutating the filesystem.
pub fn build_plan(config: &RenameConfig) -> Result<RenamePlan> {
    config.validate()?;

    let directory = config.directory.canonicalize().map_err(|e| {
        Error::io(
            format!("failed to resolve directory {}", config.directory.display()),
            e,
        )
    })?;

    let substitution = compile_substitution(config)?;
    let extensions = config.normalized_extensions();
    let files = collect_files(&directory, extensions.as_deref())?;

    if files.is_empty() {
        return Err(Error::NotFound(format!(
            "no files found to rename in {} (check the directory or extension filters)",
            directory.display()
        )));
    }

    let mut records = Vec::with_capacity(files.len());
    let mut counter = config.numbering_start;

    for path in files {
        let original_name = path
            .file_name()
            .unwrap_or_else(|| path.as_os_str())
            .to_string_lossy()
            .into_owned();
        let new_name = build_new_name(&original_name, config, substitution.as_ref(), counter)?;
        let new_path = directory.join(&new_name);

        if config.numbering {
            counter += 1;
        }

        records.push(RenameRecord {
            original_name,
            new_name,
            original_path: path,
            new_path,
            outcome: None,
        });
    }

    Ok(RenamePlan { directory, records })
}

fn compile_substitution(config: &RenameConfig) -> Result<Option<(Regex, String)>> {
    match (&config.regex_pattern, &config.regex_replacement) {
        (Some(pattern), Some(replacement)) => {
            let regex = Regex::new(pattern)
                .map_err(|e| Error::Config(format!("invalid regex pattern: {e}")))?;
            Ok(Some((regex, replacement.clone())))
        }
        // Both-or-neither is enforced by RenameConfig::validate.
        _ => Ok(None),
    }
}

/// List the immediate regular files of `directory`, filtered by extension,
/// sorted by path for a deterministic plan.
fn collect_files(directory: &Path, extensions: Option<&[String]>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(directory).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            Error::io(
                format!("failed to list directory {}", directory.display()),
                e.into(),
            )
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(extensions) = extensions {
            let ext = entry
                .path()
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()));
            if !ext.is_some_and(|e| extensions.contains(&e)) {
                continue;
            }
        }

        files.push(entry.into_path());
    }

    files.sort();
    Ok(files)
}

/// Apply the configured rules to one file name. Rules act on the stem in a
/// fixed order; the extension is preserved unmodified.
fn build_new_name(
    original_name: &str,
    config: &RenameConfig,
    substitution: Option<&(Regex, String)>,
    counter: u32,
) -> Result<String> {
    let (stem, extension) = split_name(original_name);

    let mut new_stem = match substitution {
        Some((regex, replacement)) => regex.replace_all(stem, replacement.as_str()).into_owned(),
        None => stem.to_string(),
    };

    if new_stem.is_empty() {
        return Err(Error::Config(format!(
            "regex produced an empty file name for {original_name}"
        )));
    }

    if !config.prefix.is_empty() {
        new_stem.insert_str(0, &config.prefix);
    }

    if !config.suffix.is_empty() {
        new_stem.push_str(&config.suffix);
    }

    if config.numbering {
        new_stem.push_str(&format!(
            "{counter:0width$}",
            width = config.numbering_padding
        ));
    }

    if config.timestamp {
        // Evaluated once per file; files in the same batch may get different
        // stamps across a second boundary.
        let stamp = chrono::Local::now()
            .format(&config.timestamp_format)
            .to_string()
            .replace(' ', "_");
        new_stem.push_str(&stamp);
    }

    Ok(format!("{new_stem}{extension}"))
}

/// Split a file name into stem and extension, keeping the dot on the
/// extension. Leading dots never start an extension, so dotfiles like
/// `.gitignore` keep their full name as the stem.
fn split_name(name: &str) -> (&str, &str) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(idx) if idx > 0 => name.split_at(leading + idx),
        _ => (name, ""),
    }
}
