use crate::error::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for a single rename operation.
///
/// All name-computation rules are optional and compose in a fixed order:
/// regex substitution, prefix, suffix, numbering, timestamp. The extension
/// allow-list is matched case-insensitively and normalized to include the
/// leading dot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameConfig {
    /// Directory whose immediate files are renamed.
    pub directory: PathBuf,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub numbering: bool,
    #[serde(default = "default_numbering_start")]
    pub numbering_start: u32,
    #[serde(default = "default_numbering_padding")]
    pub numbering_padding: usize,
    #[serde(default)]
    pub timestamp: bool,
    /// strftime template for the timestamp token.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default)]
    pub regex_pattern: Option<String>,
    #[serde(default)]
    pub regex_replacement: Option<String>,
    /// Extension allow-list; `None` keeps every file.
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
    #[serde(default)]
    pub dry_run: bool,
    /// Override for the default `backup_<epoch>` directory.
    #[serde(default)]
    pub backup_dir: Option<PathBuf>,
    /// Override for the default `rename_log_<epoch>.json` path.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_numbering_start() -> u32 {
    1
}

fn default_numbering_padding() -> usize {
    3
}

fn default_timestamp_format() -> String {
    "%Y%m%d%H%M%S".to_string()
}

impl RenameConfig {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            prefix: String::new(),
            suffix: String::new(),
            numbering: false,
            numbering_start: default_numbering_start(),
            numbering_padding: default_numbering_padding(),
            timestamp: false,
            timestamp_format: default_timestamp_format(),
            regex_pattern: None,
            regex_replacement: None,
            extensions: None,
            dry_run: false,
            backup_dir: None,
            log_file: None,
        }
    }

    /// Validate the configuration before any filesystem side effect.
    pub fn validate(&self) -> Result<()> {
        if self.directory.as_os_str().is_empty() {
            return Err(Error::Config("a directory path is required".to_string()));
        }

        if !self.directory.exists() {
            return Err(Error::NotFound(format!(
                "directory not found: {}",
                self.directory.display()
            )));
        }

        if !self.directory.is_dir() {
            return Err(Error::Config(format!(
                "path is not a directory: {}",
                self.directory.display()
            )));
        }

        if self.regex_pattern.is_some() != self.regex_replacement.is_some() {
            return Err(Error::Config(
                "regex pattern and replacement must be provided together".to_string(),
            ));
        }

        if self.timestamp {
            validate_timestamp_format(&self.timestamp_format)?;
        }

        Ok(())
    }

    /// Extension filters normalized to lowercase with a leading dot.
    /// Empty entries are discarded; an empty list behaves like no filter.
    pub fn normalized_extensions(&self) -> Option<Vec<String>> {
        let extensions = self.extensions.as_ref()?;
        let normalized: Vec<String> = extensions
            .iter()
            .filter(|ext| !ext.is_empty())
            .map(|ext| {
                let ext = ext.to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect();

        if normalized.is_empty() {
            None
        } else {
            Some(normalized)
        }
    }
}

/// A bad strftime template would otherwise only surface as a formatting
/// failure deep inside name computation.
fn validate_timestamp_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(Error::Config(format!(
            "invalid timestamp format: {format}"
        )));
    }
    Ok(())
}

/// Optional defaults file merged under CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub defaults: FileDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDefaults {
    #[serde(default = "default_numbering_start")]
    pub numbering_start: u32,

    #[serde(default = "default_numbering_padding")]
    pub numbering_padding: usize,

    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Default preview format: "table", "summary" or "none"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl Default for FileDefaults {
    fn default() -> Self {
        Self {
            numbering_start: default_numbering_start(),
            numbering_padding: default_numbering_padding(),
            timestamp_format: default_timestamp_format(),
            preview_format: default_preview(),
            use_color: None,
        }
    }
}

fn default_preview() -> String {
    "table".to_string()
}

impl FileConfig {
    /// Load `batchrename.toml` from the working directory if it exists.
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join("batchrename.toml");
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read config file {}", path.display()), e))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
    }
}
