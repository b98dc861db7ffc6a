use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::types::{OutputFormatArg, PreviewArg};

/// Rule-based bulk file renaming with reversible apply and undo
#[derive(Parser, Debug)]
#[command(name = "batchrename")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Load defaults from this TOML file instead of ./batchrename.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Renaming rule flags shared by plan and apply
#[derive(Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// Prefix prepended to every file stem
    #[arg(long)]
    pub prefix: Option<String>,

    /// Suffix appended to every file stem
    #[arg(long)]
    pub suffix: Option<String>,

    /// Append a sequential counter to every file stem
    #[arg(short = 'n', long)]
    pub numbering: bool,

    /// First value of the sequential counter
    #[arg(long, value_name = "N")]
    pub numbering_start: Option<u32>,

    /// Zero-pad the counter to this width (0 disables padding)
    #[arg(long, value_name = "WIDTH")]
    pub numbering_padding: Option<usize>,

    /// Append a timestamp to every file stem
    #[arg(short = 't', long)]
    pub timestamp: bool,

    /// strftime template for --timestamp
    #[arg(long, value_name = "FORMAT")]
    pub timestamp_format: Option<String>,

    /// Regex applied to every file stem (all matches are replaced)
    #[arg(long, value_name = "PATTERN", requires = "regex_replacement")]
    pub regex_pattern: Option<String>,

    /// Replacement text for --regex-pattern matches
    #[arg(long, value_name = "TEXT", requires = "regex_pattern")]
    pub regex_replacement: Option<String>,

    /// Only rename files with these extensions (comma-separated, case-insensitive)
    #[arg(long = "ext", value_name = "EXT", value_delimiter = ',')]
    pub extensions: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute and preview a rename plan without touching any file
    Plan {
        /// Directory holding the files to rename
        directory: PathBuf,

        #[command(flatten)]
        rules: RuleArgs,

        /// Preview format (defaults to the configured preview_format)
        #[arg(long, value_enum, value_name = "FORMAT")]
        preview: Option<PreviewArg>,

        /// Output format for the result
        #[arg(long, value_enum, default_value_t = OutputFormatArg::Summary)]
        output: OutputFormatArg,

        /// Suppress the summary output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Rename files, backing up originals and writing an undo log
    Apply {
        /// Directory holding the files to rename
        directory: PathBuf,

        #[command(flatten)]
        rules: RuleArgs,

        /// Report what would be renamed without touching any file
        #[arg(long)]
        dry_run: bool,

        /// Directory for backup copies (default: backup_<epoch> inside DIRECTORY)
        #[arg(long, value_name = "PATH")]
        backup_dir: Option<PathBuf>,

        /// Path of the JSON rename log (default: rename_log_<epoch>.json inside DIRECTORY)
        #[arg(long, value_name = "PATH")]
        log_file: Option<PathBuf>,

        /// Preview format printed before the result
        #[arg(long, value_enum, value_name = "FORMAT")]
        preview: Option<PreviewArg>,

        /// Output format for the result
        #[arg(long, value_enum, default_value_t = OutputFormatArg::Summary)]
        output: OutputFormatArg,

        /// Suppress the summary output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Restore the most recent rename operation from its log and backups
    Undo {
        /// Directory where the rename was applied
        directory: PathBuf,

        /// Use this log file instead of the most recently modified one
        #[arg(long, value_name = "PATH")]
        log_file: Option<PathBuf>,

        /// Output format for the result
        #[arg(long, value_enum, default_value_t = OutputFormatArg::Summary)]
        output: OutputFormatArg,

        /// Suppress the summary output
        #[arg(short, long)]
        quiet: bool,
    },
}
