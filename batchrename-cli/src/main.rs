use anyhow::Result;
use batchrename_core::{Error as CoreError, FileConfig, Preview, RenameConfig};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

mod apply;
mod cli;
mod plan;
mod undo;

use cli::{Cli, Commands, RuleArgs};

fn main() {
    let cli = Cli::parse();

    let file_config = match load_file_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(2);
        }
    };

    let use_color = if cli.no_color {
        Some(false)
    } else {
        file_config.defaults.use_color
    };

    let result = run(cli.command, &file_config, use_color);

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(exit_code(&e));
    }
}

fn run(command: Commands, file_config: &FileConfig, use_color: Option<bool>) -> Result<()> {
    match command {
        Commands::Plan {
            directory,
            rules,
            preview,
            output,
            quiet,
        } => {
            let config = build_config(directory, &rules, false, None, None, file_config);
            let preview = resolve_preview(preview.map(Preview::from), file_config)?;
            plan::handle_plan(&config, preview, output.into(), quiet, use_color)
        }
        Commands::Apply {
            directory,
            rules,
            dry_run,
            backup_dir,
            log_file,
            preview,
            output,
            quiet,
        } => {
            let config = build_config(directory, &rules, dry_run, backup_dir, log_file, file_config);
            apply::handle_apply(
                &config,
                preview.map(Preview::from),
                output.into(),
                quiet,
                use_color,
            )
        }
        Commands::Undo {
            directory,
            log_file,
            output,
            quiet,
        } => undo::handle_undo(&directory, log_file, output.into(), quiet),
    }
}

fn load_file_config(path: Option<&Path>) -> Result<FileConfig> {
    let config = match path {
        Some(path) => FileConfig::load_from_path(path)?,
        None => FileConfig::load()?,
    };
    Ok(config)
}

/// The plan command always previews; an explicit flag wins over the
/// configured default format.
fn resolve_preview(flag: Option<Preview>, file_config: &FileConfig) -> Result<Preview> {
    match flag {
        Some(preview) => Ok(preview),
        None => Preview::from_str(&file_config.defaults.preview_format)
            .map_err(|e| CoreError::Config(e).into()),
    }
}

fn build_config(
    directory: PathBuf,
    rules: &RuleArgs,
    dry_run: bool,
    backup_dir: Option<PathBuf>,
    log_file: Option<PathBuf>,
    file_config: &FileConfig,
) -> RenameConfig {
    let defaults = &file_config.defaults;

    let mut config = RenameConfig::new(directory);
    config.prefix = rules.prefix.clone().unwrap_or_default();
    config.suffix = rules.suffix.clone().unwrap_or_default();
    config.numbering = rules.numbering;
    config.numbering_start = rules.numbering_start.unwrap_or(defaults.numbering_start);
    config.numbering_padding = rules
        .numbering_padding
        .unwrap_or(defaults.numbering_padding);
    config.timestamp = rules.timestamp;
    config.timestamp_format = rules
        .timestamp_format
        .clone()
        .unwrap_or_else(|| defaults.timestamp_format.clone());
    config.regex_pattern = rules.regex_pattern.clone();
    config.regex_replacement = rules.regex_replacement.clone();
    config.extensions = if rules.extensions.is_empty() {
        None
    } else {
        Some(rules.extensions.clone())
    };
    config.dry_run = dry_run;
    config.backup_dir = backup_dir;
    config.log_file = log_file;
    config
}

/// Configuration mistakes exit 2, operational failures exit 1.
fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<CoreError>() {
        Some(CoreError::Config(_)) => 2,
        _ => 1,
    }
}
