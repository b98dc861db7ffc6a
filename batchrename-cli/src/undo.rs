use anyhow::{anyhow, Result};
use batchrename_core::{undo_operation, OutputFormat, OutputFormatter};
use std::path::{Path, PathBuf};

pub fn handle_undo(
    directory: &Path,
    log_file: Option<PathBuf>,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let report = undo_operation(directory, log_file)?;

    match output {
        OutputFormat::Json => print!("{}", report.format_json()),
        OutputFormat::Summary => {
            if !quiet {
                print!("{}", report.format_summary());
            }
        }
    }

    if !report.success {
        // Details were already printed; keep the terminal error terse.
        return Err(anyhow!("undo failed"));
    }

    Ok(())
}
