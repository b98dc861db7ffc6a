use anyhow::Result;
use batchrename_core::{apply_operation, OutputFormat, OutputFormatter, Preview, RenameConfig};

pub fn handle_apply(
    config: &RenameConfig,
    preview: Option<Preview>,
    output: OutputFormat,
    quiet: bool,
    use_color: Option<bool>,
) -> Result<()> {
    let (report, preview_text) = apply_operation(config, preview, use_color)?;

    if let Some(text) = preview_text {
        println!("{}", text);
    }

    match output {
        OutputFormat::Json => print!("{}", report.format_json()),
        OutputFormat::Summary => {
            if !quiet {
                print!("{}", report.format_summary());
            }
        }
    }

    Ok(())
}
