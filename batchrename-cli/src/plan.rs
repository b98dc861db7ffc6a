use anyhow::Result;
use batchrename_core::{plan_operation, OutputFormat, OutputFormatter, Preview, RenameConfig};

pub fn handle_plan(
    config: &RenameConfig,
    preview: Preview,
    output: OutputFormat,
    quiet: bool,
    use_color: Option<bool>,
) -> Result<()> {
    let (summary, preview_text) = plan_operation(config, Some(preview), use_color)?;

    if let Some(text) = preview_text {
        println!("{}", text);
    }

    match output {
        OutputFormat::Json => print!("{}", summary.format_json()),
        OutputFormat::Summary => {
            if !quiet {
                print!("{}", summary.format_summary());
            }
        }
    }

    Ok(())
}
