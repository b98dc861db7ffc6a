use crate::apply::{apply_plan, ApplyReport};
use crate::preview::{render_plan, Preview};
use crate::{build_plan, RenameConfig};
use anyhow::{Context, Result};

/// High-level apply operation - builds the plan and executes it, honoring
/// the configured dry-run flag.
pub fn apply_operation(
    config: &RenameConfig,
    preview_format: Option<Preview>,
    use_color: Option<bool>,
) -> Result<(ApplyReport, Option<String>)> {
    let plan = build_plan(config).context("failed to build rename plan")?;

    let preview = preview_format
        .filter(|format| *format != Preview::None)
        .map(|format| render_plan(&plan, format, use_color));

    let report = apply_plan(&plan, config).context("failed to apply rename plan")?;

    Ok((report, preview))
}
