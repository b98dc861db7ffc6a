use crate::output::PlanSummary;
use crate::preview::{render_plan, Preview};
use crate::{build_plan, RenameConfig};
use anyhow::{Context, Result};

/// High-level plan operation - computes a plan without touching any file.
pub fn plan_operation(
    config: &RenameConfig,
    preview_format: Option<Preview>,
    use_color: Option<bool>,
) -> Result<(PlanSummary, Option<String>)> {
    let plan = build_plan(config).context("failed to build rename plan")?;

    let preview = preview_format
        .filter(|format| *format != Preview::None)
        .map(|format| render_plan(&plan, format, use_color));

    Ok((PlanSummary::from_plan(&plan), preview))
}
