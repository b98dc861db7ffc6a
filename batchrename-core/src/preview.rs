use crate::plan::RenamePlan;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use nu_ansi_term::Color as AnsiColor;
use std::fmt::Write;
use std::io::{self, IsTerminal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Table,
    Summary,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "summary" => Ok(Self::Summary),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Honor an explicit color preference, otherwise detect a terminal.
pub fn should_use_color(use_color: Option<bool>) -> bool {
    match use_color {
        Some(explicit) => explicit,
        None => io::stdout().is_terminal(),
    }
}

/// Render the plan in the specified format.
pub fn render_plan(plan: &RenamePlan, format: Preview, use_color: Option<bool>) -> String {
    let use_color = should_use_color(use_color);

    match format {
        Preview::Table => render_table(plan, use_color),
        Preview::Summary => render_summary(plan, use_color),
        Preview::None => String::new(),
    }
}

fn render_table(plan: &RenamePlan, use_color: bool) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("Original").fg(Color::Cyan),
            Cell::new("New").fg(Color::Cyan),
            Cell::new("Note").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["Original", "New", "Note"]);
    }

    for record in &plan.records {
        let note = if record.new_name == record.original_name {
            "unchanged"
        } else {
            ""
        };
        table.add_row(vec![
            record.original_name.as_str(),
            record.new_name.as_str(),
            note,
        ]);
    }

    table.to_string()
}

fn render_summary(plan: &RenamePlan, use_color: bool) -> String {
    let unchanged = plan.unchanged_count();
    let changed = plan.len() - unchanged;

    let changed_str = if use_color {
        AnsiColor::Green.paint(changed.to_string()).to_string()
    } else {
        changed.to_string()
    };
    let unchanged_str = if use_color {
        AnsiColor::Yellow.paint(unchanged.to_string()).to_string()
    } else {
        unchanged.to_string()
    };

    let mut output = String::new();
    writeln!(output, "Directory: {}", plan.directory.display()).unwrap();
    writeln!(
        output,
        "Files: {} ({} to rename, {} unchanged)",
        plan.len(),
        changed_str,
        unchanged_str
    )
    .unwrap();
    output
}
