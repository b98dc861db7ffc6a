use crate::apply::ApplyReport;
use crate::plan::RenamePlan;
use crate::undo::UndoReport;
use serde::Serialize;
use serde_json::json;
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Structured result of a plan operation.
#[derive(Debug, Serialize)]
pub struct PlanSummary {
    pub directory: PathBuf,
    pub file_count: usize,
    pub unchanged_count: usize,
    pub renames: Vec<(String, String)>,
}

impl PlanSummary {
    pub fn from_plan(plan: &RenamePlan) -> Self {
        Self {
            directory: plan.directory.clone(),
            file_count: plan.len(),
            unchanged_count: plan.unchanged_count(),
            renames: plan
                .records
                .iter()
                .map(|r| (r.original_name.clone(), r.new_name.clone()))
                .collect(),
        }
    }
}

/// Format structured results for the invocation surface.
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for PlanSummary {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "plan",
            "directory": self.directory,
            "summary": {
                "files": self.file_count,
                "unchanged": self.unchanged_count,
            },
            "renames": self.renames,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        writeln!(
            output,
            "Planned {} rename(s) in {}",
            self.file_count,
            self.directory.display()
        )
        .unwrap();
        if self.unchanged_count > 0 {
            writeln!(output, "{} file(s) would keep their name", self.unchanged_count).unwrap();
        }
        output
    }
}

impl OutputFormatter for ApplyReport {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "apply",
            "dry_run": self.dry_run,
            "summary": {
                "processed": self.renamed_count,
                "renamed": self.applied_count(),
                "skipped": self.skipped_count(),
            },
            "backup_dir": self.backup_dir,
            "log_file": self.log_file,
            "records": self.records,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        if self.dry_run {
            for record in &self.records {
                writeln!(
                    output,
                    "[DRY-RUN] {} -> {}",
                    record.original_name, record.new_name
                )
                .unwrap();
            }
            writeln!(output, "Dry run: {} file(s), nothing touched", self.renamed_count).unwrap();
            return output;
        }

        writeln!(
            output,
            "✓ Renamed {} file(s), skipped {}",
            self.applied_count(),
            self.skipped_count()
        )
        .unwrap();
        if let Some(ref backup_dir) = self.backup_dir {
            writeln!(output, "Backups: {}", backup_dir.display()).unwrap();
        }
        if let Some(ref log_file) = self.log_file {
            writeln!(output, "Log: {}", log_file.display()).unwrap();
        }
        output
    }
}

impl OutputFormatter for UndoReport {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.success,
            "operation": "undo",
            "summary": {
                "restored": self.restored_count,
                "skipped": self.skipped_count,
            },
            "error": self.error,
            "log_file": self.log_file,
            "backup_dir": self.backup_dir,
            "details": self.details,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        if self.success {
            writeln!(
                output,
                "✓ Restored {} file(s), skipped {}",
                self.restored_count, self.skipped_count
            )
            .unwrap();
        } else if let Some(ref error) = self.error {
            writeln!(output, "✗ Undo failed: {}", error).unwrap();
        }

        if let Some(ref log_file) = self.log_file {
            writeln!(output, "Log: {}", log_file.display()).unwrap();
        }
        if let Some(ref backup_dir) = self.backup_dir {
            writeln!(output, "Backups: {}", backup_dir.display()).unwrap();
        }
        for detail in &self.details {
            writeln!(output, "  {}: {}", detail.original_name, detail.status).unwrap();
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_report_summary_failure() {
        let report = UndoReport {
            error: Some("no rename log files found in /work".to_string()),
            ..UndoReport::default()
        };
        let summary = report.format_summary();
        assert!(summary.contains("✗ Undo failed: no rename log files found"));
    }

    #[test]
    fn test_undo_report_json_carries_success_flag() {
        let report = UndoReport {
            success: true,
            restored_count: 2,
            skipped_count: 1,
            ..UndoReport::default()
        };
        let value: serde_json::Value = serde_json::from_str(&report.format_json()).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["summary"]["restored"], 2);
        assert_eq!(value["summary"]["skipped"], 1);
    }

    #[test]
    fn test_plan_summary_format() {
        let summary = PlanSummary {
            directory: PathBuf::from("/work"),
            file_count: 3,
            unchanged_count: 1,
            renames: vec![("a.txt".to_string(), "pre_a.txt".to_string())],
        };
        let text = summary.format(OutputFormat::Summary);
        assert!(text.contains("Planned 3 rename(s) in /work"));
        assert!(text.contains("1 file(s) would keep their name"));
    }
}
