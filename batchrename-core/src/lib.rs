#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::uninlined_format_args)]

pub mod apply;
pub mod config;
pub mod error;
pub mod log;
pub mod operations;
pub mod output;
pub mod plan;
pub mod preview;
pub mod undo;

pub use apply::{apply_plan, ApplyReport};
pub use config::{FileConfig, FileDefaults, RenameConfig};
pub use error::{Error, Result};
pub use log::{
    default_backup_dir, default_log_file, find_latest_backup_dir, find_latest_log, RenameLog,
    BACKUP_DIR_PATTERN, LOG_FILE_PATTERN,
};
pub use operations::{apply_operation, plan_operation, undo_operation};
pub use output::{OutputFormat, OutputFormatter, PlanSummary};
pub use plan::{build_plan, RecordOutcome, RenamePlan, RenameRecord};
pub use preview::{render_plan, should_use_color, Preview};
pub use undo::{undo, RestoreDetail, UndoReport};
