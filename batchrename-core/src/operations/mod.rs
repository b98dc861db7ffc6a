mod apply;
mod plan;
mod undo;

pub use apply::apply_operation;
pub use plan::plan_operation;
pub use undo::undo_operation;
