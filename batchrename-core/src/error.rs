use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error taxonomy for the rename engine.
///
/// `Config` and `NotFound` are raised before any filesystem mutation;
/// `Conflict` aborts the remainder of an apply batch while leaving earlier
/// renames in place; `Io` carries the path context of the failing call.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or contradictory configuration, including regexes that do not
    /// compile and substitutions that would produce an empty file name.
    #[error("{0}")]
    Config(String),

    /// Missing directory, no matching files, or no log/backup set for undo.
    #[error("{0}")]
    NotFound(String),

    /// A rename destination already exists on disk.
    #[error("target file already exists: {}", .0.display())]
    Conflict(PathBuf),

    /// Filesystem access failure.
    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
