use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for merge/export operations.
pub type MergeResult<T> = Result<T, MergeError>;

/// Error type returned by file acquisition and export functions.
///
/// The merge itself never fails: malformed rows, ragged field counts and duplicate headers all
/// degrade to empty cells. Errors only come from the collaborators around it.
#[derive(Debug, Error)]
pub enum MergeError {
    /// Underlying I/O error (e.g. file not found, permission denied, export target not writable).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Error raised by the CSV writer during escaped CSV export.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The file does not look like a tab-separated file and was skipped.
    #[error("rejected input '{}': {reason}", path.display())]
    RejectedInput { path: PathBuf, reason: String },

    /// The file content is not valid UTF-8 text.
    #[error("input '{}' is not valid UTF-8", path.display())]
    InvalidEncoding { path: PathBuf },
}
