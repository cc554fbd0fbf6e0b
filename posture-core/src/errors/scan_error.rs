//! File-walk errors.

use std::path::PathBuf;

/// Errors that can occur while walking the project tree.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Project path does not exist: {0}")]
    MissingRoot(PathBuf),

    #[error("Walk error under {root}: {message}")]
    Walk { root: PathBuf, message: String },

    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidExclude { pattern: String, message: String },
}
