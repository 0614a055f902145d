use std::path::PathBuf;

use crate::reference::BlobRef;

/// Errors from blob store operations.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// The referenced blob has no backing file.
    #[error("blob not found: {0}")]
    NotFound(BlobRef),

    /// Writing blob content failed (disk full, permissions, ...).
    #[error("failed to store blob {blob}: {source}")]
    Storage {
        blob: BlobRef,
        source: std::io::Error,
    },

    /// The blob root directory could not be created.
    #[error("cannot prepare blob root {}: {source}", .path.display())]
    Root {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Any other I/O error from the underlying filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for blob store operations.
pub type BlobResult<T> = Result<T, BlobError>;
