//! Storage error types for triage-store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from file-backed storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required resource file does not exist.
    #[error("Resource not found: {}", path.display())]
    MissingResource { path: PathBuf },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Another writer kept the case log lock past the wait limit.
    #[error("case log is locked by another writer: {}", path.display())]
    Locked { path: PathBuf },

    /// Stored data failed domain validation.
    #[error(transparent)]
    Core(#[from] triage_core::errors::CoreError),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
