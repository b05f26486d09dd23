//! Model error types for triage-model.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from fitting, loading, or saving the classifier.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Fitting was attempted on no rows.
    #[error("Cannot fit a classifier on an empty dataset")]
    EmptyDataset,

    /// Texts and labels differ in length.
    #[error("Got {texts} texts but {labels} labels")]
    LengthMismatch { texts: usize, labels: usize },

    /// The artifact was written by an unsupported format version.
    #[error("Unsupported classifier artifact version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// Reading or writing the artifact failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not valid JSON for this format.
    #[error("Malformed classifier artifact: {0}")]
    Serialization(#[from] serde_json::Error),
}
