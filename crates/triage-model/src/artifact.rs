//! Persisted classifier artifact.
//!
//! A single JSON document at `.triage/model.json` by default. Saves go to a
//! temporary file in the same directory and are renamed over the old
//! artifact, so a reader never sees a partially written model.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use triage_core::responses::ModelPrediction;

use crate::classifier::TextClassifier;
use crate::error::ModelError;

/// Current artifact format version.
pub const ARTIFACT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifierArtifact {
    pub v: u32,
    pub trained_at: DateTime<Utc>,
    /// Training rows the classifier was fitted on.
    pub rows: usize,
    pub classifier: TextClassifier,
}

impl ClassifierArtifact {
    #[must_use]
    pub fn new(classifier: TextClassifier, rows: usize) -> Self {
        Self {
            v: ARTIFACT_VERSION,
            trained_at: Utc::now(),
            rows,
            classifier,
        }
    }

    #[must_use]
    pub fn predict(&self, text: &str) -> Option<ModelPrediction> {
        self.classifier.predict(text)
    }

    /// Write the artifact, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Io` if the directory, temp file, or rename fails.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;

        let body = serde_json::to_vec(self)?;
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| io_error(dir, e))?;
        temp.write_all(&body).map_err(|e| io_error(temp.path(), e))?;
        temp.flush().map_err(|e| io_error(temp.path(), e))?;
        temp.persist(path).map_err(|e| io_error(path, e.error))?;

        tracing::debug!(path = %path.display(), rows = self.rows, "saved classifier artifact");
        Ok(())
    }

    /// Load the artifact if one exists.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Io` if the file cannot be read,
    /// `ModelError::Serialization` if it is malformed, and
    /// `ModelError::UnsupportedVersion` for an unknown format version.
    pub fn load(path: &Path) -> Result<Option<Self>, ModelError> {
        if !path.is_file() {
            return Ok(None);
        }
        let body = std::fs::read(path).map_err(|e| io_error(path, e))?;
        let artifact: Self = serde_json::from_slice(&body)?;
        if artifact.v != ARTIFACT_VERSION {
            return Err(ModelError::UnsupportedVersion {
                found: artifact.v,
                expected: ARTIFACT_VERSION,
            });
        }
        Ok(Some(artifact))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ModelError {
    ModelError::Io {
        path: path.to_path_buf(),
        source,
    }
}
