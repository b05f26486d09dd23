//! Retraining policy.
//!
//! Every call refits from scratch on the full cleaned history once it holds
//! at least `min_rows` valid rows, and overwrites the artifact. Below the
//! threshold nothing is written and any existing artifact is left alone.

use std::path::{Path, PathBuf};

use triage_core::dataset::DatasetSnapshot;

use crate::artifact::ClassifierArtifact;
use crate::classifier::TextClassifier;
use crate::error::ModelError;
use crate::logistic::FitOptions;

/// Result of one retraining attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrainOutcome {
    NotReady {
        valid_rows: usize,
        min_rows: usize,
    },
    Retrained {
        rows: usize,
        vocabulary_size: usize,
        classes: Vec<String>,
    },
}

/// Seam between the analysis pipeline and whatever keeps the classifier
/// current.
pub trait Retrainer: Send + Sync {
    /// Refit if the snapshot is large enough.
    ///
    /// # Errors
    ///
    /// Returns a `ModelError` if fitting or persisting the artifact fails.
    fn maybe_retrain(&self, snapshot: &DatasetSnapshot) -> Result<RetrainOutcome, ModelError>;
}

/// Threshold and optimizer settings for a full refit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingParams {
    pub min_rows: usize,
    pub fit: FitOptions,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            min_rows: 3,
            fit: FitOptions::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FullRefitRetrainer {
    artifact_path: PathBuf,
    params: TrainingParams,
}

impl FullRefitRetrainer {
    #[must_use]
    pub fn new(artifact_path: impl Into<PathBuf>, params: TrainingParams) -> Self {
        Self {
            artifact_path: artifact_path.into(),
            params,
        }
    }

    #[must_use]
    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    #[must_use]
    pub const fn params(&self) -> &TrainingParams {
        &self.params
    }
}

impl Retrainer for FullRefitRetrainer {
    fn maybe_retrain(&self, snapshot: &DatasetSnapshot) -> Result<RetrainOutcome, ModelError> {
        let valid_rows = snapshot.len();
        if valid_rows == 0 || valid_rows < self.params.min_rows {
            tracing::debug!(
                valid_rows,
                min_rows = self.params.min_rows,
                "not enough cases to retrain"
            );
            return Ok(RetrainOutcome::NotReady {
                valid_rows,
                min_rows: self.params.min_rows,
            });
        }

        let classifier = TextClassifier::fit(snapshot, &self.params.fit)?;
        let vocabulary_size = classifier.vectorizer.vocabulary_size();
        let classes = classifier.classes().to_vec();

        ClassifierArtifact::new(classifier, valid_rows).save(&self.artifact_path)?;

        tracing::info!(
            rows = valid_rows,
            vocabulary_size,
            classes = classes.len(),
            path = %self.artifact_path.display(),
            "retrained classifier"
        );

        Ok(RetrainOutcome::Retrained {
            rows: valid_rows,
            vocabulary_size,
            classes,
        })
    }
}
