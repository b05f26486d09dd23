//! Vectorizer and regression bundled as one text classifier.

use serde::{Deserialize, Serialize};
use triage_core::dataset::DatasetSnapshot;
use triage_core::responses::{ClassProbability, ModelPrediction};

use crate::error::ModelError;
use crate::logistic::{FitOptions, LogisticRegression};
use crate::tfidf::TfidfVectorizer;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextClassifier {
    pub vectorizer: TfidfVectorizer,
    pub model: LogisticRegression,
}

impl TextClassifier {
    /// Fit both stages on every row of a snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::EmptyDataset` if the snapshot has no rows.
    pub fn fit(snapshot: &DatasetSnapshot, options: &FitOptions) -> Result<Self, ModelError> {
        if snapshot.is_empty() {
            return Err(ModelError::EmptyDataset);
        }

        let vectorizer = TfidfVectorizer::fit(snapshot.texts());
        if vectorizer.vocabulary_size() == 0 {
            tracing::warn!("no usable tokens in training texts; predictions follow class priors");
        }

        let rows = vectorizer.transform_all(snapshot.texts());
        let labels: Vec<&str> = snapshot.labels().collect();
        let model = LogisticRegression::fit(&rows, &labels, vectorizer.vocabulary_size(), options)?;

        Ok(Self { vectorizer, model })
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.model.classes
    }

    /// Predict a label with per-class probabilities.
    #[must_use]
    pub fn predict(&self, text: &str) -> Option<ModelPrediction> {
        let row = self.vectorizer.transform(text);
        let label = self.model.predict(&row)?.to_string();
        let probabilities = self
            .model
            .classes
            .iter()
            .zip(self.model.probabilities(&row))
            .map(|(label, probability)| ClassProbability {
                label: label.clone(),
                probability,
            })
            .collect();

        Some(ModelPrediction {
            label,
            probabilities,
        })
    }
}
