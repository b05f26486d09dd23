//! # triage-model
//!
//! The secondary text classifier: a TF-IDF vectorizer feeding a multinomial
//! logistic regression, persisted as a single JSON artifact and refitted from
//! scratch by a [`Retrainer`].
//!
//! The classifier never influences the primary decision; it is a signal
//! reported next to it.

pub mod artifact;
pub mod classifier;
pub mod error;
pub mod logistic;
pub mod retrainer;
pub mod tfidf;

pub use artifact::ClassifierArtifact;
pub use classifier::TextClassifier;
pub use error::ModelError;
pub use retrainer::{FullRefitRetrainer, RetrainOutcome, Retrainer, TrainingParams};
