//! CLI response types returned by `triage` commands.
//!
//! These structs define the shape of output for `triage analyze`,
//! `triage retrain`, `triage predict`, and the `triage cases` family.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analysis::Analysis;
use crate::entities::CaseRecord;

/// Result of one retraining round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RetrainStatus {
    /// Too few valid rows; the artifact was left untouched.
    NotReady,
    /// A fresh artifact was fitted and written.
    Retrained,
    /// Retraining is switched off in configuration.
    Disabled,
    /// The case was recorded but fitting or writing the artifact failed.
    Failed,
}

/// Report of one retraining round.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RetrainReport {
    pub status: RetrainStatus,
    pub valid_rows: usize,
    pub dropped_rows: usize,
    pub min_rows: usize,
    pub vocabulary_size: Option<usize>,
    pub classes: Vec<String>,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Probability of a single class label.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ClassProbability {
    pub label: String,
    pub probability: f64,
}

/// Classifier output for one text.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ModelPrediction {
    pub label: String,
    pub probabilities: Vec<ClassProbability>,
}

/// Response from `triage analyze`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AnalyzeResponse {
    pub analysis: Analysis,
    /// Whether the case was appended to the case log.
    pub recorded: bool,
    /// `None` for dry runs.
    pub retrain: Option<RetrainReport>,
    /// Secondary signal from the current classifier, if one exists.
    pub model_decision: Option<ModelPrediction>,
}

/// Response from `triage predict`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PredictResponse {
    pub model_available: bool,
    pub prediction: Option<ModelPrediction>,
}

/// Response from `triage cases list`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CaseListResponse {
    pub total: usize,
    pub cases: Vec<CaseRecord>,
}

/// Response from `triage cases import`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportResponse {
    pub source: String,
    pub imported: usize,
    pub skipped: usize,
}

/// Response from `triage cases stats`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CaseStatsResponse {
    pub total: usize,
    pub admitted: usize,
    pub discharged: usize,
    pub unreadable_lines: usize,
    pub mean_risk: Option<f64>,
    pub model_available: bool,
}

/// Response from `triage init`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InitResponse {
    pub project_root: String,
    pub created: Vec<String>,
}
