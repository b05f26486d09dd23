//! Keyword risk scorer.
//!
//! A literal, case-insensitive substring scan of the anamnesis against every
//! dictionary phrase. All hits are reported; the score is the worst one.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::SymptomMatch;
use crate::symptoms::SymptomDictionary;

/// Matches found in one text and the maximum risk among them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ScoreResult {
    /// Hits in dictionary order. Equal-risk hits are all kept.
    pub matches: Vec<SymptomMatch>,
    /// Highest matched risk, `0.0` when nothing matched.
    pub max_risk: f64,
}

/// Scans texts against a borrowed symptom dictionary.
pub struct RiskScorer<'a> {
    dictionary: &'a SymptomDictionary,
}

impl<'a> RiskScorer<'a> {
    #[must_use]
    pub const fn new(dictionary: &'a SymptomDictionary) -> Self {
        Self { dictionary }
    }

    /// Score a text. Pure; no validation is applied here.
    #[must_use]
    pub fn score(&self, text: &str) -> ScoreResult {
        let haystack = text.trim().to_lowercase();

        let matches = self
            .dictionary
            .entries()
            .iter()
            .filter(|entry| haystack.contains(entry.symptom.as_str()))
            .map(SymptomMatch::from)
            .collect::<Vec<_>>();

        let max_risk = matches
            .iter()
            .map(|hit| hit.risk)
            .fold(0.0_f64, f64::max);

        ScoreResult { matches, max_risk }
    }
}
