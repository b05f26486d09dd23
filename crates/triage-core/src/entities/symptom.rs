use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A symptom phrase and its static risk percentage.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SymptomEntry {
    /// Lowercased phrase matched as a substring of the anamnesis.
    pub symptom: String,
    /// Risk percentage in `[0, 100]`.
    pub risk: f64,
}

/// A dictionary symptom found in a text.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SymptomMatch {
    pub symptom: String,
    pub risk: f64,
}

impl From<&SymptomEntry> for SymptomMatch {
    fn from(entry: &SymptomEntry) -> Self {
        Self {
            symptom: entry.symptom.clone(),
            risk: entry.risk,
        }
    }
}
