//! Decision and commentary enums.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Triage recommendation for a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Hospitalize the patient.
    Admit,
    /// Treat with medication and send home.
    DischargeWithMedication,
}

impl Decision {
    /// Return the string representation used in the case log and as the
    /// classifier label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admit => "admit",
            Self::DischargeWithMedication => "discharge_with_medication",
        }
    }

    /// Human-facing wording.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admit => "Admit",
            Self::DischargeWithMedication => "Medicate and send home",
        }
    }

    /// Parse a stored label, including the labels written by the legacy
    /// comma-delimited dataset.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownDecision` if the label is not recognised.
    pub fn parse_label(raw: &str) -> Result<Self, CoreError> {
        let normalized = raw.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "admit" | "internar" => Ok(Self::Admit),
            "discharge_with_medication" | "discharge" | "medicar e enviar para casa" => {
                Ok(Self::DischargeWithMedication)
            }
            _ => Err(CoreError::UnknownDecision(raw.to_string())),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s)
    }
}

// ---------------------------------------------------------------------------
// Commentary
// ---------------------------------------------------------------------------

/// Qualitative outcome band shown next to the decision.
///
/// Bands are cut at 30 and 70 and are independent of the admit cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Commentary {
    /// Risk >= 70.
    HighMortality,
    /// Risk in [30, 70).
    ModerateMortality,
    /// Risk < 30.
    HighRecovery,
}

impl Commentary {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HighMortality => "high_mortality",
            Self::ModerateMortality => "moderate_mortality",
            Self::HighRecovery => "high_recovery",
        }
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::HighMortality => "High probability of death or euthanasia after admission.",
            Self::ModerateMortality => "Moderate probability of death after admission.",
            Self::HighRecovery => "High chance of recovery after admission.",
        }
    }
}

impl fmt::Display for Commentary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_serializes_snake_case() {
        let json = serde_json::to_string(&Decision::DischargeWithMedication).unwrap();
        assert_eq!(json, "\"discharge_with_medication\"");
    }

    #[test]
    fn decision_parses_legacy_labels() {
        assert_eq!(Decision::parse_label("Internar").unwrap(), Decision::Admit);
        assert_eq!(
            Decision::parse_label(" Medicar e enviar para casa ").unwrap(),
            Decision::DischargeWithMedication
        );
    }

    #[test]
    fn decision_parses_hyphenated_alias() {
        let parsed: Decision = "discharge-with-medication".parse().unwrap();
        assert_eq!(parsed, Decision::DischargeWithMedication);
    }

    #[test]
    fn decision_rejects_unknown_label() {
        let err = Decision::parse_label("observe").unwrap_err();
        assert!(err.to_string().contains("observe"));
    }
}
