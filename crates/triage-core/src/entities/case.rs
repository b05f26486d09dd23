use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analysis::Analysis;
use crate::enums::Decision;

/// Current case record schema version.
pub const CASE_RECORD_VERSION: u32 = 1;

/// Default record version for lines written without a `v` field.
const fn default_record_version() -> u32 {
    CASE_RECORD_VERSION
}

/// One processed submission.
///
/// The decision fields are a cache of what the policy produced for this exact
/// text at submission time. They are never re-derived from the anamnesis.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Case {
    pub anamnesis: String,
    pub decision: Decision,
    pub predicted_days: u32,
    pub max_risk: f64,
}

impl Case {
    /// Freeze an analysis into a recordable case.
    #[must_use]
    pub fn from_analysis(analysis: &Analysis) -> Self {
        Self {
            anamnesis: analysis.anamnesis.clone(),
            decision: analysis.assessment.decision,
            predicted_days: analysis.assessment.days,
            max_risk: analysis.max_risk,
        }
    }
}

/// A case as persisted in the JSONL case log.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CaseRecord {
    /// Schema version. Defaults to 1 for lines without this field.
    #[serde(default = "default_record_version")]
    pub v: u32,

    /// Time the case was recorded.
    pub ts: DateTime<Utc>,

    #[serde(flatten)]
    pub case: Case,
}

impl CaseRecord {
    #[must_use]
    pub fn new(case: Case, ts: DateTime<Utc>) -> Self {
        Self {
            v: CASE_RECORD_VERSION,
            ts,
            case,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_flattens_case_fields() {
        let record = CaseRecord::new(
            Case {
                anamnesis: "febre alta".to_string(),
                decision: Decision::Admit,
                predicted_days: 7,
                max_risk: 60.0,
            },
            "2026-02-08T12:00:00Z".parse().unwrap(),
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["v"], 1);
        assert_eq!(value["anamnesis"], "febre alta");
        assert_eq!(value["decision"], "admit");
        assert_eq!(value["predicted_days"], 7);
        assert!(value.get("case").is_none());
    }

    #[test]
    fn record_without_version_defaults_to_one() {
        let json = r#"{"ts":"2026-01-01T00:00:00Z","anamnesis":"tosse","decision":"discharge_with_medication","predicted_days":1,"max_risk":10.0}"#;
        let record: CaseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.v, 1);
        assert_eq!(record.case.decision, Decision::DischargeWithMedication);
    }
}
