//! One complete scoring of one anamnesis: validation, scan, policy.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::SymptomMatch;
use crate::errors::CoreError;
use crate::policy::{self, Assessment};
use crate::scorer::RiskScorer;
use crate::symptoms::SymptomDictionary;

/// Message shown when the submitted anamnesis is blank.
pub const EMPTY_ANAMNESIS_MESSAGE: &str = "please enter the complete anamnesis";

/// Result of analysing one anamnesis.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Analysis {
    /// The submitted text, trimmed.
    pub anamnesis: String,
    pub matches: Vec<SymptomMatch>,
    pub max_risk: f64,
    pub assessment: Assessment,
}

/// Validate, score and assess a submitted text.
///
/// # Errors
///
/// Returns `CoreError::Validation` when the text is empty or whitespace only.
pub fn analyze(text: &str, dictionary: &SymptomDictionary) -> Result<Analysis, CoreError> {
    let anamnesis = text.trim();
    if anamnesis.is_empty() {
        return Err(CoreError::Validation(EMPTY_ANAMNESIS_MESSAGE.to_string()));
    }

    let score = RiskScorer::new(dictionary).score(anamnesis);

    Ok(Analysis {
        anamnesis: anamnesis.to_string(),
        assessment: policy::assess(score.max_risk),
        matches: score.matches,
        max_risk: score.max_risk,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::enums::{Commentary, Decision};

    fn dictionary() -> SymptomDictionary {
        SymptomDictionary::from_pairs([("febre", 60.0), ("vômito", 85.0)]).unwrap()
    }

    #[test]
    fn fever_and_vomit_admits_for_ten_days() {
        let analysis = analyze("febre alta e vômito", &dictionary()).unwrap();
        assert_eq!(analysis.max_risk, 85.0);
        assert_eq!(analysis.assessment.decision, Decision::Admit);
        assert_eq!(analysis.assessment.days, 10);
        assert_eq!(analysis.assessment.commentary, Commentary::HighMortality);
    }

    #[test]
    fn no_symptoms_discharges_for_one_day() {
        let analysis = analyze("check-up de rotina", &dictionary()).unwrap();
        assert_eq!(analysis.max_risk, 0.0);
        assert_eq!(analysis.assessment.decision, Decision::DischargeWithMedication);
        assert_eq!(analysis.assessment.days, 1);
    }

    #[test]
    fn blank_text_is_a_validation_error() {
        for text in ["", "   ", "\n\t "] {
            let err = analyze(text, &dictionary()).unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)), "{text:?}");
        }
    }

    #[test]
    fn stored_text_is_trimmed() {
        let analysis = analyze("  febre \n", &dictionary()).unwrap();
        assert_eq!(analysis.anamnesis, "febre");
    }
}
