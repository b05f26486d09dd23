//! Fixed-threshold decision policy.
//!
//! Two independent threshold sets are applied to the same risk percentage:
//! the admit cutoff (50) with the stay-length table, and the commentary
//! bands (30 / 70). They are deliberately kept apart.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Commentary, Decision};

/// Risk at or above which the patient is admitted.
pub const ADMIT_THRESHOLD: f64 = 50.0;

/// `(minimum risk, predicted days)` tiers, highest first.
pub const STAY_TIERS: [(f64, u32); 4] = [(80.0, 10), (60.0, 7), (40.0, 5), (20.0, 3)];

/// Predicted days when no tier applies.
pub const MINIMUM_STAY_DAYS: u32 = 1;

/// Commentary band cut points.
pub const HIGH_MORTALITY_THRESHOLD: f64 = 70.0;
pub const MODERATE_MORTALITY_THRESHOLD: f64 = 30.0;

/// Output of the decision policy for one risk value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Assessment {
    pub decision: Decision,
    pub days: u32,
    pub commentary: Commentary,
}

#[must_use]
pub fn decision_for(risk: f64) -> Decision {
    if risk >= ADMIT_THRESHOLD {
        Decision::Admit
    } else {
        Decision::DischargeWithMedication
    }
}

#[must_use]
pub fn predicted_days(risk: f64) -> u32 {
    STAY_TIERS
        .iter()
        .find(|(floor, _)| risk >= *floor)
        .map_or(MINIMUM_STAY_DAYS, |(_, days)| *days)
}

#[must_use]
pub fn commentary_for(risk: f64) -> Commentary {
    if risk >= HIGH_MORTALITY_THRESHOLD {
        Commentary::HighMortality
    } else if risk >= MODERATE_MORTALITY_THRESHOLD {
        Commentary::ModerateMortality
    } else {
        Commentary::HighRecovery
    }
}

/// Map a risk to `(decision, days)`.
#[must_use]
pub fn decide(risk: f64) -> (Decision, u32) {
    (decision_for(risk), predicted_days(risk))
}

/// Full assessment including the commentary band.
#[must_use]
pub fn assess(risk: f64) -> Assessment {
    Assessment {
        decision: decision_for(risk),
        days: predicted_days(risk),
        commentary: commentary_for(risk),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0, 1)]
    #[case(19.9, 1)]
    #[case(20.0, 3)]
    #[case(39.9, 3)]
    #[case(40.0, 5)]
    #[case(59.9, 5)]
    #[case(60.0, 7)]
    #[case(79.9, 7)]
    #[case(80.0, 10)]
    #[case(100.0, 10)]
    fn stay_length_follows_tiers(#[case] risk: f64, #[case] days: u32) {
        assert_eq!(predicted_days(risk), days);
    }

    #[rstest]
    #[case(0.0, Decision::DischargeWithMedication)]
    #[case(49.9, Decision::DischargeWithMedication)]
    #[case(50.0, Decision::Admit)]
    #[case(100.0, Decision::Admit)]
    fn admit_iff_risk_at_least_fifty(#[case] risk: f64, #[case] expected: Decision) {
        assert_eq!(decision_for(risk), expected);
    }

    #[rstest]
    #[case(0.0, Commentary::HighRecovery)]
    #[case(29.9, Commentary::HighRecovery)]
    #[case(30.0, Commentary::ModerateMortality)]
    #[case(69.9, Commentary::ModerateMortality)]
    #[case(70.0, Commentary::HighMortality)]
    fn commentary_bands(#[case] risk: f64, #[case] expected: Commentary) {
        assert_eq!(commentary_for(risk), expected);
    }

    #[test]
    fn decision_holds_over_whole_percentage_range() {
        for tenth in 0..=1000 {
            let risk = f64::from(tenth) / 10.0;
            assert_eq!(decision_for(risk) == Decision::Admit, risk >= 50.0, "risk {risk}");
        }
    }

    #[test]
    fn bands_are_independent_of_admit_cutoff() {
        // 45 is discharged but already in the moderate band; 55 is admitted
        // but still moderate.
        assert_eq!(
            assess(45.0),
            Assessment {
                decision: Decision::DischargeWithMedication,
                days: 5,
                commentary: Commentary::ModerateMortality,
            }
        );
        assert_eq!(assess(55.0).decision, Decision::Admit);
        assert_eq!(assess(55.0).commentary, Commentary::ModerateMortality);
    }

    #[test]
    fn decide_returns_pair() {
        assert_eq!(decide(85.0), (Decision::Admit, 10));
        assert_eq!(decide(0.0), (Decision::DischargeWithMedication, 1));
    }
}
