//! Human-readable result screen shared by `triage analyze` and
//! `triage session`.

use std::fmt::Write as _;

use triage_core::responses::{AnalyzeResponse, RetrainReport, RetrainStatus};

const NO_SYMPTOMS: &str = "No critical symptom identified.";

/// Headline risk, always one decimal.
fn headline_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Table risks: whole values print without decimals.
fn percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}%")
    } else {
        format!("{value:.1}%")
    }
}

#[must_use]
pub fn render_result(response: &AnalyzeResponse) -> String {
    let analysis = &response.analysis;
    let assessment = &analysis.assessment;
    let mut out = String::new();

    let _ = writeln!(out, "Decision: {}", assessment.decision.label());
    let _ = writeln!(
        out,
        "Predicted stay: {} day{}",
        assessment.days,
        if assessment.days == 1 { "" } else { "s" }
    );
    let _ = writeln!(out, "Euthanasia chance: {}", headline_percent(analysis.max_risk));
    let _ = writeln!(out, "{}", assessment.commentary.message());
    out.push('\n');

    if analysis.matches.is_empty() {
        let _ = writeln!(out, "{NO_SYMPTOMS}");
    } else {
        let _ = writeln!(out, "Identified symptoms:");
        for hit in &analysis.matches {
            let _ = writeln!(out, "  - {} ({})", capitalize(&hit.symptom), percent(hit.risk));
        }
    }

    if let Some(prediction) = &response.model_decision {
        let confidence = prediction
            .probabilities
            .iter()
            .find(|p| p.label == prediction.label)
            .map_or(0.0, |p| p.probability);
        let _ = writeln!(
            out,
            "\nClassifier suggests: {} ({:.0}% confidence)",
            prediction.label,
            confidence * 100.0
        );
    }

    out.push('\n');
    out.push_str(&record_line(response.recorded, response.retrain.as_ref()));
    out
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(phrase: &str) -> String {
    let mut chars = phrase.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

fn record_line(recorded: bool, retrain: Option<&RetrainReport>) -> String {
    if !recorded {
        return String::from("Dry run: case not recorded.");
    }
    match retrain {
        Some(report) => match report.status {
            RetrainStatus::Retrained => format!(
                "Case recorded. Classifier retrained on {} cases.",
                report.valid_rows
            ),
            RetrainStatus::NotReady => format!(
                "Case recorded. Classifier trains once {} valid cases exist ({} so far).",
                report.min_rows, report.valid_rows
            ),
            RetrainStatus::Disabled => {
                String::from("Case recorded. Automatic retraining is disabled.")
            }
            RetrainStatus::Failed => format!(
                "Case recorded. Retraining failed: {}",
                report.error.as_deref().unwrap_or("unknown error")
            ),
        },
        None => String::from("Case recorded."),
    }
}
