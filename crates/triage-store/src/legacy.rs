//! Reader for the original comma-delimited case file.
//!
//! Each line is `anamnesis,decision,days,risk` with no header and no quoting.
//! The last three fields never contain commas, so a line is split from the
//! right and everything before the decision is the anamnesis. A newline inside
//! an anamnesis still breaks the row in two; such fragments do not parse and
//! are skipped.

use std::path::Path;

use chrono::{DateTime, Utc};
use triage_core::entities::{Case, CaseRecord};
use triage_core::enums::Decision;

use crate::error::StoreError;

/// Parsed legacy rows plus the count of lines that could not be used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyImport {
    pub cases: Vec<Case>,
    pub skipped: usize,
}

impl LegacyImport {
    /// Stamp every case with the same import time.
    #[must_use]
    pub fn into_records(self, ts: DateTime<Utc>) -> Vec<CaseRecord> {
        self.cases
            .into_iter()
            .map(|case| CaseRecord::new(case, ts))
            .collect()
    }
}

/// Parse one legacy line. Returns `None` for rows that cannot be used.
#[must_use]
pub fn parse_line(line: &str) -> Option<Case> {
    let mut fields = line.trim_end_matches(['\r', '\n']).rsplitn(4, ',');
    let risk = fields.next()?.trim().parse::<f64>().ok()?;
    let days = parse_days(fields.next()?.trim())?;
    let decision = Decision::parse_label(fields.next()?).ok()?;
    let anamnesis = fields.next()?.trim();

    if anamnesis.is_empty() || !(0.0..=100.0).contains(&risk) {
        return None;
    }

    Some(Case {
        anamnesis: anamnesis.to_string(),
        decision,
        predicted_days: days,
        max_risk: risk,
    })
}

/// Days were written as integers, but tolerate `7.0`.
fn parse_days(raw: &str) -> Option<u32> {
    if let Ok(days) = raw.parse::<u32>() {
        return Some(days);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        return Some(value as u32);
    }
    None
}

/// Parse a whole legacy file body.
#[must_use]
pub fn parse(input: &str) -> LegacyImport {
    let mut import = LegacyImport::default();
    for line in input.lines().filter(|line| !line.trim().is_empty()) {
        match parse_line(line) {
            Some(case) => import.cases.push(case),
            None => {
                tracing::debug!(line, "skipping unparsable legacy row");
                import.skipped += 1;
            }
        }
    }
    import
}

/// Read and parse a legacy file.
///
/// # Errors
///
/// Returns `StoreError::MissingResource` if the file does not exist and
/// `StoreError::Io` if it cannot be read.
pub fn read(path: &Path) -> Result<LegacyImport, StoreError> {
    if !path.is_file() {
        return Err(StoreError::MissingResource {
            path: path.to_path_buf(),
        });
    }
    let body = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    Ok(parse(&body))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn parses_original_row() {
        let case = parse_line("febre alta e vômito,Internar,10,85").unwrap();
        assert_eq!(case.anamnesis, "febre alta e vômito");
        assert_eq!(case.decision, Decision::Admit);
        assert_eq!(case.predicted_days, 10);
        assert_eq!(case.max_risk, 85.0);
    }

    #[test]
    fn commas_inside_anamnesis_survive() {
        let case = parse_line("tosse, espirros, coriza,Medicar e enviar para casa,1,0").unwrap();
        assert_eq!(case.anamnesis, "tosse, espirros, coriza");
        assert_eq!(case.decision, Decision::DischargeWithMedication);
    }

    #[rstest]
    #[case("")]
    #[case("sem campos suficientes")]
    #[case("febre,Internar,dez,85")]
    #[case("febre,Talvez,3,20")]
    #[case(",Internar,10,85")]
    #[case("febre,Internar,10,185")]
    fn rejects_unusable_rows(#[case] line: &str) {
        assert!(parse_line(line).is_none(), "{line:?}");
    }

    #[test]
    fn float_days_are_accepted() {
        let case = parse_line("apatia,Internar,7.0,60.0").unwrap();
        assert_eq!(case.predicted_days, 7);
    }

    #[test]
    fn split_newline_rows_are_skipped() {
        let import = parse("primeira linha\nsegunda linha,Internar,5,40\nfebre,Internar,7,60\n");
        assert_eq!(import.cases.len(), 2);
        assert_eq!(import.skipped, 1);
        assert_eq!(import.cases[0].anamnesis, "segunda linha");
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, StoreError::MissingResource { .. }));
    }
}
