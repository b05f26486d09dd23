//! The static symptom dictionary.
//!
//! The dictionary is loaded once from a two-column table (symptom phrase, risk
//! percentage). Phrases are lowercased on load. When two rows collapse to the
//! same lowercased phrase the later risk wins and the phrase keeps the slot of
//! its first occurrence.

use std::collections::HashMap;

use crate::entities::SymptomEntry;
use crate::errors::CoreError;

const SYMPTOM_HEADERS: &[&str] = &["symptom", "sintoma"];
const RISK_HEADERS: &[&str] = &["risk", "risco"];

/// Ordered, deduplicated symptom → risk mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymptomDictionary {
    entries: Vec<SymptomEntry>,
}

impl SymptomDictionary {
    /// Build a dictionary from `(phrase, risk)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for an empty phrase and
    /// `CoreError::RiskOutOfRange` for a risk outside `[0, 100]`.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut entries: Vec<SymptomEntry> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (phrase, risk) in pairs {
            let symptom = phrase.as_ref().trim().to_lowercase();
            if symptom.is_empty() {
                return Err(CoreError::Validation(
                    "symptom phrase must not be empty".to_string(),
                ));
            }
            if !(0.0..=100.0).contains(&risk) {
                return Err(CoreError::RiskOutOfRange { value: risk });
            }

            if let Some(&slot) = index.get(&symptom) {
                entries[slot].risk = risk;
            } else {
                index.insert(symptom.clone(), entries.len());
                entries.push(SymptomEntry { symptom, risk });
            }
        }

        Ok(Self { entries })
    }

    /// Parse a delimited symptom table.
    ///
    /// The header row is recognised by name (`symptom`/`sintoma`,
    /// `risk`/`risco`, any case). Without a recognised header the first two
    /// columns are used, and the first row is skipped only when its risk cell
    /// is not numeric.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the offending line for rows with
    /// too few columns, an empty phrase, or an unparsable risk.
    pub fn parse_table(input: &str) -> Result<Self, CoreError> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| !line.trim().is_empty())
            .peekable();

        let mut symptom_col = 0usize;
        let mut risk_col = 1usize;

        if let Some((_, first)) = lines.peek() {
            let cells = split_row(first);
            let lowered = cells
                .iter()
                .map(|cell| cell.trim().to_lowercase())
                .collect::<Vec<_>>();
            let named_symptom = lowered
                .iter()
                .position(|cell| SYMPTOM_HEADERS.contains(&cell.as_str()));
            let named_risk = lowered
                .iter()
                .position(|cell| RISK_HEADERS.contains(&cell.as_str()));

            if let (Some(s), Some(r)) = (named_symptom, named_risk) {
                symptom_col = s;
                risk_col = r;
                lines.next();
            } else if cells
                .get(1)
                .is_some_and(|cell| cell.trim().parse::<f64>().is_err())
            {
                lines.next();
            }
        }

        let mut pairs = Vec::new();
        for (line_no, line) in lines {
            let cells = split_row(line);
            let (Some(phrase), Some(risk_raw)) = (cells.get(symptom_col), cells.get(risk_col))
            else {
                return Err(CoreError::Validation(format!(
                    "symptom table line {line_no}: expected at least {} columns",
                    symptom_col.max(risk_col) + 1
                )));
            };

            if phrase.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "symptom table line {line_no}: empty symptom phrase"
                )));
            }

            let risk = risk_raw.trim().parse::<f64>().map_err(|_| {
                CoreError::Validation(format!(
                    "symptom table line {line_no}: invalid risk '{}'",
                    risk_raw.trim()
                ))
            })?;

            if !(0.0..=100.0).contains(&risk) {
                return Err(CoreError::Validation(format!(
                    "symptom table line {line_no}: risk {risk} is outside 0-100"
                )));
            }

            pairs.push((phrase.clone(), risk));
        }

        Self::from_pairs(pairs)
    }

    /// Entries in dictionary order.
    #[must_use]
    pub fn entries(&self) -> &[SymptomEntry] {
        &self.entries
    }

    /// Risk for an exact (case-insensitive) phrase.
    #[must_use]
    pub fn risk_of(&self, phrase: &str) -> Option<f64> {
        let needle = phrase.trim().to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.symptom == needle)
            .map(|entry| entry.risk)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split one comma-delimited row. Double-quoted cells may contain commas, and
/// a doubled quote inside a quoted cell is a literal quote.
fn split_row(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cells.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    cells.push(current);
    cells
}
