//! Cleaned training data handed to a retrainer.

use serde::{Deserialize, Serialize};

/// One usable `(text, label)` pair from the case log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrainingRow {
    pub anamnesis: String,
    pub label: String,
}

/// The full case history after invalid rows were dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetSnapshot {
    pub rows: Vec<TrainingRow>,
    /// Lines or rows discarded while cleaning.
    pub dropped: usize,
}

impl DatasetSnapshot {
    /// Keep only rows whose text and label are non-blank after trimming.
    ///
    /// Rows with a missing field arrive as `None`.
    #[must_use]
    pub fn clean<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = (Option<String>, Option<String>)>,
    {
        let mut snapshot = Self::default();
        for (anamnesis, label) in raw {
            match (anamnesis, label) {
                (Some(anamnesis), Some(label))
                    if !anamnesis.trim().is_empty() && !label.trim().is_empty() =>
                {
                    snapshot.rows.push(TrainingRow { anamnesis, label });
                }
                _ => snapshot.dropped += 1,
            }
        }
        snapshot
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.anamnesis.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn drops_missing_and_blank_fields() {
        let snapshot = DatasetSnapshot::clean([
            (some("febre"), some("admit")),
            (None, some("admit")),
            (some("tosse"), None),
            (some("   "), some("admit")),
            (some("apatia"), some(" ")),
            (some("vômito"), some("admit")),
        ]);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.dropped, 4);
        assert_eq!(snapshot.texts().collect::<Vec<_>>(), vec!["febre", "vômito"]);
    }

    #[test]
    fn empty_input_is_empty_snapshot() {
        let snapshot = DatasetSnapshot::clean(Vec::<(Option<String>, Option<String>)>::new());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.dropped, 0);
    }
}
