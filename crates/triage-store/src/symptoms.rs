//! Symptom table loading.

use std::path::Path;

use triage_core::symptoms::SymptomDictionary;

use crate::error::StoreError;

/// Seed table written by `triage init` when no table is supplied.
pub const DEFAULT_SYMPTOM_TABLE: &str = "\
Sintoma,Risco
convulsão,90
insuficiência renal,85
vômito,85
hemorragia,80
dispneia,75
icterícia,70
febre,60
apatia,55
anorexia,45
diarreia,40
claudicação,25
tosse,15
prurido,10
";

/// Load the symptom dictionary from a table file.
///
/// # Errors
///
/// Returns `StoreError::MissingResource` if the file does not exist,
/// `StoreError::Io` if it cannot be read, and `StoreError::Core` if a row is
/// invalid.
pub fn load_dictionary(path: &Path) -> Result<SymptomDictionary, StoreError> {
    if !path.is_file() {
        return Err(StoreError::MissingResource {
            path: path.to_path_buf(),
        });
    }

    let body = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let dictionary = SymptomDictionary::parse_table(&body)?;

    if dictionary.is_empty() {
        tracing::warn!(path = %path.display(), "symptom table has no rows; every text will score 0");
    } else {
        tracing::debug!(path = %path.display(), symptoms = dictionary.len(), "loaded symptom table");
    }

    Ok(dictionary)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn default_table_parses() {
        let dict = SymptomDictionary::parse_table(DEFAULT_SYMPTOM_TABLE).unwrap();
        assert_eq!(dict.risk_of("vômito"), Some(85.0));
        assert_eq!(dict.risk_of("febre"), Some(60.0));
    }

    #[test]
    fn loads_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("symptoms.csv");
        std::fs::write(&path, "symptom,risk\nFebre,60\n").unwrap();

        let dict = load_dictionary(&path).unwrap();
        assert_eq!(dict.risk_of("febre"), Some(60.0));
    }

    #[test]
    fn missing_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let err = load_dictionary(&temp.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, StoreError::MissingResource { .. }));
    }

    #[test]
    fn invalid_row_is_a_core_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("symptoms.csv");
        std::fs::write(&path, "symptom,risk\nfebre,muito\n").unwrap();

        let err = load_dictionary(&path).unwrap_err();
        assert!(matches!(err, StoreError::Core(_)));
    }
}
