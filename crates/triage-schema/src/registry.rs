//! Central schema registry for persisted and response types.
//!
//! The `SchemaRegistry` builds JSON Schemas from triage-core types at
//! construction time using [`schemars::schema_for!`] and validates with
//! `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Central store of all JSON Schemas known to the toolbox.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`.
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert(
            $name,
            serde_json::to_value(schema_for!($ty)).unwrap_or(serde_json::Value::Null),
        );
    };
}

impl SchemaRegistry {
    /// Build a registry containing the entity, analysis, and response schemas.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Entities (3) ---
        register!(schemas, "case", triage_core::entities::Case);
        register!(schemas, "case_record", triage_core::entities::CaseRecord);
        register!(schemas, "symptom_entry", triage_core::entities::SymptomEntry);

        // --- Analysis (2) ---
        register!(schemas, "analysis", triage_core::analysis::Analysis);
        register!(schemas, "assessment", triage_core::policy::Assessment);

        // --- CLI responses (7) ---
        register!(
            schemas,
            "analyze_response",
            triage_core::responses::AnalyzeResponse
        );
        register!(
            schemas,
            "retrain_report",
            triage_core::responses::RetrainReport
        );
        register!(
            schemas,
            "predict_response",
            triage_core::responses::PredictResponse
        );
        register!(
            schemas,
            "case_list_response",
            triage_core::responses::CaseListResponse
        );
        register!(
            schemas,
            "import_response",
            triage_core::responses::ImportResponse
        );
        register!(
            schemas,
            "case_stats_response",
            triage_core::responses::CaseStatsResponse
        );
        register!(
            schemas,
            "init_response",
            triage_core::responses::InitResponse
        );

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::entities::{Case, CaseRecord};
    use triage_core::enums::Decision;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new()
    }

    #[test]
    fn registry_has_expected_count() {
        // 3 entities + 2 analysis + 7 responses
        assert_eq!(registry().schema_count(), 12);
    }

    #[test]
    fn registry_list_is_sorted() {
        let names = registry().list();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn get_nonexistent_schema() {
        assert!(registry().get("finding").is_none());
    }

    #[test]
    fn validate_valid_case_record() {
        let record = CaseRecord::new(
            Case {
                anamnesis: "febre".into(),
                decision: Decision::Admit,
                predicted_days: 7,
                max_risk: 60.0,
            },
            chrono::Utc::now(),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert!(registry().validate("case_record", &json).is_ok());
    }

    #[test]
    fn validate_rejects_missing_required_field() {
        let invalid = serde_json::json!({
            "ts": "2026-02-08T12:00:00Z",
            "decision": "admit",
            "predicted_days": 7,
            "max_risk": 60.0
        });
        let result = registry().validate("case_record", &invalid);
        match result {
            Err(SchemaError::ValidationFailed { errors }) => assert!(!errors.is_empty()),
            other => panic!("Expected ValidationFailed, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_unknown_decision() {
        let invalid = serde_json::json!({
            "anamnesis": "febre",
            "decision": "observe",
            "predicted_days": 1,
            "max_risk": 0.0
        });
        assert!(registry().validate("case", &invalid).is_err());
    }

    #[test]
    fn validate_unknown_schema_name() {
        let result = registry().validate("nope", &serde_json::json!({}));
        assert!(matches!(result, Err(SchemaError::NotFound(_))));
    }
}
