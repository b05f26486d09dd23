use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use triage_config::{RetrainConfig, TriageConfig};
use triage_core::symptoms::SymptomDictionary;
use triage_model::logistic::FitOptions;
use triage_model::{ClassifierArtifact, FullRefitRetrainer, Retrainer, TrainingParams};
use triage_schema::SchemaRegistry;
use triage_store::CaseLog;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: TriageConfig,
    pub dictionary: SymptomDictionary,
    pub case_log: CaseLog,
    pub schema: SchemaRegistry,
    pub retrainer: Arc<dyn Retrainer>,
    pub model_path: PathBuf,
}

impl AppContext {
    /// Load the symptom table and wire the case log and retrainer for the
    /// discovered project root.
    pub fn init(project_root: PathBuf, config: TriageConfig) -> anyhow::Result<Self> {
        let symptoms_path = config.paths.symptoms_in(&project_root);
        let dictionary = triage_store::symptoms::load_dictionary(&symptoms_path)
            .with_context(|| format!("failed to load symptom table {}", symptoms_path.display()))?;

        let case_log = CaseLog::new(config.paths.dataset_in(&project_root));
        let model_path = config.paths.model_in(&project_root);
        let retrainer: Arc<dyn Retrainer> = Arc::new(FullRefitRetrainer::new(
            model_path.clone(),
            training_params(&config.retrain),
        ));

        tracing::debug!(
            project_root = %project_root.display(),
            dataset = %case_log.path().display(),
            model = %model_path.display(),
            symptoms = dictionary.len(),
            "initialized application context"
        );

        Ok(Self {
            config,
            dictionary,
            case_log,
            schema: SchemaRegistry::new(),
            retrainer,
            model_path,
        })
    }

    /// Load the classifier artifact. A malformed artifact is logged and
    /// treated as absent.
    #[must_use]
    pub fn load_classifier(&self) -> Option<ClassifierArtifact> {
        match ClassifierArtifact::load(&self.model_path) {
            Ok(artifact) => artifact,
            Err(error) => {
                tracing::warn!(
                    path = %self.model_path.display(),
                    %error,
                    "ignoring unreadable classifier artifact"
                );
                None
            }
        }
    }
}

pub fn training_params(config: &RetrainConfig) -> TrainingParams {
    TrainingParams {
        min_rows: config.min_rows,
        fit: FitOptions {
            max_iter: config.max_iter,
            learning_rate: config.learning_rate,
            c: config.c,
            tolerance: config.tolerance,
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn training_params_follow_config() {
        let config = RetrainConfig {
            min_rows: 5,
            max_iter: 50,
            ..RetrainConfig::default()
        };
        let params = training_params(&config);
        assert_eq!(params.min_rows, 5);
        assert_eq!(params.fit.max_iter, 50);
        assert_eq!(params.fit.c, 1.0);
    }

    #[test]
    fn init_fails_without_symptom_table() {
        let temp = TempDir::new().expect("tempdir should create");
        let result = AppContext::init(temp.path().to_path_buf(), TriageConfig::default());
        let message = format!("{:#}", result.err().expect("init should fail"));
        assert!(message.contains("symptom table"), "{message}");
    }

    #[test]
    fn init_resolves_paths_under_project_root() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::create_dir_all(temp.path().join(".triage")).expect("dir should create");
        std::fs::write(temp.path().join(".triage/symptoms.csv"), "symptom,risk\nfebre,60\n")
            .expect("table should write");

        let ctx = AppContext::init(temp.path().to_path_buf(), TriageConfig::default())
            .expect("context should init");
        assert_eq!(ctx.case_log.path(), temp.path().join(".triage/cases.jsonl"));
        assert_eq!(ctx.model_path, temp.path().join(".triage/model.json"));
        assert!(ctx.load_classifier().is_none());
    }
}
