//! Locations of the symptom table, case log, and classifier artifact.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_symptoms() -> PathBuf {
    PathBuf::from(".triage/symptoms.csv")
}

fn default_dataset() -> PathBuf {
    PathBuf::from(".triage/cases.jsonl")
}

fn default_model() -> PathBuf {
    PathBuf::from(".triage/model.json")
}

/// Relative paths resolve against the project root.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Two-column symptom table (phrase, risk).
    #[serde(default = "default_symptoms")]
    pub symptoms: PathBuf,

    /// Append-only JSONL case log.
    #[serde(default = "default_dataset")]
    pub dataset: PathBuf,

    /// Classifier artifact, overwritten on each retrain.
    #[serde(default = "default_model")]
    pub model: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            symptoms: default_symptoms(),
            dataset: default_dataset(),
            model: default_model(),
        }
    }
}

impl PathsConfig {
    #[must_use]
    pub fn symptoms_in(&self, project_root: &Path) -> PathBuf {
        resolve(project_root, &self.symptoms)
    }

    #[must_use]
    pub fn dataset_in(&self, project_root: &Path) -> PathBuf {
        resolve(project_root, &self.dataset)
    }

    #[must_use]
    pub fn model_in(&self, project_root: &Path) -> PathBuf {
        resolve(project_root, &self.model)
    }
}

fn resolve(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_join_project_root() {
        let paths = PathsConfig::default();
        assert_eq!(
            paths.dataset_in(Path::new("/clinic")),
            PathBuf::from("/clinic/.triage/cases.jsonl")
        );
    }

    #[test]
    fn absolute_paths_are_kept() {
        let paths = PathsConfig {
            model: PathBuf::from("/var/lib/triage/model.json"),
            ..PathsConfig::default()
        };
        assert_eq!(
            paths.model_in(Path::new("/clinic")),
            PathBuf::from("/var/lib/triage/model.json")
        );
    }
}
