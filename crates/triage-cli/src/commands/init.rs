use std::path::{Path, PathBuf};

use anyhow::Context;
use triage_config::{PROJECT_DIR, TriageConfig};
use triage_core::responses::InitResponse;
use triage_core::symptoms::SymptomDictionary;
use triage_store::symptoms::DEFAULT_SYMPTOM_TABLE;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::output::output;

/// Handle `triage init`.
pub async fn handle(args: &InitArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let root = match &flags.project {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir().context("failed to read current directory")?,
    };

    let response = initialize(&root, args.symptoms.as_deref().map(Path::new), args.force)?;
    output(&response, flags.format)
}

/// Create `.triage/` with a config file and a symptom table. Existing files
/// are kept unless `force` is set.
fn initialize(root: &Path, symptoms: Option<&Path>, force: bool) -> anyhow::Result<InitResponse> {
    let project_dir = root.join(PROJECT_DIR);
    std::fs::create_dir_all(&project_dir)
        .with_context(|| format!("failed to create {}", project_dir.display()))?;

    let mut created = Vec::new();

    let config_path = TriageConfig::project_config_path(root);
    if force || !config_path.exists() {
        let body = toml::to_string_pretty(&TriageConfig::default())
            .context("failed to serialize default configuration")?;
        write_file(&config_path, &body)?;
        created.push(config_path.display().to_string());
    }

    let table_path = TriageConfig::default().paths.symptoms_in(root);
    if force || !table_path.exists() {
        let table = match symptoms {
            Some(source) => {
                let body = std::fs::read_to_string(source)
                    .with_context(|| format!("failed to read symptom table {}", source.display()))?;
                SymptomDictionary::parse_table(&body)
                    .with_context(|| format!("invalid symptom table {}", source.display()))?;
                body
            }
            None => DEFAULT_SYMPTOM_TABLE.to_string(),
        };
        write_file(&table_path, &table)?;
        created.push(table_path.display().to_string());
    } else if symptoms.is_some() {
        tracing::warn!(
            path = %table_path.display(),
            "symptom table already exists; pass --force to replace it"
        );
    }

    tracing::info!(root = %root.display(), files = created.len(), "initialized triage project");

    Ok(InitResponse {
        project_root: root.display().to_string(),
        created,
    })
}

fn write_file(path: &Path, body: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn creates_config_and_seed_table() {
        let temp = TempDir::new().unwrap();

        let response = initialize(temp.path(), None, false).unwrap();

        assert_eq!(response.created.len(), 2);
        let config = TriageConfig::load_for_project(temp.path()).unwrap();
        assert_eq!(config.retrain.min_rows, 3);
        let table = std::fs::read_to_string(temp.path().join(".triage/symptoms.csv")).unwrap();
        assert_eq!(table, DEFAULT_SYMPTOM_TABLE);
    }

    #[test]
    fn existing_files_are_kept_without_force() {
        let temp = TempDir::new().unwrap();
        initialize(temp.path(), None, false).unwrap();
        std::fs::write(temp.path().join(".triage/symptoms.csv"), "symptom,risk\nfebre,61\n")
            .unwrap();

        let response = initialize(temp.path(), None, false).unwrap();
        assert!(response.created.is_empty());
        let table = std::fs::read_to_string(temp.path().join(".triage/symptoms.csv")).unwrap();
        assert!(table.contains("61"));

        let forced = initialize(temp.path(), None, true).unwrap();
        assert_eq!(forced.created.len(), 2);
    }

    #[test]
    fn invalid_custom_table_is_rejected() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("mine.csv");
        std::fs::write(&source, "symptom,risk\nfebre,muito\n").unwrap();

        let message = format!("{:#}", initialize(temp.path(), Some(&source), false).unwrap_err());
        assert!(message.contains("line 2"), "{message}");
        assert!(!temp.path().join(".triage/symptoms.csv").exists());
    }
}
