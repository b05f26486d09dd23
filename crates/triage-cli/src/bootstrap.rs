use std::path::Path;

use anyhow::Context;
use triage_config::TriageConfig;

/// Load `.env` from the project root, then the layered configuration.
pub fn load_config(project_root: &Path) -> anyhow::Result<TriageConfig> {
    TriageConfig::load_with_dotenv(project_root).with_context(|| {
        format!(
            "failed to load configuration for project {}",
            project_root.display()
        )
    })
}
