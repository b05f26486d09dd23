//! # triage-config
//!
//! Layered configuration loading for the triage toolbox using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TRIAGE_*` prefix, `__` as separator)
//! 2. Project-level `.triage/config.toml`
//! 3. User-level `~/.config/triage/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TRIAGE_RETRAIN__MIN_ROWS` -> `retrain.min_rows`,
//! `TRIAGE_PATHS__DATASET` -> `paths.dataset`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use triage_config::TriageConfig;
//!
//! let config = TriageConfig::load().expect("config");
//! println!("retrain after {} cases", config.retrain.min_rows);
//! ```

mod error;
mod general;
mod paths;
mod retrain;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use paths::PathsConfig;
pub use retrain::RetrainConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-project state directory.
pub const PROJECT_DIR: &str = ".triage";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TRIAGE_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TriageConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub retrain: RetrainConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl TriageConfig {
    /// Load configuration from all sources, reading the project file relative
    /// to the current directory.
    ///
    /// Does NOT call `dotenvy`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment())
    }

    /// Load configuration for a resolved project root.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load_for_project(project_root: &Path) -> Result<Self, ConfigError> {
        Self::extract(Self::figment_at(Some(project_root)))
    }

    /// Load configuration with `.env` support from the project root.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load_with_dotenv(project_root: &Path) -> Result<Self, ConfigError> {
        let env_path = project_root.join(".env");
        if env_path.exists() {
            dotenvy::from_path(&env_path).map_err(|error| ConfigError::Dotenv {
                path: env_path.display().to_string(),
                reason: error.to_string(),
            })?;
        } else {
            let _ = dotenvy::dotenv();
        }
        Self::load_for_project(project_root)
    }

    /// Build the figment provider chain rooted at the current directory.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_at(None)
    }

    /// Build the figment provider chain, reading the project-local file from
    /// `project_root` when given.
    #[must_use]
    pub fn figment_at(project_root: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = Self::project_config_path(project_root.unwrap_or_else(|| Path::new("")));
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path of the project-local config file under `project_root`.
    #[must_use]
    pub fn project_config_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_DIR).join("config.toml")
    }

    /// Check cross-field constraints figment cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.retrain.validate()
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("triage").join("config.toml"))
    }
}
