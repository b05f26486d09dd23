//! Retraining policy and classifier hyperparameters.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_enabled() -> bool {
    true
}

const fn default_min_rows() -> usize {
    3
}

const fn default_max_iter() -> usize {
    1000
}

const fn default_learning_rate() -> f64 {
    0.5
}

const fn default_c() -> f64 {
    1.0
}

const fn default_tolerance() -> f64 {
    1e-4
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrainConfig {
    /// Run the retrain after every recorded case.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Minimum number of valid rows before a model is fitted.
    #[serde(default = "default_min_rows")]
    pub min_rows: usize,

    /// Gradient descent iteration cap.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,

    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    /// Inverse L2 regularisation strength.
    #[serde(default = "default_c")]
    pub c: f64,

    /// Stop once the largest gradient component falls below this.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for RetrainConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            min_rows: default_min_rows(),
            max_iter: default_max_iter(),
            learning_rate: default_learning_rate(),
            c: default_c(),
            tolerance: default_tolerance(),
        }
    }
}

impl RetrainConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.min_rows == 0 {
            return Err(invalid("retrain.min_rows", "must be at least 1"));
        }
        if self.max_iter == 0 {
            return Err(invalid("retrain.max_iter", "must be at least 1"));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(invalid("retrain.learning_rate", "must be a positive number"));
        }
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(invalid("retrain.c", "must be a positive number"));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(invalid("retrain.tolerance", "must not be negative"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
