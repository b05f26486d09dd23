//! Cross-cutting error types for the triage toolbox.
//!
//! Domain-specific errors (`StoreError`, `ModelError`) are defined in their
//! respective crates. They converge into `anyhow::Error` in `triage-cli`.

use thiserror::Error;

/// Errors that can be raised by any triage crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// User input or static data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A risk value outside the `[0, 100]` percentage range.
    #[error("Risk {value} is outside the 0-100 range")]
    RiskOutOfRange { value: f64 },

    /// A decision label that maps to no known decision.
    #[error("Unknown decision label: '{0}'")]
    UnknownDecision(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
