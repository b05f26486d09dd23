//! # triage-schema
//!
//! JSON Schema generation, validation, and registry for triage records.
//!
//! Types are defined in `triage-core` with `#[derive(JsonSchema)]`. This crate
//! collects them into a registry used by `triage schema` and by the case log's
//! warn-only validation of imported records.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
