//! # triage-core
//!
//! Core types, risk scoring, and decision policy for the triage toolbox.
//!
//! This crate provides the foundational types shared across all triage crates:
//! - Entity structs for symptoms and recorded cases
//! - Decision and commentary enums
//! - The symptom dictionary and its table parser
//! - The keyword risk scorer and the fixed-threshold decision policy
//! - Dataset snapshot types handed to the retrainer
//! - Cross-cutting error types
//! - CLI response types

pub mod analysis;
pub mod dataset;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod policy;
pub mod responses;
pub mod scorer;
pub mod symptoms;
