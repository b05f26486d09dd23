//! # triage-store
//!
//! File-backed persistence for the triage toolbox:
//! - [`case_log::CaseLog`]: the append-only JSONL case history
//! - [`symptoms::load_dictionary`]: the static symptom table
//! - [`legacy`]: reader for the original comma-delimited case file
//! - [`lock`]: the short exclusive lock taken around case log writes

pub mod case_log;
pub mod error;
pub mod legacy;
pub mod lock;
pub mod symptoms;

pub use case_log::{CaseLog, LogScan};
pub use error::StoreError;
pub use lock::{CaseLogLock, LockOptions};
