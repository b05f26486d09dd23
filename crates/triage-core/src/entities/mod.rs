//! Entity structs for the triage domain.

mod case;
mod symptom;

pub use case::{Case, CaseRecord};
pub use symptom::{SymptomEntry, SymptomMatch};
