mod cases;
mod symptoms;

pub use cases::CaseCommands;
pub use symptoms::SymptomCommands;
