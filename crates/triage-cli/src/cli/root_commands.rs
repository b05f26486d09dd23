use clap::{Args, Subcommand};

use crate::cli::subcommands::{CaseCommands, SymptomCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Initialize triage for a project.
    Init(InitArgs),
    /// Score an anamnesis, record it, and retrain.
    Analyze(AnalyzeArgs),
    /// Interactive analysis screen.
    Session,
    /// Refit the classifier from the full case history.
    Retrain,
    /// Classifier-only prediction for a text.
    Predict(PredictArgs),
    /// Recorded cases.
    Cases {
        #[command(subcommand)]
        action: CaseCommands,
    },
    /// Symptom table.
    Symptoms {
        #[command(subcommand)]
        action: SymptomCommands,
    },
    /// Dump JSON schema for a registered type.
    Schema(SchemaArgs),
}

/// Arguments for `triage init`.
#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Symptom table to copy instead of the built-in seed table.
    #[arg(long)]
    pub symptoms: Option<String>,
    /// Overwrite existing config and symptom table.
    #[arg(long)]
    pub force: bool,
}

/// Where the anamnesis comes from. Stdin when neither is given.
#[derive(Clone, Debug, Args)]
pub struct TextInput {
    /// Anamnesis text.
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,
    /// Read the anamnesis from a file.
    #[arg(long)]
    pub file: Option<String>,
}

/// Arguments for `triage analyze`.
#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: TextInput,
    /// Score without recording the case or retraining.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `triage predict`.
#[derive(Clone, Debug, Args)]
pub struct PredictArgs {
    #[command(flatten)]
    pub input: TextInput,
}

/// Arguments for `triage schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Registered type name (e.g. `case_record`). Omit to list all.
    pub type_name: Option<String>,
}
