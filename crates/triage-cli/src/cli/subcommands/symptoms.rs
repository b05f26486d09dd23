use clap::Subcommand;

/// Symptom table commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SymptomCommands {
    /// List every symptom phrase with its risk.
    List,
    /// Show which symptoms a text mentions.
    Match {
        /// Text to scan.
        text: String,
    },
}
