use clap::Subcommand;

/// Case log commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CaseCommands {
    /// List the most recent cases.
    List {
        /// Maximum number of cases.
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Import a comma-delimited case file from the original tool.
    Import {
        /// Path to the legacy file.
        file: String,
    },
    /// Summary counts over the case log.
    Stats,
}
