use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `triage` binary.
#[derive(Debug, Parser)]
#[command(
    name = "triage",
    version,
    about = "Triage - symptom-risk scoring for veterinary anamnesis"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root path (defaults to auto-detect via .triage)
    #[arg(short, long, global = true)]
    pub project: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            project: self.project.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::{CaseCommands, SymptomCommands};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_format_is_table() {
        let cli = Cli::try_parse_from(["triage", "retrain"]).expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Table);
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["triage", "--format", "json", "--verbose", "retrain"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Retrain));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["triage", "retrain", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["triage", "--format", "xml", "retrain"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn analyze_accepts_text_and_dry_run() {
        let cli = Cli::try_parse_from(["triage", "analyze", "--dry-run", "febre alta"])
            .expect("cli should parse");
        match cli.command {
            Commands::Analyze(args) => {
                assert!(args.dry_run);
                assert_eq!(args.input.text.as_deref(), Some("febre alta"));
                assert!(args.input.file.is_none());
            }
            other => panic!("expected analyze, got {other:?}"),
        }
    }

    #[test]
    fn analyze_rejects_text_and_file_together() {
        let parsed = Cli::try_parse_from(["triage", "analyze", "febre", "--file", "case.txt"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn cases_list_takes_a_limit() {
        let cli = Cli::try_parse_from(["triage", "cases", "list", "--limit", "5"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Cases {
                action: CaseCommands::List { limit: Some(5) }
            }
        ));
    }

    #[test]
    fn symptoms_match_takes_text() {
        let cli = Cli::try_parse_from(["triage", "symptoms", "match", "vômito"])
            .expect("cli should parse");
        match cli.command {
            Commands::Symptoms {
                action: SymptomCommands::Match { text },
            } => assert_eq!(text, "vômito"),
            other => panic!("expected symptoms match, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["triage", "--project", "/tmp/clinic", "retrain"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.project.as_deref(), Some("/tmp/clinic"));
    }
}
