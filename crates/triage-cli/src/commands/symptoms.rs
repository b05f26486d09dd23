use triage_core::scorer::RiskScorer;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SymptomCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `triage symptoms`.
pub fn handle(action: &SymptomCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        SymptomCommands::List => output(&ctx.dictionary.entries(), flags.format),
        SymptomCommands::Match { text } => {
            let score = RiskScorer::new(&ctx.dictionary).score(text);
            tracing::debug!(max_risk = score.max_risk, hits = score.matches.len(), "scored text");
            output(&score.matches, flags.format)
        }
    }
}
