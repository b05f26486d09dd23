mod import;
mod list;
mod stats;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CaseCommands;
use crate::context::AppContext;

/// Handle `triage cases`.
pub fn handle(action: &CaseCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        CaseCommands::List { limit } => list::run(*limit, ctx, flags),
        CaseCommands::Import { file } => import::run(file, ctx, flags),
        CaseCommands::Stats => stats::run(ctx, flags),
    }
}
