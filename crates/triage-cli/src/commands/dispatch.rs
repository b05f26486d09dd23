use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Analyze(args) => commands::analyze::handle(&args, ctx, flags).await,
        Commands::Session => commands::session::handle(ctx, flags).await,
        Commands::Retrain => commands::retrain::handle(ctx, flags).await,
        Commands::Predict(args) => commands::predict::handle(&args, ctx, flags),
        Commands::Cases { action } => commands::cases::handle(&action, ctx, flags),
        Commands::Symptoms { action } => commands::symptoms::handle(&action, ctx, flags),
        Commands::Init(_) | Commands::Schema(_) => {
            unreachable!("init/schema are pre-dispatched in main")
        }
    }
}
