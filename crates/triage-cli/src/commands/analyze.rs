use crate::cli::root_commands::AnalyzeArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::input::read_text;
use crate::context::AppContext;
use crate::output::output;
use crate::pipeline::{self, Submission};
use crate::screen;

/// Handle `triage analyze`.
pub async fn handle(args: &AnalyzeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = read_text(&args.input)?;

    match pipeline::submit(ctx, &text, !args.dry_run).await? {
        Submission::Rejected { message } => anyhow::bail!("{message}"),
        Submission::Completed(response) => match flags.format {
            OutputFormat::Table => {
                println!("{}", screen::render_result(&response));
                Ok(())
            }
            format => output(&response, format),
        },
    }
}
