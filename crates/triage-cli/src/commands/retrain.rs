use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::pipeline;

/// Handle `triage retrain`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = pipeline::retrain(ctx).await?;
    output(&report, flags.format)
}
