use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use triage_core::responses::ImportResponse;
use triage_store::legacy;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Append the rows of a legacy comma-delimited file to the case log.
///
/// Retraining is left to the next submission or `triage retrain`.
pub fn run(file: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = import(Path::new(file), ctx)?;
    output(&response, flags.format)
}

fn import(path: &Path, ctx: &AppContext) -> anyhow::Result<ImportResponse> {
    let parsed = legacy::read(path)
        .with_context(|| format!("failed to read legacy case file {}", path.display()))?;
    let skipped = parsed.skipped;
    let records = parsed.into_records(Utc::now());

    let _lock = ctx
        .case_log
        .lock()
        .with_context(|| format!("failed to lock {}", ctx.case_log.path().display()))?;
    ctx.case_log
        .append_validated(&records, &ctx.schema)
        .with_context(|| format!("failed to append to {}", ctx.case_log.path().display()))?;

    tracing::info!(imported = records.len(), skipped, source = %path.display(), "imported legacy cases");

    Ok(ImportResponse {
        source: path.display().to_string(),
        imported: records.len(),
        skipped,
    })
}
