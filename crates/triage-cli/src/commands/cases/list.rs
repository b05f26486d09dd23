use triage_core::responses::CaseListResponse;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Most recent cases first.
pub fn run(limit: Option<u32>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = effective_limit(limit, ctx.config.general.default_limit);
    let response = recent(ctx, limit)?;

    match flags.format {
        OutputFormat::Table => output(&response.cases, flags.format),
        format => output(&response, format),
    }
}

fn recent(ctx: &AppContext, limit: usize) -> anyhow::Result<CaseListResponse> {
    let scan = ctx.case_log.scan()?;
    if scan.unreadable > 0 {
        tracing::warn!(unreadable = scan.unreadable, "skipped undecodable case log lines");
    }

    let total = scan.records.len();
    let cases = scan.records.into_iter().rev().take(limit).collect();
    Ok(CaseListResponse { total, cases })
}
