use triage_core::enums::Decision;
use triage_core::responses::CaseStatsResponse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&stats(ctx)?, flags.format)
}

fn stats(ctx: &AppContext) -> anyhow::Result<CaseStatsResponse> {
    let scan = ctx.case_log.scan()?;
    let total = scan.records.len();
    let admitted = scan
        .records
        .iter()
        .filter(|record| record.case.decision == Decision::Admit)
        .count();

    #[allow(clippy::cast_precision_loss)]
    let mean_risk = (total > 0).then(|| {
        scan.records.iter().map(|record| record.case.max_risk).sum::<f64>() / total as f64
    });

    Ok(CaseStatsResponse {
        total,
        admitted,
        discharged: total - admitted,
        unreadable_lines: scan.unreadable,
        mean_risk,
        model_available: ctx.model_path.is_file(),
    })
}
