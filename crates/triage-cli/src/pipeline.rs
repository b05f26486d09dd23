//! Analysis pipeline: validate → score → record → retrain.
//!
//! Every submission runs to completion before its result is returned. A
//! blank submission is rejected before anything is written, so it never
//! records a case and never triggers retraining.
//!
//! The case log lock is held from the append until the artifact is written,
//! and only for that step. Concurrent sessions interleave whole steps.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use triage_core::analysis::{self, Analysis};
use triage_core::dataset::DatasetSnapshot;
use triage_core::entities::Case;
use triage_core::errors::CoreError;
use triage_core::responses::{AnalyzeResponse, ModelPrediction, RetrainReport, RetrainStatus};
use triage_model::RetrainOutcome;
use triage_store::CaseLogLock;

use crate::context::AppContext;
use crate::progress::Progress;

/// Outcome of submitting one anamnesis.
#[derive(Debug)]
pub enum Submission {
    /// Input failed validation; nothing was recorded.
    Rejected { message: String },
    Completed(Box<AnalyzeResponse>),
}

/// Score a text and, unless `record` is false, append it to the case log and
/// run the retrainer.
pub async fn submit(ctx: &AppContext, text: &str, record: bool) -> anyhow::Result<Submission> {
    let analysis = match analysis::analyze(text, &ctx.dictionary) {
        Ok(analysis) => analysis,
        Err(CoreError::Validation(message)) => return Ok(Submission::Rejected { message }),
        Err(error) => return Err(error.into()),
    };

    let retrain = if record {
        let _lock = lock_case_log(ctx).await?;
        record_case(ctx, &analysis)?;
        Some(retrain_after_record(ctx).await?)
    } else {
        None
    };

    let model_decision = model_decision(ctx, &analysis.anamnesis);

    Ok(Submission::Completed(Box::new(AnalyzeResponse {
        analysis,
        recorded: record,
        retrain,
        model_decision,
    })))
}

fn record_case(ctx: &AppContext, analysis: &Analysis) -> anyhow::Result<()> {
    let record = ctx
        .case_log
        .append(&Case::from_analysis(analysis))
        .with_context(|| format!("failed to record case in {}", ctx.case_log.path().display()))?;
    tracing::info!(
        decision = %record.case.decision,
        max_risk = record.case.max_risk,
        "recorded case"
    );
    Ok(())
}

/// Take the case log lock without blocking the runtime.
async fn lock_case_log(ctx: &AppContext) -> anyhow::Result<CaseLogLock> {
    let log = ctx.case_log.clone();
    tokio::task::spawn_blocking(move || log.lock())
        .await
        .context("case log lock task did not complete")?
        .with_context(|| format!("failed to lock {}", ctx.case_log.path().display()))
}

/// Retrain after a new case unless retraining is switched off.
///
/// The case is already recorded here, so a failed fit or artifact write is
/// reported as `Failed` rather than returned as an error.
async fn retrain_after_record(ctx: &AppContext) -> anyhow::Result<RetrainReport> {
    let snapshot = reload(ctx)?;
    if !ctx.config.retrain.enabled {
        tracing::debug!("automatic retraining disabled");
        return Ok(report(ctx, RetrainStatus::Disabled, &snapshot));
    }

    let failed = report(ctx, RetrainStatus::Failed, &snapshot);
    match run_retrainer(ctx, snapshot).await {
        Ok(done) => Ok(done),
        Err(error) => {
            let message = format!("{error:#}");
            tracing::error!(error = %message, "retraining failed after recording case");
            Ok(RetrainReport {
                error: Some(message),
                ..failed
            })
        }
    }
}

/// Retrain on demand, regardless of the automatic switch.
pub async fn retrain(ctx: &AppContext) -> anyhow::Result<RetrainReport> {
    let _lock = lock_case_log(ctx).await?;
    let snapshot = reload(ctx)?;
    run_retrainer(ctx, snapshot).await
}

fn reload(ctx: &AppContext) -> anyhow::Result<DatasetSnapshot> {
    ctx.case_log
        .snapshot()
        .with_context(|| format!("failed to reload {}", ctx.case_log.path().display()))
}

async fn run_retrainer(ctx: &AppContext, snapshot: DatasetSnapshot) -> anyhow::Result<RetrainReport> {
    let retrainer = Arc::clone(&ctx.retrainer);
    let valid_rows = snapshot.len();
    let dropped_rows = snapshot.dropped;

    let progress = Progress::spinner("retraining classifier");
    let started = Instant::now();
    let outcome = tokio::task::spawn_blocking(move || retrainer.maybe_retrain(&snapshot))
        .await
        .context("retraining task did not complete")?;
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let outcome = match outcome {
        Ok(outcome) => {
            progress.finish_clear();
            outcome
        }
        Err(error) => {
            progress.finish_err("retraining failed");
            return Err(error).with_context(|| {
                format!("failed to retrain classifier at {}", ctx.model_path.display())
            });
        }
    };

    let min_rows = ctx.config.retrain.min_rows;
    Ok(match outcome {
        RetrainOutcome::NotReady { .. } => RetrainReport {
            status: RetrainStatus::NotReady,
            valid_rows,
            dropped_rows,
            min_rows,
            vocabulary_size: None,
            classes: Vec::new(),
            duration_ms,
            error: None,
        },
        RetrainOutcome::Retrained {
            rows,
            vocabulary_size,
            classes,
        } => RetrainReport {
            status: RetrainStatus::Retrained,
            valid_rows: rows,
            dropped_rows,
            min_rows,
            vocabulary_size: Some(vocabulary_size),
            classes,
            duration_ms,
            error: None,
        },
    })
}

/// Report for a round that did not fit anything.
fn report(ctx: &AppContext, status: RetrainStatus, snapshot: &DatasetSnapshot) -> RetrainReport {
    RetrainReport {
        status,
        valid_rows: snapshot.len(),
        dropped_rows: snapshot.dropped,
        min_rows: ctx.config.retrain.min_rows,
        vocabulary_size: None,
        classes: Vec::new(),
        duration_ms: 0,
        error: None,
    }
}

/// Secondary classifier signal for a text, when an artifact exists.
pub fn model_decision(ctx: &AppContext, text: &str) -> Option<ModelPrediction> {
    ctx.load_classifier()?.predict(text)
}
