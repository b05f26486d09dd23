use triage_core::responses::PredictResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PredictArgs;
use crate::commands::shared::input::read_text;
use crate::context::AppContext;
use crate::output::output;

/// Handle `triage predict`.
pub fn handle(args: &PredictArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = read_text(&args.input)?;
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("{}", triage_core::analysis::EMPTY_ANAMNESIS_MESSAGE);
    }

    let response = match ctx.load_classifier() {
        Some(artifact) => PredictResponse {
            model_available: true,
            prediction: artifact.predict(text),
        },
        None => {
            tracing::info!("no classifier artifact yet; record more cases or run `triage retrain`");
            PredictResponse {
                model_available: false,
                prediction: None,
            }
        }
    };
    output(&response, flags.format)
}
