//! Interactive two-screen analysis loop.
//!
//! The input screen collects a multi-line anamnesis ended by an empty line.
//! The result screen shows the assessment and waits for `n` (new analysis)
//! or `q` (quit). `:q` on the input screen also quits.

use std::io::{BufRead, Write};

use triage_core::responses::AnalyzeResponse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::pipeline::{self, Submission};
use crate::screen;

const QUIT_COMMAND: &str = ":q";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Input,
    Result,
}

/// Per-session state, passed explicitly to each step.
#[derive(Debug, Default)]
pub struct SessionContext {
    screen: Screen,
    draft: Vec<String>,
    last: Option<AnalyzeResponse>,
    notice: Option<String>,
    recorded: usize,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub const fn recorded(&self) -> usize {
        self.recorded
    }

    pub fn push_line(&mut self, line: &str) {
        self.draft.push(line.to_string());
    }

    /// Drain the draft as one text.
    pub fn take_text(&mut self) -> String {
        std::mem::take(&mut self.draft).join("\n")
    }

    /// Stay on the input screen with a message.
    pub fn reject(&mut self, message: String) {
        self.notice = Some(message);
        self.screen = Screen::Input;
    }

    pub fn show_result(&mut self, response: AnalyzeResponse) {
        if response.recorded {
            self.recorded += 1;
        }
        self.notice = None;
        self.last = Some(response);
        self.screen = Screen::Result;
    }

    /// Back to an empty input screen. The recorded-case count survives.
    pub fn reset(&mut self) {
        self.screen = Screen::Input;
        self.draft.clear();
        self.last = None;
        self.notice = None;
    }
}

/// Handle `triage session`.
pub async fn handle(ctx: &AppContext, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let recorded = run(ctx, stdin.lock(), &mut stdout).await?;
    tracing::info!(recorded, "session ended");
    Ok(())
}

/// Drive the session until the user quits or input ends. Returns the
/// number of cases recorded.
pub async fn run<R, W>(ctx: &AppContext, mut input: R, out: &mut W) -> anyhow::Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut session = SessionContext::new();

    loop {
        match session.screen() {
            Screen::Input => {
                if let Some(notice) = &session.notice {
                    writeln!(out, "{notice}")?;
                }
                writeln!(
                    out,
                    "Enter the complete anamnesis (finish with an empty line, {QUIT_COMMAND} to quit):"
                )?;
                out.flush()?;

                let mut ended = false;
                loop {
                    let Some(line) = read_line(&mut input)? else {
                        ended = true;
                        break;
                    };
                    if line.trim() == QUIT_COMMAND {
                        return Ok(session.recorded());
                    }
                    if line.trim().is_empty() {
                        break;
                    }
                    session.push_line(&line);
                }

                let text = session.take_text();
                if ended && text.trim().is_empty() {
                    return Ok(session.recorded());
                }

                match pipeline::submit(ctx, &text, true).await {
                    Ok(Submission::Rejected { message }) => session.reject(message),
                    Ok(Submission::Completed(response)) => session.show_result(*response),
                    Err(error) => {
                        tracing::error!(error = %format!("{error:#}"), "submission failed");
                        session.reject(format!("Could not record the case: {error:#}"));
                    }
                }
            }
            Screen::Result => {
                if let Some(response) = &session.last {
                    writeln!(out, "\n{}\n", screen::render_result(response))?;
                }

                loop {
                    writeln!(out, "[n] new analysis  [q] quit")?;
                    out.flush()?;
                    let Some(choice) = read_line(&mut input)? else {
                        return Ok(session.recorded());
                    };
                    match choice.trim().to_ascii_lowercase().as_str() {
                        "n" => {
                            session.reset();
                            break;
                        }
                        "q" | QUIT_COMMAND => return Ok(session.recorded()),
                        _ => {}
                    }
                }
            }
        }
    }
}

/// One line without its terminator, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use triage_config::TriageConfig;
    use triage_core::dataset::DatasetSnapshot;
    use triage_model::{ModelError, RetrainOutcome, Retrainer};

    use super::*;

    struct BrokenRetrainer;

    impl Retrainer for BrokenRetrainer {
        fn maybe_retrain(&self, _snapshot: &DatasetSnapshot) -> Result<RetrainOutcome, ModelError> {
            Err(ModelError::Io {
                path: "model.json".into(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    fn project() -> (TempDir, AppContext) {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::create_dir_all(temp.path().join(".triage")).expect("dir should create");
        std::fs::write(
            temp.path().join(".triage/symptoms.csv"),
            "symptom,risk\nfebre,60\nvômito,85\n",
        )
        .expect("table should write");
        let ctx = AppContext::init(temp.path().to_path_buf(), TriageConfig::default())
            .expect("context should init");
        (temp, ctx)
    }

    async fn drive(ctx: &AppContext, script: &str) -> (usize, String) {
        let mut out = Vec::new();
        let recorded = run(ctx, Cursor::new(script.as_bytes().to_vec()), &mut out)
            .await
            .expect("session should run");
        (recorded, String::from_utf8(out).expect("output is utf-8"))
    }

    #[test]
    fn reset_returns_to_empty_input() {
        let mut session = SessionContext::new();
        session.push_line("febre");
        session.reject("x".to_string());
        session.reset();

        assert_eq!(session.screen(), Screen::Input);
        assert!(session.take_text().is_empty());
        assert!(session.notice.is_none());
    }

    #[tokio::test]
    async fn multiline_anamnesis_is_one_case() {
        let (_temp, ctx) = project();

        let (recorded, out) = drive(&ctx, "febre alta\ne vômito\n\nq\n").await;

        assert_eq!(recorded, 1);
        assert!(out.contains("Decision: Admit"));
        let scan = ctx.case_log.scan().unwrap();
        assert_eq!(scan.records[0].case.anamnesis, "febre alta\ne vômito");
    }

    #[tokio::test]
    async fn blank_submission_shows_message_and_records_nothing() {
        let (_temp, ctx) = project();

        let (recorded, out) = drive(&ctx, "\n:q\n").await;

        assert_eq!(recorded, 0);
        assert!(out.contains("please enter the complete anamnesis"));
        assert!(!ctx.case_log.exists());
    }

    #[tokio::test]
    async fn new_analysis_after_reset() {
        let (_temp, ctx) = project();

        let (recorded, out) = drive(&ctx, "febre\n\nx\nn\napatia\n\nq\n").await;

        assert_eq!(recorded, 2);
        assert!(out.contains("No critical symptom identified."));
        assert_eq!(ctx.case_log.count().unwrap(), 2);
    }

    #[tokio::test]
    async fn failed_retrain_still_shows_result() {
        let (_temp, mut ctx) = project();
        ctx.retrainer = std::sync::Arc::new(BrokenRetrainer);

        let (recorded, out) = drive(&ctx, "vômito\n\nn\nfebre\n\nq\n").await;

        assert_eq!(recorded, 2);
        assert!(out.contains("Decision: Admit"));
        assert!(out.contains("Retraining failed"));
    }

    #[tokio::test]
    async fn unwritable_log_keeps_session_open() {
        let (temp, ctx) = project();
        std::fs::create_dir_all(temp.path().join(".triage/cases.jsonl")).unwrap();

        let (recorded, out) = drive(&ctx, "febre\n\n:q\n").await;

        assert_eq!(recorded, 0);
        assert!(out.contains("Could not record the case"));
        assert!(!ctx.case_log.lock_path().exists());
    }

    #[tokio::test]
    async fn idle_session_holds_no_lock() {
        let (_temp, ctx) = project();

        let (_, _) = drive(&ctx, "febre\n\n").await;

        let other = ctx.case_log.lock().expect("other writers are not blocked");
        drop(other);
    }

    #[tokio::test]
    async fn quit_on_input_screen_exits_immediately() {
        let (_temp, ctx) = project();
        let (recorded, _) = drive(&ctx, ":q\nfebre\n\n").await;
        assert_eq!(recorded, 0);
        assert!(!ctx.case_log.exists());
    }

    #[tokio::test]
    async fn end_of_input_submits_pending_text() {
        let (_temp, ctx) = project();
        let (recorded, _) = drive(&ctx, "vômito").await;
        assert_eq!(recorded, 1);
    }
}
