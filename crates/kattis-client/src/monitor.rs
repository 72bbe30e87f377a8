//! Judgement monitor: polls a submission until the judge reaches a verdict.
//!
//! Every cycle fetches one status document, redraws the progress line in
//! place (`\r`) and either sleeps or, on a terminal code, prints the verdict
//! and returns whether the submission was accepted. Missing markup never
//! aborts the loop; it only degrades what is drawn.

use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use crossterm::style::Stylize;
use tracing::debug;

use crate::client::SubmissionHandle;
use crate::error::{KattisError, KattisResult};
use crate::status::{JudgeStatus, JudgementStatus, StatusDocument};

/// Anything that can produce the current status document of a submission.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch(&self, handle: &SubmissionHandle) -> KattisResult<StatusDocument>;
}

/// Polling loop with a fixed cadence and no timeout of its own.
pub struct JudgementMonitor<'a, S: StatusSource + ?Sized> {
    source: &'a S,
    interval: Duration,
}

impl<'a, S: StatusSource + ?Sized> JudgementMonitor<'a, S> {
    pub fn new(source: &'a S, interval: Duration) -> Self {
        Self { source, interval }
    }

    /// Poll until a terminal status, drawing progress to `out`.
    ///
    /// Returns `true` only for Accepted. A failed fetch aborts the loop.
    pub async fn watch<W: Write>(
        &self,
        handle: &SubmissionHandle,
        out: &mut W,
    ) -> KattisResult<bool> {
        writeln!(out).map_err(KattisError::output)?;

        let mut polls: u64 = 0;
        loop {
            let document = self.source.fetch(handle).await?;
            let status = JudgementStatus::from_document(&document);
            polls += 1;
            debug!(
                id = %handle.id,
                poll = polls,
                code = status.status.code(),
                done = status.testcases_done,
                total = status.testcases_total,
                "judgement status"
            );

            write!(out, "{}", render_progress(&status)).map_err(KattisError::output)?;

            if status.status.is_terminal() {
                write!(out, "{}", render_verdict(&status)).map_err(KattisError::output)?;
                out.flush().map_err(KattisError::output)?;
                return Ok(status.status.is_accepted());
            }

            out.flush().map_err(KattisError::output)?;
            tokio::time::sleep(self.interval).await;
        }
    }
}

/// The in-place progress line for one poll.
pub fn render_progress(status: &JudgementStatus) -> String {
    let label = status.status.label();

    if status.status == JudgeStatus::CompileError {
        let mut line = format!("\r{}", label.red());
        if let Some(error) = &status.compile_error {
            line.push_str(&format!("{}\n{}", ":".red(), error));
        }
        return line;
    }

    if status.status.is_pending() {
        return format!("\r{}...", label);
    }

    format!("\rTest cases: {}", progress_bar(status))
}

/// Bracketed per-testcase bar, or `???` when the total is unknown.
pub fn progress_bar(status: &JudgementStatus) -> String {
    let total = status.testcases_total as usize;
    if total == 0 {
        return "???".to_string();
    }

    let mark = if status.status.is_running() {
        '?'
    } else if status.status.is_accepted() {
        '.'
    } else {
        'x'
    };

    let done = status.testcases_done as usize;
    let mut marks = ".".repeat(done.saturating_sub(1));
    marks.push(mark);

    format!(
        "[{:<width$}]  {} / {}",
        marks,
        status.testcases_done,
        status.testcases_total,
        width = total
    )
}

/// Text printed once a terminal status is reached.
pub fn render_verdict(status: &JudgementStatus) -> String {
    let mut text = String::from("\n");
    if status.status == JudgeStatus::CompileError {
        return text;
    }

    let mut label = status.status.label();
    if let Some(cpu) = &status.cpu_time {
        label.push_str(&format!(" ({})", cpu));
    }

    let colored = if status.status.is_accepted() {
        label.green()
    } else {
        label.red()
    };
    text.push_str(&format!("{}\n", colored));
    text
}
