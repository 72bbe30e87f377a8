//! End-to-end submission flow: login, confirm, dispatch, monitor.

use std::io::Write;

use tracing::{debug, info};

use crate::client::KattisClient;
use crate::error::{KattisError, KattisResult};
use crate::monitor::JudgementMonitor;
use crate::submission::Submission;

/// Asks the user whether to go ahead with a submission.
pub trait Confirm {
    fn confirm(&self, submission: &Submission) -> bool;
}

/// Confirms everything (`--force`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _submission: &Submission) -> bool {
        true
    }
}

pub struct Pipeline<'a> {
    client: &'a KattisClient,
    confirm: &'a dyn Confirm,
}

impl<'a> Pipeline<'a> {
    pub fn new(client: &'a KattisClient, confirm: &'a dyn Confirm) -> Self {
        Self { client, confirm }
    }

    /// Submit and, when the judge reports an id, follow it to a verdict.
    ///
    /// Returns `true` for Accepted, and also when the submission went
    /// through but cannot be tracked.
    pub async fn run<W: Write>(&self, submission: &Submission, out: &mut W) -> KattisResult<bool> {
        let session = self.client.login().await?;
        debug!(user = %session.username(), "logged in");

        if !self.confirm.confirm(submission) {
            return Err(KattisError::Cancelled);
        }

        let outcome = self.client.submit(&session, submission).await?;
        writeln!(out, "{}", outcome.message).map_err(KattisError::output)?;

        let Some(handle) = outcome.handle else {
            info!("no submission id in response; not tracking judgement");
            return Ok(true);
        };
        writeln!(out, "{}", handle.url).map_err(KattisError::output)?;

        let source = self.client.status_source(&session);
        let monitor = JudgementMonitor::new(&source, self.client.config().poll_interval);
        monitor.watch(&handle, out).await
    }
}
