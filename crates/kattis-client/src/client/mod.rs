//! Judge client: login, submit, status polling.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::KattisConfig;
use crate::error::KattisResult;
use crate::monitor::StatusSource;
use crate::status::StatusDocument;
use crate::submission::Submission;

mod helpers;
mod http;

use helpers::{extract_submission_id, plain_text, submission_url};
use http::HttpBackend;

/// User-Agent sent with every request.
pub const KATTIS_USER_AGENT: &str = "kattis-cli-submit";

/// An authenticated session: an HTTP client whose cookie jar holds the
/// login cookie. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Session {
    client: reqwest::Client,
    username: String,
}

impl Session {
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// A dispatched submission that can be tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionHandle {
    pub id: String,
    /// Submission page; the status document lives at `<url>?json`.
    pub url: String,
}

/// What the judge said after accepting a submission.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    /// Response body with `<br />` turned into newlines.
    pub message: String,
    /// `None` when no id was reported or no submissions URL is configured.
    pub handle: Option<SubmissionHandle>,
}

/// Client for one judge, configured from `.kattisrc`.
#[derive(Debug, Clone)]
pub struct KattisClient {
    http: HttpBackend,
    config: KattisConfig,
}

impl KattisClient {
    pub fn new(config: KattisConfig) -> Self {
        Self {
            http: HttpBackend {
                timeout: Duration::from_secs(config.timeout_secs),
            },
            config,
        }
    }

    pub fn from_config_files() -> KattisResult<Self> {
        Ok(Self::new(KattisConfig::load()?))
    }

    pub fn config(&self) -> &KattisConfig {
        &self.config
    }

    /// Log in with the configured credentials.
    pub async fn login(&self) -> KattisResult<Session> {
        let credentials = self.config.credentials()?;
        let url = self.config.login_url()?;
        debug!(url = %url, user = %credentials.username, "logging in");

        let client = self.http.session_client()?;
        self.http.login(&client, &url, &credentials).await?;

        Ok(Session {
            client,
            username: credentials.username,
        })
    }

    /// Send `submission` using `session`.
    pub async fn submit(
        &self,
        session: &Session,
        submission: &Submission,
    ) -> KattisResult<DispatchOutcome> {
        let url = self.config.submission_url()?;
        debug!(
            url = %url,
            problem = %submission.problem,
            files = submission.files.len(),
            "submitting"
        );

        let body = self.http.submit(&session.client, &url, submission).await?;
        let message = plain_text(&body);

        let handle = match (
            extract_submission_id(&message),
            self.config.submissions_url(),
        ) {
            (Some(id), Some(base)) => Some(SubmissionHandle {
                url: submission_url(&base, &id),
                id,
            }),
            (id, base) => {
                debug!(
                    id = ?id,
                    has_base = base.is_some(),
                    "submission cannot be tracked"
                );
                None
            }
        };

        Ok(DispatchOutcome { message, handle })
    }

    /// Fetch the current status document for `handle`.
    pub async fn fetch_status(
        &self,
        session: &Session,
        handle: &SubmissionHandle,
    ) -> KattisResult<StatusDocument> {
        self.http.status(&session.client, &handle.url).await
    }

    /// Status source bound to `session`, for the judgement monitor.
    pub fn status_source<'a>(&'a self, session: &'a Session) -> SessionStatus<'a> {
        SessionStatus {
            client: self,
            session,
        }
    }
}

/// Polls a submission's status through an authenticated session.
#[derive(Debug, Clone, Copy)]
pub struct SessionStatus<'a> {
    client: &'a KattisClient,
    session: &'a Session,
}

#[async_trait]
impl<'a> StatusSource for SessionStatus<'a> {
    async fn fetch(&self, handle: &SubmissionHandle) -> KattisResult<StatusDocument> {
        self.client.fetch_status(self.session, handle).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_uses_configured_timeout() {
        let config = KattisConfig {
            timeout_secs: 7,
            ..Default::default()
        };
        let client = KattisClient::new(config);
        assert_eq!(client.http.timeout, Duration::from_secs(7));
    }

    #[tokio::test]
    async fn test_login_requires_credentials() {
        let client = KattisClient::new(KattisConfig::default().with_hostname("example.invalid"));
        assert!(matches!(
            client.login().await,
            Err(crate::error::KattisError::Config { .. })
        ));
    }
}
