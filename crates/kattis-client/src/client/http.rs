//! HTTP layer: client construction, status mapping, body decoding.
//!
//! This is the ONLY place for status code handling. client/mod.rs never
//! interprets status codes.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use crate::config::Credentials;
use crate::error::{AuthFailure, DispatchFailure, KattisError, KattisResult};
use crate::status::StatusDocument;
use crate::submission::{Submission, FILE_FIELD};

use super::KATTIS_USER_AGENT;

/// Builds per-session HTTP clients and maps responses to outcomes.
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) timeout: Duration,
}

impl HttpBackend {
    /// Fresh client with its own cookie jar; the jar is what makes it a
    /// session once login succeeds.
    pub(crate) fn session_client(&self) -> KattisResult<reqwest::Client> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(KATTIS_USER_AGENT));

        reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(default_headers)
            .cookie_provider(Arc::new(Jar::default()))
            .build()
            .map_err(|e| KattisError::Network {
                stage: "Login",
                message: format!("failed to create HTTP client: {}", e),
            })
    }

    /// POST the login form; 200 means the jar now holds a session cookie.
    pub(crate) async fn login(
        &self,
        client: &reqwest::Client,
        url: &str,
        credentials: &Credentials,
    ) -> KattisResult<()> {
        let mut form: Vec<(&str, &str)> = vec![
            ("user", credentials.username.as_str()),
            ("script", "true"),
        ];
        if let Some(password) = credentials.password.as_deref() {
            form.push(("password", password));
        }
        if let Some(token) = credentials.token.as_deref() {
            form.push(("token", token));
        }

        let response = client
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(|e| KattisError::network("Login", e))?;

        match response.status().as_u16() {
            200 => Ok(()),
            403 => Err(KattisError::Authentication(AuthFailure::BadCredentials)),
            404 => Err(KattisError::Authentication(AuthFailure::BadUrl)),
            other => Err(KattisError::Authentication(AuthFailure::Status(other))),
        }
    }

    /// POST the multipart submission; returns the response body.
    pub(crate) async fn submit(
        &self,
        client: &reqwest::Client,
        url: &str,
        submission: &Submission,
    ) -> KattisResult<String> {
        let mut form = Form::new();
        for (name, value) in submission.form_fields() {
            form = form.text(name, value);
        }
        for attachment in submission.attachments() {
            let part = Part::bytes(attachment.content)
                .file_name(attachment.file_name)
                .mime_str(attachment.mime)
                .map_err(|e| KattisError::network("Submit", e))?;
            form = form.part(FILE_FIELD, part);
        }

        let response = client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| KattisError::network("Submit", e))?;

        match response.status().as_u16() {
            200 => {}
            403 => return Err(KattisError::Dispatch(DispatchFailure::Forbidden)),
            404 => return Err(KattisError::Dispatch(DispatchFailure::NotFound)),
            other => return Err(KattisError::Dispatch(DispatchFailure::Status(other))),
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| KattisError::network("Submit", e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// GET `<url>?json` and decode it.
    pub(crate) async fn status(
        &self,
        client: &reqwest::Client,
        url: &str,
    ) -> KattisResult<StatusDocument> {
        let status_url = format!("{}?json", url);
        debug!(url = %status_url, "polling submission status");

        let response = client
            .get(&status_url)
            .send()
            .await
            .map_err(|e| KattisError::network("Status", e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "status poll rejected");
            return Err(KattisError::InvalidResponse {
                message: format!("HTTP {} from {}", status.as_u16(), status_url),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| KattisError::network("Status", e))?;

        serde_json::from_str(&text).map_err(|e| KattisError::InvalidResponse {
            message: format!("failed to parse status document: {}", e),
        })
    }
}
