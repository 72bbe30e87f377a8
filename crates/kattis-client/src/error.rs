//! Error types for the submission client.

use std::fmt;
use std::path::PathBuf;

/// Why a login attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// 403 from the login endpoint.
    BadCredentials,
    /// 404 from the login endpoint.
    BadUrl,
    /// Any other non-200 status.
    Status(u16),
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadCredentials => write!(f, "Incorrect username or password/token (403)"),
            Self::BadUrl => write!(f, "Incorrect login URL (404)"),
            Self::Status(code) => write!(f, "Status code: {}", code),
        }
    }
}

/// Why the judge refused a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchFailure {
    /// 403 from the submit endpoint.
    Forbidden,
    /// 404 from the submit endpoint.
    NotFound,
    /// Any other non-200 status.
    Status(u16),
}

impl fmt::Display for DispatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forbidden => write!(f, "Access denied (403)"),
            Self::NotFound => write!(f, "Incorrect submit URL (404)"),
            Self::Status(code) => write!(f, "Status code: {}", code),
        }
    }
}

/// Client errors.
#[derive(Debug, thiserror::Error)]
pub enum KattisError {
    /// Config file missing, unreadable or incomplete.
    #[error("{message}")]
    Config { message: String },

    /// Nothing to submit.
    #[error("no source files given")]
    NoSourceFiles,

    /// A source file could not be read.
    #[error("failed to read {}: {message}", path.display())]
    SourceRead { path: PathBuf, message: String },

    /// No language override and the extension is not recognized.
    #[error(
        "No language specified, and I failed to guess language from filename extension \"{extension}\""
    )]
    Inference { extension: String },

    /// The login endpoint rejected us.
    #[error("Login failed. {0}")]
    Authentication(AuthFailure),

    /// The submit endpoint rejected the submission.
    #[error("Submission failed. {0}")]
    Dispatch(DispatchFailure),

    /// Connection-level failure.
    #[error("{stage} connection failed: {message}")]
    Network { stage: &'static str, message: String },

    /// The status document could not be decoded.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// The user declined the confirmation prompt.
    #[error("Cancelling")]
    Cancelled,

    /// Progress output could not be written.
    #[error("output error: {message}")]
    Output { message: String },
}

impl KattisError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Local problems, nothing was sent
            Self::Config { .. } => 1,
            Self::NoSourceFiles => 1,
            Self::SourceRead { .. } => 1,
            Self::Inference { .. } => 1,
            Self::Cancelled => 1,

            Self::Authentication(_) => 2,
            Self::Dispatch(_) => 3,
            Self::Network { .. } => 4,

            Self::InvalidResponse { .. } => 5,
            Self::Output { .. } => 5,
        }
    }

    pub(crate) fn network(stage: &'static str, err: reqwest::Error) -> Self {
        Self::Network {
            stage,
            message: err.to_string(),
        }
    }

    pub(crate) fn output(err: std::io::Error) -> Self {
        Self::Output {
            message: err.to_string(),
        }
    }
}

/// Result type for client operations.
pub type KattisResult<T> = Result<T, KattisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failure_messages() {
        let err = KattisError::Authentication(AuthFailure::BadCredentials);
        assert_eq!(
            err.to_string(),
            "Login failed. Incorrect username or password/token (403)"
        );

        let err = KattisError::Authentication(AuthFailure::Status(500));
        assert_eq!(err.to_string(), "Login failed. Status code: 500");
    }

    #[test]
    fn test_dispatch_failure_messages() {
        let err = KattisError::Dispatch(DispatchFailure::NotFound);
        assert_eq!(
            err.to_string(),
            "Submission failed. Incorrect submit URL (404)"
        );
    }

    #[test]
    fn test_inference_message_names_extension() {
        let err = KattisError::Inference {
            extension: ".xyz".to_string(),
        };
        assert!(err.to_string().contains("\".xyz\""));
    }

    #[test]
    fn test_exit_codes_are_nonzero() {
        let errors = [
            KattisError::NoSourceFiles,
            KattisError::Cancelled,
            KattisError::Authentication(AuthFailure::BadUrl),
            KattisError::Dispatch(DispatchFailure::Forbidden),
            KattisError::Network {
                stage: "Submit",
                message: "refused".to_string(),
            },
        ];
        for err in errors {
            assert_ne!(err.exit_code(), 0, "{err}");
        }
    }
}
