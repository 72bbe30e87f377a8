//! Submission client for the Kattis judge.
//!
//! This crate provides:
//!
//! - Language and entry point inference from a set of source files
//! - Login and multipart submission over an authenticated session
//! - A polling monitor that turns status documents into progress and a verdict
//! - `.kattisrc` discovery and parsing
//!
//! # Quick Start
//!
//! ```no_run
//! use kattis_client::{AlwaysConfirm, KattisClient, Overrides, Pipeline, SourceSet, Submission};
//!
//! # async fn example() -> kattis_client::KattisResult<()> {
//! let sources = SourceSet::read(&["hello.py"])?;
//! let submission = Submission::prepare(&sources, &Overrides::default())?;
//!
//! let client = KattisClient::from_config_files()?;
//! let accepted = Pipeline::new(&client, &AlwaysConfirm)
//!     .run(&submission, &mut std::io::stdout())
//!     .await?;
//! println!("accepted: {}", accepted);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `KATTIS_CONFIG` | Config file to use instead of `~/.kattisrc` |
//! | `KATTIS_TIMEOUT` | Request timeout in seconds (default: 30) |
//! | `KATTIS_POLL_INTERVAL_MS` | Status poll interval (default: 250) |

pub mod client;
pub mod config;
pub mod error;
pub mod language;
pub mod monitor;
pub mod pipeline;
pub mod source;
pub mod status;
pub mod submission;

// Re-export main types
pub use client::{DispatchOutcome, KattisClient, Session, SubmissionHandle, KATTIS_USER_AGENT};
pub use config::{Credentials, KattisConfig};
pub use error::{AuthFailure, DispatchFailure, KattisError, KattisResult};
pub use language::{
    detect_language, guess_entry_point, resolve_mainclass, EntryKind, LanguageProfile,
};
pub use monitor::{JudgementMonitor, StatusSource};
pub use pipeline::{AlwaysConfirm, Confirm, Pipeline};
pub use source::{SourceFile, SourceSet};
pub use status::{JudgeStatus, JudgementStatus, StatusDocument, RUNNING_CODE};
pub use submission::{encode_files, Attachment, Overrides, Submission};
