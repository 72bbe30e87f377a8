//! `.kattisrc` discovery and parsing.
//!
//! The file is INI-formatted:
//!
//! ```text
//! [user]
//! username: yourusername
//! token: *********
//!
//! [kattis]
//! hostname: open.kattis.com
//! loginurl: https://open.kattis.com/login
//! submissionurl: https://open.kattis.com/submit
//! submissionsurl: https://open.kattis.com/submissions
//! ```
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `KATTIS_CONFIG` | Read this file instead of the default locations |
//! | `KATTIS_TIMEOUT` | Request timeout in seconds (default: 30) |
//! | `KATTIS_POLL_INTERVAL_MS` | Status poll interval (default: 250) |

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::error::{KattisError, KattisResult};

/// System-wide config, read before the per-user files.
pub const SYSTEM_CONFIG: &str = "/usr/local/etc/kattisrc";

const USER_CONFIG_NAME: &str = ".kattisrc";

const MISSING_CONFIG_HELP: &str = "\
I failed to read in a config file from your home directory or from the
same directory as this script. To download a .kattisrc file please visit
https://<kattis>/download/kattisrc

The file should look something like this:
[user]
username: yourusername
token: *********

[kattis]
hostname: <kattis>
loginurl: https://<kattis>/login
submissionurl: https://<kattis>/submit
submissionsurl: https://<kattis>/submissions";

const CORRUPTED_CONFIG_HELP: &str = "\
Your .kattisrc file appears corrupted. It must provide a token (or a
KATTIS password).

Please download a new .kattisrc file";

/// Login credentials from the `[user]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
    pub token: Option<String>,
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KattisConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,

    /// Judge hostname, used to derive any URL not given explicitly.
    pub hostname: Option<String>,
    pub login_url: Option<String>,
    pub submission_url: Option<String>,
    pub submissions_url: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Delay between status polls.
    pub poll_interval: Duration,
}

fn default_timeout() -> u64 {
    30
}

fn default_poll_interval() -> Duration {
    Duration::from_millis(250)
}

impl Default for KattisConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            token: None,
            hostname: None,
            login_url: None,
            submission_url: None,
            submissions_url: None,
            timeout_secs: default_timeout(),
            poll_interval: default_poll_interval(),
        }
    }
}

impl KattisConfig {
    /// Load the config from the default locations, honoring `KATTIS_CONFIG`.
    pub fn load() -> KattisResult<Self> {
        let config = match std::env::var_os("KATTIS_CONFIG") {
            Some(path) if !path.is_empty() => Self::load_from(&[], &[PathBuf::from(path)])?,
            _ => {
                let system = [PathBuf::from(SYSTEM_CONFIG)];
                Self::load_from(&system, &user_config_paths())?
            }
        };
        Ok(config.with_env_overrides())
    }

    /// Merge `system` files (optional) and `user` files (at least one must
    /// exist). Later files override earlier ones key by key.
    pub fn load_from(system: &[PathBuf], user: &[PathBuf]) -> KattisResult<Self> {
        let mut ini = Ini::default();

        for path in system {
            read_into(&mut ini, path)?;
        }

        let mut found_user = false;
        for path in user {
            found_user |= read_into(&mut ini, path)?;
        }

        if !found_user {
            return Err(KattisError::Config {
                message: MISSING_CONFIG_HELP.to_string(),
            });
        }

        Ok(Self::from_ini(&ini))
    }

    /// Parse config text directly.
    pub fn from_ini_str(text: &str) -> Self {
        let mut ini = Ini::default();
        ini.merge(text);
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Self {
        Self {
            username: ini.get("user", "username"),
            password: ini.get("user", "password"),
            token: ini.get("user", "token"),
            hostname: ini.get("kattis", "hostname"),
            login_url: ini.get("kattis", "loginurl"),
            submission_url: ini.get("kattis", "submissionurl"),
            submissions_url: ini.get("kattis", "submissionsurl"),
            ..Self::default()
        }
    }

    /// Apply `KATTIS_TIMEOUT` and `KATTIS_POLL_INTERVAL_MS`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(secs) = std::env::var("KATTIS_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.timeout_secs = secs;
        }
        if let Some(ms) = std::env::var("KATTIS_POLL_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.poll_interval = Duration::from_millis(ms);
        }
        self
    }

    /// Credentials for login. Requires a username and at least one of
    /// password or token.
    pub fn credentials(&self) -> KattisResult<Credentials> {
        let username = self.username.clone().ok_or_else(|| KattisError::Config {
            message: "No username found in the [user] section of .kattisrc".to_string(),
        })?;

        if self.password.is_none() && self.token.is_none() {
            return Err(KattisError::Config {
                message: CORRUPTED_CONFIG_HELP.to_string(),
            });
        }

        Ok(Credentials {
            username,
            password: self.password.clone(),
            token: self.token.clone(),
        })
    }

    pub fn login_url(&self) -> KattisResult<String> {
        self.url(self.login_url.as_deref(), "login")
            .ok_or_else(|| missing_url("loginurl"))
    }

    pub fn submission_url(&self) -> KattisResult<String> {
        self.url(self.submission_url.as_deref(), "submit")
            .ok_or_else(|| missing_url("submissionurl"))
    }

    /// Base URL for submission pages. `None` disables judgement tracking.
    pub fn submissions_url(&self) -> Option<String> {
        self.url(self.submissions_url.as_deref(), "submissions")
    }

    fn url(&self, explicit: Option<&str>, default_path: &str) -> Option<String> {
        match explicit {
            Some(url) => Some(url.to_string()),
            None => self
                .hostname
                .as_ref()
                .map(|host| format!("https://{}/{}", host, default_path)),
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Point every endpoint at `base` (`<base>/login`, `<base>/submit`,
    /// `<base>/submissions`).
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.login_url = Some(format!("{}/login", base));
        self.submission_url = Some(format!("{}/submit", base));
        self.submissions_url = Some(format!("{}/submissions", base));
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

fn missing_url(key: &str) -> KattisError {
    KattisError::Config {
        message: format!(
            "Your .kattisrc file has neither a {} nor a hostname in the [kattis] section",
            key
        ),
    }
}

fn user_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(USER_CONFIG_NAME));
    }
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        paths.push(dir.join(USER_CONFIG_NAME));
    }
    paths
}

/// Returns whether the file existed.
fn read_into(ini: &mut Ini, path: &Path) -> KattisResult<bool> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            debug!(path = %path.display(), "reading config");
            ini.merge(&text);
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(KattisError::Config {
            message: format!("failed to read {}: {}", path.display(), e),
        }),
    }
}

/// Minimal INI store: lowercase section and key names, last value wins.
#[derive(Debug, Default)]
struct Ini {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl Ini {
    fn merge(&mut self, text: &str) {
        let mut section: Option<String> = None;

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                section = Some(name.trim().to_lowercase());
                continue;
            }

            let Some(current) = &section else {
                continue;
            };

            if let Some(pos) = line.find(|c: char| c == ':' || c == '=') {
                let key = line[..pos].trim().to_lowercase();
                let value = line[pos + 1..].trim().to_string();
                self.sections
                    .entry(current.clone())
                    .or_default()
                    .insert(key, value);
            }
        }
    }

    fn get(&self, section: &str, key: &str) -> Option<String> {
        self.sections.get(section)?.get(key).cloned()
    }
}
