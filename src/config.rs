//! Client configuration.
//!
//! Built from defaults, overridden by environment variables, then by the
//! builder methods.
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `QUIZBANK_API_URL` | server root, default `http://localhost:5000/api` |
//! | `QUIZBANK_STATE_DIR` | where the saved session lives, default `~/.quizbank` |
//! | `QUIZBANK_TIMEOUT_SECS` | per-request timeout; unset means none |
//! | `QUIZBANK_STRICT_ORDERING` | `1` ignores responses superseded by a newer request |

use std::path::PathBuf;
use std::time::Duration;

use crate::adapters::file_store::STATE_DIR;
use crate::api::DEFAULT_API_URL;
use crate::lifecycle::StaleResponsePolicy;

pub const ENV_API_URL: &str = "QUIZBANK_API_URL";
pub const ENV_STATE_DIR: &str = "QUIZBANK_STATE_DIR";
pub const ENV_TIMEOUT_SECS: &str = "QUIZBANK_TIMEOUT_SECS";
pub const ENV_STRICT_ORDERING: &str = "QUIZBANK_STRICT_ORDERING";

/// Settings for building a [`QuizClient`](crate::app::QuizClient).
///
/// # Example
///
/// ```ignore
/// use quizbank::config::ClientConfig;
///
/// let config = ClientConfig::from_env()
///     .with_request_timeout(std::time::Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// `None` when no home directory could be found
    pub state_dir: Option<PathBuf>,
    pub request_timeout: Option<Duration>,
    pub stale_responses: StaleResponsePolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            state_dir: dirs::home_dir().map(|home| home.join(STATE_DIR)),
            request_timeout: None,
            stale_responses: StaleResponsePolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = Some(dir.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_stale_responses(mut self, policy: StaleResponsePolicy) -> Self {
        self.stale_responses = policy;
        self
    }

    /// Defaults overridden by the `QUIZBANK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = get(ENV_API_URL) {
            config.api_base_url = url.trim().to_string();
        }
        if let Some(dir) = get(ENV_STATE_DIR) {
            config.state_dir = Some(PathBuf::from(dir));
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Some(Duration::from_secs(secs)),
                _ => tracing::warn!(value = %secs, "Ignoring invalid {}", ENV_TIMEOUT_SECS),
            }
        }
        if get(ENV_STRICT_ORDERING).as_deref().map(str::trim) == Some("1") {
            config.stale_responses = StaleResponsePolicy::LatestIssuedWins;
        }
        config
    }
}
