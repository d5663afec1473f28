use crate::error::ArdenError;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "https://ardenstats.com";
pub const DEFAULT_CLAUDE_DIR: &str = "~/.claude";
pub const DEFAULT_SETTINGS_PATH: &str = "~/.claude/settings.json";
pub const DEFAULT_IMPORT_LIMIT: usize = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const TELEMETRY_PATH: &str = "/api/v1/telemetry";
pub const EVENTS_PATH: &str = "/api/v1/events";

/// Process-wide settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Build the config from already-merged flag/env values.
    ///
    /// Blank values count as unset, and a trailing `/` on the host is dropped.
    pub fn resolve(host: Option<String>, token: Option<String>) -> Self {
        let host = host
            .map(|h| h.trim().trim_end_matches('/').to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Self {
            host,
            token,
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    pub fn require_token(&self) -> Result<&str, ArdenError> {
        self.token.as_deref().ok_or(ArdenError::MissingToken)
    }
}

/// Expand a leading `~` the way the shell would.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
