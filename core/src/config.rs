//! Client configuration read from the environment.

use std::time::Duration;

use thiserror::Error;

pub const BASE_URL_VAR: &str = "CATEGORY_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "CATEGORY_API_TIMEOUT_SECS";
pub const TOKEN_VAR: &str = "CATEGORY_API_TOKEN";

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must not be empty")]
    EmptyBaseUrl { var: &'static str },

    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Settings for `ReqwestTransport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root without a trailing slash, e.g. `http://localhost:3000/api`.
    pub base_url: String,
    pub timeout: Duration,
    /// Sent as `Authorization: Bearer <token>` on every request when set.
    pub bearer_token: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            bearer_token: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from an arbitrary variable lookup; unset variables fall
    /// back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl { var: BASE_URL_VAR });
        }

        let timeout = match lookup(TIMEOUT_VAR) {
            None => DEFAULT_TIMEOUT,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout { var: TIMEOUT_VAR, value }),
            },
        };

        let bearer_token = lookup(TOKEN_VAR)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        Ok(Self {
            base_url: base_url.to_string(),
            timeout,
            bearer_token,
        })
    }
}
