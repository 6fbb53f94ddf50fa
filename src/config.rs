//! Client configuration parsed from environment variables.
//!
//! Required:
//! - `INVENTO_BACKEND_URL`: base URL of the inventory REST API
//!
//! Optional:
//! - `INVENTO_TOKEN_FILE`: session file path (default `$HOME/.invento/session.json`)
//! - `INVENTO_REQUEST_TIMEOUT_SECS`: per-request timeout; unset means none

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

pub const BACKEND_URL_VAR: &str = "INVENTO_BACKEND_URL";
pub const TOKEN_FILE_VAR: &str = "INVENTO_TOKEN_FILE";
pub const REQUEST_TIMEOUT_VAR: &str = "INVENTO_REQUEST_TIMEOUT_SECS";

const SESSION_DIR: &str = ".invento";
const SESSION_FILE: &str = "session.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without a trailing slash.
    pub backend_url: String,
    pub token_file: PathBuf,
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Config for `backend_url` with the default token file and no timeout.
    #[must_use]
    pub fn new(backend_url: &str) -> Self {
        Self {
            backend_url: normalize_base_url(backend_url),
            token_file: default_token_file(std::env::var("HOME").ok().as_deref()),
            request_timeout: None,
        }
    }

    /// Load `.env` if present, then read the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend URL is missing or a value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend URL is missing or a value fails to parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup(BACKEND_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(BACKEND_URL_VAR))?;

        let token_file = lookup(TOKEN_FILE_VAR)
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| default_token_file(lookup("HOME").as_deref()), PathBuf::from);

        let request_timeout = parse_timeout(lookup(REQUEST_TIMEOUT_VAR).as_deref())?;

        Ok(Self { backend_url: normalize_base_url(&backend_url), token_file, request_timeout })
    }

    /// Absolute URL for an API path such as `/products`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.backend_url, path)
    }
}

pub(crate) fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

pub(crate) fn default_token_file(home: Option<&str>) -> PathBuf {
    let base = home
        .filter(|home| !home.is_empty())
        .map_or_else(|| PathBuf::from("."), PathBuf::from);
    base.join(SESSION_DIR).join(SESSION_FILE)
}

/// Parse a timeout in seconds. Unset, empty, or zero means no timeout.
pub(crate) fn parse_timeout(raw: Option<&str>) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    let secs = raw
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid { var: REQUEST_TIMEOUT_VAR, value: raw.to_owned() })?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}
