//! Backend connection settings parsed from environment variables.
//!
//! DESIGN
//! ======
//! `ApiConfig` is built once and handed to `ApiClient::new`; nothing else in
//! the crate reads the environment. `from_lookup` takes the variable source
//! as a closure so tests can feed a map instead of mutating process env.

use crate::net::ApiError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_URL: &str = "STOCKROOM_API_URL";
pub const ENV_API_TOKEN: &str = "STOCKROOM_API_TOKEN";
pub const ENV_REQUEST_TIMEOUT: &str = "STOCKROOM_REQUEST_TIMEOUT_SECS";
pub const ENV_CONNECT_TIMEOUT: &str = "STOCKROOM_CONNECT_TIMEOUT_SECS";
pub const ENV_LOG: &str = "STOCKROOM_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash, e.g. `http://localhost:8000/api`.
    pub base_url: String,
    /// Bearer token sent as `Authorization: Bearer <token>` when present.
    pub token: Option<String>,
    pub timeouts: Timeouts,
}

impl ApiConfig {
    /// Build a config for `base_url` with no token and default timeouts.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the URL is not http(s).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self { base_url: normalize_base_url(base_url)?, token: None, timeouts: Timeouts::default() })
    }

    /// Build typed API config from environment variables.
    ///
    /// Optional:
    /// - `STOCKROOM_API_URL`: default `http://localhost:8000/api`
    /// - `STOCKROOM_API_TOKEN`: bearer token; blank means none
    /// - `STOCKROOM_REQUEST_TIMEOUT_SECS`: default 30
    /// - `STOCKROOM_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` for a malformed URL or timeout.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` for a malformed URL or timeout.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(lookup(ENV_API_URL).as_deref().unwrap_or(DEFAULT_API_URL))?;
        let token = lookup(ENV_API_TOKEN).and_then(non_blank);
        let timeouts = Timeouts {
            request_secs: parse_secs(ENV_REQUEST_TIMEOUT, lookup(ENV_REQUEST_TIMEOUT), DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_secs(ENV_CONNECT_TIMEOUT, lookup(ENV_CONNECT_TIMEOUT), DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };
        Ok(Self { base_url, token, timeouts })
    }

    /// Apply command-line overrides on top of the environment values.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the override URL is not http(s).
    pub fn with_overrides(mut self, base_url: Option<&str>, token: Option<&str>) -> Result<Self, ApiError> {
        if let Some(url) = base_url {
            self.base_url = normalize_base_url(url)?;
        }
        if let Some(token) = token {
            self.token = non_blank(token.to_owned());
        }
        Ok(self)
    }

    /// Join the base URL with an endpoint path such as `/products/3`.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ApiError::Config("API base URL is empty".into()));
    }
    let lower = trimmed.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return Err(ApiError::Config(format!("API base URL must start with http:// or https://: {trimmed}")));
    }
    Ok(trimmed.to_owned())
}

fn parse_secs(key: &str, raw: Option<String>, default: u64) -> Result<u64, ApiError> {
    match raw.and_then(non_blank) {
        None => Ok(default),
        Some(v) => match v.parse::<u64>() {
            Ok(0) => Err(ApiError::Config(format!("{key} must be greater than zero"))),
            Ok(secs) => Ok(secs),
            Err(_) => Err(ApiError::Config(format!("{key} is not a whole number of seconds: {v}"))),
        },
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

/// Parse a log level name for the stderr subscriber. Unset means `warn`.
///
/// # Errors
///
/// Returns `ApiError::Config` for an unknown level name.
pub fn parse_log_level(raw: Option<&str>) -> Result<tracing::Level, ApiError> {
    match raw.map(|r| r.trim().to_ascii_lowercase()).as_deref() {
        None | Some("" | "warn") => Ok(tracing::Level::WARN),
        Some("error") => Ok(tracing::Level::ERROR),
        Some("info") => Ok(tracing::Level::INFO),
        Some("debug") => Ok(tracing::Level::DEBUG),
        Some("trace") => Ok(tracing::Level::TRACE),
        Some(other) => Err(ApiError::Config(format!("unknown {ENV_LOG} level: {other}"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
