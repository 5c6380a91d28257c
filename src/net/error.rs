//! API client errors.

use crate::error::ErrorCode;

/// Errors produced by the REST client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Client configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (connect, timeout, body read).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The backend answered `{ "success": false }`.
    #[error("{0}")]
    Rejected(String),

    /// The response did not match the documented envelope or record shape.
    #[error("unexpected response shape: {0}")]
    Schema(String),
}

impl ErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "E_CONFIG",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::Request(_) => "E_REQUEST",
            Self::Http { .. } => "E_HTTP",
            Self::Rejected(_) => "E_REJECTED",
            Self::Schema(_) => "E_SCHEMA",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Http { status: 429 | 500..=599, .. })
    }
}

/// Pick a human message out of an error body.
///
/// Prefers the JSON `message` field, then `error`, then the status line
/// `HTTP <code> <reason>`.
#[must_use]
pub fn http_error_message(status: u16, reason: Option<&str>, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error", "detail"] {
            if let Some(serde_json::Value::String(text)) = map.get(key) {
                if !text.trim().is_empty() {
                    return text.trim().to_owned();
                }
            }
        }
    }
    match reason {
        Some(reason) => format!("HTTP {status} {reason}"),
        None => format!("HTTP {status}"),
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
