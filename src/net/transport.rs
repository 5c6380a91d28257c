//! HTTP transport seam.
//!
//! DESIGN
//! ======
//! `Transport` is the single async seam between typed API calls and the wire.
//! `HttpTransport` is the `reqwest` implementation; tests substitute an
//! in-memory implementation. A transport only moves bytes and reports the
//! status; envelope and record decoding happen in `api`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use super::ApiError;
use crate::config::ApiConfig;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One REST call: method, path relative to the base URL, query pairs, JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None }
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_owned(), value.to_string()));
        self
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Status and raw body text of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub reason: Option<String>,
    pub body: String,
}

impl RawResponse {
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200, reason: Some("OK".into()), body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError>;
}

// =============================================================================
// REQWEST IMPLEMENTATION
// =============================================================================

pub struct HttpTransport {
    http: reqwest::Client,
    config: ApiConfig,
}

impl HttpTransport {
    /// Build a `reqwest` client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::HttpClientBuild` if the TLS backend fails to load.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let request_id = Uuid::new_v4();
        let url = self.config.url_for(&request.path);
        let started = Instant::now();

        let mut builder = self
            .http
            .request(request.method.to_reqwest(), &url)
            .header(REQUEST_ID_HEADER, request_id.to_string());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &self.config.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            debug!(%request_id, method = request.method.as_str(), path = %request.path, error = %e, "request failed");
            ApiError::Request(e.to_string())
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Request(e.to_string()))?;

        debug!(
            %request_id,
            method = request.method.as_str(),
            path = %request.path,
            status = status.as_u16(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "api call"
        );

        Ok(RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_owned),
            body,
        })
    }
}
