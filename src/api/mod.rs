//! HTTP client for the NFT Intelligence backend.
//!
//! DESIGN
//! ======
//! One `reqwest::Client` is built per [`ApiConfig`] with request and
//! connect timeouts. Panels describe their call as an [`ApiRequest`] and
//! decode the JSON body themselves through [`Remote`], so the client
//! implements the loader's `Source` trait once for every remote panel.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures, non-2xx statuses, malformed bodies and
//! `{ "success": false }` envelopes all surface as [`ApiError`]. Loaders
//! treat every variant the same way (substitute demo data).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::ApiConfig;
use crate::loader::{Panel, Source};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by backend calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (DNS, refused, reset).
    #[error("request failed: {0}")]
    Request(String),

    /// No response arrived within the configured request timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The backend wrapped its answer in `{ "success": false }`.
    #[error("backend rejected request: {0}")]
    Rejected(String),
}

// =============================================================================
// ENDPOINTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Chat,
    AnalyzeWallet,
    AnalyzeCollection,
    MarketInsights,
    Health,
    Demo,
}

impl Endpoint {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Chat => "/api/chat",
            Self::AnalyzeWallet => "/api/analyze/wallet",
            Self::AnalyzeCollection => "/api/analyze/collection",
            Self::MarketInsights => "/api/market/insights",
            Self::Health => "/health",
            Self::Demo => "/demo",
        }
    }

    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::Chat | Self::AnalyzeWallet | Self::AnalyzeCollection => Method::POST,
            Self::MarketInsights | Self::Health | Self::Demo => Method::GET,
        }
    }
}

/// A single outbound call: endpoint plus optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub body: Option<Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn get(endpoint: Endpoint) -> Self {
        Self { endpoint, body: None }
    }

    #[must_use]
    pub fn post(endpoint: Endpoint, body: Value) -> Self {
        Self { endpoint, body: Some(body) }
    }
}

/// A panel whose data comes from the backend.
pub trait Remote: Panel {
    /// Describe the call for `input`. Input has already been validated.
    fn request(&self, input: &Self::Input) -> ApiRequest;

    /// Decode a successful response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parse`] or [`ApiError::Rejected`] when the body
    /// cannot be turned into the panel record.
    fn parse(&self, body: Value) -> Result<Self::Output, ApiError>;
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
}

impl ApiClient {
    /// Build a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the TLS backend fails to
    /// initialise.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone(), request_timeout: config.request_timeout() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send `request` and return the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or a body
    /// that is not JSON.
    pub async fn send(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let text = self.send_text(request).await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// `GET /health`, returning the raw body.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or unhealthy.
    pub async fn health(&self) -> Result<String, ApiError> {
        self.send_text(&ApiRequest::get(Endpoint::Health)).await
    }

    /// `GET /demo`, returning whatever JSON the backend serves.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or non-JSON.
    pub async fn demo(&self) -> Result<Value, ApiError> {
        self.send(&ApiRequest::get(Endpoint::Demo)).await
    }

    async fn send_text(&self, request: &ApiRequest) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, request.endpoint.path());
        debug!(method = %request.endpoint.method(), %url, "backend request");

        let builder = self.http.request(request.endpoint.method(), &url);
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| self.map_transport(&e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_transport(&e))?;
        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), body: text });
        }
        Ok(text)
    }

    fn map_transport(&self, error: &reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout(self.request_timeout)
        } else {
            ApiError::Request(error.to_string())
        }
    }
}

#[async_trait]
impl<P: Remote> Source<P> for ApiClient {
    async fn fetch(&self, panel: &P, input: &P::Input) -> Result<P::Output, ApiError> {
        let body = self.send(&panel.request(input)).await?;
        panel.parse(body)
    }
}

// =============================================================================
// BODY HELPERS
// =============================================================================

/// Deserialize a JSON body into a panel record.
///
/// # Errors
///
/// Returns [`ApiError::Parse`] when required fields are missing or mistyped.
pub fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Strip an optional `{ "success": bool, "data": ... }` envelope.
///
/// Bodies without a boolean `success` field pass through untouched.
///
/// # Errors
///
/// Returns [`ApiError::Rejected`] for `success: false` and
/// [`ApiError::Parse`] for a successful envelope without `data`.
pub fn unwrap_envelope(body: Value) -> Result<Value, ApiError> {
    let Value::Object(mut map) = body else {
        return Ok(body);
    };
    match map.get("success").and_then(Value::as_bool) {
        None => Ok(Value::Object(map)),
        Some(true) => map
            .remove("data")
            .ok_or_else(|| ApiError::Parse("envelope missing `data`".to_owned())),
        Some(false) => {
            let reason = ["error", "message"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .unwrap_or("success=false")
                .to_owned();
            Err(ApiError::Rejected(reason))
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
