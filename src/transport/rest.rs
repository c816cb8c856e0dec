//! REST transport implementation using reqwest.
//!
//! Talks to the backend's JSON gateway. Unary endpoints answer with one JSON
//! document, streaming endpoints with newline-delimited JSON; both are read
//! in full and normalized by [`ApiResponse::from_body`].

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use url::Url;

use super::traits::{ApiResponse, Transport, TransportStats};
use crate::config::Config;
use crate::user_agent;
use crate::Error;

/// Accept header tolerant of both single-document and streamed answers.
const ACCEPT_JSON_OR_NDJSON: &str = "application/json, application/x-ndjson";

// ============================================================================
// REST Transport
// ============================================================================

/// REST transport using reqwest.
///
/// Configuration is fixed at construction; clones share the connection pool
/// and statistics.
#[derive(Clone)]
pub struct RestTransport {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
    stats: Arc<RwLock<TransportStats>>,
}

impl std::fmt::Debug for RestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestTransport")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

impl RestTransport {
    /// Creates a new REST transport builder.
    pub fn builder() -> RestTransportBuilder {
        RestTransportBuilder::new()
    }

    /// Creates a transport for `base_url`, authenticating with `api_key` if set.
    pub fn new(mut base_url: Url, api_key: Option<String>) -> Result<Self, Error> {
        // Url::join replaces the last path segment unless the base ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .user_agent(user_agent::user_agent())
            .build()
            .map_err(|e| {
                Error::configuration(format!("failed to create HTTP client: {}", e)).with_source(e)
            })?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.filter(|k| !k.is_empty()),
            stats: Arc::new(RwLock::new(TransportStats::default())),
        })
    }

    /// Creates a transport from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::new(config.base_url()?, config.api_key.clone())
    }

    /// Returns the normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds default headers for requests.
    fn build_headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON_OR_NDJSON));

        if let Some(ref key) = self.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|_| Error::configuration("API key is not a valid header value"))?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::configuration(format!("invalid URL path '{}': {}", path, e)))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, Error> {
        let url = self.endpoint(path)?;
        let mut request = self.client.request(method, url).headers(self.build_headers()?);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::debug!(path, status = status.as_u16(), "backend call rejected");
            return Err(match response.text().await {
                Ok(text) => Error::api(status.as_u16(), text),
                Err(err) => {
                    tracing::debug!(path, error = %err, "failed to read error body");
                    Error::api(status.as_u16(), "").with_source(err)
                }
            });
        }

        if status == StatusCode::NO_CONTENT {
            tracing::debug!(path, status = status.as_u16(), lines = 0, "backend call");
            return Ok(ApiResponse::Empty);
        }

        let text = response.text().await?;
        let parsed = ApiResponse::from_body(&text)?;
        tracing::debug!(path, status = status.as_u16(), lines = parsed.len(), "backend call");
        Ok(parsed)
    }
}

#[async_trait::async_trait]
impl Transport for RestTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, Error> {
        self.stats.write().requests += 1;
        let result = self.send(method, path, body).await;
        if result.is_err() {
            self.stats.write().failures += 1;
        }
        result
    }

    fn stats(&self) -> TransportStats {
        *self.stats.read()
    }
}

// ============================================================================
// REST Transport Builder
// ============================================================================

/// Builder for REST transport.
#[derive(Debug, Default)]
pub struct RestTransportBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
}

impl RestTransportBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL. Must carry a scheme.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self, Error> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Sets the bearer token.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Builds the REST transport.
    pub fn build(self) -> Result<RestTransport, Error> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::configuration("base URL is required"))?;
        RestTransport::new(base_url, self.api_key)
    }
}

// ============================================================================
// Tests
// ============================================================================
