//! HTTP client for the Sens'it REST API.
//!
//! Handles bearer authentication, timeout management, URL construction and
//! the request/response lifecycle. Requests are issued once: there is no
//! retry layer, a transport failure surfaces to the caller immediately.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::{debug, warn};

use sensit_core::config::{ApiConfig, AppConfig};
use sensit_core::constants;
use sensit_core::error::{SensitError, SensitResult};

use crate::gateway::HttpGateway;
use crate::response::ApiResponse;

/// reqwest-backed [`HttpGateway`].
#[derive(Clone)]
pub struct ApiClient {
    inner: Client,
    /// API root including the version segment (e.g. "https://api.sensit.io/v1").
    base_url: String,
    /// Per-request timeout.
    timeout: Duration,
}

impl ApiClient {
    /// Create a new ApiClient from API configuration.
    pub fn new(config: &ApiConfig) -> SensitResult<Self> {
        let base_url = AppConfig::sanitize_base_url(&config.base_url);

        let inner = Client::builder()
            .user_agent(format!("{}/{}", constants::APP_NAME, constants::APP_VERSION))
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| SensitError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner,
            base_url,
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }

    /// Get the API root URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for an API path. Absolute URLs pass through.
    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Internal: build a request for the given method, URL, token, and optional JSON body.
    fn build_request(
        &self,
        method: Method,
        url: &str,
        token: Option<&str>,
        body: Option<&serde_json::Value>,
    ) -> RequestBuilder {
        let mut builder = self.inner.request(method, url).timeout(self.timeout);
        if let Some(t) = token {
            builder = builder.bearer_auth(t);
        }
        if let Some(b) = body {
            builder = builder.json(b);
        }
        builder
    }

    /// Execute one request and decode whatever came back.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&serde_json::Value>,
    ) -> SensitResult<ApiResponse> {
        let url = self.url(path);
        debug!("{} {}", method, path);

        let response = self
            .build_request(method.clone(), &url, token, body)
            .send()
            .await
            .map_err(Self::classify_error)?;

        let resp = Self::read_response(response).await?;
        if !resp.is_accepted() {
            warn!("{} {} returned status {}", method, path, resp.status);
        }
        Ok(resp)
    }

    /// Read the body and wrap it with its status.
    async fn read_response(response: Response) -> SensitResult<ApiResponse> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SensitError::Http(format!("failed to read response body: {e}")))?;
        ApiResponse::from_body(status, &body)
    }

    /// Classify a reqwest error into a SensitError variant.
    fn classify_error(e: reqwest::Error) -> SensitError {
        if e.is_timeout() {
            SensitError::Timeout(e.to_string())
        } else if e.is_connect() {
            SensitError::Http(format!("connection failed: {e}"))
        } else {
            SensitError::Http(e.to_string())
        }
    }
}

#[async_trait]
impl HttpGateway for ApiClient {
    async fn get(&self, path: &str, token: Option<&str>) -> SensitResult<ApiResponse> {
        self.execute(Method::GET, path, token, None).await
    }

    async fn post(
        &self,
        path: &str,
        body: &serde_json::Value,
        token: Option<&str>,
    ) -> SensitResult<ApiResponse> {
        self.execute(Method::POST, path, token, Some(body)).await
    }
}
