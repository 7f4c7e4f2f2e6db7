//! Token-carrying handle over a gateway.

use std::sync::Arc;

use sensit_core::error::SensitResult;

use crate::gateway::HttpGateway;
use crate::response::ApiResponse;

/// Entry point for typed API calls.
///
/// Holds the gateway and the bearer token of the current session. Cloning is
/// cheap; every clone sends the same token. Endpoint methods live in
/// [`crate::endpoints`].
#[derive(Clone)]
pub struct SensitApi {
    gateway: Arc<dyn HttpGateway>,
    token: Option<String>,
}

impl SensitApi {
    /// Create an unauthenticated handle.
    pub fn new(gateway: Arc<dyn HttpGateway>) -> Self {
        Self { gateway, token: None }
    }

    /// Return a handle that sends `token` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Bearer token sent with requests, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether a token is attached.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// GET through the gateway with the session token.
    pub async fn get(&self, path: &str) -> SensitResult<ApiResponse> {
        self.gateway.get(path, self.token()).await
    }

    /// POST through the gateway with the session token.
    pub async fn post(&self, path: &str, body: &serde_json::Value) -> SensitResult<ApiResponse> {
        self.gateway.post(path, body, self.token()).await
    }

    /// GET and require an accepted response.
    pub async fn get_accepted(&self, path: &str) -> SensitResult<ApiResponse> {
        self.get(path).await?.into_accepted(&format!("GET {path}"))
    }
}

impl std::fmt::Debug for SensitApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensitApi")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
