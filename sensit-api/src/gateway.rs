//! Transport seam between the typed API and the network.

use async_trait::async_trait;
use sensit_core::error::SensitResult;

use crate::response::ApiResponse;

/// Issues requests against the API root.
///
/// `path` is relative to the configured base URL (`/devices`, or a
/// normalized pagination link). A bearer token, when given, goes into the
/// `Authorization` header of that one request; implementations keep no
/// credential state of their own.
///
/// A non-success status is not an error at this layer: it comes back as an
/// [`ApiResponse`] for the caller to judge. Errors are reserved for requests
/// that produced no usable response.
#[async_trait]
pub trait HttpGateway: Send + Sync {
    /// Issue a GET request.
    async fn get(&self, path: &str, token: Option<&str>) -> SensitResult<ApiResponse>;

    /// Issue a POST request with a JSON body.
    async fn post(
        &self,
        path: &str,
        body: &serde_json::Value,
        token: Option<&str>,
    ) -> SensitResult<ApiResponse>;
}
