//! Authentication endpoint.

use sha1::{Digest, Sha1};
use tracing::{debug, warn};

use sensit_core::error::{SensitError, SensitResult};

use crate::api::SensitApi;

/// Hash a clear password the way `/auth` expects it: lowercase hex SHA-1.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl SensitApi {
    /// Exchange e-mail and password for a bearer token.
    ///
    /// The password never leaves the process in clear; only its hash is sent.
    pub async fn request_token(&self, email: &str, password: &str) -> SensitResult<String> {
        let body = serde_json::json!({
            "email": email,
            "password": hash_password(password),
        });
        debug!("requesting token for {email}");

        let resp = self.post("/auth", &body).await?;
        if !resp.is_accepted() {
            warn!("token exchange rejected with status {}", resp.status);
            return Err(SensitError::Authentication(format!(
                "credential exchange rejected (status {})",
                resp.status
            )));
        }

        resp.field("token")
            .ok()
            .and_then(|v| v.as_str())
            .filter(|t| !t.is_empty())
            .map(String::from)
            .ok_or_else(|| SensitError::Authentication("no token in auth response".into()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::endpoints::stub::StubGateway;
    use crate::response::ApiResponse;

    #[test]
    fn test_hash_password() {
        assert_eq!(hash_password("password"), "5baa61e4c9b93f3f0682250b6cf8331b7ee68fd8");
    }

    #[tokio::test]
    async fn test_request_token_sends_hash() {
        let gateway = Arc::new(StubGateway::default().with(
            "/auth",
            ApiResponse::accepted(serde_json::json!({ "token": "tok-1" })),
        ));
        let api = SensitApi::new(gateway.clone());

        let token = api.request_token("me@example.com", "password").await.unwrap();
        assert_eq!(token, "tok-1");

        let requests = gateway.requests.lock().unwrap();
        let (path, bearer, body) = &requests[0];
        assert_eq!(path, "/auth");
        assert!(bearer.is_none());
        let body = body.as_ref().unwrap();
        assert_eq!(body["email"], "me@example.com");
        assert_eq!(body["password"], "5baa61e4c9b93f3f0682250b6cf8331b7ee68fd8");
    }

    #[tokio::test]
    async fn test_rejected_exchange() {
        let gateway = Arc::new(StubGateway::default().with("/auth", ApiResponse::new(401, None)));
        let err = SensitApi::new(gateway)
            .request_token("me@example.com", "wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, SensitError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_missing_token() {
        let gateway = Arc::new(
            StubGateway::default().with("/auth", ApiResponse::accepted(serde_json::json!({}))),
        );
        let err = SensitApi::new(gateway)
            .request_token("me@example.com", "password")
            .await
            .unwrap_err();
        assert!(matches!(err, SensitError::Authentication(_)));
    }
}
