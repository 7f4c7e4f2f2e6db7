//! Server response types.
//!
//! Every Sens'it REST response follows a common envelope:
//! ```json
//! { "data": { ... }, "links": { "next": "https://api.sensit.io/api/v1/...", "prev": null } }
//! ```
//! Success is signalled by status 202, not 200.

use std::collections::HashMap;

use serde::Deserialize;
use sensit_core::constants::{ACCEPTED_STATUS, LINK_PATH_PREFIX};
use sensit_core::error::{SensitError, SensitResult};

/// Body envelope as found on the wire.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    links: HashMap<String, Option<String>>,
    #[serde(default)]
    message: Option<String>,
}

/// A decoded API response: status, payload and navigation links.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// The `data` member of the body.
    pub data: Option<serde_json::Value>,
    /// Navigation links, reduced to paths relative to the API root.
    pub links: HashMap<String, String>,
    /// Error text: the `message` member, or the raw body if it was not JSON.
    pub message: Option<String>,
}

/// Reduce a pagination link to a path usable against the configured base URL.
///
/// Links arrive as absolute URLs carrying an `/api/v1` segment; everything
/// after that segment is kept. Anything else is returned unchanged.
pub fn normalize_link(link: &str) -> String {
    match link.find(LINK_PATH_PREFIX) {
        Some(idx) => link[idx + LINK_PATH_PREFIX.len()..].to_string(),
        None => link.to_string(),
    }
}

impl ApiResponse {
    /// Build an accepted response around `data`.
    pub fn accepted(data: serde_json::Value) -> Self {
        Self::new(ACCEPTED_STATUS, Some(data))
    }

    /// Build a response with an arbitrary status.
    pub fn new(status: u16, data: Option<serde_json::Value>) -> Self {
        Self {
            status,
            data,
            links: HashMap::new(),
            message: None,
        }
    }

    /// Attach a navigation link.
    pub fn with_link(mut self, rel: &str, link: &str) -> Self {
        self.links.insert(rel.to_string(), normalize_link(link));
        self
    }

    /// Decode a response body received with `status`.
    ///
    /// A success body that is not a JSON envelope is an error; a failure body
    /// that is not JSON is kept as the message.
    pub fn from_body(status: u16, body: &str) -> SensitResult<Self> {
        match serde_json::from_str::<Envelope>(body) {
            Ok(envelope) => Ok(Self {
                status,
                data: envelope.data,
                links: envelope
                    .links
                    .into_iter()
                    .filter_map(|(rel, link)| link.map(|l| (rel, normalize_link(&l))))
                    .collect(),
                message: envelope.message,
            }),
            Err(e) if status == ACCEPTED_STATUS => Err(SensitError::Serialization(format!(
                "failed to parse response: {e}"
            ))),
            Err(_) => Ok(Self {
                status,
                data: None,
                links: HashMap::new(),
                message: (!body.trim().is_empty()).then(|| body.trim().to_string()),
            }),
        }
    }

    /// Whether the API accepted the request.
    pub fn is_accepted(&self) -> bool {
        self.status == ACCEPTED_STATUS
    }

    /// Pass the response through if accepted, else turn it into an upstream
    /// error describing `request`.
    pub fn into_accepted(self, request: &str) -> SensitResult<Self> {
        if self.is_accepted() {
            Ok(self)
        } else {
            Err(SensitError::Upstream {
                status: self.status,
                message: self.describe(request),
            })
        }
    }

    /// `request` plus whatever the server said about it.
    pub fn describe(&self, request: &str) -> String {
        match self.message.as_deref() {
            Some(msg) => format!("{request}: {msg}"),
            None => request.to_string(),
        }
    }

    /// The `data` member, which an accepted response must carry.
    pub fn data(&self) -> SensitResult<&serde_json::Value> {
        self.data
            .as_ref()
            .ok_or_else(|| SensitError::Serialization("response has no data".into()))
    }

    /// A named member of the `data` object.
    pub fn field(&self, key: &str) -> SensitResult<&serde_json::Value> {
        self.data()?
            .get(key)
            .ok_or_else(|| SensitError::Serialization(format!("response data has no {key}")))
    }

    /// Path of a navigation link.
    pub fn link(&self, rel: &str) -> Option<&str> {
        self.links.get(rel).map(String::as_str)
    }
}
