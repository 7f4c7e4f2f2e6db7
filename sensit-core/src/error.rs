//! Global error types for the Sens'it client.
//!
//! All error categories across the workspace are unified into a single
//! `SensitError` enum with conversions from underlying library errors.

use thiserror::Error;

/// Convenience type alias for Results using SensitError.
pub type SensitResult<T> = Result<T, SensitError>;

/// Unified error type covering all error categories in the client.
#[derive(Error, Debug)]
pub enum SensitError {
    // -- Configuration errors --
    /// Failed to load or parse configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    // -- Caller errors --
    /// A history accessor was called with bad or contradictory arguments.
    #[error("{method}(): {reason}")]
    Argument {
        /// Accessor that rejected the arguments.
        method: String,
        /// Which constraint failed.
        reason: String,
    },

    /// A failure inside a history accessor, tagged with that accessor.
    #[error("{method}(): {source}")]
    Accessor {
        /// Accessor that was called.
        method: String,
        /// What went wrong underneath.
        source: Box<SensitError>,
    },

    // -- Network errors --
    /// HTTP request failed before a response was received.
    #[error("http error: {0}")]
    Http(String),

    /// HTTP request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// The API answered with a non-success status.
    #[error("upstream error (status {status}): {message}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// What was being requested, plus any body text.
        message: String,
    },

    /// No usable credential, or the credential exchange was rejected.
    #[error("authentication failed: {0}")]
    Authentication(String),

    // -- Data errors --
    /// A telemetry record could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// No device with this id in the account.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// The device does not expose a sensor of the requested kind.
    #[error("device {device} has no {kind} sensor")]
    SensorNotFound {
        /// Device id.
        device: String,
        /// Sensor kind name.
        kind: String,
    },

    // -- File/IO errors --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    // -- Generic --
    /// An unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SensitError {
    /// Build an argument error attributed to `method`.
    pub fn argument(method: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        SensitError::Argument {
            method: method.into(),
            reason: reason.to_string(),
        }
    }

    /// Attribute an error to the accessor `method`.
    ///
    /// Argument errors are re-attributed in place; anything else is wrapped
    /// in [`SensitError::Accessor`]. Errors already tagged are left alone.
    pub fn in_method(self, method: &str) -> Self {
        match self {
            SensitError::Argument { reason, .. } => SensitError::Argument {
                method: method.to_string(),
                reason,
            },
            tagged @ SensitError::Accessor { .. } => tagged,
            other => SensitError::Accessor {
                method: method.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The error underneath any accessor tag.
    pub fn root(&self) -> &SensitError {
        match self {
            SensitError::Accessor { source, .. } => source.root(),
            other => other,
        }
    }

    /// Accessor the error is attributed to, if any.
    pub fn method(&self) -> Option<&str> {
        match self {
            SensitError::Argument { method, .. } | SensitError::Accessor { method, .. } => {
                Some(method)
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SensitError {
    fn from(e: serde_json::Error) -> Self {
        SensitError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for SensitError {
    fn from(e: toml::de::Error) -> Self {
        SensitError::Config(e.to_string())
    }
}
