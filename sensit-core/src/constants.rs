//! Application-wide constants.

/// Application name.
pub const APP_NAME: &str = "Sensit";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API root, including the version segment.
pub const DEFAULT_BASE_URL: &str = "https://api.sensit.io/v1";

/// Path prefix carried by pagination links. Everything after it is reusable
/// as a request path against the configured base URL.
pub const LINK_PATH_PREFIX: &str = "/api/v1";

/// Status code the API uses to signal success.
pub const ACCEPTED_STATUS: u16 = 202;

/// Default API timeout in milliseconds.
pub const DEFAULT_API_TIMEOUT_MS: u64 = 30_000;

/// Default connect timeout in milliseconds.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 15_000;

/// Environment variable holding a ready-made bearer token.
pub const TOKEN_ENV_VAR: &str = "SENSIT_TOKEN";

/// Environment variable holding the account password.
pub const PASSWORD_ENV_VAR: &str = "SENSIT_PASS";

/// Relation name of the follow-up page in the `links` object.
pub const NEXT_LINK: &str = "next";

/// Sensor type identifiers as reported by `/devices/{id}/`.
pub mod sensor_types {
    pub const TEMPERATURE: &str = "temperature";
    pub const SOUND: &str = "sound";
    pub const MOTION: &str = "motion";
    pub const BUTTON: &str = "button";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_type_constants() {
        assert_eq!(sensor_types::SOUND, "sound");
        assert_ne!(sensor_types::MOTION, sensor_types::BUTTON);
    }

    #[test]
    fn test_base_url_has_version() {
        assert!(DEFAULT_BASE_URL.ends_with("/v1"));
        assert!(LINK_PATH_PREFIX.ends_with("/v1"));
    }
}
