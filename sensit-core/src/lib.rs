//! Sens'it Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by all other Sens'it crates:
//! - Client configuration (API endpoint, credentials, history paging)
//! - Global error types covering all error categories
//! - Structured logging with tracing
//! - Platform directory lookup
//! - Common constants

pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod constants;

// Re-export commonly used items at the crate root
pub use config::{AppConfig, PageOrder};
pub use error::{SensitError, SensitResult};
pub use logging::init_logging;
pub use platform::Platform;
