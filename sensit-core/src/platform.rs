//! Platform detection and per-user directories.

use std::path::PathBuf;
use crate::constants::APP_NAME;
use crate::error::{SensitError, SensitResult};

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// Detect the current platform at compile time.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// Get the platform-specific data directory (log files live here).
    ///
    /// - Windows: `%APPDATA%/Sensit`
    /// - macOS: `~/Library/Application Support/Sensit`
    /// - Linux: `~/.local/share/Sensit`
    pub fn data_dir() -> SensitResult<PathBuf> {
        let base = dirs::data_dir()
            .ok_or_else(|| SensitError::Config("could not determine data directory".into()))?;
        Ok(base.join(APP_NAME))
    }

    /// Get the platform-specific configuration directory.
    ///
    /// - Windows: `%APPDATA%/Sensit`
    /// - macOS: `~/Library/Application Support/Sensit`
    /// - Linux: `~/.config/Sensit`
    pub fn config_dir() -> SensitResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| SensitError::Config("could not determine config directory".into()))?;
        Ok(base.join(APP_NAME))
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
            Platform::Linux => "Linux",
        })
    }
}
