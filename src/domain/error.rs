//! Domain error types

use thiserror::Error;

/// Error when parsing a duration string
#[derive(Debug, Clone, Error)]
#[error("Invalid duration format: \"{input}\". Expected <number>s, <number>m, or <number>m<number>s (e.g., 30s, 5m, 1m30s)")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when an unknown platform family is configured
#[derive(Debug, Clone, Error)]
#[error("Invalid platform: \"{input}\". Valid platforms are: desktop, android, ios")]
pub struct InvalidPlatformError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

/// Coarse classification of operation failures.
///
/// Every controller error maps onto one of these so hosts can pick an
/// alert title without matching on adapter-specific variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The user (or OS) refused a permission
    PermissionDenied,
    /// The capability does not exist on this platform or device
    CapabilityUnavailable,
    /// Duplicating a picked resource into private storage failed
    CopyFailed,
    /// Reading or writing the key-value store failed
    StorageFailed,
    /// Capture could not be started or finalized
    RecordingFailed,
    /// A playback session could not be loaded or driven
    PlaybackFailed,
    /// The picker or viewer returned something unusable
    InvalidSelection,
}

impl ErrorCategory {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission denied",
            Self::CapabilityUnavailable => "capability unavailable",
            Self::CopyFailed => "copy failed",
            Self::StorageFailed => "storage failed",
            Self::RecordingFailed => "recording failed",
            Self::PlaybackFailed => "playback failed",
            Self::InvalidSelection => "invalid selection",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
