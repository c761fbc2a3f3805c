//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::platform::PlatformFamily;
use crate::domain::recording::Duration;

/// Directory name under the platform data/config roots
pub const APP_DIR_NAME: &str = "media-shelf";

/// Default data root: `$XDG_DATA_HOME/media-shelf`
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root for the key-value store, recordings and imported copies
    pub data_dir: Option<String>,
    /// Platform family used to pick copy/viewer adapters
    pub platform: Option<String>,
    /// Safety limit for a single capture
    pub max_duration: Option<String>,
    /// Mirror alerts as desktop notifications
    pub notify: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            data_dir: None,
            platform: Some(PlatformFamily::default().to_string()),
            max_duration: Some(Duration::default_max_duration().to_compact()),
            notify: Some(false),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    pub fn merge(self, other: Self) -> Self {
        Self {
            data_dir: other.data_dir.or(self.data_dir),
            platform: other.platform.or(self.platform),
            max_duration: other.max_duration.or(self.max_duration),
            notify: other.notify.or(self.notify),
        }
    }

    pub fn data_dir_or_default(&self) -> PathBuf {
        self.data_dir
            .as_ref()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir)
    }

    /// Get platform as parsed family, or desktop if not set/invalid
    pub fn platform_or_default(&self) -> PlatformFamily {
        self.platform
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get max_duration as parsed Duration, or default if not set/invalid
    pub fn max_duration_or_default(&self) -> Duration {
        self.max_duration
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_max_duration)
    }

    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }
}
