//! XDG config store adapter

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, APP_DIR_NAME};
use crate::domain::error::ConfigError;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Written above the settings on every save
const FILE_HEADER: &str = "# media-shelf settings\n\
# Edit with `media-shelf config set <key> <value>`; unset keys use defaults.\n\n";

/// Config store at `$XDG_CONFIG_HOME/media-shelf/config.toml`
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        Self {
            path: Self::config_root().join(APP_DIR_NAME).join(CONFIG_FILE_NAME),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_CONFIG_HOME`, else `~/.config`, else the working directory
    fn config_root() -> PathBuf {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn parse_toml(content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn render(config: &AppConfig) -> Result<String, ConfigError> {
        let body =
            toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        Ok(format!("{}{}", FILE_HEADER, body))
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Self::parse_toml(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(AppConfig::empty()),
            Err(e) => Err(ConfigError::ReadError(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Replace the file through a temporary sibling so a crash mid-write
    /// leaves the previous settings intact
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let write_failed = |e: std::io::Error| ConfigError::WriteError(e.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(write_failed)?;
        }

        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, Self::render(config)?)
            .await
            .map_err(write_failed)?;
        fs::rename(&tmp, &self.path).await.map_err(write_failed)?;

        log::debug!("Saved config to {}", self.path.display());
        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(
                self.path.display().to_string(),
            ));
        }

        self.save(&AppConfig::defaults()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_path_is_under_app_dir() {
        let path = XdgConfigStore::new().path();
        assert!(path.ends_with(format!("{}/{}", APP_DIR_NAME, CONFIG_FILE_NAME)));
        assert!(!path.starts_with("~"));
    }

    #[test]
    fn parse_toml_flat_format() {
        let content = r#"
data_dir = "/srv/shelf"
platform = "android"
max_duration = "90s"
notify = true
"#;

        let config = XdgConfigStore::parse_toml(content).unwrap();
        assert_eq!(config.data_dir, Some("/srv/shelf".to_string()));
        assert_eq!(config.platform, Some("android".to_string()));
        assert_eq!(config.max_duration, Some("90s".to_string()));
        assert_eq!(config.notify, Some(true));
    }

    #[test]
    fn parse_toml_rejects_wrong_types() {
        assert!(matches!(
            XdgConfigStore::parse_toml("notify = \"loud\""),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        assert!(!store.exists());
        assert_eq!(store.load().await.unwrap(), AppConfig::empty());
    }

    #[tokio::test]
    async fn save_writes_header_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let store = XdgConfigStore::with_path(&path);

        let config = AppConfig {
            platform: Some("ios".to_string()),
            ..AppConfig::empty()
        };
        store.save(&config).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# media-shelf settings"));
        assert!(!dir.path().join("config.toml.tmp").exists());
        assert_eq!(store.load().await.unwrap(), config);
    }

    #[tokio::test]
    async fn directory_at_path_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path());
        assert!(!store.exists());
        assert!(matches!(store.load().await, Err(ConfigError::ReadError(_))));
    }

    #[tokio::test]
    async fn init_writes_defaults_once() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("sub/config.toml"));

        store.init().await.unwrap();
        assert_eq!(store.load().await.unwrap(), AppConfig::defaults());
        assert!(matches!(
            store.init().await,
            Err(ConfigError::AlreadyExists(_))
        ));
    }
}
