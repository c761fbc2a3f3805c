//! Configuration value objects

pub mod app_config;

pub use app_config::{default_data_dir, AppConfig, APP_DIR_NAME};
