//! Application wiring and command dispatch

use std::path::Path;
use std::process::ExitCode;

use crate::application::ports::{ConfigStore, FilePicker, FileViewer};
use crate::application::{AudioController, FileController};
use crate::domain::config::AppConfig;
use crate::domain::platform::PlatformFamily;
use crate::domain::recording::Duration;
use crate::infrastructure::{
    create_platform, CpalRecorder, DataLayout, JsonFileStore, RodioPlayer, XdgConfigStore,
};

use super::alerts::CliAlerts;
use super::args::{Cli, Commands, PlatformArg};
use super::audio_cmd::handle_audio_command;
use super::config_cmd::handle_config_command;
use super::files_cmd::handle_files_command;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Audio controller as wired for the terminal
pub type CliAudioController = AudioController<JsonFileStore, CpalRecorder, RodioPlayer, CliAlerts>;

/// File controller as wired for the terminal
pub type CliFileController =
    FileController<JsonFileStore, Box<dyn FilePicker>, Box<dyn FileViewer>, CliAlerts>;

/// Resolved settings shared by the screen commands
#[derive(Debug, Clone)]
pub struct AppContext {
    pub layout: DataLayout,
    pub platform: PlatformFamily,
    pub max_duration: Duration,
    pub notify: bool,
}

impl AppContext {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            layout: DataLayout::new(&config.data_dir_or_default()),
            platform: config.platform_or_default(),
            max_duration: config.max_duration_or_default(),
            notify: config.notify_or_default(),
        }
    }

    fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.layout.store_dir)
    }

    /// Audio controller whose captures stop on their own after `capture_limit`
    pub fn audio_controller(&self, capture_limit: Duration) -> CliAudioController {
        AudioController::new(
            self.store(),
            CpalRecorder::new(&self.layout.recordings_dir, capture_limit),
            RodioPlayer::new(),
            CliAlerts::new(self.notify),
        )
    }

    pub fn file_controller(&self, picker: Box<dyn FilePicker>) -> CliFileController {
        let adapters = create_platform(self.platform);
        let controller =
            FileController::new(self.store(), picker, adapters.viewer, CliAlerts::new(self.notify));
        match adapters.copier {
            Some(copier) => controller.with_copier(copier, &self.layout.files_dir),
            None => controller,
        }
    }
}

/// Parse and dispatch the command line
pub async fn run(cli: Cli) -> ExitCode {
    let presenter = Presenter::new();

    let code = match cli.command {
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            match handle_config_command(action, &store, &presenter).await {
                Ok(()) => EXIT_SUCCESS,
                Err(e) => {
                    presenter.error(&e.to_string());
                    EXIT_ERROR
                }
            }
        }
        Commands::Audio { action } => {
            let context = resolve_context(cli.data_dir.as_deref(), cli.platform, cli.notify).await;
            handle_audio_command(action, &context, &presenter).await
        }
        Commands::Files { action } => {
            let context = resolve_context(cli.data_dir.as_deref(), cli.platform, cli.notify).await;
            handle_files_command(action, &context, &presenter).await
        }
    };

    ExitCode::from(code)
}

async fn resolve_context(
    data_dir: Option<&Path>,
    platform: Option<PlatformArg>,
    notify: bool,
) -> AppContext {
    let cli_config = AppConfig {
        data_dir: data_dir.map(|p| p.to_string_lossy().into_owned()),
        platform: platform.map(|p| PlatformFamily::from(p).to_string()),
        max_duration: None,
        notify: notify.then_some(true),
    };
    let config = load_merged_config(cli_config).await;
    log::debug!("Effective config: {:?}", config);
    AppContext::from_config(&config)
}

/// Load and merge configuration: defaults < file < command line
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring config file {}: {}", store.path().display(), e);
            AppConfig::empty()
        }
    };

    AppConfig::defaults().merge(file_config).merge(cli_config)
}
