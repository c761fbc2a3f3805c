//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, alert rendering,
//! signal handling and the per-screen command runners.

pub mod alerts;
pub mod app;
pub mod args;
pub mod audio_cmd;
pub mod config_cmd;
pub mod files_cmd;
pub mod input;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use alerts::CliAlerts;
pub use app::{run, AppContext, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{AudioAction, Cli, Commands, ConfigAction, FilesAction};
pub use presenter::Presenter;
