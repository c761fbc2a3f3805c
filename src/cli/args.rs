//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::platform::PlatformFamily;

/// Media Shelf - voice memos and documents, kept locally
#[derive(Parser, Debug)]
#[command(name = "media-shelf")]
#[command(version)]
#[command(about = "Record and play voice memos, import and open documents")]
#[command(long_about = None)]
pub struct Cli {
    /// Data directory (store, recordings, imported copies)
    #[arg(long, value_name = "DIR", env = "MEDIA_SHELF_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Platform family whose file behavior to use
    #[arg(long, value_name = "PLATFORM", global = true)]
    pub platform: Option<PlatformArg>,

    /// Mirror alerts as desktop notifications
    #[arg(short = 'n', long, global = true)]
    pub notify: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record, list and play voice memos
    Audio {
        #[command(subcommand)]
        action: AudioAction,
    },
    /// Import, list, open and clear documents
    Files {
        #[command(subcommand)]
        action: FilesAction,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Audio screen actions
#[derive(Subcommand, Debug)]
pub enum AudioAction {
    /// List recorded clips
    List {
        /// Only show clips whose name contains this text
        #[arg(short, long, value_name = "QUERY")]
        search: Option<String>,
    },
    /// Record a clip until Enter, Ctrl-C or the duration elapses
    Record {
        /// Stop automatically after this long (e.g., 10s, 1m, 2m30s)
        #[arg(short, long, value_name = "TIME")]
        duration: Option<String>,

        /// Safety limit for the capture
        #[arg(long, value_name = "TIME")]
        max_duration: Option<String>,
    },
    /// Play a clip by id or name
    Play {
        /// Clip id or display name
        clip: String,
    },
    /// Show supported audio formats
    Formats,
}

/// File screen actions
#[derive(Subcommand, Debug)]
pub enum FilesAction {
    /// List stored files
    List {
        /// Only show files whose name contains this text
        #[arg(short, long, value_name = "QUERY")]
        search: Option<String>,
    },
    /// Import a file (opens a file dialog when no path is given)
    Import {
        /// File to import
        path: Option<PathBuf>,
    },
    /// Open a stored file with the system viewer
    Open {
        /// File id or display name
        file: String,
    },
    /// Delete every stored file entry
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show supported file types
    Formats,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Platform argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    Desktop,
    Android,
    Ios,
}

impl From<PlatformArg> for PlatformFamily {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Desktop => PlatformFamily::Desktop,
            PlatformArg::Android => PlatformFamily::Android,
            PlatformArg::Ios => PlatformFamily::Ios,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["data_dir", "platform", "max_duration", "notify"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
