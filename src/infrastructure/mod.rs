//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the filesystem, audio devices, dialogs and the OS.

pub mod config;
pub mod file_copy;
pub mod notification;
pub mod picker;
pub mod platform;
pub mod playback;
pub mod recording;
pub mod storage;
pub mod viewer;

// Re-export adapters
pub use config::XdgConfigStore;
pub use file_copy::TokioCopier;
pub use notification::NotifyRustAlerts;
pub use picker::{PathPicker, RfdPicker};
pub use platform::{create_platform, DataLayout, PlatformAdapters};
pub use playback::RodioPlayer;
pub use recording::CpalRecorder;
pub use storage::{JsonFileStore, MemoryStore};
pub use viewer::{SystemViewer, UnsupportedViewer};
