//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod alerts;
pub mod config;
pub mod file_copy;
pub mod picker;
pub mod player;
pub mod recorder;
pub mod storage;
pub mod viewer;

// Re-export common types
pub use alerts::{Alert, AlertKind, AlertSink};
pub use config::ConfigStore;
pub use file_copy::{CopyError, FileCopier};
pub use picker::{FilePicker, PickOutcome, PickedFile, PickerError};
pub use player::{LoadedClip, PlaybackError, PlaybackStatus, Player, SessionId};
pub use recorder::{AudioMode, CaptureHandle, Permission, RecordedClip, Recorder, RecordingError};
pub use storage::{KeyValueStore, StorageError};
pub use viewer::{FileViewer, ViewerError};
