//! Application layer - Screen controllers and port interfaces
//!
//! Contains the audio and file screen controllers plus the trait
//! definitions for the host capabilities they drive.

pub mod audio;
pub mod collection;
pub mod files;
pub mod ports;

// Re-export controllers
pub use audio::{AudioController, AudioError, AUDIO_FORMAT_HELP};
pub use collection::{PersistedCollection, AUDIO_COLLECTION_KEY, FILE_COLLECTION_KEY};
pub use files::{FileController, FileError, ImportOutcome, FILE_FORMAT_HELP};
