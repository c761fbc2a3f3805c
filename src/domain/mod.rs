//! Domain layer - Core business logic
//!
//! Contains value objects, entities, state machines and domain errors.
//! This layer has no dependencies on external systems.

pub mod audio;
pub mod config;
pub mod error;
pub mod files;
pub mod platform;
pub mod recording;
pub mod search;

// Re-export common types
pub use audio::{AudioItem, AudioSession, PlaybackState, RecordingState, View};
pub use config::AppConfig;
pub use error::*;
pub use files::{MediaKind, StoredFile};
pub use platform::PlatformFamily;
pub use recording::Duration;
pub use search::{filter, SearchQuery, Searchable};
