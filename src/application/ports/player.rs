//! Playback capability port

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::Duration;

/// Playback errors
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("No audio output device available: {0}")]
    NoOutputDevice(String),

    #[error("Failed to load '{uri}': {message}")]
    LoadFailed { uri: String, message: String },

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("Seek failed: {0}")]
    SeekFailed(String),

    #[error("Unknown playback session {0}")]
    UnknownSession(u64),

    #[error("Playback failed: {0}")]
    Failed(String),
}

/// Identifier of a loaded playback resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

/// A freshly loaded resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedClip {
    pub session: SessionId,
    /// Length reported by the decoder, if known
    pub duration: Option<Duration>,
}

/// Snapshot of a session, polled periodically by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackStatus {
    pub position: Duration,
    pub is_playing: bool,
    /// Reached the end since the last play/seek
    pub did_just_finish: bool,
}

/// Port for clip playback
#[async_trait]
pub trait Player: Send + Sync {
    async fn load(&self, uri: &str) -> Result<LoadedClip, PlaybackError>;

    async fn play(&self, session: SessionId) -> Result<(), PlaybackError>;

    async fn pause(&self, session: SessionId) -> Result<(), PlaybackError>;

    async fn seek(&self, session: SessionId, position: Duration) -> Result<(), PlaybackError>;

    async fn stop(&self, session: SessionId) -> Result<(), PlaybackError>;

    /// Free the resource; the session id is invalid afterwards
    async fn release(&self, session: SessionId) -> Result<(), PlaybackError>;

    async fn status(&self, session: SessionId) -> Result<PlaybackStatus, PlaybackError>;
}
