//! Recording capability port

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::Duration;

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("Microphone permission denied")]
    PermissionDenied,

    #[error("No audio input device available")]
    NoAudioDevice,

    #[error("Audio device busy: {0}")]
    DeviceBusy(String),

    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Failed to finalize recording: {0}")]
    FinalizeFailed(String),

    #[error("Unknown capture handle {0}")]
    UnknownHandle(u64),
}

/// Outcome of a permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Audio session mode requested before capture or playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioMode {
    /// Input enabled, output allowed even in silent mode
    Recording,
    /// Output only
    Playback,
}

/// Opaque handle to an in-progress capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaptureHandle(pub u64);

/// A finalized capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedClip {
    /// Location of the written media
    pub uri: String,
    pub duration: Duration,
    /// Byte size of the written media, when the capability can measure it
    pub size_bytes: Option<u64>,
}

/// Port for microphone capture
#[async_trait]
pub trait Recorder: Send + Sync {
    async fn request_permission(&self) -> Result<Permission, RecordingError>;

    async fn configure(&self, mode: AudioMode) -> Result<(), RecordingError>;

    /// Start capturing
    async fn begin(&self) -> Result<CaptureHandle, RecordingError>;

    /// Stop capturing and write the clip out
    async fn end(&self, handle: CaptureHandle) -> Result<RecordedClip, RecordingError>;

    /// Time captured so far by the active handle, zero when idle
    fn elapsed(&self) -> Duration;
}
