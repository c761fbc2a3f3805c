//! Audio screen controller: record, list, search and play clips

use thiserror::Error;

use crate::domain::audio::{
    clip_name, next_clip_id, size_label, AudioItem, AudioSession, PlaybackState, RecordingState,
    View,
};
use crate::domain::error::ErrorCategory;
use crate::domain::recording::Duration;
use crate::domain::search::{filter, SearchQuery};

use super::collection::{PersistedCollection, AUDIO_COLLECTION_KEY};
use super::ports::{
    Alert, AlertSink, AudioMode, CaptureHandle, KeyValueStore, Permission, PlaybackError,
    PlaybackStatus, Player, Recorder, RecordingError, SessionId, StorageError,
};

/// Body of the audio format help alert
pub const AUDIO_FORMAT_HELP: &str = "Recorded clips: .flac\n\
Playback: .flac, .mp3, .wav, .ogg\n\n\
Playback may vary by device.";

/// Errors from the audio controller
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Microphone permission denied")]
    PermissionDenied,

    #[error("Recording failed: {0}")]
    Recording(#[from] RecordingError),

    #[error("Playback failed: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("No clip with id '{0}'")]
    UnknownClip(String),
}

impl AudioError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PermissionDenied | Self::Recording(RecordingError::PermissionDenied) => {
                ErrorCategory::PermissionDenied
            }
            Self::Recording(RecordingError::NoAudioDevice)
            | Self::Playback(PlaybackError::NoOutputDevice(_)) => {
                ErrorCategory::CapabilityUnavailable
            }
            Self::Recording(_) => ErrorCategory::RecordingFailed,
            Self::Playback(_) => ErrorCategory::PlaybackFailed,
            Self::Storage(_) => ErrorCategory::StorageFailed,
            Self::UnknownClip(_) => ErrorCategory::InvalidSelection,
        }
    }
}

/// The playback resource currently held
#[derive(Debug, Clone, Copy)]
struct ActivePlayback {
    session: SessionId,
    duration: Duration,
}

/// Audio screen controller.
///
/// Owns the clip collection, at most one capture and at most one playback
/// session. Every public operation handles its own failures: they are logged
/// and surfaced through the alert sink, never returned.
pub struct AudioController<S, R, P, A>
where
    S: KeyValueStore,
    R: Recorder,
    P: Player,
    A: AlertSink,
{
    store: S,
    recorder: R,
    player: P,
    alerts: A,
    collection: PersistedCollection<AudioItem>,
    items: Vec<AudioItem>,
    session: AudioSession,
    capture: Option<CaptureHandle>,
    active: Option<ActivePlayback>,
    query: SearchQuery,
}

impl<S, R, P, A> AudioController<S, R, P, A>
where
    S: KeyValueStore,
    R: Recorder,
    P: Player,
    A: AlertSink,
{
    /// Create a controller with an empty in-memory list. Call
    /// [`load`](Self::load) before use.
    pub fn new(store: S, recorder: R, player: P, alerts: A) -> Self {
        Self {
            store,
            recorder,
            player,
            alerts,
            collection: PersistedCollection::new(AUDIO_COLLECTION_KEY),
            items: Vec::new(),
            session: AudioSession::new(),
            capture: None,
            active: None,
            query: SearchQuery::default(),
        }
    }

    /// Read the persisted collection. Absent or corrupt data leaves the list
    /// empty and raises a recoverable error alert.
    pub async fn load(&mut self) {
        match self.collection.load(&self.store).await {
            Ok(items) => {
                log::info!("Loaded {} audio clip(s)", items.len());
                self.items = items;
            }
            Err(e) => {
                self.items.clear();
                self.report(
                    "Could not load recordings",
                    &AudioError::from(e),
                    "Starting with an empty library.",
                )
                .await;
            }
        }
    }

    // ----- accessors -----

    /// Full collection in append order
    pub fn items(&self) -> &[AudioItem] {
        &self.items
    }

    /// Collection filtered by the current search query
    pub fn visible_items(&self) -> Vec<&AudioItem> {
        filter(&self.items, &self.query)
    }

    pub fn search(&self) -> &SearchQuery {
        &self.query
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.query = SearchQuery::new(text);
    }

    pub fn recording_state(&self) -> RecordingState {
        self.session.recording()
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.session.playback()
    }

    pub fn view(&self) -> View {
        self.session.view()
    }

    /// Elapsed position of the clip in the player view
    pub fn elapsed(&self) -> Duration {
        self.session.elapsed()
    }

    /// Time captured so far, zero when not recording
    pub fn recording_elapsed(&self) -> Duration {
        if self.session.is_capturing() {
            self.recorder.elapsed()
        } else {
            Duration::ZERO
        }
    }

    /// Clip shown in the player view
    pub fn current_item(&self) -> Option<&AudioItem> {
        let id = self.session.current_clip()?;
        self.items.iter().find(|item| item.id == id)
    }

    pub fn find(&self, id_or_name: &str) -> Option<&AudioItem> {
        self.items
            .iter()
            .find(|item| item.id == id_or_name)
            .or_else(|| self.items.iter().find(|item| item.name == id_or_name))
    }

    // ----- recording -----

    /// Ask for the microphone and begin capturing. Returns whether capture
    /// started.
    pub async fn start_recording(&mut self) -> bool {
        if self.session.is_capturing() {
            log::debug!("start_recording ignored: already capturing");
            return false;
        }

        match self.try_start_recording().await {
            Ok(handle) => {
                self.capture = Some(handle);
                if let Err(e) = self.session.start_recording() {
                    log::debug!("{}", e);
                }
                log::info!("Recording started");
                true
            }
            Err(e) => {
                self.report("Recording error", &e, "").await;
                false
            }
        }
    }

    async fn try_start_recording(&self) -> Result<CaptureHandle, AudioError> {
        if self.recorder.request_permission().await? == Permission::Denied {
            return Err(AudioError::PermissionDenied);
        }
        self.recorder.configure(AudioMode::Recording).await?;
        Ok(self.recorder.begin().await?)
    }

    /// Finalize the capture and append the new clip. Without an active
    /// capture this does nothing.
    pub async fn stop_recording(&mut self) -> Option<AudioItem> {
        let handle = match (self.session.finish_recording(), self.capture.take()) {
            (Ok(()), Some(handle)) => handle,
            (Err(e), _) => {
                log::debug!("stop_recording ignored: {}", e);
                return None;
            }
            (Ok(()), None) => {
                log::warn!("Capturing without a capture handle, resetting");
                return None;
            }
        };

        match self.try_stop_recording(handle).await {
            Ok(item) => {
                log::info!("Recorded {} ({})", item.name, item.size);
                Some(item)
            }
            Err(e) => {
                self.report("Stop recording error", &e, "").await;
                None
            }
        }
    }

    async fn try_stop_recording(&mut self, handle: CaptureHandle) -> Result<AudioItem, AudioError> {
        let clip = self.recorder.end(handle).await?;
        if let Err(e) = self.recorder.configure(AudioMode::Playback).await {
            log::warn!("Failed to switch audio mode back to playback: {}", e);
        }

        let now_ms = chrono::Utc::now().timestamp_millis();
        let items = self
            .collection
            .append_with(&self.store, |existing| AudioItem {
                id: next_clip_id(existing, now_ms),
                name: clip_name(existing.len(), &clip.uri),
                uri: clip.uri.clone(),
                duration: clip.duration.as_millis(),
                size: size_label(clip.size_bytes, clip.duration),
            })
            .await?;

        self.items = items;
        self.items
            .last()
            .cloned()
            .ok_or_else(|| AudioError::Storage(StorageError::WriteFailed {
                key: AUDIO_COLLECTION_KEY.to_string(),
                message: "collection empty after append".to_string(),
            }))
    }

    // ----- playback -----

    /// Load and play the clip with `id`, releasing any clip already loaded.
    /// Returns whether playback started.
    pub async fn open_player(&mut self, id: &str) -> bool {
        let Some(item) = self.items.iter().find(|item| item.id == id).cloned() else {
            self.report("Playback error", &AudioError::UnknownClip(id.to_string()), "")
                .await;
            return false;
        };

        self.release_active().await;
        if let Err(e) = self.session.begin_loading(item.id.clone()) {
            log::debug!("open_player ignored: {}", e);
            return false;
        }

        match self.try_open_player(&item).await {
            Ok(()) => {
                if let Err(e) = self.session.loaded() {
                    log::debug!("{}", e);
                }
                log::info!("Playing {}", item.name);
                true
            }
            Err(e) => {
                self.release_active().await;
                if let Err(e) = self.session.load_failed() {
                    log::debug!("{}", e);
                }
                self.report("Playback error", &e, "").await;
                false
            }
        }
    }

    async fn try_open_player(&mut self, item: &AudioItem) -> Result<(), AudioError> {
        let loaded = self.player.load(&item.uri).await?;
        self.active = Some(ActivePlayback {
            session: loaded.session,
            duration: loaded.duration.unwrap_or_else(|| item.length()),
        });
        self.player.play(loaded.session).await?;
        Ok(())
    }

    /// Pause when playing, resume when paused, replay when finished.
    /// Does nothing when no clip is loaded.
    pub async fn toggle_playback(&mut self) {
        let Some(active) = self.active else {
            log::debug!("toggle_playback ignored: nothing loaded");
            return;
        };

        let result = match self.session.playback() {
            PlaybackState::Playing => self.pause(active.session).await,
            PlaybackState::Paused => self.resume(active.session).await,
            PlaybackState::Idle => self.restart().await,
            PlaybackState::Loading => Ok(()),
        };

        if let Err(e) = result {
            self.report("Playback error", &e, "").await;
        }
    }

    async fn pause(&mut self, session: SessionId) -> Result<(), AudioError> {
        self.player.pause(session).await?;
        if let Err(e) = self.session.pause() {
            log::debug!("{}", e);
        }
        Ok(())
    }

    async fn resume(&mut self, session: SessionId) -> Result<(), AudioError> {
        self.player.play(session).await?;
        if let Err(e) = self.session.resume() {
            log::debug!("{}", e);
        }
        Ok(())
    }

    /// Replay a finished clip on a fresh player session, starting from 0
    async fn restart(&mut self) -> Result<(), AudioError> {
        let Some(item) = self.current_item().cloned() else {
            return Ok(());
        };
        self.release_active().await;
        self.try_open_player(&item).await?;
        if let Err(e) = self.session.restart() {
            log::debug!("{}", e);
        }
        Ok(())
    }

    /// Jump to `position`, clamped to the clip length. Does nothing when no
    /// clip is loaded.
    pub async fn seek(&mut self, position: Duration) {
        let Some(active) = self.active else {
            log::debug!("seek ignored: nothing loaded");
            return;
        };

        let target = position.clamp_to(active.duration);
        match self.player.seek(active.session, target).await {
            Ok(()) => self.session.set_elapsed(target),
            Err(e) => self.report("Seek error", &AudioError::from(e), "").await,
        }
    }

    /// Periodic position callback. Polls the player and applies the status.
    pub async fn poll_playback(&mut self) -> PlaybackState {
        if let Some(active) = self.active {
            match self.player.status(active.session).await {
                Ok(status) => self.apply_status(status),
                Err(e) => log::warn!("Failed to read playback status: {}", e),
            }
        }
        self.session.playback()
    }

    /// Apply a status notification from the player
    pub fn apply_status(&mut self, status: PlaybackStatus) {
        let Some(active) = self.active else {
            return;
        };

        if status.did_just_finish {
            if self.session.complete().is_ok() {
                log::info!("Playback finished");
            }
            return;
        }

        if matches!(
            self.session.playback(),
            PlaybackState::Playing | PlaybackState::Paused
        ) {
            self.session.set_elapsed(status.position.clamp_to(active.duration));
        }
    }

    /// Leave the player view, releasing the loaded clip
    pub async fn go_back(&mut self) {
        self.release_active().await;
        self.session.go_back();
    }

    /// Screen teardown: release any playback resource
    pub async fn close(&mut self) {
        self.go_back().await;
    }

    async fn release_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        if let Err(e) = self.player.stop(active.session).await {
            log::warn!("Failed to stop playback: {}", e);
        }
        if let Err(e) = self.player.release(active.session).await {
            log::warn!("Failed to release playback session: {}", e);
        }
    }

    // ----- alerts -----

    /// Informational alert listing the supported audio formats
    pub async fn show_format_help(&self) {
        self.alerts
            .show(Alert::info("Supported Audio Formats", AUDIO_FORMAT_HELP))
            .await;
    }

    async fn report(&self, title: &str, error: &AudioError, suffix: &str) {
        log::warn!("{} ({}): {}", title, error.category(), error);
        let message = if suffix.is_empty() {
            error.to_string()
        } else {
            format!("{} {}", error, suffix)
        };
        self.alerts.show(Alert::error(title, message)).await;
    }
}
