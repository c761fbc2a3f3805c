//! Audio screen state machine

use std::fmt;
use thiserror::Error;

use crate::domain::recording::Duration;

/// Capture axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordingState {
    #[default]
    Idle,
    Capturing,
}

/// Playback axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Loading,
    Playing,
    Paused,
}

/// Which view of the audio screen is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    List,
    Player,
}

impl RecordingState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Capturing => "capturing",
        }
    }
}

impl PlaybackState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

impl View {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Player => "player",
        }
    }
}

impl fmt::Display for RecordingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while {axis} is {current_state}")]
pub struct InvalidStateTransition {
    pub axis: &'static str,
    pub current_state: &'static str,
    pub action: &'static str,
}

/// Audio screen session.
///
/// Tracks three independent axes plus the clip shown in the player view.
///
/// Recording:
///   IDLE -> CAPTURING (start_recording)
///   CAPTURING -> IDLE (finish_recording)
///
/// Playback:
///   any -> LOADING (begin_loading)
///   LOADING -> PLAYING (loaded), LOADING -> IDLE (load_failed)
///   PLAYING <-> PAUSED (pause / resume)
///   PLAYING -> IDLE (complete), IDLE -> PLAYING (restart, clip still shown)
///   any -> IDLE (go_back, view returns to LIST)
#[derive(Debug, Default)]
pub struct AudioSession {
    recording: RecordingState,
    playback: PlaybackState,
    view: View,
    current_clip: Option<String>,
    elapsed: Duration,
}

impl AudioSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recording(&self) -> RecordingState {
        self.recording
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Id of the clip in the player view
    pub fn current_clip(&self) -> Option<&str> {
        self.current_clip.as_deref()
    }

    /// Elapsed playback position of the current clip
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_capturing(&self) -> bool {
        self.recording == RecordingState::Capturing
    }

    fn recording_error(&self, action: &'static str) -> InvalidStateTransition {
        InvalidStateTransition {
            axis: "recording",
            current_state: self.recording.as_str(),
            action,
        }
    }

    fn playback_error(&self, action: &'static str) -> InvalidStateTransition {
        InvalidStateTransition {
            axis: "playback",
            current_state: self.playback.as_str(),
            action,
        }
    }

    pub fn start_recording(&mut self) -> Result<(), InvalidStateTransition> {
        if self.recording != RecordingState::Idle {
            return Err(self.recording_error("start recording"));
        }
        self.recording = RecordingState::Capturing;
        Ok(())
    }

    pub fn finish_recording(&mut self) -> Result<(), InvalidStateTransition> {
        if self.recording != RecordingState::Capturing {
            return Err(self.recording_error("stop recording"));
        }
        self.recording = RecordingState::Idle;
        Ok(())
    }

    pub fn begin_loading(&mut self, clip_id: impl Into<String>) -> Result<(), InvalidStateTransition> {
        if self.playback == PlaybackState::Loading {
            return Err(self.playback_error("load a clip"));
        }
        self.playback = PlaybackState::Loading;
        self.current_clip = Some(clip_id.into());
        self.elapsed = Duration::ZERO;
        Ok(())
    }

    pub fn loaded(&mut self) -> Result<(), InvalidStateTransition> {
        if self.playback != PlaybackState::Loading {
            return Err(self.playback_error("start playback"));
        }
        self.playback = PlaybackState::Playing;
        self.view = View::Player;
        Ok(())
    }

    pub fn load_failed(&mut self) -> Result<(), InvalidStateTransition> {
        if self.playback != PlaybackState::Loading {
            return Err(self.playback_error("abandon loading"));
        }
        self.playback = PlaybackState::Idle;
        self.current_clip = None;
        self.view = View::List;
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), InvalidStateTransition> {
        if self.playback != PlaybackState::Playing {
            return Err(self.playback_error("pause"));
        }
        self.playback = PlaybackState::Paused;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), InvalidStateTransition> {
        if self.playback != PlaybackState::Paused {
            return Err(self.playback_error("resume"));
        }
        self.playback = PlaybackState::Playing;
        Ok(())
    }

    /// Replay the shown clip after it finished
    pub fn restart(&mut self) -> Result<(), InvalidStateTransition> {
        if self.playback != PlaybackState::Idle || self.current_clip.is_none() {
            return Err(self.playback_error("restart"));
        }
        self.playback = PlaybackState::Playing;
        self.elapsed = Duration::ZERO;
        Ok(())
    }

    /// Natural end of the clip; the player view stays open
    pub fn complete(&mut self) -> Result<(), InvalidStateTransition> {
        if !matches!(self.playback, PlaybackState::Playing | PlaybackState::Paused) {
            return Err(self.playback_error("complete playback"));
        }
        self.playback = PlaybackState::Idle;
        self.elapsed = Duration::ZERO;
        Ok(())
    }

    pub fn set_elapsed(&mut self, position: Duration) {
        if self.current_clip.is_some() {
            self.elapsed = position;
        }
    }

    /// Leave the player view
    pub fn go_back(&mut self) {
        self.playback = PlaybackState::Idle;
        self.view = View::List;
        self.current_clip = None;
        self.elapsed = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle_list() {
        let session = AudioSession::new();
        assert_eq!(session.recording(), RecordingState::Idle);
        assert_eq!(session.playback(), PlaybackState::Idle);
        assert_eq!(session.view(), View::List);
        assert!(session.current_clip().is_none());
    }

    #[test]
    fn recording_cycle() {
        let mut session = AudioSession::new();
        session.start_recording().unwrap();
        assert!(session.is_capturing());
        session.finish_recording().unwrap();
        assert!(!session.is_capturing());
    }

    #[test]
    fn double_start_fails() {
        let mut session = AudioSession::new();
        session.start_recording().unwrap();
        let err = session.start_recording().unwrap_err();
        assert_eq!(err.current_state, "capturing");
        assert_eq!(err.axis, "recording");
    }

    #[test]
    fn finish_without_start_fails() {
        let mut session = AudioSession::new();
        let err = session.finish_recording().unwrap_err();
        assert_eq!(err.current_state, "idle");
    }

    #[test]
    fn recording_is_independent_of_playback() {
        let mut session = AudioSession::new();
        session.begin_loading("a").unwrap();
        session.loaded().unwrap();
        session.start_recording().unwrap();
        assert_eq!(session.playback(), PlaybackState::Playing);
        assert!(session.is_capturing());
    }

    #[test]
    fn load_then_play_opens_player() {
        let mut session = AudioSession::new();
        session.begin_loading("clip-1").unwrap();
        assert_eq!(session.playback(), PlaybackState::Loading);
        assert_eq!(session.view(), View::List);

        session.loaded().unwrap();
        assert_eq!(session.playback(), PlaybackState::Playing);
        assert_eq!(session.view(), View::Player);
        assert_eq!(session.current_clip(), Some("clip-1"));
    }

    #[test]
    fn failed_load_returns_to_list() {
        let mut session = AudioSession::new();
        session.begin_loading("clip-1").unwrap();
        session.load_failed().unwrap();
        assert_eq!(session.playback(), PlaybackState::Idle);
        assert_eq!(session.view(), View::List);
        assert!(session.current_clip().is_none());
    }

    #[test]
    fn pause_and_resume() {
        let mut session = AudioSession::new();
        assert!(session.pause().is_err());

        session.begin_loading("x").unwrap();
        session.loaded().unwrap();
        session.pause().unwrap();
        assert_eq!(session.playback(), PlaybackState::Paused);
        assert!(session.pause().is_err());
        session.resume().unwrap();
        assert_eq!(session.playback(), PlaybackState::Playing);
    }

    #[test]
    fn completion_keeps_player_view_and_resets_elapsed() {
        let mut session = AudioSession::new();
        session.begin_loading("x").unwrap();
        session.loaded().unwrap();
        session.set_elapsed(Duration::from_millis(1500));
        assert_eq!(session.elapsed().as_millis(), 1500);

        session.complete().unwrap();
        assert_eq!(session.playback(), PlaybackState::Idle);
        assert_eq!(session.view(), View::Player);
        assert_eq!(session.elapsed(), Duration::ZERO);

        session.restart().unwrap();
        assert_eq!(session.playback(), PlaybackState::Playing);
    }

    #[test]
    fn restart_requires_a_shown_clip() {
        let mut session = AudioSession::new();
        assert!(session.restart().is_err());
    }

    #[test]
    fn go_back_resets_everything_but_recording() {
        let mut session = AudioSession::new();
        session.start_recording().unwrap();
        session.begin_loading("x").unwrap();
        session.loaded().unwrap();
        session.set_elapsed(Duration::from_millis(300));

        session.go_back();
        assert_eq!(session.view(), View::List);
        assert_eq!(session.playback(), PlaybackState::Idle);
        assert_eq!(session.elapsed(), Duration::ZERO);
        assert!(session.current_clip().is_none());
        assert!(session.is_capturing());
    }

    #[test]
    fn elapsed_ignored_without_clip() {
        let mut session = AudioSession::new();
        session.set_elapsed(Duration::from_millis(300));
        assert_eq!(session.elapsed(), Duration::ZERO);
    }

    #[test]
    fn error_display() {
        let err = InvalidStateTransition {
            axis: "playback",
            current_state: "idle",
            action: "pause",
        };
        let msg = err.to_string();
        assert!(msg.contains("pause"));
        assert!(msg.contains("playback is idle"));
    }
}
