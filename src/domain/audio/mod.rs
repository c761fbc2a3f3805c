//! Audio screen domain: clips and the recorder/player state machine

pub mod item;
pub mod session;

pub use item::{clip_name, human_readable_size, next_clip_id, size_label, AudioItem};
pub use session::{AudioSession, InvalidStateTransition, PlaybackState, RecordingState, View};
