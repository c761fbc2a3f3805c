//! Recording infrastructure module
//!
//! Captures from the default input device with cpal and writes clips as
//! FLAC files.

mod cpal_recorder;
mod flac_encoder;

pub use cpal_recorder::CpalRecorder;
pub use flac_encoder::{encode_to_flac, EncodingError};
