//! Persisted audio clip entity

use serde::{Deserialize, Serialize};

use crate::domain::recording::Duration;
use crate::domain::search::Searchable;

/// Bytes per millisecond assumed when the recorded size cannot be measured
/// (roughly a 128 kbit/s compressed stream).
pub const ESTIMATED_BYTES_PER_MS: u64 = 16;

/// Extension used for clip names when the resource has none
pub const DEFAULT_CLIP_EXTENSION: &str = "flac";

/// A recorded clip as stored under the audio collection key.
///
/// Field names are the persisted JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioItem {
    /// Time-derived identifier, unique within the collection
    pub id: String,
    /// Display name (`Audio_<n>.<ext>`)
    pub name: String,
    /// Location of the recorded media
    pub uri: String,
    /// Clip length in milliseconds
    pub duration: u64,
    /// Human-readable size label
    pub size: String,
}

impl AudioItem {
    pub fn length(&self) -> Duration {
        Duration::from_millis(self.duration)
    }
}

impl Searchable for AudioItem {
    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Derive an identifier from `now_ms`, bumping it until it is unused in
/// `existing`.
pub fn next_clip_id(existing: &[AudioItem], now_ms: i64) -> String {
    let mut candidate = now_ms.max(0);
    while existing.iter().any(|item| item.id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

/// Sequential display name for the next clip.
pub fn clip_name(existing_len: usize, uri: &str) -> String {
    let extension = std::path::Path::new(uri)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .unwrap_or(DEFAULT_CLIP_EXTENSION);
    format!("Audio_{}.{}", existing_len + 1, extension.to_ascii_lowercase())
}

/// Format a byte count the way clip sizes are displayed.
pub fn human_readable_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Size label for a finished recording.
///
/// Uses the measured size when the capture reported one; otherwise falls back
/// to a duration-based estimate, marked with a leading `~`.
pub fn size_label(measured_bytes: Option<u64>, length: Duration) -> String {
    match measured_bytes {
        Some(bytes) => human_readable_size(bytes),
        None => format!(
            "~{}",
            human_readable_size(length.as_millis().saturating_mul(ESTIMATED_BYTES_PER_MS))
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> AudioItem {
        AudioItem {
            id: id.to_string(),
            name: format!("Audio_{}.flac", id),
            uri: format!("/tmp/{}.flac", id),
            duration: 1000,
            size: "1.0 KB".to_string(),
        }
    }

    #[test]
    fn clip_id_uses_timestamp() {
        assert_eq!(next_clip_id(&[], 1_700_000_000_000), "1700000000000");
    }

    #[test]
    fn clip_id_skips_taken_values() {
        let existing = vec![item("100"), item("101")];
        assert_eq!(next_clip_id(&existing, 100), "102");
    }

    #[test]
    fn clip_name_is_sequential() {
        assert_eq!(clip_name(0, "/data/rec/abc.flac"), "Audio_1.flac");
        assert_eq!(clip_name(4, "/data/rec/abc.M4A"), "Audio_5.m4a");
    }

    #[test]
    fn clip_name_defaults_extension() {
        assert_eq!(clip_name(1, "content://recordings/7"), "Audio_2.flac");
    }

    #[test]
    fn size_label_prefers_measured() {
        assert_eq!(size_label(Some(2048), Duration::from_secs(60)), "2.0 KB");
    }

    #[test]
    fn size_label_marks_estimates() {
        // 5 s * 16 B/ms = 80000 B
        assert_eq!(size_label(None, Duration::from_secs(5)), "~78.1 KB");
        assert_eq!(size_label(None, Duration::ZERO), "~0 B");
    }

    #[test]
    fn human_readable_units() {
        assert_eq!(human_readable_size(500), "500 B");
        assert_eq!(human_readable_size(2 * 1024 * 1024), "2.0 MB");
    }

    #[test]
    fn json_shape_uses_plain_field_names() {
        let json = serde_json::to_value(item("42")).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        for key in ["id", "name", "uri", "duration", "size"] {
            assert!(keys.contains(&key), "missing {}", key);
        }
    }
}
