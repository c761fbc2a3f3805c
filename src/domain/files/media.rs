//! Media-type labels for imported files

use std::fmt;
use std::path::Path;

/// Label used when neither the picker nor the extension says anything
pub const GENERIC_MEDIA_TYPE: &str = "application/octet-stream";

/// Extension -> MIME type for the formats the file screen advertises
const KNOWN_EXTENSIONS: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("xls", "application/vnd.ms-excel"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("m4a", "audio/mp4"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("flac", "audio/flac"),
    ("mp4", "video/mp4"),
    ("mov", "video/quicktime"),
    ("avi", "video/x-msvideo"),
    ("txt", "text/plain"),
];

/// Derive the stored media-type label for a picked file.
///
/// The picker's declared type wins; otherwise the extension is consulted,
/// then the generic label.
pub fn derive_media_type(declared: Option<&str>, file_name: &str) -> String {
    if let Some(declared) = declared.map(str::trim).filter(|d| !d.is_empty() && *d != "*/*") {
        return declared.to_ascii_lowercase();
    }

    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .and_then(|ext| {
            KNOWN_EXTENSIONS
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, mime)| (*mime).to_string())
        })
        .unwrap_or_else(|| GENERIC_MEDIA_TYPE.to_string())
}

/// Coarse kind shown next to a stored file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Pdf,
    Image,
    Video,
    Audio,
    Spreadsheet,
    Text,
    Unknown,
}

impl MediaKind {
    /// Classify a media-type label
    pub fn from_media_type(media_type: &str) -> Self {
        let media_type = media_type.to_ascii_lowercase();
        let (top, sub) = media_type.split_once('/').unwrap_or((media_type.as_str(), ""));
        match top {
            "image" => Self::Image,
            "video" => Self::Video,
            "audio" => Self::Audio,
            "text" => Self::Text,
            "application" if sub == "pdf" => Self::Pdf,
            "application" if sub.contains("excel") || sub.contains("spreadsheet") => {
                Self::Spreadsheet
            }
            _ => Self::Unknown,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Spreadsheet => "spreadsheet",
            Self::Text => "text",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
