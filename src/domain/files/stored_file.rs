//! Persisted file reference entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::search::Searchable;

use super::media::MediaKind;

/// A file reference as stored under the file collection key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    /// Random identifier, globally unique
    pub id: String,
    pub name: String,
    /// Location the viewer is handed (the private copy when one was made)
    pub uri: String,
    /// Media-type label
    #[serde(rename = "type")]
    pub media_type: String,
}

impl StoredFile {
    /// Create a file reference with a fresh identifier
    pub fn new(name: impl Into<String>, uri: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self::with_id(new_file_id(), name, uri, media_type)
    }

    pub fn with_id(
        id: impl Into<String>,
        name: impl Into<String>,
        uri: impl Into<String>,
        media_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            uri: uri.into(),
            media_type: media_type.into(),
        }
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::from_media_type(&self.media_type)
    }
}

impl Searchable for StoredFile {
    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Fresh random file identifier
pub fn new_file_id() -> String {
    Uuid::new_v4().to_string()
}
