//! Native file dialog picker using rfd

use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{FilePicker, PickOutcome, PickedFile, PickerError};

/// Dialog filters matching the advertised file types
const FILTERS: &[(&str, &[&str])] = &[
    ("Documents", &["pdf", "txt", "xls", "xlsx"]),
    ("Images", &["jpg", "jpeg", "png", "gif"]),
    ("Audio", &["m4a", "mp3", "wav", "flac"]),
    ("Video", &["mp4", "mov"]),
];

/// Picker that opens the platform's native "open file" dialog
pub struct RfdPicker {
    title: String,
}

impl RfdPicker {
    pub fn new() -> Self {
        Self {
            title: "Import file".to_string(),
        }
    }
}

impl Default for RfdPicker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FilePicker for RfdPicker {
    async fn pick(&self) -> Result<PickOutcome, PickerError> {
        let title = self.title.clone();

        // The dialog blocks its thread until dismissed
        let chosen = tokio::task::spawn_blocking(move || {
            let mut dialog = rfd::FileDialog::new().set_title(&title);
            for (name, extensions) in FILTERS {
                dialog = dialog.add_filter(*name, *extensions);
            }
            dialog.add_filter("All files", &["*"]).pick_file()
        })
        .await
        .map_err(|e| PickerError::Unavailable(format!("Task join error: {}", e)))?;

        match chosen {
            Some(path) => picked_from_path(&path).map(PickOutcome::Selected),
            None => Ok(PickOutcome::Cancelled),
        }
    }
}

/// Describe a local file as a picked resource. The dialog declares no type.
pub(super) fn picked_from_path(path: &Path) -> Result<PickedFile, PickerError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PickerError::InvalidSelection(path.display().to_string()))?;

    Ok(PickedFile {
        name: name.to_string(),
        uri: path.to_string_lossy().into_owned(),
        media_type: None,
    })
}
