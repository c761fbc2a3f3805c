//! Picker that "selects" a path given up front, for non-interactive use

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use super::rfd_picker::picked_from_path;
use crate::application::ports::{FilePicker, PickOutcome, PickerError};

pub struct PathPicker {
    path: PathBuf,
}

impl PathPicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FilePicker for PathPicker {
    async fn pick(&self) -> Result<PickOutcome, PickerError> {
        let metadata = fs::metadata(&self.path).await.map_err(|e| {
            PickerError::InvalidSelection(format!("{}: {}", self.path.display(), e))
        })?;
        if !metadata.is_file() {
            return Err(PickerError::InvalidSelection(format!(
                "{} is not a regular file",
                self.path.display()
            )));
        }

        let path = fs::canonicalize(&self.path)
            .await
            .unwrap_or_else(|_| self.path.clone());
        picked_from_path(&path).map(PickOutcome::Selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn existing_file_is_selected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let outcome = PathPicker::new(&path).pick().await.unwrap();
        match outcome {
            PickOutcome::Selected(picked) => {
                assert_eq!(picked.name, "notes.txt");
                assert!(picked.uri.ends_with("notes.txt"));
            }
            PickOutcome::Cancelled => panic!("expected a selection"),
        }
    }

    #[tokio::test]
    async fn missing_file_is_invalid() {
        let dir = TempDir::new().unwrap();
        let result = PathPicker::new(dir.path().join("nope.pdf")).pick().await;
        assert!(matches!(result, Err(PickerError::InvalidSelection(_))));
    }

    #[tokio::test]
    async fn directory_is_invalid() {
        let dir = TempDir::new().unwrap();
        let result = PathPicker::new(dir.path()).pick().await;
        assert!(matches!(result, Err(PickerError::InvalidSelection(_))));
    }
}
