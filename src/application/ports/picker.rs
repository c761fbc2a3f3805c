//! File picker capability port

use async_trait::async_trait;
use thiserror::Error;

/// Picker errors
#[derive(Debug, Clone, Error)]
pub enum PickerError {
    #[error("File picker unavailable: {0}")]
    Unavailable(String),

    #[error("Selected file is not usable: {0}")]
    InvalidSelection(String),
}

/// A resource chosen by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub uri: String,
    /// Media type declared by the picker, if any
    pub media_type: Option<String>,
}

/// Result of presenting the chooser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Selected(PickedFile),
    Cancelled,
}

/// Port for presenting a file chooser
#[async_trait]
pub trait FilePicker: Send + Sync {
    async fn pick(&self) -> Result<PickOutcome, PickerError>;
}

#[async_trait]
impl FilePicker for Box<dyn FilePicker> {
    async fn pick(&self) -> Result<PickOutcome, PickerError> {
        self.as_ref().pick().await
    }
}
