//! File viewer capability port

use async_trait::async_trait;
use thiserror::Error;

/// Viewer errors
#[derive(Debug, Clone, Error)]
pub enum ViewerError {
    /// The platform has no way to hand files to another app.
    /// Informational rather than a failure.
    #[error("{0}")]
    Unsupported(String),

    #[error("No application registered to open '{media_type}' files")]
    NoHandler { media_type: String },

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),
}

/// Port for handing a stored file to the OS for display
#[async_trait]
pub trait FileViewer: Send + Sync {
    async fn open(&self, uri: &str, media_type: &str) -> Result<(), ViewerError>;
}

#[async_trait]
impl FileViewer for Box<dyn FileViewer> {
    async fn open(&self, uri: &str, media_type: &str) -> Result<(), ViewerError> {
        self.as_ref().open(uri, media_type).await
    }
}
