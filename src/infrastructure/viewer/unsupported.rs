//! Viewer for platform families that cannot hand files to other apps

use async_trait::async_trait;

use crate::application::ports::{FileViewer, ViewerError};

pub const UNSUPPORTED_MESSAGE: &str = "Opening files is not supported on this platform yet.";

#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedViewer;

#[async_trait]
impl FileViewer for UnsupportedViewer {
    async fn open(&self, _uri: &str, _media_type: &str) -> Result<(), ViewerError> {
        Err(ViewerError::Unsupported(UNSUPPORTED_MESSAGE.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn always_reports_unsupported() {
        let result = UnsupportedViewer.open("/x.pdf", "application/pdf").await;
        assert!(matches!(result, Err(ViewerError::Unsupported(m)) if m == UNSUPPORTED_MESSAGE));
    }
}
