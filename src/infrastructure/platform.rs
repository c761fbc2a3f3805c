//! Adapter selection per platform family

use std::path::{Path, PathBuf};

use crate::application::ports::{FileCopier, FileViewer};
use crate::domain::platform::PlatformFamily;

use super::file_copy::TokioCopier;
use super::viewer::{SystemViewer, UnsupportedViewer};

/// Locations under the data root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    /// Key-value store files
    pub store_dir: PathBuf,
    /// Recorded clips
    pub recordings_dir: PathBuf,
    /// Private copies of imported files
    pub files_dir: PathBuf,
}

impl DataLayout {
    pub fn new(root: &Path) -> Self {
        Self {
            store_dir: root.join("store"),
            recordings_dir: root.join("recordings"),
            files_dir: root.join("files"),
        }
    }
}

/// File-screen adapters for one platform family
pub struct PlatformAdapters {
    pub family: PlatformFamily,
    /// Present only where picked files must be copied into private storage
    pub copier: Option<Box<dyn FileCopier>>,
    pub viewer: Box<dyn FileViewer>,
}

/// Build the copy/viewer adapters `family` calls for
pub fn create_platform(family: PlatformFamily) -> PlatformAdapters {
    let copier: Option<Box<dyn FileCopier>> = if family.requires_private_copy() {
        Some(Box::new(TokioCopier::new()))
    } else {
        None
    };

    let viewer: Box<dyn FileViewer> = if family.supports_system_viewer() {
        Box::new(SystemViewer::new())
    } else {
        Box::new(UnsupportedViewer)
    };

    log::debug!(
        "Platform {}: private copy {}, system viewer {}",
        family,
        copier.is_some(),
        family.supports_system_viewer()
    );

    PlatformAdapters {
        family,
        copier,
        viewer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::ViewerError;

    #[test]
    fn layout_is_under_root() {
        let layout = DataLayout::new(Path::new("/data"));
        assert_eq!(layout.store_dir, PathBuf::from("/data/store"));
        assert_eq!(layout.recordings_dir, PathBuf::from("/data/recordings"));
        assert_eq!(layout.files_dir, PathBuf::from("/data/files"));
    }

    #[test]
    fn desktop_and_android_copy() {
        assert!(create_platform(PlatformFamily::Desktop).copier.is_some());
        assert!(create_platform(PlatformFamily::Android).copier.is_some());
        assert!(create_platform(PlatformFamily::Ios).copier.is_none());
    }

    #[tokio::test]
    async fn ios_viewer_is_informational() {
        let adapters = create_platform(PlatformFamily::Ios);
        let result = adapters.viewer.open("/x.pdf", "application/pdf").await;
        assert!(matches!(result, Err(ViewerError::Unsupported(_))));
    }
}
