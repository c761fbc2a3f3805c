//! Filesystem copier on tokio::fs

use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{CopyError, FileCopier};

/// Copies picked files with `tokio::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioCopier;

impl TokioCopier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileCopier for TokioCopier {
    async fn ensure_directory(&self, path: &Path) -> Result<(), CopyError> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| CopyError::DirectoryFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })
    }

    async fn copy(&self, from: &Path, to: &Path) -> Result<u64, CopyError> {
        fs::copy(from, to).await.map_err(|e| CopyError::CopyFailed {
            from: from.display().to_string(),
            to: to.display().to_string(),
            message: e.to_string(),
        })
    }

    async fn remove(&self, path: &Path) -> Result<(), CopyError> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CopyError::RemoveFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }
}
