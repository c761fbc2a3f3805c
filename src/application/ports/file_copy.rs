//! Private-storage copy capability port

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Copy errors
#[derive(Debug, Clone, Error)]
pub enum CopyError {
    #[error("Failed to create directory {path}: {message}")]
    DirectoryFailed { path: String, message: String },

    #[error("Failed to copy {from} to {to}: {message}")]
    CopyFailed {
        from: String,
        to: String,
        message: String,
    },

    #[error("Failed to remove {path}: {message}")]
    RemoveFailed { path: String, message: String },
}

/// Port for duplicating picked resources into app-private storage.
///
/// Only wired on platform families that require it.
#[async_trait]
pub trait FileCopier: Send + Sync {
    /// Create `path` (and parents) if absent
    async fn ensure_directory(&self, path: &Path) -> Result<(), CopyError>;

    /// Copy `from` to `to`, returning the number of bytes written
    async fn copy(&self, from: &Path, to: &Path) -> Result<u64, CopyError>;

    /// Delete a copy made earlier; a missing file counts as removed
    async fn remove(&self, path: &Path) -> Result<(), CopyError>;
}

#[async_trait]
impl FileCopier for Box<dyn FileCopier> {
    async fn ensure_directory(&self, path: &Path) -> Result<(), CopyError> {
        self.as_ref().ensure_directory(path).await
    }

    async fn copy(&self, from: &Path, to: &Path) -> Result<u64, CopyError> {
        self.as_ref().copy(from, to).await
    }

    async fn remove(&self, path: &Path) -> Result<(), CopyError> {
        self.as_ref().remove(path).await
    }
}
