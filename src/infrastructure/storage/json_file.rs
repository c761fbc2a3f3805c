//! File-backed key-value store: one `<key>.json` file per key

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{KeyValueStore, StorageError};

use super::validate_key;

/// Key-value store persisted under a directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never sees a half-written value.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFailed {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let write_failed = |e: std::io::Error| StorageError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        };

        fs::create_dir_all(&self.dir).await.map_err(write_failed)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).await.map_err(write_failed)?;
        fs::rename(&tmp, &path).await.map_err(write_failed)?;

        log::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::WriteFailed {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn absent_key_reads_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert_eq!(store.get("audioList").await.unwrap(), None);
    }

    #[tokio::test]
    async fn values_land_in_key_files() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested"));

        store.set("audioList", "[]").await.unwrap();
        let on_disk = std::fs::read_to_string(dir.path().join("nested/audioList.json")).unwrap();
        assert_eq!(on_disk, "[]");
        assert!(!dir.path().join("nested/audioList.json.tmp").exists());

        store.set("audioList", "[1]").await.unwrap();
        assert_eq!(store.get("audioList").await.unwrap().as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.set("storedFiles", "[]").await.unwrap();
        store.remove("storedFiles").await.unwrap();
        store.remove("storedFiles").await.unwrap();
        assert_eq!(store.get("storedFiles").await.unwrap(), None);
    }

    #[tokio::test]
    async fn survives_a_new_instance() {
        let dir = TempDir::new().unwrap();
        JsonFileStore::new(dir.path()).set("k", "persisted").await.unwrap();
        let reopened = JsonFileStore::new(dir.path());
        assert_eq!(reopened.get("k").await.unwrap().as_deref(), Some("persisted"));
    }

    #[tokio::test]
    async fn rejects_traversal_keys() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(matches!(
            store.get("../secret").await,
            Err(StorageError::InvalidKey(_))
        ));
    }
}
