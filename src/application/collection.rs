//! JSON-array collections persisted under a single store key

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::ports::{KeyValueStore, StorageError};

/// Store key of the audio clip collection
pub const AUDIO_COLLECTION_KEY: &str = "audioList";

/// Store key of the stored file collection
pub const FILE_COLLECTION_KEY: &str = "storedFiles";

/// An ordered collection of `T` serialized as one JSON array.
///
/// Every mutation is a read-modify-write of the whole array; there is no
/// partial update and no protection against a second writer.
#[derive(Debug, Clone, Copy)]
pub struct PersistedCollection<T> {
    key: &'static str,
    _item: PhantomData<fn() -> T>,
}

impl<T> PersistedCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            _item: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Read the whole collection. Absent key -> empty collection.
    pub async fn load<S>(&self, store: &S) -> Result<Vec<T>, StorageError>
    where
        S: KeyValueStore + ?Sized,
    {
        match store.get(self.key).await? {
            None => Ok(Vec::new()),
            Some(text) if text.trim().is_empty() => Ok(Vec::new()),
            Some(text) => serde_json::from_str(&text).map_err(|e| StorageError::Corrupt {
                key: self.key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// Overwrite the stored collection with `items`
    pub async fn save<S>(&self, store: &S, items: &[T]) -> Result<(), StorageError>
    where
        S: KeyValueStore + ?Sized,
    {
        let text = serde_json::to_string(items).map_err(|e| StorageError::WriteFailed {
            key: self.key.to_string(),
            message: e.to_string(),
        })?;
        store.set(self.key, &text).await
    }

    /// Fetch, push `item`, write everything back. Returns the new collection.
    pub async fn append<S>(&self, store: &S, item: T) -> Result<Vec<T>, StorageError>
    where
        S: KeyValueStore + ?Sized,
    {
        self.append_with(store, |_| item).await
    }

    /// Like [`append`](Self::append), but the item is built from the freshly
    /// read collection so it can depend on what is already stored.
    ///
    /// Corrupt stored data is replaced, matching the empty collection the
    /// controller fell back to at startup.
    pub async fn append_with<S, F>(&self, store: &S, build: F) -> Result<Vec<T>, StorageError>
    where
        S: KeyValueStore + ?Sized,
        F: FnOnce(&[T]) -> T,
    {
        let mut items = match self.load(store).await {
            Ok(items) => items,
            Err(StorageError::Corrupt { message, .. }) => {
                log::warn!("Replacing corrupt '{}' collection: {}", self.key, message);
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        let item = build(&items);
        items.push(item);
        self.save(store, &items).await?;
        Ok(items)
    }

    /// Delete the stored collection entirely
    pub async fn clear<S>(&self, store: &S) -> Result<(), StorageError>
    where
        S: KeyValueStore + ?Sized,
    {
        store.remove(self.key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::MemoryStore;

    fn numbers() -> PersistedCollection<u32> {
        PersistedCollection::new("numbers")
    }

    #[tokio::test]
    async fn load_absent_key_is_empty() {
        let store = MemoryStore::new();
        assert!(numbers().load(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_is_read_modify_write() {
        let store = MemoryStore::new();
        numbers().append(&store, 1).await.unwrap();
        let all = numbers().append(&store, 2).await.unwrap();

        assert_eq!(all, vec![1, 2]);
        assert_eq!(store.get("numbers").await.unwrap().as_deref(), Some("[1,2]"));
    }

    #[tokio::test]
    async fn append_sees_external_writes() {
        let store = MemoryStore::new();
        store.set("numbers", "[7]").await.unwrap();
        let all = numbers().append(&store, 8).await.unwrap();
        assert_eq!(all, vec![7, 8]);
    }

    #[tokio::test]
    async fn append_with_sees_stored_items() {
        let store = MemoryStore::new();
        store.set("numbers", "[4,5]").await.unwrap();
        let all = numbers()
            .append_with(&store, |existing| existing.len() as u32 * 10)
            .await
            .unwrap();
        assert_eq!(all, vec![4, 5, 20]);
    }

    #[tokio::test]
    async fn load_corrupt_is_an_error() {
        let store = MemoryStore::new();
        store.set("numbers", "{not json").await.unwrap();
        let err = numbers().load(&store).await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn append_replaces_corrupt_data() {
        let store = MemoryStore::new();
        store.set("numbers", "garbage").await.unwrap();
        let all = numbers().append(&store, 3).await.unwrap();
        assert_eq!(all, vec![3]);
    }

    #[tokio::test]
    async fn clear_removes_key() {
        let store = MemoryStore::new();
        numbers().append(&store, 1).await.unwrap();
        numbers().clear(&store).await.unwrap();
        assert!(store.get("numbers").await.unwrap().is_none());
        assert!(numbers().load(&store).await.unwrap().is_empty());
    }
}
