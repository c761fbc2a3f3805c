//! File screen controller: import, list, search, open and clear files

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::error::ErrorCategory;
use crate::domain::files::{derive_media_type, new_file_id, StoredFile};
use crate::domain::search::{filter, SearchQuery};

use super::collection::{PersistedCollection, FILE_COLLECTION_KEY};
use super::ports::{
    Alert, AlertSink, CopyError, FileCopier, FilePicker, FileViewer, KeyValueStore, PickOutcome,
    PickedFile, PickerError, StorageError, ViewerError,
};

/// Body of the file format help alert
pub const FILE_FORMAT_HELP: &str = "Images (.jpg, .png, .gif)\n\
PDFs (.pdf)\n\
Excel (.xls, .xlsx)\n\
Audio (.m4a, .mp3, .wav, .flac)\n\
Videos (.mp4, .mov)\n\
Text (.txt)\n\n\
Unsupported types will show an error.";

/// Errors from the file controller
#[derive(Debug, Error)]
pub enum FileError {
    #[error("{0}")]
    Picker(#[from] PickerError),

    #[error("{0}")]
    Copy(#[from] CopyError),

    #[error("{0}")]
    Viewer(#[from] ViewerError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("Selected file has no usable name: '{0}'")]
    InvalidSource(String),

    #[error("No file with id '{0}'")]
    UnknownFile(String),
}

impl FileError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Picker(PickerError::Unavailable(_)) | Self::Viewer(ViewerError::Unsupported(_)) => {
                ErrorCategory::CapabilityUnavailable
            }
            Self::Picker(PickerError::InvalidSelection(_))
            | Self::InvalidSource(_)
            | Self::UnknownFile(_) => ErrorCategory::InvalidSelection,
            Self::Copy(_) => ErrorCategory::CopyFailed,
            Self::Viewer(_) => ErrorCategory::CapabilityUnavailable,
            Self::Storage(_) => ErrorCategory::StorageFailed,
        }
    }
}

/// Result of an import attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported(StoredFile),
    /// The user dismissed the picker
    Cancelled,
    /// Reported through an alert
    Failed,
}

impl ImportOutcome {
    pub fn imported(self) -> Option<StoredFile> {
        match self {
            Self::Imported(file) => Some(file),
            _ => None,
        }
    }
}

/// File screen controller.
///
/// Picked files are copied into `private_dir` when a copier is wired (the
/// platform families that need it). All failures become alerts.
pub struct FileController<S, P, V, A>
where
    S: KeyValueStore,
    P: FilePicker,
    V: FileViewer,
    A: AlertSink,
{
    store: S,
    picker: P,
    viewer: V,
    alerts: A,
    copier: Option<Box<dyn FileCopier>>,
    private_dir: PathBuf,
    collection: PersistedCollection<StoredFile>,
    items: Vec<StoredFile>,
    query: SearchQuery,
    clear_pending: bool,
}

impl<S, P, V, A> FileController<S, P, V, A>
where
    S: KeyValueStore,
    P: FilePicker,
    V: FileViewer,
    A: AlertSink,
{
    pub fn new(store: S, picker: P, viewer: V, alerts: A) -> Self {
        Self {
            store,
            picker,
            viewer,
            alerts,
            copier: None,
            private_dir: PathBuf::new(),
            collection: PersistedCollection::new(FILE_COLLECTION_KEY),
            items: Vec::new(),
            query: SearchQuery::default(),
            clear_pending: false,
        }
    }

    /// Copy every import into `private_dir` through `copier`
    pub fn with_copier(mut self, copier: Box<dyn FileCopier>, private_dir: impl Into<PathBuf>) -> Self {
        self.copier = Some(copier);
        self.private_dir = private_dir.into();
        self
    }

    /// Read the persisted collection, falling back to empty
    pub async fn load(&mut self) {
        match self.collection.load(&self.store).await {
            Ok(items) => {
                log::info!("Loaded {} stored file(s)", items.len());
                self.items = items;
            }
            Err(e) => {
                self.items.clear();
                let e = FileError::from(e);
                log::warn!("Failed to load files ({}): {}", e.category(), e);
                self.alerts
                    .show(Alert::error(
                        "Could not load files",
                        format!("{} Starting with an empty library.", e),
                    ))
                    .await;
            }
        }
    }

    pub fn items(&self) -> &[StoredFile] {
        &self.items
    }

    pub fn visible_items(&self) -> Vec<&StoredFile> {
        filter(&self.items, &self.query)
    }

    pub fn search(&self) -> &SearchQuery {
        &self.query
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.query = SearchQuery::new(text);
    }

    pub fn find(&self, id_or_name: &str) -> Option<&StoredFile> {
        self.items
            .iter()
            .find(|item| item.id == id_or_name)
            .or_else(|| self.items.iter().find(|item| item.name == id_or_name))
    }

    // ----- import -----

    /// Pick a file and add it to the collection. Cancellation changes
    /// nothing and raises no alert.
    pub async fn import_file(&mut self) -> ImportOutcome {
        let picked = match self.picker.pick().await {
            Ok(PickOutcome::Selected(picked)) => picked,
            Ok(PickOutcome::Cancelled) => {
                log::debug!("Import cancelled");
                return ImportOutcome::Cancelled;
            }
            Err(e) => {
                self.report("Import error", &FileError::from(e)).await;
                return ImportOutcome::Failed;
            }
        };

        match self.try_import(picked).await {
            Ok(file) => {
                log::info!("Imported {} as {}", file.name, file.media_type);
                self.query = SearchQuery::default();
                self.alerts
                    .show(Alert::info("Success", "File added successfully"))
                    .await;
                ImportOutcome::Imported(file)
            }
            Err(e) => {
                self.report("Import error", &e).await;
                ImportOutcome::Failed
            }
        }
    }

    async fn try_import(&mut self, picked: PickedFile) -> Result<StoredFile, FileError> {
        let name = Path::new(&picked.name)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| FileError::InvalidSource(picked.name.clone()))?;

        let media_type = derive_media_type(picked.media_type.as_deref(), &name);
        let id = new_file_id();

        let (uri, copied) = match &self.copier {
            Some(copier) => {
                let target = self.private_dir.join(format!("{}_{}", id, name));
                copier.ensure_directory(&self.private_dir).await?;
                let bytes = copier.copy(&source_path(&picked.uri), &target).await?;
                log::debug!("Copied {} bytes to {}", bytes, target.display());
                (target.to_string_lossy().into_owned(), Some(target))
            }
            None => (picked.uri, None),
        };

        let file = StoredFile::with_id(id, name, uri, media_type);
        match self.collection.append(&self.store, file.clone()).await {
            Ok(items) => {
                self.items = items;
                Ok(file)
            }
            Err(e) => {
                if let Some(target) = copied {
                    self.discard_copy(&target).await;
                }
                Err(e.into())
            }
        }
    }

    /// Drop a private copy that no stored entry points to
    async fn discard_copy(&self, target: &Path) {
        let Some(copier) = &self.copier else {
            return;
        };
        match copier.remove(target).await {
            Ok(()) => log::debug!("Removed unreferenced copy {}", target.display()),
            Err(e) => log::warn!("Failed to remove unreferenced copy: {}", e),
        }
    }

    // ----- clear -----

    /// First step of clearing: raise the confirmation alert
    pub async fn request_clear_all(&mut self) {
        self.clear_pending = true;
        self.alerts
            .show(Alert::confirm(
                "Clear All Files",
                "Are you sure you want to delete all files?",
            ))
            .await;
    }

    pub fn is_clear_pending(&self) -> bool {
        self.clear_pending
    }

    pub fn cancel_clear_all(&mut self) {
        self.clear_pending = false;
    }

    /// Second step of clearing. Without a pending request this does nothing.
    /// Returns whether the collection was wiped.
    pub async fn confirm_clear_all(&mut self) -> bool {
        if !std::mem::take(&mut self.clear_pending) {
            log::debug!("confirm_clear_all ignored: nothing pending");
            return false;
        }

        match self.collection.clear(&self.store).await {
            Ok(()) => {
                log::info!("Cleared {} stored file(s)", self.items.len());
                self.items.clear();
                true
            }
            Err(e) => {
                self.report("Clear error", &FileError::from(e)).await;
                false
            }
        }
    }

    // ----- open -----

    /// Hand the file with `id` to the viewer. Returns whether it opened.
    pub async fn open_file(&self, id: &str) -> bool {
        let Some(file) = self.items.iter().find(|item| item.id == id) else {
            self.report("Open error", &FileError::UnknownFile(id.to_string()))
                .await;
            return false;
        };

        match self.viewer.open(&file.uri, &file.media_type).await {
            Ok(()) => {
                log::info!("Opened {}", file.name);
                true
            }
            Err(ViewerError::Unsupported(message)) => {
                log::info!("Viewer unsupported: {}", message);
                self.alerts.show(Alert::info("Not supported", message)).await;
                false
            }
            Err(e) => {
                self.report("Open error", &FileError::from(e)).await;
                false
            }
        }
    }

    pub async fn show_format_help(&self) {
        self.alerts
            .show(Alert::info("Supported File Formats", FILE_FORMAT_HELP))
            .await;
    }

    async fn report(&self, title: &str, error: &FileError) {
        log::warn!("{} ({}): {}", title, error.category(), error);
        self.alerts.show(Alert::error(title, error.to_string())).await;
    }
}

/// Local path for a picked URI, accepting `file://` URLs
fn source_path(uri: &str) -> PathBuf {
    PathBuf::from(uri.strip_prefix("file://").unwrap_or(uri))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::AlertKind;
    use crate::infrastructure::storage::MemoryStore;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MockPicker {
        outcomes: Arc<Mutex<Vec<Result<PickOutcome, PickerError>>>>,
    }

    impl MockPicker {
        fn returning(outcome: Result<PickOutcome, PickerError>) -> Self {
            let picker = Self::default();
            picker.push(outcome);
            picker
        }

        fn push(&self, outcome: Result<PickOutcome, PickerError>) {
            self.outcomes.lock().unwrap().push(outcome);
        }
    }

    #[async_trait]
    impl FilePicker for MockPicker {
        async fn pick(&self) -> Result<PickOutcome, PickerError> {
            self.outcomes
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Ok(PickOutcome::Cancelled))
        }
    }

    #[derive(Clone, Default)]
    struct MockViewer {
        error: Option<ViewerError>,
        opened: Arc<Mutex<Vec<(String, String)>>>,
    }

    #[async_trait]
    impl FileViewer for MockViewer {
        async fn open(&self, uri: &str, media_type: &str) -> Result<(), ViewerError> {
            if let Some(e) = &self.error {
                return Err(e.clone());
            }
            self.opened
                .lock()
                .unwrap()
                .push((uri.to_string(), media_type.to_string()));
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct MockCopier {
        fail: bool,
        copies: Arc<Mutex<Vec<(PathBuf, PathBuf)>>>,
        dirs: Arc<Mutex<Vec<PathBuf>>>,
        removed: Arc<Mutex<Vec<PathBuf>>>,
    }

    #[async_trait]
    impl FileCopier for MockCopier {
        async fn ensure_directory(&self, path: &Path) -> Result<(), CopyError> {
            self.dirs.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }

        async fn copy(&self, from: &Path, to: &Path) -> Result<u64, CopyError> {
            if self.fail {
                return Err(CopyError::CopyFailed {
                    from: from.display().to_string(),
                    to: to.display().to_string(),
                    message: "no space left".into(),
                });
            }
            self.copies
                .lock()
                .unwrap()
                .push((from.to_path_buf(), to.to_path_buf()));
            Ok(42)
        }

        async fn remove(&self, path: &Path) -> Result<(), CopyError> {
            self.removed.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
    }

    /// Store that reads as empty and rejects every write
    struct ReadOnlyStore;

    #[async_trait]
    impl KeyValueStore for ReadOnlyStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        async fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::WriteFailed {
                key: key.to_string(),
                message: "read-only filesystem".into(),
            })
        }

        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct MockAlerts {
        shown: Arc<Mutex<Vec<Alert>>>,
    }

    impl MockAlerts {
        fn shown(&self) -> Vec<Alert> {
            self.shown.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AlertSink for MockAlerts {
        async fn show(&self, alert: Alert) {
            self.shown.lock().unwrap().push(alert);
        }
    }

    type Controller = FileController<Arc<MemoryStore>, MockPicker, MockViewer, MockAlerts>;

    fn pdf() -> Result<PickOutcome, PickerError> {
        Ok(PickOutcome::Selected(PickedFile {
            name: "report.pdf".into(),
            uri: "/downloads/report.pdf".into(),
            media_type: Some("application/pdf".into()),
        }))
    }

    fn controller(picker: MockPicker, viewer: MockViewer) -> (Controller, Arc<MemoryStore>, MockAlerts) {
        let store = Arc::new(MemoryStore::new());
        let alerts = MockAlerts::default();
        let c = FileController::new(Arc::clone(&store), picker, viewer, alerts.clone());
        (c, store, alerts)
    }

    #[tokio::test]
    async fn import_appends_and_persists() {
        let (mut c, store, alerts) = controller(MockPicker::returning(pdf()), MockViewer::default());
        c.load().await;

        let file = c.import_file().await.imported().unwrap();
        assert_eq!(file.name, "report.pdf");
        assert_eq!(file.uri, "/downloads/report.pdf");
        assert_eq!(file.media_type, "application/pdf");
        assert_eq!(c.items(), &[file.clone()]);

        let text = store.get(FILE_COLLECTION_KEY).await.unwrap().unwrap();
        let stored: Vec<StoredFile> = serde_json::from_str(&text).unwrap();
        assert_eq!(stored, vec![file]);

        let shown = alerts.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].kind, AlertKind::Info);
        assert_eq!(shown[0].message, "File added successfully");
    }

    #[tokio::test]
    async fn import_derives_type_from_extension() {
        let picker = MockPicker::returning(Ok(PickOutcome::Selected(PickedFile {
            name: "photo.JPG".into(),
            uri: "/p/photo.JPG".into(),
            media_type: None,
        })));
        let (mut c, _, _) = controller(picker, MockViewer::default());
        let file = c.import_file().await.imported().unwrap();
        assert_eq!(file.media_type, "image/jpeg");
    }

    #[tokio::test]
    async fn import_clears_search() {
        let (mut c, _, _) = controller(MockPicker::returning(pdf()), MockViewer::default());
        c.set_search("zzz");
        c.import_file().await.imported().unwrap();
        assert!(c.search().is_empty());
        assert_eq!(c.visible_items().len(), 1);
    }

    #[tokio::test]
    async fn cancelled_import_changes_nothing() {
        let (mut c, store, alerts) = controller(MockPicker::default(), MockViewer::default());
        c.set_search("report");

        assert_eq!(c.import_file().await, ImportOutcome::Cancelled);
        assert!(c.items().is_empty());
        assert_eq!(c.search().as_str(), "report");
        assert!(alerts.shown().is_empty());
        assert!(store.get(FILE_COLLECTION_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn picker_failure_alerts() {
        let picker = MockPicker::returning(Err(PickerError::Unavailable("no display".into())));
        let (mut c, _, alerts) = controller(picker, MockViewer::default());
        assert_eq!(c.import_file().await, ImportOutcome::Failed);
        assert_eq!(alerts.shown()[0].kind, AlertKind::Error);
    }

    #[tokio::test]
    async fn import_copies_into_private_dir() {
        let copier = MockCopier::default();
        let (c, _, _) = controller(MockPicker::returning(pdf()), MockViewer::default());
        let mut c = c.with_copier(Box::new(copier.clone()), "/data/files");

        let file = c.import_file().await.imported().unwrap();
        let expected = format!("/data/files/{}_report.pdf", file.id);
        assert_eq!(file.uri, expected);
        assert_eq!(copier.dirs.lock().unwrap().as_slice(), &[PathBuf::from("/data/files")]);
        assert_eq!(
            copier.copies.lock().unwrap().as_slice(),
            &[(PathBuf::from("/downloads/report.pdf"), PathBuf::from(expected))]
        );
    }

    #[tokio::test]
    async fn copy_failure_aborts_import() {
        let copier = MockCopier {
            fail: true,
            ..Default::default()
        };
        let (c, store, alerts) = controller(MockPicker::returning(pdf()), MockViewer::default());
        let mut c = c.with_copier(Box::new(copier), "/data/files");

        assert_eq!(c.import_file().await, ImportOutcome::Failed);
        assert!(c.items().is_empty());
        assert!(store.get(FILE_COLLECTION_KEY).await.unwrap().is_none());
        let shown = alerts.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].kind, AlertKind::Error);
        assert!(shown[0].message.contains("no space left"));
    }

    #[tokio::test]
    async fn failed_save_removes_private_copy() {
        let copier = MockCopier::default();
        let alerts = MockAlerts::default();
        let mut c = FileController::new(
            ReadOnlyStore,
            MockPicker::returning(pdf()),
            MockViewer::default(),
            alerts.clone(),
        )
        .with_copier(Box::new(copier.clone()), "/data/files");

        assert_eq!(c.import_file().await, ImportOutcome::Failed);
        assert!(c.items().is_empty());

        let copies = copier.copies.lock().unwrap().clone();
        assert_eq!(copies.len(), 1);
        assert_eq!(copier.removed.lock().unwrap().as_slice(), &[copies[0].1.clone()]);
        assert!(alerts.shown()[0].message.contains("read-only filesystem"));
    }

    #[tokio::test]
    async fn copy_failure_leaves_nothing_to_remove() {
        let copier = MockCopier {
            fail: true,
            ..Default::default()
        };
        let (c, _, _) = controller(MockPicker::returning(pdf()), MockViewer::default());
        let mut c = c.with_copier(Box::new(copier.clone()), "/data/files");

        assert_eq!(c.import_file().await, ImportOutcome::Failed);
        assert!(copier.removed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn clear_requires_confirmation() {
        let picker = MockPicker::returning(pdf());
        picker.push(pdf());
        let (mut c, store, alerts) = controller(picker, MockViewer::default());
        c.import_file().await;
        c.import_file().await;
        assert_eq!(c.items().len(), 2);

        assert!(!c.confirm_clear_all().await);
        assert_eq!(c.items().len(), 2);

        c.request_clear_all().await;
        assert!(c.is_clear_pending());
        assert_eq!(alerts.shown().last().unwrap().kind, AlertKind::Confirm);
        c.cancel_clear_all();
        assert!(!c.confirm_clear_all().await);
        assert_eq!(c.items().len(), 2);

        c.request_clear_all().await;
        assert!(c.confirm_clear_all().await);
        assert!(c.items().is_empty());
        assert!(!c.is_clear_pending());

        c.load().await;
        assert!(c.items().is_empty());
        assert!(store.get(FILE_COLLECTION_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn open_hands_uri_and_type_to_viewer() {
        let viewer = MockViewer::default();
        let (mut c, _, _) = controller(MockPicker::returning(pdf()), viewer.clone());
        let file = c.import_file().await.imported().unwrap();

        assert!(c.open_file(&file.id).await);
        assert_eq!(
            viewer.opened.lock().unwrap().as_slice(),
            &[("/downloads/report.pdf".to_string(), "application/pdf".to_string())]
        );
    }

    #[tokio::test]
    async fn unsupported_viewer_is_informational() {
        let viewer = MockViewer {
            error: Some(ViewerError::Unsupported("Opening files is not supported here".into())),
            ..Default::default()
        };
        let (mut c, _, alerts) = controller(MockPicker::returning(pdf()), viewer);
        let file = c.import_file().await.imported().unwrap();

        assert!(!c.open_file(&file.id).await);
        let last = alerts.shown().last().cloned().unwrap();
        assert_eq!(last.kind, AlertKind::Info);
        assert_eq!(last.message, "Opening files is not supported here");
    }

    #[tokio::test]
    async fn viewer_rejection_is_descriptive_error() {
        let viewer = MockViewer {
            error: Some(ViewerError::NoHandler {
                media_type: "application/pdf".into(),
            }),
            ..Default::default()
        };
        let (mut c, _, alerts) = controller(MockPicker::returning(pdf()), viewer);
        let file = c.import_file().await.imported().unwrap();

        assert!(!c.open_file(&file.id).await);
        let last = alerts.shown().last().cloned().unwrap();
        assert_eq!(last.kind, AlertKind::Error);
        assert!(last.message.contains("application/pdf"));
    }

    #[tokio::test]
    async fn corrupt_storage_loads_empty() {
        let (mut c, store, alerts) = controller(MockPicker::returning(pdf()), MockViewer::default());
        store.set(FILE_COLLECTION_KEY, "not json").await.unwrap();
        c.load().await;
        assert!(c.items().is_empty());
        assert_eq!(alerts.shown().len(), 1);

        c.import_file().await.imported().unwrap();
        assert_eq!(c.items().len(), 1);
    }

    #[test]
    fn source_path_strips_file_scheme() {
        assert_eq!(source_path("file:///tmp/a.txt"), PathBuf::from("/tmp/a.txt"));
        assert_eq!(source_path("/tmp/a.txt"), PathBuf::from("/tmp/a.txt"));
    }

    #[test]
    fn error_categories() {
        assert_eq!(
            FileError::from(CopyError::DirectoryFailed {
                path: "/x".into(),
                message: "denied".into()
            })
            .category(),
            ErrorCategory::CopyFailed
        );
        assert_eq!(
            FileError::from(ViewerError::Unsupported("no".into())).category(),
            ErrorCategory::CapabilityUnavailable
        );
    }
}
