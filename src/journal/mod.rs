//! Photo journal: the record lifecycle manager.
//!
//! `PhotoJournal` owns the authoritative in-memory collection and keeps
//! three places consistent: the collection itself, the durable record store,
//! and the external asset library. All mutations go through it, and every
//! committed mutation persists the full collection exactly once.

pub mod error;
pub mod record;

pub use error::JournalError;
pub use record::PhotoRecord;

use std::fmt;
use std::sync::Arc;

use crate::library::{AssetLibrary, LibraryError};
use crate::share::{SHARE_MIME, ShareSurface};
use crate::store::RecordStore;

/// Lifecycle state of the journal.
///
/// Mutations are rejected until `load()` has run; a store failure during
/// load parks the journal in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalState {
    Uninitialized,
    Ready,
    Failed,
}

impl fmt::Display for JournalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Uninitialized => "uninitialized",
            Self::Ready => "ready",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Non-fatal problems surfaced by an operation that still committed.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// The photo was saved but could not be filed into the album.
    AlbumPlacement { detail: String },
    /// The record was removed but the asset may remain in the library.
    AssetDeletion { asset_id: String, detail: String },
    /// The in-memory change applied but could not be persisted.
    PersistFailed { detail: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlbumPlacement { detail } => {
                write!(f, "Photo was saved but not filed into the album: {}", detail)
            }
            Self::AssetDeletion { asset_id, detail } => {
                write!(
                    f,
                    "Asset {} may remain in the photo library: {}",
                    asset_id, detail
                )
            }
            Self::PersistFailed { detail } => {
                write!(
                    f,
                    "Change is not saved to disk and may be lost on exit: {}",
                    detail
                )
            }
        }
    }
}

/// Outcome of `add`.
#[derive(Debug)]
pub struct Added {
    pub record: PhotoRecord,
    pub warnings: Vec<Warning>,
}

/// Outcome of `update_caption`. `record` is `None` when the id was unknown.
#[derive(Debug)]
pub struct CaptionUpdated {
    pub record: Option<PhotoRecord>,
    pub warnings: Vec<Warning>,
}

/// Outcome of `delete`. `record` is `None` when the id was unknown.
#[derive(Debug)]
pub struct Deleted {
    pub record: Option<PhotoRecord>,
    pub warnings: Vec<Warning>,
}

/// The photo record lifecycle manager.
pub struct PhotoJournal {
    store: Arc<dyn RecordStore>,
    library: Arc<dyn AssetLibrary>,
    share: Arc<dyn ShareSurface>,
    album_name: String,
    state: JournalState,
    /// Authoritative collection, newest first.
    records: Vec<PhotoRecord>,
}

impl fmt::Debug for PhotoJournal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoJournal")
            .field("album_name", &self.album_name)
            .field("state", &self.state)
            .field("records", &self.records.len())
            .finish_non_exhaustive()
    }
}

impl PhotoJournal {
    /// Create a journal wired to its adapters. Call `load` before mutating.
    pub fn new(
        store: Arc<dyn RecordStore>,
        library: Arc<dyn AssetLibrary>,
        share: Arc<dyn ShareSurface>,
        album_name: String,
    ) -> Self {
        Self {
            store,
            library,
            share,
            album_name,
            state: JournalState::Uninitialized,
            records: Vec::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> JournalState {
        self.state
    }

    /// Snapshot of the collection, newest first.
    pub fn records(&self) -> &[PhotoRecord] {
        &self.records
    }

    /// Look up a record by exact id.
    pub fn get(&self, id: &str) -> Option<&PhotoRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Load the collection from the record store.
    ///
    /// An unreadable stored value already degraded to an empty collection
    /// inside the store; only a real store failure leaves the journal in
    /// `Failed`.
    pub async fn load(&mut self) -> Result<(), JournalError> {
        match self.store.load().await {
            Ok(records) => {
                tracing::info!(count = records.len(), "Journal loaded");
                self.records = records;
                self.state = JournalState::Ready;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load journal");
                self.state = JournalState::Failed;
                Err(JournalError::Load(e))
            }
        }
    }

    /// Add a captured photo to the journal.
    ///
    /// The asset is stored in the library first, so no record ever points at
    /// an asset that does not exist. Album placement is best-effort and is
    /// reported as a warning when it fails.
    pub async fn add(&mut self, temp_uri: &str, caption: &str) -> Result<Added, JournalError> {
        self.ensure_ready()?;
        let caption = Self::validate_caption(caption)?;

        let asset = match self.library.create_asset(temp_uri).await {
            Ok(asset) => asset,
            Err(LibraryError::PermissionDenied(e)) => {
                tracing::warn!(error = %e, "Photo library access denied");
                return Err(JournalError::PermissionDenied);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to store captured photo");
                return Err(JournalError::CreationFailed(e.to_string()));
            }
        };

        let mut warnings = Vec::new();
        if let Err(e) = self.file_into_album(&asset.asset_id).await {
            tracing::warn!(
                album = %self.album_name,
                error = %e,
                "Could not file photo into album"
            );
            warnings.push(Warning::AlbumPlacement {
                detail: e.to_string(),
            });
        }

        let record = PhotoRecord::new(asset.asset_id, asset.uri, caption);
        tracing::info!(id = %record.id, asset_id = %record.asset_id, "Photo added");

        let mut next = self.records.clone();
        next.insert(0, record.clone());
        self.commit(next, &mut warnings).await;

        Ok(Added { record, warnings })
    }

    /// Replace the caption of the record with `id`.
    ///
    /// An unknown id is a no-op: nothing changes and nothing is persisted.
    /// Only the caption is touched; id, asset and timestamp stay as created.
    pub async fn update_caption(
        &mut self,
        id: &str,
        caption: &str,
    ) -> Result<CaptionUpdated, JournalError> {
        self.ensure_ready()?;
        let caption = Self::validate_caption(caption)?;

        let pos = match self.records.iter().position(|r| r.id == id) {
            Some(pos) => pos,
            None => {
                tracing::debug!(id = %id, "Caption update for unknown record ignored");
                return Ok(CaptionUpdated {
                    record: None,
                    warnings: Vec::new(),
                });
            }
        };

        let mut next = self.records.clone();
        next[pos].caption = caption;
        let record = next[pos].clone();

        let mut warnings = Vec::new();
        self.commit(next, &mut warnings).await;

        tracing::info!(id = %id, "Caption updated");
        Ok(CaptionUpdated {
            record: Some(record),
            warnings,
        })
    }

    /// Remove the record with `id` and delete its asset from the library.
    ///
    /// An unknown id is a no-op. A library deletion failure becomes a
    /// warning; the record itself is still removed and the removal
    /// persisted, so the journal never keeps an entry it tried to delete.
    pub async fn delete(&mut self, id: &str) -> Result<Deleted, JournalError> {
        self.ensure_ready()?;

        let pos = match self.records.iter().position(|r| r.id == id) {
            Some(pos) => pos,
            None => {
                tracing::debug!(id = %id, "Delete for unknown record ignored");
                return Ok(Deleted {
                    record: None,
                    warnings: Vec::new(),
                });
            }
        };

        let mut warnings = Vec::new();
        let asset_id = self.records[pos].asset_id.clone();
        if let Err(e) = self.library.delete_asset(&asset_id).await {
            tracing::warn!(asset_id = %asset_id, error = %e, "Asset deletion failed");
            warnings.push(Warning::AssetDeletion {
                asset_id,
                detail: e.to_string(),
            });
        }

        let mut next = self.records.clone();
        let record = next.remove(pos);
        self.commit(next, &mut warnings).await;

        tracing::info!(id = %record.id, "Photo deleted");
        Ok(Deleted {
            record: Some(record),
            warnings,
        })
    }

    /// Share a photo by its locator.
    ///
    /// Never mutates the collection and does not require the locator to
    /// belong to a current record.
    pub async fn share(&self, uri: &str) -> Result<(), JournalError> {
        if !self.share.is_available().await {
            return Err(JournalError::ShareUnavailable);
        }
        self.share.share(uri, SHARE_MIME).await?;
        tracing::info!(uri = %uri, "Photo shared");
        Ok(())
    }

    fn ensure_ready(&self) -> Result<(), JournalError> {
        if self.state != JournalState::Ready {
            return Err(JournalError::NotReady { state: self.state });
        }
        Ok(())
    }

    /// Trim a caption, rejecting captions that are empty afterwards.
    fn validate_caption(caption: &str) -> Result<String, JournalError> {
        let trimmed = caption.trim();
        if trimmed.is_empty() {
            return Err(JournalError::EmptyCaption);
        }
        Ok(trimmed.to_string())
    }

    /// Ensure the album exists and add the asset to it.
    async fn file_into_album(&self, asset_id: &str) -> Result<(), LibraryError> {
        let album = self.library.ensure_album(&self.album_name).await?;
        self.library.add_to_album(asset_id, &album).await?;
        tracing::debug!(album = %album.name, asset_id = %asset_id, "Photo filed into album");
        Ok(())
    }

    /// Commit a new collection value: replace memory, then persist once.
    ///
    /// Persist failure is downgraded to a warning; the in-memory change
    /// stands for the rest of the session.
    async fn commit(&mut self, records: Vec<PhotoRecord>, warnings: &mut Vec<Warning>) {
        self.records = records;
        if let Err(e) = self.store.save(&self.records).await {
            tracing::error!(error = %e, "Failed to persist journal");
            warnings.push(Warning::PersistFailed {
                detail: e.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::library::{AlbumHandle, NewAsset};
    use crate::share::ShareError;
    use crate::store::StoreError;

    /// In-memory store that records every saved snapshot.
    #[derive(Default)]
    struct FakeStore {
        saved: Mutex<Vec<Vec<PhotoRecord>>>,
        fail_load: AtomicBool,
        fail_save: AtomicBool,
    }

    impl FakeStore {
        fn seed(&self, records: Vec<PhotoRecord>) {
            self.saved.lock().unwrap().push(records);
        }

        fn save_count(&self) -> usize {
            self.saved.lock().unwrap().len()
        }

        fn last_saved(&self) -> Vec<PhotoRecord> {
            self.saved
                .lock()
                .unwrap()
                .last()
                .cloned()
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl RecordStore for FakeStore {
        async fn load(&self) -> Result<Vec<PhotoRecord>, StoreError> {
            if self.fail_load.load(Ordering::SeqCst) {
                return Err(StoreError::Query("injected load failure".into()));
            }
            Ok(self.last_saved())
        }

        async fn save(&self, records: &[PhotoRecord]) -> Result<(), StoreError> {
            if self.fail_save.load(Ordering::SeqCst) {
                return Err(StoreError::Query("injected save failure".into()));
            }
            self.saved.lock().unwrap().push(records.to_vec());
            Ok(())
        }
    }

    /// Library fake that mints sequential asset ids and records calls.
    #[derive(Default)]
    struct FakeLibrary {
        created: AtomicUsize,
        deleted: Mutex<Vec<String>>,
        album_adds: Mutex<Vec<String>>,
        deny_permission: AtomicBool,
        fail_create: AtomicBool,
        fail_album: AtomicBool,
        fail_delete: AtomicBool,
    }

    #[async_trait]
    impl AssetLibrary for FakeLibrary {
        async fn create_asset(&self, _source_uri: &str) -> Result<NewAsset, LibraryError> {
            if self.deny_permission.load(Ordering::SeqCst) {
                return Err(LibraryError::PermissionDenied(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "denied",
                )));
            }
            if self.fail_create.load(Ordering::SeqCst) {
                return Err(LibraryError::Creation(std::io::Error::other("disk full")));
            }
            let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(NewAsset {
                asset_id: format!("asset-{}", n),
                uri: format!("file:///media/asset-{}.jpg", n),
            })
        }

        async fn ensure_album(&self, name: &str) -> Result<AlbumHandle, LibraryError> {
            if self.fail_album.load(Ordering::SeqCst) {
                return Err(LibraryError::Album(std::io::Error::other("no albums")));
            }
            Ok(AlbumHandle {
                id: format!("album-{}", name),
                name: name.to_string(),
            })
        }

        async fn add_to_album(
            &self,
            asset_id: &str,
            _album: &AlbumHandle,
        ) -> Result<(), LibraryError> {
            if self.fail_album.load(Ordering::SeqCst) {
                return Err(LibraryError::Album(std::io::Error::other("no albums")));
            }
            self.album_adds.lock().unwrap().push(asset_id.to_string());
            Ok(())
        }

        async fn delete_asset(&self, asset_id: &str) -> Result<(), LibraryError> {
            if self.fail_delete.load(Ordering::SeqCst) {
                return Err(LibraryError::Deletion {
                    asset_id: asset_id.to_string(),
                    source: std::io::Error::other("already gone"),
                });
            }
            self.deleted.lock().unwrap().push(asset_id.to_string());
            Ok(())
        }
    }

    /// Share fake recording every invocation.
    struct FakeShare {
        available: AtomicBool,
        shared: Mutex<Vec<(String, String)>>,
        fail: AtomicBool,
    }

    impl Default for FakeShare {
        fn default() -> Self {
            Self {
                available: AtomicBool::new(true),
                shared: Mutex::new(Vec::new()),
                fail: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl ShareSurface for FakeShare {
        async fn is_available(&self) -> bool {
            self.available.load(Ordering::SeqCst)
        }

        async fn share(&self, uri: &str, mime: &str) -> Result<(), ShareError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(ShareError::Failed { status: 1 });
            }
            self.shared
                .lock()
                .unwrap()
                .push((uri.to_string(), mime.to_string()));
            Ok(())
        }
    }

    struct Harness {
        store: Arc<FakeStore>,
        library: Arc<FakeLibrary>,
        share: Arc<FakeShare>,
        journal: PhotoJournal,
    }

    fn harness() -> Harness {
        let store = Arc::new(FakeStore::default());
        let library = Arc::new(FakeLibrary::default());
        let share = Arc::new(FakeShare::default());
        let journal = PhotoJournal::new(
            store.clone(),
            library.clone(),
            share.clone(),
            "Camera Notes".to_string(),
        );
        Harness {
            store,
            library,
            share,
            journal,
        }
    }

    async fn ready_harness() -> Harness {
        let mut h = harness();
        h.journal.load().await.unwrap();
        h
    }

    #[tokio::test]
    async fn test_mutations_rejected_before_load() {
        let mut h = harness();
        assert_eq!(h.journal.state(), JournalState::Uninitialized);

        let err = h.journal.add("file:///tmp/a.jpg", "hi").await.unwrap_err();
        assert!(matches!(err, JournalError::NotReady { .. }));

        let err = h.journal.update_caption("x", "hi").await.unwrap_err();
        assert!(matches!(err, JournalError::NotReady { .. }));

        let err = h.journal.delete("x").await.unwrap_err();
        assert!(matches!(err, JournalError::NotReady { .. }));

        assert!(h.journal.records().is_empty());
        assert_eq!(h.store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_load_failure_parks_journal_in_failed() {
        let mut h = harness();
        h.store.fail_load.store(true, Ordering::SeqCst);

        let err = h.journal.load().await.unwrap_err();
        assert!(matches!(err, JournalError::Load(_)));
        assert_eq!(h.journal.state(), JournalState::Failed);

        let err = h.journal.add("file:///tmp/a.jpg", "hi").await.unwrap_err();
        assert!(matches!(
            err,
            JournalError::NotReady {
                state: JournalState::Failed
            }
        ));
    }

    #[tokio::test]
    async fn test_load_populates_collection() {
        let h = harness();
        let stored = vec![
            PhotoRecord::new("a2".into(), "file:///media/a2.jpg".into(), "newer".into()),
            PhotoRecord::new("a1".into(), "file:///media/a1.jpg".into(), "older".into()),
        ];
        h.store.seed(stored.clone());

        let mut journal = h.journal;
        journal.load().await.unwrap();
        assert_eq!(journal.state(), JournalState::Ready);
        assert_eq!(journal.records(), stored.as_slice());
    }

    #[tokio::test]
    async fn test_add_prepends_and_persists_once_per_commit() {
        let mut h = ready_harness().await;

        let first = h.journal.add("file:///tmp/1.jpg", "first").await.unwrap();
        let second = h.journal.add("file:///tmp/2.jpg", "second").await.unwrap();
        assert!(first.warnings.is_empty());
        assert!(second.warnings.is_empty());

        let records = h.journal.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].caption, "second");
        assert_eq!(records[1].caption, "first");
        assert_ne!(records[0].id, records[1].id);
        assert!(!records[0].asset_id.is_empty());
        assert!(!records[0].uri.is_empty());

        assert_eq!(h.store.save_count(), 2);
        assert_eq!(h.store.last_saved(), records.to_vec());
    }

    #[tokio::test]
    async fn test_add_trims_caption() {
        let mut h = ready_harness().await;
        let outcome = h.journal.add("file:///tmp/1.jpg", "  trip  ").await.unwrap();
        assert_eq!(outcome.record.caption, "trip");
    }

    #[tokio::test]
    async fn test_add_rejects_blank_caption_before_library_call() {
        let mut h = ready_harness().await;
        let err = h.journal.add("file:///tmp/1.jpg", "   ").await.unwrap_err();
        assert!(matches!(err, JournalError::EmptyCaption));
        assert_eq!(h.library.created.load(Ordering::SeqCst), 0);
        assert!(h.journal.records().is_empty());
        assert_eq!(h.store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_add_permission_denied_leaves_journal_untouched() {
        let mut h = ready_harness().await;
        h.library.deny_permission.store(true, Ordering::SeqCst);

        let err = h.journal.add("file:///tmp/1.jpg", "hi").await.unwrap_err();
        assert!(matches!(err, JournalError::PermissionDenied));
        assert!(h.journal.records().is_empty());
        assert_eq!(h.store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_add_creation_failure_leaves_journal_untouched() {
        let mut h = ready_harness().await;
        h.library.fail_create.store(true, Ordering::SeqCst);

        let err = h.journal.add("file:///tmp/1.jpg", "hi").await.unwrap_err();
        assert!(matches!(err, JournalError::CreationFailed(_)));
        assert!(h.journal.records().is_empty());
        assert_eq!(h.store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_add_album_failure_warns_but_still_adds() {
        let mut h = ready_harness().await;
        h.library.fail_album.store(true, Ordering::SeqCst);

        let outcome = h.journal.add("file:///tmp/1.jpg", "hi").await.unwrap();
        assert!(matches!(
            outcome.warnings.as_slice(),
            [Warning::AlbumPlacement { .. }]
        ));
        assert_eq!(h.journal.records().len(), 1);
        assert_eq!(h.store.save_count(), 1);
    }

    #[tokio::test]
    async fn test_add_persist_failure_warns_but_keeps_memory() {
        let mut h = ready_harness().await;
        h.store.fail_save.store(true, Ordering::SeqCst);

        let outcome = h.journal.add("file:///tmp/1.jpg", "hi").await.unwrap();
        assert!(matches!(
            outcome.warnings.as_slice(),
            [Warning::PersistFailed { .. }]
        ));
        assert_eq!(h.journal.records().len(), 1);
    }

    #[tokio::test]
    async fn test_update_caption_replaces_caption_only() {
        let mut h = ready_harness().await;
        let added = h.journal.add("file:///tmp/1.jpg", "before").await.unwrap();
        let saves_before = h.store.save_count();

        let outcome = h
            .journal
            .update_caption(&added.record.id, "  after  ")
            .await
            .unwrap();
        let updated = outcome.record.unwrap();
        assert_eq!(updated.caption, "after");
        assert_eq!(updated.id, added.record.id);
        assert_eq!(updated.asset_id, added.record.asset_id);
        assert_eq!(updated.uri, added.record.uri);
        assert_eq!(updated.created_at, added.record.created_at);

        assert_eq!(h.store.save_count(), saves_before + 1);
        assert_eq!(h.store.last_saved()[0].caption, "after");
    }

    #[tokio::test]
    async fn test_update_caption_unknown_id_is_noop() {
        let mut h = ready_harness().await;
        h.journal.add("file:///tmp/1.jpg", "hi").await.unwrap();
        let saves_before = h.store.save_count();

        let outcome = h.journal.update_caption("missing", "new").await.unwrap();
        assert!(outcome.record.is_none());
        assert!(outcome.warnings.is_empty());
        assert_eq!(h.store.save_count(), saves_before);
        assert_eq!(h.journal.records()[0].caption, "hi");
    }

    #[tokio::test]
    async fn test_update_caption_validates_before_lookup() {
        let mut h = ready_harness().await;
        let err = h.journal.update_caption("missing", "   ").await.unwrap_err();
        assert!(matches!(err, JournalError::EmptyCaption));
        assert_eq!(h.store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_removes_record_and_asset() {
        let mut h = ready_harness().await;
        let added = h.journal.add("file:///tmp/1.jpg", "hi").await.unwrap();

        let outcome = h.journal.delete(&added.record.id).await.unwrap();
        assert_eq!(outcome.record.unwrap().id, added.record.id);
        assert!(outcome.warnings.is_empty());
        assert_eq!(
            h.library.deleted.lock().unwrap().as_slice(),
            [added.record.asset_id]
        );
        assert!(h.journal.records().is_empty());
        assert!(h.store.last_saved().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let mut h = ready_harness().await;
        h.journal.add("file:///tmp/1.jpg", "hi").await.unwrap();
        let saves_before = h.store.save_count();

        let outcome = h.journal.delete("missing").await.unwrap();
        assert!(outcome.record.is_none());
        assert_eq!(h.journal.records().len(), 1);
        assert_eq!(h.store.save_count(), saves_before);
    }

    #[tokio::test]
    async fn test_delete_removes_record_even_when_asset_deletion_fails() {
        let mut h = ready_harness().await;
        let added = h.journal.add("file:///tmp/1.jpg", "hi").await.unwrap();
        h.library.fail_delete.store(true, Ordering::SeqCst);

        let outcome = h.journal.delete(&added.record.id).await.unwrap();
        assert!(outcome.record.is_some());
        assert!(matches!(
            outcome.warnings.as_slice(),
            [Warning::AssetDeletion { asset_id, .. }] if *asset_id == added.record.asset_id
        ));
        assert!(h.journal.records().is_empty());
        assert!(h.store.last_saved().is_empty());
    }

    #[tokio::test]
    async fn test_share_unavailable_never_invokes_surface() {
        let h = ready_harness().await;
        h.share.available.store(false, Ordering::SeqCst);

        let err = h.journal.share("file:///media/a.jpg").await.unwrap_err();
        assert!(matches!(err, JournalError::ShareUnavailable));
        assert!(h.share.shared.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_share_passes_locator_and_mime() {
        let h = ready_harness().await;
        h.journal.share("file:///media/a.jpg").await.unwrap();
        assert_eq!(
            h.share.shared.lock().unwrap().as_slice(),
            [("file:///media/a.jpg".to_string(), "image/jpeg".to_string())]
        );
    }

    #[tokio::test]
    async fn test_share_failure_propagates() {
        let h = ready_harness().await;
        h.share.fail.store(true, Ordering::SeqCst);

        let err = h.journal.share("file:///media/a.jpg").await.unwrap_err();
        assert!(matches!(err, JournalError::Share(_)));
    }

    #[tokio::test]
    async fn test_full_lifecycle_ends_empty() {
        let mut h = ready_harness().await;

        let a = h.journal.add("file:///tmp/a.jpg", "first").await.unwrap();
        let b = h.journal.add("file:///tmp/b.jpg", "second").await.unwrap();
        h.journal
            .update_caption(&b.record.id, "second, edited")
            .await
            .unwrap();
        h.journal.delete(&a.record.id).await.unwrap();
        h.journal.delete(&b.record.id).await.unwrap();

        assert!(h.journal.records().is_empty());
        assert!(h.store.last_saved().is_empty());
        assert_eq!(h.library.deleted.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_reload_converges_with_memory() {
        let mut h = ready_harness().await;
        h.journal.add("file:///tmp/a.jpg", "first").await.unwrap();
        h.journal.add("file:///tmp/b.jpg", "second").await.unwrap();
        let snapshot = h.journal.records().to_vec();

        let mut reloaded = PhotoJournal::new(
            h.store.clone(),
            h.library.clone(),
            h.share.clone(),
            "Camera Notes".to_string(),
        );
        reloaded.load().await.unwrap();
        assert_eq!(reloaded.records(), snapshot.as_slice());
    }
}
