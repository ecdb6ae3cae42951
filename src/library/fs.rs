//! Filesystem-backed asset library.
//!
//! Assets are plain files under a media root; albums are directories of
//! hard links next to them. This stands in for a device photo library, so
//! asset ids are the stored filenames and locators are filesystem paths.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::error::LibraryError;
use super::paths::{asset_filename, clean_filename, insert_suffix};

/// A freshly stored asset: its stable id and the locator to reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAsset {
    pub asset_id: String,
    pub uri: String,
}

/// An album an asset can be filed into.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumHandle {
    pub id: String,
    pub name: String,
}

/// A photo asset library where captured photos live.
///
/// Deleting an asset may fail without consequence for the caller's records;
/// callers decide how to surface that.
#[async_trait]
pub trait AssetLibrary: Send + Sync {
    /// Store the photo at `source_uri` as a new library asset.
    async fn create_asset(&self, source_uri: &str) -> Result<NewAsset, LibraryError>;

    /// Find the named album, creating it when missing.
    async fn ensure_album(&self, name: &str) -> Result<AlbumHandle, LibraryError>;

    /// File an existing asset into an album.
    async fn add_to_album(&self, asset_id: &str, album: &AlbumHandle) -> Result<(), LibraryError>;

    /// Remove an asset from the library.
    async fn delete_asset(&self, asset_id: &str) -> Result<(), LibraryError>;
}

#[derive(Debug)]
pub struct FsAssetLibrary {
    root: PathBuf,
}

impl FsAssetLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve an asset id to its path under the media root.
    ///
    /// Ids are bare filenames; anything that could escape the root is
    /// rejected.
    fn asset_path(&self, asset_id: &str) -> Result<PathBuf, LibraryError> {
        if asset_id.is_empty()
            || asset_id == "."
            || asset_id == ".."
            || asset_id.contains('/')
            || asset_id.contains('\\')
        {
            return Err(LibraryError::InvalidAssetId(asset_id.to_string()));
        }
        Ok(self.root.join(asset_id))
    }

    /// Pick a filename that does not collide with an existing asset.
    async fn unique_filename(&self, wanted: &str) -> Result<String, LibraryError> {
        let mut candidate = wanted.to_string();
        let mut attempt = 2u32;
        while fs::try_exists(self.root.join(&candidate)).await.map_err(classify_create)? {
            candidate = insert_suffix(wanted, &attempt.to_string());
            attempt += 1;
        }
        Ok(candidate)
    }

    /// Remove any album links pointing at the asset.
    ///
    /// Best-effort: a leftover link name never fails the deletion.
    async fn remove_album_links(&self, asset_id: &str) {
        let albums = self.root.join("albums");
        let mut entries = match fs::read_dir(&albums).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return,
            Err(e) => {
                tracing::debug!(error = %e, "Could not scan albums");
                return;
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }
            let link = entry.path().join(asset_id);
            match fs::remove_file(&link).await {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::debug!(
                        link = %link.display(),
                        error = %e,
                        "Could not remove album link"
                    );
                }
            }
        }
    }
}

/// Map an io error from asset creation onto the library taxonomy.
fn classify_create(e: io::Error) -> LibraryError {
    if e.kind() == io::ErrorKind::PermissionDenied {
        return LibraryError::PermissionDenied(e);
    }
    LibraryError::Creation(e)
}

#[async_trait]
impl AssetLibrary for FsAssetLibrary {
    async fn create_asset(&self, source_uri: &str) -> Result<NewAsset, LibraryError> {
        let source = source_uri.strip_prefix("file://").unwrap_or(source_uri);
        let source = Path::new(source);

        fs::create_dir_all(&self.root).await.map_err(classify_create)?;

        let wanted = asset_filename(source);
        let filename = self.unique_filename(&wanted).await?;
        let dest = self.root.join(&filename);
        fs::copy(source, &dest).await.map_err(classify_create)?;

        tracing::debug!(asset_id = %filename, "Stored asset");
        Ok(NewAsset {
            asset_id: filename,
            uri: dest.to_string_lossy().into_owned(),
        })
    }

    async fn ensure_album(&self, name: &str) -> Result<AlbumHandle, LibraryError> {
        let display = name.trim();
        let clean = clean_filename(display);
        if clean.is_empty() {
            return Err(LibraryError::Album(io::Error::new(
                io::ErrorKind::InvalidInput,
                "album name is empty",
            )));
        }

        let dir = self.root.join("albums").join(&clean);
        fs::create_dir_all(&dir).await.map_err(LibraryError::Album)?;
        Ok(AlbumHandle {
            id: dir.to_string_lossy().into_owned(),
            name: display.to_string(),
        })
    }

    async fn add_to_album(&self, asset_id: &str, album: &AlbumHandle) -> Result<(), LibraryError> {
        let source = self.asset_path(asset_id)?;
        let link = Path::new(&album.id).join(asset_id);
        match fs::hard_link(&source, &link).await {
            Ok(()) => Ok(()),
            // Re-adding to the same album is fine.
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(LibraryError::Album(e)),
        }
    }

    async fn delete_asset(&self, asset_id: &str) -> Result<(), LibraryError> {
        let path = self.asset_path(asset_id)?;
        fs::remove_file(&path)
            .await
            .map_err(|e| LibraryError::Deletion {
                asset_id: asset_id.to_string(),
                source: e,
            })?;

        self.remove_album_links(asset_id).await;
        tracing::debug!(asset_id = %asset_id, "Deleted asset");
        Ok(())
    }
}
