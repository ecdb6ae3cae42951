//! Asset library adapters.

pub mod error;
pub mod fs;
pub mod paths;

pub use error::LibraryError;
pub use fs::{AlbumHandle, AssetLibrary, FsAssetLibrary, NewAsset};
