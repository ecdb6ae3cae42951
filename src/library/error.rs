use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Photo library access denied: {0}")]
    PermissionDenied(#[source] io::Error),

    #[error("Failed to store asset: {0}")]
    Creation(#[source] io::Error),

    #[error("Album operation failed: {0}")]
    Album(#[source] io::Error),

    #[error("Failed to delete asset {asset_id}: {source}")]
    Deletion {
        asset_id: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid asset id: {0}")]
    InvalidAssetId(String),
}
