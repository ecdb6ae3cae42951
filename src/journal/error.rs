//! Error types for the photo journal.

use thiserror::Error;

use crate::share::ShareError;
use crate::store::StoreError;

use super::JournalState;

/// Errors returned by journal operations.
#[derive(Error, Debug)]
pub enum JournalError {
    /// The journal has not been loaded, or loading failed.
    #[error("Journal is not ready (state: {state})")]
    NotReady { state: JournalState },

    /// The caption was empty after trimming.
    #[error("Caption must not be empty")]
    EmptyCaption,

    /// The photo library refused access.
    #[error("Photo library access denied")]
    PermissionDenied,

    /// The photo library could not store the asset.
    #[error("Failed to store photo in library: {0}")]
    CreationFailed(String),

    /// No share surface is available on this host.
    #[error("Sharing is not available on this host")]
    ShareUnavailable,

    /// The share surface failed.
    #[error(transparent)]
    Share(#[from] ShareError),

    /// The record store failed while loading the journal.
    #[error("Failed to load journal: {0}")]
    Load(#[from] StoreError),
}
