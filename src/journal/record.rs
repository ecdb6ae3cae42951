//! The photo record and its stored JSON shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single journal entry: one captured photo plus its caption.
///
/// The serialized field names (`assetId`, `timestamp`) are the on-disk wire
/// format. Existing journals were written with them, so they must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    /// Locally generated UUID, unique within the journal.
    pub id: String,
    /// Identifier assigned by the asset library. Required to delete the
    /// asset later.
    pub asset_id: String,
    /// Long-lived locator for the asset bytes (not the capture temp path).
    pub uri: String,
    /// User caption. Non-empty after trimming.
    pub caption: String,
    /// Capture time. Fixed at creation and never mutated.
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl PhotoRecord {
    /// Create a record for a newly stored asset with a fresh id and timestamp.
    pub fn new(asset_id: String, uri: String, caption: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            asset_id,
            uri,
            caption,
            created_at: Utc::now(),
        }
    }
}
