//! Durable storage for photo records.

pub mod db;
pub mod error;
pub mod schema;

pub use db::{RecordStore, SqliteRecordStore};
pub use error::StoreError;
