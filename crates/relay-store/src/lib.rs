// ABOUTME: Persistence layer for alexa-relay, holding at most one stream metadata record.
// ABOUTME: Defines the MetadataStore seam with file-backed and in-memory implementations.

pub mod file;
pub mod memory;

use async_trait::async_trait;
use relay_core::StreamMetadataRecord;
use thiserror::Error;

pub use file::{DEFAULT_STORE_PATH, FileStore};
pub use memory::MemoryStore;

/// Errors that can occur while reading or writing the stored record.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single-slot record store. `put` replaces whatever was there; `get`
/// returns the current record or `None` when nothing usable is stored.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    async fn put(&self, record: &StreamMetadataRecord) -> Result<(), StoreError>;

    async fn get(&self) -> Result<Option<StreamMetadataRecord>, StoreError>;

    /// Human-readable location for startup logging.
    fn describe(&self) -> String;
}
