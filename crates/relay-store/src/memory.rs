// ABOUTME: In-memory MetadataStore for tests and ephemeral deployments.
// ABOUTME: Holds the record behind an async RwLock; nothing survives a restart.

use async_trait::async_trait;
use relay_core::StreamMetadataRecord;
use tokio::sync::RwLock;

use crate::{MetadataStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RwLock<Option<StreamMetadataRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MetadataStore for MemoryStore {
    async fn put(&self, record: &StreamMetadataRecord) -> Result<(), StoreError> {
        *self.slot.write().await = Some(record.clone());
        Ok(())
    }

    async fn get(&self) -> Result<Option<StreamMetadataRecord>, StoreError> {
        Ok(self.slot.read().await.clone())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
