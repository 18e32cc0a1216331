//! In-memory image record store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tubescribe_core::{Identity, ImageRecord, RecordId, ResourceId};
use tubescribe_error::TubescribeResult;
use tubescribe_interface::ImageStore;

type ImageIndex = HashMap<(Identity, ResourceId), Vec<ImageRecord>>;

/// Image store indexed by `(owner_id, resource_id)`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryImageStore {
    records: Arc<RwLock<ImageIndex>>,
}

impl InMemoryImageStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    #[tracing::instrument(skip(self, record), fields(owner_id = %record.owner_id(), resource_id = %record.resource_id()))]
    async fn insert(&self, record: ImageRecord) -> TubescribeResult<RecordId> {
        let id = *record.id();
        let key = (record.owner_id().clone(), record.resource_id().clone());
        self.records.write().await.entry(key).or_default().push(record);
        Ok(id)
    }

    async fn list(
        &self,
        owner_id: &Identity,
        resource_id: &ResourceId,
    ) -> TubescribeResult<Vec<ImageRecord>> {
        let key = (owner_id.clone(), resource_id.clone());
        Ok(self
            .records
            .read()
            .await
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }
}
