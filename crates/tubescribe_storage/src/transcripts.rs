//! In-memory transcript store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tubescribe_core::{RecordId, TranscriptEntry, TranscriptKey, TranscriptRecord};
use tubescribe_error::TubescribeResult;
use tubescribe_interface::TranscriptStore;

/// Transcript store keeping every inserted record in memory.
///
/// Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTranscriptStore {
    records: Arc<RwLock<HashMap<TranscriptKey, Vec<TranscriptRecord>>>>,
}

impl InMemoryTranscriptStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records stored under `key`, duplicates included.
    pub async fn count(&self, key: &TranscriptKey) -> usize {
        self.records.read().await.get(key).map_or(0, Vec::len)
    }

    /// Total number of records.
    pub async fn len(&self) -> usize {
        self.records.read().await.values().map(Vec::len).sum()
    }

    /// Returns true if nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TranscriptStore for InMemoryTranscriptStore {
    #[tracing::instrument(skip(self, key), fields(key = %key))]
    async fn find(&self, key: &TranscriptKey) -> TubescribeResult<Option<TranscriptRecord>> {
        let records = self.records.read().await;
        let found = records.get(key).and_then(|list| list.first()).cloned();
        tracing::trace!(hit = found.is_some(), "Transcript lookup");
        Ok(found)
    }

    #[tracing::instrument(skip(self, key, entries), fields(key = %key, segments = entries.len()))]
    async fn insert(
        &self,
        key: &TranscriptKey,
        entries: &[TranscriptEntry],
    ) -> TubescribeResult<RecordId> {
        let record = TranscriptRecord::new(key, entries.to_vec());
        let id = *record.id();

        let mut records = self.records.write().await;
        let list = records.entry(key.clone()).or_default();
        if !list.is_empty() {
            tracing::debug!(existing = list.len(), "Storing duplicate transcript record");
        }
        list.push(record);

        Ok(id)
    }
}
