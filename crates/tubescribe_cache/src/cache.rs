//! Cache-aside lookup and write-back over a transcript store.

use crate::{CacheConfig, InFlightGuard, InFlightRegistry};
use std::sync::Arc;
use tracing::{debug, instrument};
use tubescribe_core::{RecordId, TranscriptEntry, TranscriptKey, TranscriptRecord};
use tubescribe_error::TubescribeResult;
use tubescribe_interface::TranscriptStore;

/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// A transcript is stored under the key
    Hit(TranscriptRecord),
    /// Nothing stored under the key
    Miss,
}

impl CacheLookup {
    /// True on a hit.
    pub fn is_hit(&self) -> bool {
        matches!(self, CacheLookup::Hit(_))
    }
}

/// Transcript cache backed by the persistent store.
///
/// Store errors are propagated, never treated as a miss: a miss triggers a
/// paid fetch, so an unreachable store must not look empty.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tubescribe_cache::{CacheConfig, CacheLookup, TranscriptCache};
/// use tubescribe_core::{TranscriptEntry, TranscriptKey};
/// use tubescribe_storage::InMemoryTranscriptStore;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let cache = TranscriptCache::new(Arc::new(InMemoryTranscriptStore::new()), &CacheConfig::default());
/// let key = TranscriptKey::new("abc".into(), "u1".into());
///
/// assert_eq!(cache.lookup(&key).await?, CacheLookup::Miss);
/// cache.store(&key, &[TranscriptEntry::new("hello", "0:00")]).await?;
/// assert!(cache.lookup(&key).await?.is_hit());
/// # Ok(())
/// # }
/// ```
pub struct TranscriptCache {
    store: Arc<dyn TranscriptStore>,
    in_flight: Option<InFlightRegistry>,
}

impl TranscriptCache {
    /// Creates a cache over `store`.
    pub fn new(store: Arc<dyn TranscriptStore>, config: &CacheConfig) -> Self {
        debug!(single_flight = config.single_flight(), "Creating TranscriptCache");
        Self {
            store,
            in_flight: config.single_flight().then(InFlightRegistry::new),
        }
    }

    /// Looks up the transcript stored under `key`.
    #[instrument(skip(self, key), fields(key = %key))]
    pub async fn lookup(&self, key: &TranscriptKey) -> TubescribeResult<CacheLookup> {
        match self.store.find(key).await? {
            Some(record) => {
                debug!(record = %record.id(), entries = record.entries().len(), "Cache hit");
                Ok(CacheLookup::Hit(record))
            }
            None => {
                debug!("Cache miss");
                Ok(CacheLookup::Miss)
            }
        }
    }

    /// Writes `entries` under `key`.
    ///
    /// Does not check for an existing record.
    #[instrument(skip(self, key, entries), fields(key = %key, entries = entries.len()))]
    pub async fn store(
        &self,
        key: &TranscriptKey,
        entries: &[TranscriptEntry],
    ) -> TubescribeResult<RecordId> {
        let id = self.store.insert(key, entries).await?;
        debug!(record = %id, "Stored transcript");
        Ok(id)
    }

    /// Claims the miss path for `key`, waiting for any current holder.
    ///
    /// Returns `None` when single-flight is disabled. Callers must repeat
    /// [`lookup`](Self::lookup) after the claim is granted.
    pub async fn claim(&self, key: &TranscriptKey) -> Option<InFlightGuard> {
        match &self.in_flight {
            Some(registry) => Some(registry.acquire(key).await),
            None => None,
        }
    }

    /// True when concurrent misses are serialized.
    pub fn single_flight(&self) -> bool {
        self.in_flight.is_some()
    }
}

impl std::fmt::Debug for TranscriptCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptCache")
            .field("single_flight", &self.single_flight())
            .finish_non_exhaustive()
    }
}
