//! Per-key request coalescing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tubescribe_core::TranscriptKey;

/// Exclusive claim on one key, released on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    key: TranscriptKey,
    _slot: OwnedMutexGuard<()>,
}

impl InFlightGuard {
    /// Key this guard holds.
    pub fn key(&self) -> &TranscriptKey {
        &self.key
    }
}

/// Registry of per-key locks for requests currently on the miss path.
///
/// Slots are held weakly: once the last holder or waiter drops its handle
/// the slot is pruned on the next acquisition.
#[derive(Debug, Default)]
pub struct InFlightRegistry {
    slots: Mutex<HashMap<TranscriptKey, Weak<AsyncMutex<()>>>>,
}

impl InFlightRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other caller holds `key`, then claims it.
    pub async fn acquire(&self, key: &TranscriptKey) -> InFlightGuard {
        let slot = self.slot(key);
        let guard = slot.lock_owned().await;
        InFlightGuard {
            key: key.clone(),
            _slot: guard,
        }
    }

    /// Number of keys with a live holder or waiter.
    pub fn active(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.strong_count() > 0).count()
    }

    fn slot(&self, key: &TranscriptKey) -> Arc<AsyncMutex<()>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.retain(|_, slot| slot.strong_count() > 0);

        if let Some(existing) = slots.get(key).and_then(Weak::upgrade) {
            tracing::debug!(key = %key, "Joining in-flight request");
            return existing;
        }

        let slot = Arc::new(AsyncMutex::new(()));
        slots.insert(key.clone(), Arc::downgrade(&slot));
        slot
    }
}
