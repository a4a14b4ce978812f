use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tierdns_application::ports::{Clock, SharedTier, TierHit, TierWrite};
use tierdns_domain::DomainError;
use tracing::debug;

struct SharedSlot {
    value: Bytes,
    expires_at_ms: u64,
}

/// In-memory shared tier holding serialized entries.
///
/// Every resolver built over the same `Arc<MemorySharedTier>` sees the
/// same store. Expired values stay readable (flagged stale) until
/// `purge_expired` runs or capacity pressure removes them.
pub struct MemorySharedTier {
    store: DashMap<String, SharedSlot, FxBuildHasher>,
    /// Serialises writers so the capacity check, eviction and insert
    /// happen as one step. Reads never take it.
    write_gate: Mutex<()>,
    capacity: usize,
    clock: Arc<dyn Clock>,
}

impl MemorySharedTier {
    pub fn new(capacity: usize, clock: Arc<dyn Clock>) -> Result<Self, DomainError> {
        if capacity == 0 {
            return Err(DomainError::ConfigurationError(
                "shared tier capacity must be greater than zero".into(),
            ));
        }

        Ok(Self {
            store: DashMap::with_hasher(FxBuildHasher),
            write_gate: Mutex::new(()),
            capacity,
            clock,
        })
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every value past its expiry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now_ms = self.clock.now_ms();
        let before = self.store.len();
        self.store.retain(|_, slot| slot.expires_at_ms > now_ms);
        before.saturating_sub(self.store.len())
    }

    /// Expired slots go first, then the one closest to expiry.
    fn evict_one(&self, now_ms: u64) -> bool {
        let victim = self
            .store
            .iter()
            .min_by_key(|slot| (slot.expires_at_ms > now_ms, slot.expires_at_ms))
            .map(|slot| slot.key().clone());

        match victim {
            Some(key) => {
                debug!(key = %key, "Shared tier full, evicting");
                self.store.remove(&key).is_some()
            }
            None => false,
        }
    }
}

#[async_trait]
impl SharedTier for MemorySharedTier {
    async fn get(&self, key: &str) -> Result<Option<TierHit<Bytes>>, DomainError> {
        let now_ms = self.clock.now_ms();

        Ok(self.store.get(key).map(|slot| {
            let value = slot.value.clone();
            if now_ms >= slot.expires_at_ms {
                TierHit::stale(value)
            } else {
                TierHit::fresh(value)
            }
        }))
    }

    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> Result<TierWrite, DomainError> {
        let now_ms = self.clock.now_ms();
        let expires_at_ms = now_ms.saturating_add(ttl.as_millis() as u64);

        let _gate = self
            .write_gate
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut evicted = false;
        if !self.store.contains_key(key) && self.store.len() >= self.capacity {
            evicted = self.evict_one(now_ms);
        }

        self.store.insert(
            key.to_string(),
            SharedSlot {
                value,
                expires_at_ms,
            },
        );

        Ok(TierWrite { evicted })
    }
}
