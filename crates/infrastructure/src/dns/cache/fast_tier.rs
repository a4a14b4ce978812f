use lru::LruCache;
use rustc_hash::FxBuildHasher;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tierdns_application::ports::{Clock, FastTier, TierHit};
use tierdns_domain::{CacheEntry, CacheKey, DomainError};

struct FastTierSlot {
    entry: Arc<CacheEntry>,
    expires_at_ms: u64,
}

/// Process-local LRU tier.
///
/// Entries past their tier expiry are not dropped on read: they come back
/// flagged stale until LRU pressure pushes them out.
pub struct LruFastTier {
    cache: Mutex<LruCache<CacheKey, FastTierSlot, FxBuildHasher>>,
    clock: Arc<dyn Clock>,
}

impl LruFastTier {
    pub fn new(capacity: usize, clock: Arc<dyn Clock>) -> Result<Self, DomainError> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            DomainError::ConfigurationError("fast tier capacity must be greater than zero".into())
        })?;

        Ok(Self {
            cache: Mutex::new(LruCache::with_hasher(capacity, FxBuildHasher)),
            clock,
        })
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<CacheKey, FastTierSlot, FxBuildHasher>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FastTier for LruFastTier {
    fn get(&self, key: &CacheKey) -> Option<TierHit<Arc<CacheEntry>>> {
        let now_ms = self.clock.now_ms();
        let mut cache = self.lock();
        let slot = cache.get(key)?;

        let entry = Arc::clone(&slot.entry);
        if now_ms >= slot.expires_at_ms {
            Some(TierHit::stale(entry))
        } else {
            Some(TierHit::fresh(entry))
        }
    }

    fn set(&self, key: CacheKey, entry: Arc<CacheEntry>, ttl: Duration) {
        let expires_at_ms = self
            .clock
            .now_ms()
            .saturating_add(ttl.as_millis() as u64);

        self.lock().put(
            key,
            FastTierSlot {
                entry,
                expires_at_ms,
            },
        );
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}
