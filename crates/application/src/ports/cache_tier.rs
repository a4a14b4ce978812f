use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tierdns_domain::{CacheEntry, CacheKey, DomainError};

/// Value read from a tier. `is_stale` is the tier's own opinion (its
/// expiry passed but the value was not evicted yet); the cache engine
/// classifies freshness from the entry itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierHit<T> {
    pub value: T,
    pub is_stale: bool,
}

impl<T> TierHit<T> {
    pub fn fresh(value: T) -> Self {
        Self {
            value,
            is_stale: false,
        }
    }

    pub fn stale(value: T) -> Self {
        Self {
            value,
            is_stale: true,
        }
    }
}

/// Outcome of a successful shared tier write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TierWrite {
    /// Another key was dropped to make room
    pub evicted: bool,
}

/// Per-process, capacity-bounded tier. Access never blocks on I/O.
///
/// Replacing an entry swaps the whole `Arc`, so readers see either the
/// old or the new entry.
pub trait FastTier: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<TierHit<Arc<CacheEntry>>>;

    fn set(&self, key: CacheKey, entry: Arc<CacheEntry>, ttl: Duration);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tier shared by cooperating processes. Values are opaque serialized
/// bytes and the tier applies its own expiry.
#[async_trait]
pub trait SharedTier: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<TierHit<Bytes>>, DomainError>;

    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> Result<TierWrite, DomainError>;

    /// Read that ignores values past the tier's own expiry
    async fn get_fresh_only(&self, key: &str) -> Result<Option<Bytes>, DomainError> {
        Ok(self
            .get(key)
            .await?
            .filter(|hit| !hit.is_stale)
            .map(|hit| hit.value))
    }
}
