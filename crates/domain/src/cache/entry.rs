use crate::{DnsAnswer, DnsRecord};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A stored answer with the bookkeeping needed to age it.
///
/// `expires_at_ms` is fixed when the entry is built. Readers compare the
/// clock against it; nothing rewrites it in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub answer: DnsAnswer,
    /// Milliseconds since UNIX epoch at write time
    pub stored_at_ms: u64,
    /// Lifetime chosen by the TTL policy, in seconds
    pub base_ttl: u32,
    pub expires_at_ms: u64,
}

impl CacheEntry {
    pub fn new(answer: DnsAnswer, stored_at_ms: u64, base_ttl: u32) -> Self {
        Self {
            answer,
            stored_at_ms,
            base_ttl,
            expires_at_ms: stored_at_ms + u64::from(base_ttl) * 1000,
        }
    }

    pub fn records(&self) -> &[DnsRecord] {
        &self.answer.records
    }

    pub fn is_negative(&self) -> bool {
        self.answer.is_negative()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// `now < expires_at`
    Fresh,
    /// `expires_at <= now < expires_at + max_stale`
    Stale,
    /// Past the staleness window; never served
    Dead,
}

impl Freshness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Freshness::Fresh => "fresh",
            Freshness::Stale => "stale",
            Freshness::Dead => "dead",
        }
    }
}

/// How long past expiry an entry may still be served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StalenessWindow {
    max_stale_ms: u64,
}

impl StalenessWindow {
    pub fn new(max_stale: Duration) -> Self {
        Self {
            max_stale_ms: max_stale.as_millis() as u64,
        }
    }

    pub fn from_secs(max_stale_secs: u64) -> Self {
        Self::new(Duration::from_secs(max_stale_secs))
    }

    pub fn max_stale(&self) -> Duration {
        Duration::from_millis(self.max_stale_ms)
    }

    pub fn classify(&self, entry: &CacheEntry, now_ms: u64) -> Freshness {
        if now_ms < entry.expires_at_ms {
            Freshness::Fresh
        } else if now_ms < self.deadline_ms(entry) {
            Freshness::Stale
        } else {
            Freshness::Dead
        }
    }

    /// Instant after which the entry is dead
    pub fn deadline_ms(&self, entry: &CacheEntry) -> u64 {
        entry.expires_at_ms.saturating_add(self.max_stale_ms)
    }

    /// How long a tier should keep `entry`, measured from `now_ms`.
    /// `None` once the entry is already dead.
    pub fn tier_ttl(&self, entry: &CacheEntry, now_ms: u64) -> Option<Duration> {
        let deadline = self.deadline_ms(entry);
        if now_ms >= deadline {
            return None;
        }
        Some(Duration::from_millis(deadline - now_ms))
    }
}
