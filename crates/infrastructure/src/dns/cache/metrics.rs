use std::sync::atomic::{AtomicU64, Ordering};
use tierdns_application::ports::CacheMetricsSnapshot;

/// Counters for the cache engine. All updates are relaxed atomics.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    pub fresh_hits: AtomicU64,
    pub stale_hits: AtomicU64,
    pub negative_hits: AtomicU64,
    pub misses: AtomicU64,
    /// Shared tier hits copied into the fast tier
    pub promotions: AtomicU64,
    pub insertions: AtomicU64,
    /// Answers with TTL 0 (or no TTL) that were returned but not stored
    pub skipped_zero_ttl: AtomicU64,
    pub upstream_queries: AtomicU64,
    pub upstream_failures: AtomicU64,
    /// Resolver failures answered with a stale fallback
    pub stale_fallbacks: AtomicU64,
    pub tier_read_errors: AtomicU64,
    pub tier_write_errors: AtomicU64,
    pub decode_errors: AtomicU64,
    pub shared_evictions: AtomicU64,
    pub repopulations_started: AtomicU64,
    pub repopulations_deduplicated: AtomicU64,
    pub repopulation_failures: AtomicU64,
}

impl CacheMetrics {
    #[inline]
    pub fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Percentage of lookups served from cache (fresh or stale).
    pub fn hit_rate(&self) -> f64 {
        let hits = self.fresh_hits.load(Ordering::Relaxed) + self.stale_hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn snapshot(&self, fast_tier_entries: Option<usize>) -> CacheMetricsSnapshot {
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);

        CacheMetricsSnapshot {
            fast_tier_entries,
            fresh_hits: load(&self.fresh_hits),
            stale_hits: load(&self.stale_hits),
            negative_hits: load(&self.negative_hits),
            misses: load(&self.misses),
            promotions: load(&self.promotions),
            insertions: load(&self.insertions),
            skipped_zero_ttl: load(&self.skipped_zero_ttl),
            upstream_queries: load(&self.upstream_queries),
            upstream_failures: load(&self.upstream_failures),
            stale_fallbacks: load(&self.stale_fallbacks),
            tier_read_errors: load(&self.tier_read_errors),
            tier_write_errors: load(&self.tier_write_errors),
            decode_errors: load(&self.decode_errors),
            shared_evictions: load(&self.shared_evictions),
            repopulations_started: load(&self.repopulations_started),
            repopulations_deduplicated: load(&self.repopulations_deduplicated),
            repopulation_failures: load(&self.repopulation_failures),
            hit_rate: self.hit_rate(),
        }
    }
}
