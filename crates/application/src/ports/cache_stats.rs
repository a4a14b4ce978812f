/// Snapshot of cache counters for reporting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheMetricsSnapshot {
    pub fast_tier_entries: Option<usize>,
    pub fresh_hits: u64,
    pub stale_hits: u64,
    pub negative_hits: u64,
    pub misses: u64,
    pub promotions: u64,
    pub insertions: u64,
    pub skipped_zero_ttl: u64,
    pub upstream_queries: u64,
    pub upstream_failures: u64,
    pub stale_fallbacks: u64,
    pub tier_read_errors: u64,
    pub tier_write_errors: u64,
    pub decode_errors: u64,
    pub shared_evictions: u64,
    pub repopulations_started: u64,
    pub repopulations_deduplicated: u64,
    pub repopulation_failures: u64,
    pub hit_rate: f64,
}

/// Port for reading cache counters.
pub trait CacheStatsPort: Send + Sync {
    fn cache_metrics_snapshot(&self) -> CacheMetricsSnapshot;
}
