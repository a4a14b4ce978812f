use crate::ports::{CacheMetricsSnapshot, CacheStatsPort};
use std::sync::Arc;
use tracing::debug;

pub struct CacheStatsReport {
    pub snapshot: CacheMetricsSnapshot,
    /// Lookups answered from cache, fresh or stale
    pub served_from_cache: u64,
    pub hit_rate: String,
}

pub struct GetCacheStatsUseCase {
    stats: Arc<dyn CacheStatsPort>,
}

impl GetCacheStatsUseCase {
    pub fn new(stats: Arc<dyn CacheStatsPort>) -> Self {
        Self { stats }
    }

    pub fn execute(&self) -> CacheStatsReport {
        let snapshot = self.stats.cache_metrics_snapshot();
        let served_from_cache = snapshot.fresh_hits + snapshot.stale_hits;
        let hit_rate = format_rate(snapshot.hit_rate);

        debug!(
            served_from_cache = served_from_cache,
            misses = snapshot.misses,
            hit_rate = %hit_rate,
            "Cache stats collected"
        );

        CacheStatsReport {
            snapshot,
            served_from_cache,
            hit_rate,
        }
    }
}

fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate)
}
