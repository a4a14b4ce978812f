#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tierdns_application::ports::{CacheMetricsSnapshot, CacheStatsPort};

// ============================================================================
// Mock CacheStatsPort
// ============================================================================

pub struct MockCacheStats {
    snapshot: Mutex<CacheMetricsSnapshot>,
    call_count: AtomicU64,
}

impl MockCacheStats {
    pub fn new() -> Self {
        Self::with_snapshot(CacheMetricsSnapshot::default())
    }

    pub fn with_snapshot(snapshot: CacheMetricsSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
            call_count: AtomicU64::new(0),
        }
    }

    pub fn set_snapshot(&self, snapshot: CacheMetricsSnapshot) {
        *self.snapshot.lock().unwrap() = snapshot;
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl CacheStatsPort for MockCacheStats {
    fn cache_metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.snapshot.lock().unwrap().clone()
    }
}
