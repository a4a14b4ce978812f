use super::metrics::CacheMetrics;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::future::Future;
use std::sync::Arc;
use tierdns_domain::CacheKey;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

type InFlightSet = DashMap<CacheKey, (), FxBuildHasher>;

/// Claim on one key's background refresh. Dropping it releases the key,
/// whether the refresh finished, failed, panicked or was cancelled.
pub struct RefreshClaim {
    in_flight: Arc<InFlightSet>,
    key: CacheKey,
}

impl RefreshClaim {
    pub fn key(&self) -> &CacheKey {
        &self.key
    }
}

impl Drop for RefreshClaim {
    fn drop(&mut self) {
        self.in_flight.remove(&self.key);
    }
}

/// Runs at most one background refresh per key.
pub struct RepopulationScheduler {
    in_flight: Arc<InFlightSet>,
    metrics: Arc<CacheMetrics>,
}

impl RepopulationScheduler {
    pub fn new(metrics: Arc<CacheMetrics>) -> Self {
        Self {
            in_flight: Arc::new(DashMap::with_hasher(FxBuildHasher)),
            metrics,
        }
    }

    /// Atomically mark `key` in flight. `None` when someone else holds it.
    pub fn try_claim(&self, key: &CacheKey) -> Option<RefreshClaim> {
        match self.in_flight.entry(key.clone()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(());
                Some(RefreshClaim {
                    in_flight: Arc::clone(&self.in_flight),
                    key: key.clone(),
                })
            }
        }
    }

    /// Spawn `refresh` for `key` unless a refresh for it is already running.
    /// Never waits for the refresh.
    pub fn trigger<F>(&self, key: &CacheKey, refresh: F) -> Option<JoinHandle<()>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Some(claim) = self.try_claim(key) else {
            CacheMetrics::incr(&self.metrics.repopulations_deduplicated);
            debug!(key = %key, "Repopulation already in flight");
            return None;
        };

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(key = %key, error = %e, "No async runtime, skipping repopulation");
                return None;
            }
        };

        CacheMetrics::incr(&self.metrics.repopulations_started);
        debug!(key = %key, "Repopulation scheduled");

        Some(handle.spawn(async move {
            let _claim = claim;
            refresh.await;
        }))
    }

    pub fn is_in_flight(&self, key: &CacheKey) -> bool {
        self.in_flight.contains_key(key)
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }
}
