use super::cache::MemorySharedTier;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Periodic purge of expired shared tier values.
///
/// Tier expiry already covers the staleness window, so a purge never
/// removes anything that could still be served.
pub struct CacheMaintenance {
    shared: Arc<MemorySharedTier>,
    interval: Duration,
}

impl CacheMaintenance {
    pub fn new(shared: Arc<MemorySharedTier>, interval_secs: u64) -> Self {
        Self {
            shared,
            interval: Duration::from_secs(interval_secs.max(1)),
        }
    }

    pub fn with_interval(shared: Arc<MemorySharedTier>, interval: Duration) -> Self {
        Self { shared, interval }
    }

    /// Run one purge and return how many values were removed.
    pub fn run_once(&self) -> usize {
        let removed = self.shared.purge_expired();
        if removed > 0 {
            info!(removed = removed, remaining = self.shared.len(), "Expired cache entries purged");
        } else {
            debug!(remaining = self.shared.len(), "Maintenance cycle, nothing expired");
        }
        removed
    }

    /// Spawn the loop. It stops at the next tick after `shutdown` fires.
    pub fn start(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(interval_ms = self.interval.as_millis() as u64, "Cache maintenance started");

            let mut ticker = tokio::time::interval(self.interval);
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        info!("Cache maintenance stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        self.run_once();
                    }
                }
            }
        })
    }
}
