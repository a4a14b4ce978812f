use std::sync::Arc;
use tierdns_application::ports::{CacheStatsPort, Clock, DnsResolver};
use tierdns_application::use_cases::GetCacheStatsUseCase;
use tierdns_domain::Config;
use tierdns_infrastructure::dns::{
    CacheMaintenance, CacheOptions, CachedResolver, CachedResolverBuilder, LruFastTier,
    MemorySharedTier, SystemClock, UdpUpstreamResolver,
};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Everything the binary needs, wired from one `Config`.
pub struct CacheServices {
    pub resolver: Arc<CachedResolver>,
    pub stats: GetCacheStatsUseCase,
    shutdown: CancellationToken,
    maintenance: Option<JoinHandle<()>>,
}

impl CacheServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let upstream: Arc<dyn DnsResolver> =
            Arc::new(UdpUpstreamResolver::from_config(&config.upstream)?);

        let mut builder = CachedResolverBuilder::new(upstream)
            .with_options(CacheOptions::from_config(&config.cache))
            .with_clock(Arc::clone(&clock));

        if config.cache.has_fast_tier() {
            let fast = LruFastTier::new(config.cache.fast_tier_capacity, Arc::clone(&clock))?;
            builder = builder.with_fast_tier(Arc::new(fast));
        }

        let shutdown = CancellationToken::new();
        let mut maintenance = None;

        if config.cache.has_shared_tier() {
            let shared = Arc::new(MemorySharedTier::new(
                config.cache.shared_tier_capacity,
                Arc::clone(&clock),
            )?);
            builder = builder.with_shared_tier(shared.clone());

            maintenance = Some(
                CacheMaintenance::new(shared, config.cache.maintenance_interval)
                    .start(shutdown.clone()),
            );
        }

        let resolver = Arc::new(builder.build()?);
        let stats = GetCacheStatsUseCase::new(resolver.clone() as Arc<dyn CacheStatsPort>);

        info!("Cache services ready");

        Ok(Self {
            resolver,
            stats,
            shutdown,
            maintenance,
        })
    }

    /// Stop background work and wait for in-flight refreshes to drain.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        if let Some(handle) = self.maintenance {
            let _ = handle.await;
        }

        for _ in 0..50 {
            if self.resolver.scheduler().in_flight_count() == 0 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
    }
}
