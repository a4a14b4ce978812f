use crate::dns::cache::{CacheMetrics, SystemClock, TieredLookup};
use super::cache_layer::CachedResolver;
use super::config::CacheOptions;
use std::sync::Arc;
use tierdns_application::ports::{Clock, DnsResolver, FastTier, SharedTier};
use tierdns_domain::DomainError;
use tracing::info;

pub struct CachedResolverBuilder {
    inner: Arc<dyn DnsResolver>,
    fast_tier: Option<Arc<dyn FastTier>>,
    shared_tier: Option<Arc<dyn SharedTier>>,
    options: CacheOptions,
    clock: Option<Arc<dyn Clock>>,
    metrics: Option<Arc<CacheMetrics>>,
}

impl CachedResolverBuilder {
    pub fn new(inner: Arc<dyn DnsResolver>) -> Self {
        Self {
            inner,
            fast_tier: None,
            shared_tier: None,
            options: CacheOptions::default(),
            clock: None,
            metrics: None,
        }
    }

    pub fn with_fast_tier(mut self, tier: Arc<dyn FastTier>) -> Self {
        self.fast_tier = Some(tier);
        self
    }

    pub fn with_shared_tier(mut self, tier: Arc<dyn SharedTier>) -> Self {
        self.shared_tier = Some(tier);
        self
    }

    pub fn with_options(mut self, options: CacheOptions) -> Self {
        self.options = options;
        self
    }

    /// Must be the clock the tiers were built with.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<CacheMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Fails when neither tier was given.
    pub fn build(self) -> Result<CachedResolver, DomainError> {
        info!(
            fast_tier = self.fast_tier.is_some(),
            shared_tier = self.shared_tier.is_some(),
            max_stale = self.options.max_stale,
            repopulate = self.options.repopulate,
            negative_ttl = ?self.options.negative_ttl,
            ttl_policy = self.options.ttl_policy.as_str(),
            "Building cached resolver"
        );

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let metrics = self.metrics.unwrap_or_default();

        let lookup = TieredLookup::new(
            self.fast_tier,
            self.shared_tier,
            self.options.staleness_window(),
            self.options.normalizer(),
            Arc::clone(&metrics),
        )?;

        Ok(CachedResolver::new(
            self.inner,
            lookup,
            self.options,
            clock,
            metrics,
        ))
    }
}
