use crate::dns::cache::{CacheMetrics, CachedAnswer, RepopulationScheduler, TieredLookup};
use super::config::CacheOptions;
use async_trait::async_trait;
use std::sync::Arc;
use tierdns_application::ports::{CacheMetricsSnapshot, CacheStatsPort, Clock, DnsResolver};
use tierdns_domain::{CacheEntry, CacheKey, DnsAnswer, DnsQuery, DomainError, RecordType};
use tracing::{debug, warn};

/// A resolve that produced no usable answer. `stale` carries the expired
/// entry the cache still held, if any, so the caller can decide to use it.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{error}")]
pub struct ResolveFailure {
    pub error: DomainError,
    pub stale: Option<CachedAnswer>,
}

impl ResolveFailure {
    fn hard(error: DomainError) -> Self {
        Self { error, stale: None }
    }
}

struct CacheCore {
    inner: Arc<dyn DnsResolver>,
    lookup: TieredLookup,
    options: CacheOptions,
    clock: Arc<dyn Clock>,
    metrics: Arc<CacheMetrics>,
}

impl CacheCore {
    /// Negative answers are only served while negative caching is on.
    fn servable(&self, answer: &CachedAnswer) -> bool {
        !answer.is_negative() || self.options.negative_caching()
    }

    /// Resolve upstream, store what may be stored, return what came back.
    async fn fetch_and_store(&self, key: &CacheKey) -> Result<CachedAnswer, DomainError> {
        let query = key.to_query();
        CacheMetrics::incr(&self.metrics.upstream_queries);

        let answer = match self.inner.resolve(&query).await {
            Ok(answer) => answer,
            Err(e) => {
                CacheMetrics::incr(&self.metrics.upstream_failures);
                warn!(key = %key, error = %e, "Upstream resolve failed");
                return Err(e);
            }
        };

        let now_ms = self.clock.now_ms();
        match self.ttl_to_store(&answer) {
            Some(ttl) => {
                let entry = CacheEntry::new(answer.clone(), now_ms, ttl);
                self.lookup.store(key, entry, now_ms).await;
            }
            None => {
                CacheMetrics::incr(&self.metrics.skipped_zero_ttl);
                debug!(
                    key = %key,
                    rcode = %answer.rcode,
                    records = answer.records.len(),
                    "Answer returned without caching"
                );
            }
        }

        Ok(CachedAnswer::upstream(answer))
    }

    /// `None` means the answer must not reach any tier.
    fn ttl_to_store(&self, answer: &DnsAnswer) -> Option<u32> {
        if answer.is_negative() {
            return self.options.negative_ttl.filter(|ttl| *ttl > 0);
        }

        self.options
            .ttl_policy
            .select(&answer.records)
            .filter(|ttl| *ttl > 0)
    }
}

/// Cache in front of an upstream resolver.
///
/// Fresh hits never leave the cache. Stale hits either refresh in the
/// background (`repopulate`) or resolve on the caller's path and fall back
/// to the stale answer when the upstream fails.
pub struct CachedResolver {
    core: Arc<CacheCore>,
    scheduler: RepopulationScheduler,
}

impl CachedResolver {
    pub fn new(
        inner: Arc<dyn DnsResolver>,
        lookup: TieredLookup,
        options: CacheOptions,
        clock: Arc<dyn Clock>,
        metrics: Arc<CacheMetrics>,
    ) -> Self {
        Self {
            scheduler: RepopulationScheduler::new(Arc::clone(&metrics)),
            core: Arc::new(CacheCore {
                inner,
                lookup,
                options,
                clock,
                metrics,
            }),
        }
    }

    pub async fn resolve(&self, query: &DnsQuery) -> Result<CachedAnswer, ResolveFailure> {
        let key = CacheKey::from_query(query);
        let now_ms = self.core.clock.now_ms();
        let outcome = self.core.lookup.lookup(&key, now_ms).await;

        if let Some(fresh) = outcome.fresh {
            if self.core.servable(&fresh) {
                CacheMetrics::incr(&self.core.metrics.fresh_hits);
                if fresh.is_negative() {
                    CacheMetrics::incr(&self.core.metrics.negative_hits);
                }
                return Ok(fresh);
            }
            debug!(key = %key, "Cached negative answer ignored, negative caching is off");
        }

        if let Some(stale) = outcome.stale.filter(|s| self.core.servable(s)) {
            return self.resolve_stale(&key, stale).await;
        }

        CacheMetrics::incr(&self.core.metrics.misses);
        debug!(key = %key, "Cache MISS");

        self.core
            .fetch_and_store(&key)
            .await
            .map_err(ResolveFailure::hard)
    }

    pub async fn resolve_host(
        &self,
        host: &str,
        record_type: Option<RecordType>,
    ) -> Result<CachedAnswer, ResolveFailure> {
        self.resolve(&DnsQuery::with_optional_type(host, record_type))
            .await
    }

    async fn resolve_stale(
        &self,
        key: &CacheKey,
        stale: CachedAnswer,
    ) -> Result<CachedAnswer, ResolveFailure> {
        if self.core.options.repopulate {
            CacheMetrics::incr(&self.core.metrics.stale_hits);
            debug!(key = %key, source = stale.source.as_str(), "Serving stale, refreshing in background");
            self.schedule_repopulation(key);
            return Ok(stale);
        }

        CacheMetrics::incr(&self.core.metrics.misses);
        debug!(key = %key, "Stale entry, resolving upstream");

        match self.core.fetch_and_store(key).await {
            Ok(answer) => Ok(answer),
            Err(error) => {
                CacheMetrics::incr(&self.core.metrics.stale_fallbacks);
                warn!(key = %key, error = %error, "Upstream failed, stale answer available");
                Err(ResolveFailure {
                    error,
                    stale: Some(stale),
                })
            }
        }
    }

    fn schedule_repopulation(&self, key: &CacheKey) {
        let core = Arc::clone(&self.core);
        let refresh_key = key.clone();

        self.scheduler.trigger(key, async move {
            if let Err(e) = core.fetch_and_store(&refresh_key).await {
                CacheMetrics::incr(&core.metrics.repopulation_failures);
                warn!(key = %refresh_key, error = %e, "Repopulation failed, keeping stale entry");
            }
        });
    }

    pub fn scheduler(&self) -> &RepopulationScheduler {
        &self.scheduler
    }

    pub fn options(&self) -> &CacheOptions {
        &self.core.options
    }

    pub fn metrics(&self) -> Arc<CacheMetrics> {
        Arc::clone(&self.core.metrics)
    }
}

#[async_trait]
impl DnsResolver for CachedResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsAnswer, DomainError> {
        CachedResolver::resolve(self, query)
            .await
            .map(|cached| cached.answer)
            .map_err(|failure| failure.error)
    }
}

impl CacheStatsPort for CachedResolver {
    fn cache_metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.core
            .metrics
            .snapshot(self.core.lookup.fast_tier_len())
    }
}
