use super::codec::EntryCodec;
use super::metrics::CacheMetrics;
use std::sync::Arc;
use tierdns_application::ports::{FastTier, SharedTier};
use tierdns_domain::{
    CacheEntry, CacheKey, DnsAnswer, DomainError, Freshness, StalenessWindow, TtlNormalizer,
};
use tracing::{debug, warn};

/// Where an answer handed to a caller came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    Upstream,
    FastTier,
    SharedTier,
}

impl AnswerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerSource::Upstream => "upstream",
            AnswerSource::FastTier => "fast",
            AnswerSource::SharedTier => "shared",
        }
    }
}

/// Answer as seen by a caller: records already normalised, plus provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedAnswer {
    pub answer: DnsAnswer,
    pub source: AnswerSource,
    pub stale: bool,
}

impl CachedAnswer {
    pub fn upstream(answer: DnsAnswer) -> Self {
        Self {
            answer,
            source: AnswerSource::Upstream,
            stale: false,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.answer.is_negative()
    }
}

/// Result of walking the tiers.
///
/// A fresh shared hit keeps any stale fast-tier candidate alongside it, so
/// a caller that cannot serve the fresh answer still has a fallback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupOutcome {
    pub fresh: Option<CachedAnswer>,
    pub stale: Option<CachedAnswer>,
}

impl LookupOutcome {
    fn fresh(answer: CachedAnswer) -> Self {
        Self {
            fresh: Some(answer),
            stale: None,
        }
    }

    fn stale(candidate: Option<CachedAnswer>) -> Self {
        Self {
            fresh: None,
            stale: candidate,
        }
    }

    pub fn is_miss(&self) -> bool {
        self.fresh.is_none() && self.stale.is_none()
    }
}

/// Reads and writes the fast and shared tiers as one cache.
pub struct TieredLookup {
    fast: Option<Arc<dyn FastTier>>,
    shared: Option<Arc<dyn SharedTier>>,
    window: StalenessWindow,
    normalizer: TtlNormalizer,
    metrics: Arc<CacheMetrics>,
}

impl TieredLookup {
    pub fn new(
        fast: Option<Arc<dyn FastTier>>,
        shared: Option<Arc<dyn SharedTier>>,
        window: StalenessWindow,
        normalizer: TtlNormalizer,
        metrics: Arc<CacheMetrics>,
    ) -> Result<Self, DomainError> {
        if fast.is_none() && shared.is_none() {
            return Err(DomainError::ConfigurationError(
                "at least one cache tier (fast or shared) must be configured".into(),
            ));
        }

        Ok(Self {
            fast,
            shared,
            window,
            normalizer,
            metrics,
        })
    }

    pub fn window(&self) -> StalenessWindow {
        self.window
    }

    pub fn fast_tier_len(&self) -> Option<usize> {
        self.fast.as_ref().map(|fast| fast.len())
    }

    pub async fn lookup(&self, key: &CacheKey, now_ms: u64) -> LookupOutcome {
        let mut candidate = None;

        if let Some(fast) = &self.fast {
            if let Some(hit) = fast.get(key) {
                match self.window.classify(&hit.value, now_ms) {
                    Freshness::Fresh => {
                        debug!(key = %key, tier = "fast", "Cache HIT");
                        return LookupOutcome::fresh(self.view(
                            &hit.value,
                            now_ms,
                            AnswerSource::FastTier,
                            false,
                        ));
                    }
                    Freshness::Stale => {
                        debug!(key = %key, tier = "fast", "Stale candidate, checking shared tier");
                        candidate = Some(self.view(&hit.value, now_ms, AnswerSource::FastTier, true));
                    }
                    Freshness::Dead => {
                        debug!(key = %key, tier = "fast", "Entry past staleness window");
                    }
                }
            }
        }

        let Some(shared) = &self.shared else {
            return LookupOutcome::stale(candidate);
        };

        let Some(entry) = self.read_shared(shared.as_ref(), key).await else {
            return LookupOutcome::stale(candidate);
        };

        match self.window.classify(&entry, now_ms) {
            Freshness::Fresh => {
                debug!(key = %key, tier = "shared", "Cache HIT");
                let answer = self.view(&entry, now_ms, AnswerSource::SharedTier, false);
                self.promote(key, entry, now_ms);
                LookupOutcome {
                    fresh: Some(answer),
                    stale: candidate,
                }
            }
            Freshness::Stale if candidate.is_none() => {
                debug!(key = %key, tier = "shared", "Stale candidate");
                LookupOutcome::stale(Some(self.view(
                    &entry,
                    now_ms,
                    AnswerSource::SharedTier,
                    true,
                )))
            }
            Freshness::Stale | Freshness::Dead => LookupOutcome::stale(candidate),
        }
    }

    /// Write `entry` to every configured tier. Tier failures are logged and
    /// counted, never returned.
    pub async fn store(&self, key: &CacheKey, entry: CacheEntry, now_ms: u64) {
        let Some(tier_ttl) = self.window.tier_ttl(&entry, now_ms) else {
            debug!(key = %key, "Entry already past its staleness window, not storing");
            return;
        };

        let entry = Arc::new(entry);

        if let Some(shared) = &self.shared {
            match EntryCodec::encode(&entry) {
                Ok(bytes) => match shared.set(&key.storage_key(), bytes, tier_ttl).await {
                    Ok(write) => {
                        if write.evicted {
                            CacheMetrics::incr(&self.metrics.shared_evictions);
                            warn!(key = %key, "Shared tier full, another entry was evicted");
                        }
                    }
                    Err(e) => {
                        CacheMetrics::incr(&self.metrics.tier_write_errors);
                        warn!(key = %key, error = %e, "Shared tier write failed");
                    }
                },
                Err(e) => {
                    CacheMetrics::incr(&self.metrics.tier_write_errors);
                    warn!(key = %key, error = %e, "Failed to encode cache entry");
                }
            }
        }

        if let Some(fast) = &self.fast {
            fast.set(key.clone(), entry, tier_ttl);
        }

        CacheMetrics::incr(&self.metrics.insertions);
        debug!(key = %key, tier_ttl_ms = tier_ttl.as_millis() as u64, "Cache entry stored");
    }

    async fn read_shared(&self, shared: &dyn SharedTier, key: &CacheKey) -> Option<CacheEntry> {
        let hit = match shared.get(&key.storage_key()).await {
            Ok(hit) => hit?,
            Err(e) => {
                CacheMetrics::incr(&self.metrics.tier_read_errors);
                warn!(key = %key, error = %e, "Shared tier read failed, treating as miss");
                return None;
            }
        };

        match EntryCodec::decode(&hit.value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                CacheMetrics::incr(&self.metrics.decode_errors);
                warn!(key = %key, error = %e, "Undecodable shared tier value, treating as miss");
                None
            }
        }
    }

    fn promote(&self, key: &CacheKey, entry: CacheEntry, now_ms: u64) {
        let Some(fast) = &self.fast else {
            return;
        };
        let Some(tier_ttl) = self.window.tier_ttl(&entry, now_ms) else {
            return;
        };

        fast.set(key.clone(), Arc::new(entry), tier_ttl);
        CacheMetrics::incr(&self.metrics.promotions);
    }

    fn view(
        &self,
        entry: &CacheEntry,
        now_ms: u64,
        source: AnswerSource,
        stale: bool,
    ) -> CachedAnswer {
        CachedAnswer {
            answer: self.normalizer.normalize(entry, now_ms),
            source,
            stale,
        }
    }
}
