use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tierdns_application::ports::{DnsResolver, SharedTier, TierHit, TierWrite};
use tierdns_domain::{DnsAnswer, DnsQuery, DnsRecord, DomainError, RecordType};
use tierdns_infrastructure::dns::{
    CacheOptions, CachedResolver, CachedResolverBuilder, LruFastTier, ManualClock,
    MemorySharedTier,
};

pub const START_MS: u64 = 1_700_000_000_000;

pub fn a_record(host: &str, ip: &str, ttl: i64) -> DnsRecord {
    DnsRecord::new(host, RecordType::A, ip, ttl)
}

pub fn answer(records: Vec<DnsRecord>) -> DnsAnswer {
    DnsAnswer::new(records)
}

/// Upstream double with a call counter and a swappable response.
pub struct MockResolver {
    calls: AtomicU64,
    response: Mutex<Result<DnsAnswer, DomainError>>,
    delay: Option<Duration>,
}

impl MockResolver {
    pub fn answering(answer: DnsAnswer) -> Self {
        Self {
            calls: AtomicU64::new(0),
            response: Mutex::new(Ok(answer)),
            delay: None,
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            calls: AtomicU64::new(0),
            response: Mutex::new(Err(error)),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_answer(&self, answer: DnsAnswer) {
        *self.response.lock().unwrap() = Ok(answer);
    }

    pub fn set_error(&self, error: DomainError) {
        *self.response.lock().unwrap() = Err(error);
    }

    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsResolver for MockResolver {
    async fn resolve(&self, _query: &DnsQuery) -> Result<DnsAnswer, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.lock().unwrap().clone()
    }
}

/// Shared tier whose every operation fails.
pub struct FailingSharedTier;

#[async_trait]
impl SharedTier for FailingSharedTier {
    async fn get(&self, _key: &str) -> Result<Option<TierHit<Bytes>>, DomainError> {
        Err(DomainError::TierReadError("connection refused".into()))
    }

    async fn set(&self, _key: &str, _value: Bytes, _ttl: Duration) -> Result<TierWrite, DomainError> {
        Err(DomainError::TierWriteError("connection refused".into()))
    }
}

/// Shared tier that always returns bytes no entry decodes from.
pub struct CorruptSharedTier;

#[async_trait]
impl SharedTier for CorruptSharedTier {
    async fn get(&self, _key: &str) -> Result<Option<TierHit<Bytes>>, DomainError> {
        Ok(Some(TierHit::fresh(Bytes::from_static(b"\x00\x01garbage"))))
    }

    async fn set(&self, _key: &str, _value: Bytes, _ttl: Duration) -> Result<TierWrite, DomainError> {
        Ok(TierWrite::default())
    }
}

/// One cache instance over both in-memory tiers and a manual clock.
pub struct Harness {
    pub clock: Arc<ManualClock>,
    pub fast: Arc<LruFastTier>,
    pub shared: Arc<MemorySharedTier>,
    pub upstream: Arc<MockResolver>,
    pub resolver: CachedResolver,
}

impl Harness {
    pub fn new(upstream: MockResolver, options: CacheOptions) -> Self {
        let clock = Arc::new(ManualClock::new(START_MS));
        let shared = Arc::new(MemorySharedTier::new(1024, clock.clone()).unwrap());
        Self::with_shared(upstream, options, clock, shared)
    }

    /// Another "process" over an existing shared tier.
    pub fn with_shared(
        upstream: MockResolver,
        options: CacheOptions,
        clock: Arc<ManualClock>,
        shared: Arc<MemorySharedTier>,
    ) -> Self {
        let fast = Arc::new(LruFastTier::new(128, clock.clone()).unwrap());
        let upstream = Arc::new(upstream);

        let resolver = CachedResolverBuilder::new(upstream.clone())
            .with_fast_tier(fast.clone())
            .with_shared_tier(shared.clone())
            .with_clock(clock.clone())
            .with_options(options)
            .build()
            .unwrap();

        Self {
            clock,
            fast,
            shared,
            upstream,
            resolver,
        }
    }

    pub fn advance_ms(&self, ms: u64) {
        self.clock.advance(Duration::from_millis(ms));
    }

    /// Wait until no background refresh is running.
    pub async fn wait_idle(&self) {
        for _ in 0..400 {
            if self.resolver.scheduler().in_flight_count() == 0 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("repopulation did not finish in time");
    }
}
