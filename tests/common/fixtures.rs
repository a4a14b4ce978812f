use super::mock_upstream::CountingUpstream;
use std::sync::Arc;
use std::time::Duration;
use tierdns_application::ports::{Clock, SharedTier};
use tierdns_domain::{DnsAnswer, DnsQuery, DnsRecord, RecordType};
use tierdns_infrastructure::dns::{
    CacheOptions, CachedResolver, CachedResolverBuilder, LruFastTier, ManualClock,
    MemorySharedTier,
};

pub const START_MS: u64 = 1_700_000_000_000;

pub fn example_query() -> DnsQuery {
    DnsQuery::new("example.com", RecordType::A)
}

pub fn single_a(ip: &str, ttl: i64) -> DnsAnswer {
    DnsAnswer::new(vec![DnsRecord::new("example.com", RecordType::A, ip, ttl)])
}

/// A cache instance over in-memory tiers driven by a manual clock.
pub struct TestCache {
    pub clock: Arc<ManualClock>,
    pub upstream: CountingUpstream,
    pub resolver: Arc<CachedResolver>,
}

pub struct TestCacheBuilder {
    options: CacheOptions,
    answer: DnsAnswer,
    shared: Option<Arc<dyn SharedTier>>,
    with_fast: bool,
}

impl TestCacheBuilder {
    pub fn new() -> Self {
        Self {
            options: CacheOptions::default(),
            answer: single_a("192.0.2.1", 300),
            shared: None,
            with_fast: true,
        }
    }

    pub fn answering(mut self, answer: DnsAnswer) -> Self {
        self.answer = answer;
        self
    }

    pub fn with_options(mut self, options: CacheOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_shared_tier(mut self, shared: Arc<dyn SharedTier>) -> Self {
        self.shared = Some(shared);
        self
    }

    pub fn without_fast_tier(mut self) -> Self {
        self.with_fast = false;
        self
    }

    pub fn build(self) -> TestCache {
        let clock = Arc::new(ManualClock::new(START_MS));
        let dyn_clock: Arc<dyn Clock> = clock.clone();
        let upstream = CountingUpstream::new(self.answer);

        let mut builder = CachedResolverBuilder::new(Arc::new(upstream.clone()))
            .with_options(self.options)
            .with_clock(dyn_clock.clone());

        if self.with_fast {
            builder = builder.with_fast_tier(Arc::new(
                LruFastTier::new(1024, dyn_clock.clone()).unwrap(),
            ));
        }

        let shared: Arc<dyn SharedTier> = match self.shared {
            Some(shared) => shared,
            None => Arc::new(MemorySharedTier::new(4096, dyn_clock.clone()).unwrap()),
        };
        builder = builder.with_shared_tier(shared);

        TestCache {
            clock,
            upstream,
            resolver: Arc::new(builder.build().unwrap()),
        }
    }
}

impl TestCache {
    pub fn sleep_ms(&self, ms: u64) {
        self.clock.advance(Duration::from_millis(ms));
    }

    /// Poll until no background refresh is in flight.
    pub async fn wait_for_repopulation(&self) {
        for _ in 0..400 {
            if self.resolver.scheduler().in_flight_count() == 0 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("background repopulation did not finish");
    }
}
