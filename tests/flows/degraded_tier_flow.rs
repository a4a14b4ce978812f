//! A broken shared tier must never fail a query.

#[path = "../common/mod.rs"]
mod common;
use async_trait::async_trait;
use bytes::Bytes;
use common::{example_query, single_a, TestCacheBuilder};
use std::sync::Arc;
use std::time::Duration;
use tierdns_application::ports::{CacheStatsPort, SharedTier, TierHit, TierWrite};
use tierdns_domain::{DnsAnswer, DomainError, ResponseCode};
use tierdns_infrastructure::dns::{AnswerSource, CacheOptions};

struct UnreachableSharedTier;

#[async_trait]
impl SharedTier for UnreachableSharedTier {
    async fn get(&self, _key: &str) -> Result<Option<TierHit<Bytes>>, DomainError> {
        Err(DomainError::TierReadError("shared store unreachable".into()))
    }

    async fn set(&self, _key: &str, _value: Bytes, _ttl: Duration) -> Result<TierWrite, DomainError> {
        Err(DomainError::TierWriteError("shared store unreachable".into()))
    }
}

#[tokio::test]
async fn test_fast_tier_keeps_serving_when_shared_tier_is_down() {
    let cache = TestCacheBuilder::new()
        .with_shared_tier(Arc::new(UnreachableSharedTier))
        .build();

    let first = cache.resolver.resolve(&example_query()).await.unwrap();
    let second = cache.resolver.resolve(&example_query()).await.unwrap();

    assert_eq!(first.source, AnswerSource::Upstream);
    assert_eq!(second.source, AnswerSource::FastTier);
    assert_eq!(cache.upstream.call_count(), 1);
    assert_eq!(cache.resolver.cache_metrics_snapshot().tier_write_errors, 1);
}

#[tokio::test]
async fn test_shared_only_cache_falls_back_to_upstream() {
    let cache = TestCacheBuilder::new()
        .without_fast_tier()
        .with_shared_tier(Arc::new(UnreachableSharedTier))
        .build();

    for _ in 0..3 {
        let answer = cache.resolver.resolve(&example_query()).await.unwrap();
        assert_eq!(answer.source, AnswerSource::Upstream);
    }

    assert_eq!(cache.upstream.call_count(), 3);
    let snapshot = cache.resolver.cache_metrics_snapshot();
    assert_eq!(snapshot.tier_read_errors, 3);
    assert_eq!(snapshot.tier_write_errors, 3);
}

#[tokio::test]
async fn test_negative_caching_round_trip() {
    let cache = TestCacheBuilder::new()
        .answering(DnsAnswer::negative(ResponseCode::NXDomain))
        .with_options(CacheOptions::default().with_negative_ttl(Some(5)))
        .build();

    cache.resolver.resolve(&example_query()).await.unwrap();
    let cached = cache.resolver.resolve(&example_query()).await.unwrap();

    assert_eq!(cached.answer.rcode, ResponseCode::NXDomain);
    assert_eq!(cache.upstream.call_count(), 1);

    cache.upstream.set_answer(single_a("192.0.2.1", 300));
    cache.sleep_ms(5_000);

    let recovered = cache.resolver.resolve(&example_query()).await.unwrap();
    assert_eq!(recovered.answer.rcode, ResponseCode::NoError);
    assert_eq!(cache.upstream.call_count(), 2);
}
