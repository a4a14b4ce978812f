//! Single-flight background refresh under concurrent callers.

#[path = "../common/mod.rs"]
mod common;
use common::{example_query, single_a, TestCacheBuilder};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tierdns_application::ports::CacheStatsPort;
use tierdns_application::use_cases::GetCacheStatsUseCase;
use tierdns_infrastructure::dns::CacheOptions;

fn stale_while_revalidate() -> CacheOptions {
    CacheOptions::default().with_max_stale(10).with_repopulate(true)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_three_concurrent_stale_hits_issue_one_refresh() {
    let cache = TestCacheBuilder::new()
        .answering(single_a("192.0.2.1", 1))
        .with_options(stale_while_revalidate())
        .build();

    cache.resolver.resolve(&example_query()).await.unwrap();
    cache.upstream.set_delay(Duration::from_millis(100));
    cache.sleep_ms(1_100);

    let (q1, q2, q3) = (example_query(), example_query(), example_query());
    let (a, b, c) = tokio::join!(
        cache.resolver.resolve(&q1),
        cache.resolver.resolve(&q2),
        cache.resolver.resolve(&q3),
    );

    for result in [a, b, c] {
        assert!(result.unwrap().stale);
    }

    cache.wait_for_repopulation().await;
    assert_eq!(cache.upstream.call_count(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_tasks_share_one_refresh() {
    let cache = TestCacheBuilder::new()
        .answering(single_a("192.0.2.1", 1))
        .with_options(stale_while_revalidate())
        .build();

    cache.resolver.resolve(&example_query()).await.unwrap();
    cache.upstream.set_delay(Duration::from_millis(500));
    cache.sleep_ms(2_000);

    let handles = (0..32).map(|_| {
        let resolver = Arc::clone(&cache.resolver);
        tokio::spawn(async move { resolver.resolve(&example_query()).await })
    });

    for result in join_all(handles).await {
        assert!(result.unwrap().unwrap().stale);
    }

    cache.wait_for_repopulation().await;
    assert_eq!(cache.upstream.call_count(), 2);

    let snapshot = cache.resolver.cache_metrics_snapshot();
    assert_eq!(snapshot.stale_hits, 32);
    assert_eq!(snapshot.repopulations_started, 1);
    assert_eq!(snapshot.repopulations_deduplicated, 31);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_new_refresh_allowed_after_previous_completes() {
    let cache = TestCacheBuilder::new()
        .answering(single_a("192.0.2.1", 1))
        .with_options(stale_while_revalidate())
        .build();

    cache.resolver.resolve(&example_query()).await.unwrap();
    cache.sleep_ms(1_500);
    cache.upstream.set_should_fail(true);

    cache.resolver.resolve(&example_query()).await.unwrap();
    cache.wait_for_repopulation().await;
    cache.resolver.resolve(&example_query()).await.unwrap();
    cache.wait_for_repopulation().await;

    assert_eq!(cache.upstream.call_count(), 3);
    assert_eq!(cache.resolver.cache_metrics_snapshot().repopulation_failures, 2);
}

#[tokio::test]
async fn test_stats_report_reflects_the_flow() {
    let cache = TestCacheBuilder::new()
        .answering(single_a("192.0.2.1", 1))
        .with_options(stale_while_revalidate())
        .build();

    cache.resolver.resolve(&example_query()).await.unwrap();
    cache.resolver.resolve(&example_query()).await.unwrap();
    cache.sleep_ms(1_100);
    cache.resolver.resolve(&example_query()).await.unwrap();
    cache.wait_for_repopulation().await;

    let stats = GetCacheStatsUseCase::new(cache.resolver.clone() as Arc<dyn CacheStatsPort>);
    let report = stats.execute();

    assert_eq!(report.snapshot.misses, 1);
    assert_eq!(report.snapshot.fresh_hits, 1);
    assert_eq!(report.snapshot.stale_hits, 1);
    assert_eq!(report.served_from_cache, 2);
    assert_eq!(report.hit_rate, "66.7%");
}
