pub mod cache_stats;
pub mod cache_tier;
pub mod clock;
pub mod dns_resolver;

pub use cache_stats::{CacheMetricsSnapshot, CacheStatsPort};
pub use cache_tier::{FastTier, SharedTier, TierHit, TierWrite};
pub use clock::Clock;
pub use dns_resolver::DnsResolver;
