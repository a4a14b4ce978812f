pub mod cache;
pub mod cache_updater;
pub mod forwarding;
pub mod resolver;
pub mod transport;
pub mod upstream;

pub use cache::{
    AnswerSource, CacheMetrics, CachedAnswer, LruFastTier, ManualClock, MemorySharedTier,
    SystemClock,
};
pub use cache_updater::CacheMaintenance;
pub use resolver::{CacheOptions, CachedResolver, CachedResolverBuilder, ResolveFailure};
pub use upstream::UdpUpstreamResolver;
