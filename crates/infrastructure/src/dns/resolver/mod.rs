//! Cached resolution on top of an upstream `DnsResolver`.
//!
//! ```ignore
//! use tierdns_infrastructure::dns::resolver::{CacheOptions, CachedResolverBuilder};
//!
//! let resolver = CachedResolverBuilder::new(upstream)
//!     .with_fast_tier(fast)
//!     .with_shared_tier(shared)
//!     .with_options(CacheOptions::default().with_max_stale(10))
//!     .build()?;
//! ```

pub mod builder;
pub mod cache_layer;
pub mod config;

pub use builder::CachedResolverBuilder;
pub use cache_layer::{CachedResolver, ResolveFailure};
pub use config::CacheOptions;
