pub mod entry;
pub mod key;
pub mod normalize;
pub mod ttl_policy;

pub use entry::{CacheEntry, Freshness, StalenessWindow};
pub use key::CacheKey;
pub use normalize::TtlNormalizer;
pub use ttl_policy::TtlPolicy;
