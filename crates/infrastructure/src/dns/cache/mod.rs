pub mod clock;
pub mod codec;
pub mod fast_tier;
pub mod lookup;
pub mod metrics;
pub mod repopulate;
pub mod shared_tier;

pub use clock::{ManualClock, SystemClock};
pub use codec::EntryCodec;
pub use fast_tier::LruFastTier;
pub use lookup::{AnswerSource, CachedAnswer, LookupOutcome, TieredLookup};
pub use metrics::CacheMetrics;
pub use repopulate::{RefreshClaim, RepopulationScheduler};
pub use shared_tier::MemorySharedTier;
