pub mod cache;

pub use cache::{CacheStatsReport, GetCacheStatsUseCase};
