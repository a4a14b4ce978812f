//! Configuration for tierdns
//!
//! One module per TOML table:
//! - `root`: main configuration and CLI overrides
//! - `cache`: tiering, staleness and TTL policy
//! - `upstream`: recursive resolvers queried on a miss
//! - `logging`: logging settings
//! - `errors`: configuration errors

pub mod cache;
pub mod errors;
pub mod logging;
pub mod root;
pub mod upstream;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use upstream::UpstreamConfig;
