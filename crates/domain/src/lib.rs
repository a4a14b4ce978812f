//! tierdns domain layer: records, cache entries and the arithmetic that ages them.
pub mod cache;
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;

pub use cache::{CacheEntry, CacheKey, Freshness, StalenessWindow, TtlNormalizer, TtlPolicy};
pub use config::{CacheConfig, CliOverrides, Config, ConfigError, LoggingConfig, UpstreamConfig};
pub use dns_query::DnsQuery;
pub use dns_record::{DnsAnswer, DnsClass, DnsRecord, RecordType, ResponseCode};
pub use errors::DomainError;
