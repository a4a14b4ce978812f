use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Cache behaviour configuration (`[cache]` table)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Decay record TTLs by the time spent in cache before returning them
    #[serde(default = "default_true")]
    pub normalise_ttl: bool,

    /// Lifetime of cached negative answers (NXDOMAIN, SERVFAIL...).
    /// Absent or `false` disables negative caching.
    #[serde(default, deserialize_with = "deserialize_negative_ttl")]
    pub negative_ttl: Option<u32>,

    /// Cache an answer for its smallest record TTL instead of the first one
    #[serde(default = "default_false")]
    pub minimise_ttl: bool,

    /// Seconds past expiry an entry may still be served
    #[serde(default)]
    pub max_stale: u64,

    /// Refresh stale entries in the background instead of on the caller's path
    #[serde(default = "default_false")]
    pub repopulate: bool,

    /// Entries held by the per-process tier. 0 disables it.
    #[serde(default = "default_fast_tier_capacity")]
    pub fast_tier_capacity: usize,

    #[serde(default = "default_true")]
    pub shared_tier_enabled: bool,

    #[serde(default = "default_shared_tier_capacity")]
    pub shared_tier_capacity: usize,

    /// Seconds between shared tier purges
    #[serde(default = "default_maintenance_interval")]
    pub maintenance_interval: u64,
}

impl CacheConfig {
    pub fn has_fast_tier(&self) -> bool {
        self.fast_tier_capacity > 0
    }

    pub fn has_shared_tier(&self) -> bool {
        self.shared_tier_enabled && self.shared_tier_capacity > 0
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            normalise_ttl: true,
            negative_ttl: None,
            minimise_ttl: false,
            max_stale: 0,
            repopulate: false,
            fast_tier_capacity: default_fast_tier_capacity(),
            shared_tier_enabled: true,
            shared_tier_capacity: default_shared_tier_capacity(),
            maintenance_interval: default_maintenance_interval(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SecondsOrOff {
    Seconds(u32),
    Flag(bool),
}

fn deserialize_negative_ttl<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match SecondsOrOff::deserialize(deserializer)? {
        SecondsOrOff::Seconds(secs) => Ok(Some(secs)),
        SecondsOrOff::Flag(false) => Ok(None),
        SecondsOrOff::Flag(true) => Err(D::Error::custom(
            "negative_ttl must be a number of seconds or false",
        )),
    }
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn default_fast_tier_capacity() -> usize {
    10_000
}

fn default_shared_tier_capacity() -> usize {
    100_000
}

fn default_maintenance_interval() -> u64 {
    60
}
