use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::upstream::UpstreamConfig;

/// Root configuration, one table per concern
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line; they win over the file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub max_stale: Option<u64>,
    pub repopulate: Option<bool>,
    pub negative_ttl: Option<u32>,
    pub upstream: Option<Vec<String>>,
}

impl Config {
    /// Load from an optional TOML file, then apply overrides.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
                    path: path.to_string(),
                    source,
                })?;
                Self::from_toml(&raw)?
            }
            None => Self::default(),
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(max_stale) = overrides.max_stale {
            self.cache.max_stale = max_stale;
        }
        if let Some(repopulate) = overrides.repopulate {
            self.cache.repopulate = repopulate;
        }
        if let Some(negative_ttl) = overrides.negative_ttl {
            self.cache.negative_ttl = Some(negative_ttl);
        }
        if let Some(servers) = overrides.upstream {
            self.upstream.servers = servers;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.cache.has_fast_tier() && !self.cache.has_shared_tier() {
            return Err(ConfigError::Validation(
                "at least one cache tier must be configured (fast_tier_capacity > 0 or shared_tier_enabled)"
                    .to_string(),
            ));
        }

        if self.upstream.servers.is_empty() {
            return Err(ConfigError::Validation(
                "upstream.servers cannot be empty".to_string(),
            ));
        }

        for server in &self.upstream.servers {
            server.parse::<SocketAddr>().map_err(|e| {
                ConfigError::Validation(format!("invalid upstream server '{}': {}", server, e))
            })?;
        }

        if self.upstream.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "upstream.timeout_ms must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn upstream_addrs(&self) -> Vec<SocketAddr> {
        self.upstream
            .servers
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect()
    }
}
