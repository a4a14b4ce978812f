use tierdns_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Called once logging is up, so the summary is not lost.
pub fn log_config(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.unwrap_or("default"),
        fast_tier_capacity = config.cache.fast_tier_capacity,
        shared_tier = config.cache.has_shared_tier(),
        max_stale = config.cache.max_stale,
        repopulate = config.cache.repopulate,
        negative_ttl = ?config.cache.negative_ttl,
        upstream = ?config.upstream.servers,
        "Configuration loaded"
    );
}
