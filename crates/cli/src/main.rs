//! # tierdns
//!
//! Resolves names through a two-tier DNS cache and reports what the
//! cache did.

mod bootstrap;
mod di;
mod output;

use clap::{Parser, Subcommand};
use std::time::Duration;
use tierdns_domain::{CliOverrides, RecordType};
use tracing::info;

#[derive(Parser)]
#[command(name = "tierdns")]
#[command(version)]
#[command(about = "Tiered DNS cache with stale serving and background refresh")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Seconds an expired entry may still be served
    #[arg(long)]
    max_stale: Option<u64>,

    /// Refresh stale entries in the background
    #[arg(long)]
    repopulate: bool,

    /// Cache negative answers for this many seconds
    #[arg(long)]
    negative_ttl: Option<u32>,

    /// Upstream server (ip:port); repeat for several
    #[arg(long = "upstream")]
    upstream: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve HOST through the cache
    Query {
        host: String,

        /// Record type
        #[arg(short = 't', long = "type", default_value = "A")]
        record_type: String,

        /// How many times to resolve
        #[arg(short, long, default_value_t = 1)]
        repeat: u32,

        /// Pause between repeats, in milliseconds
        #[arg(short, long, default_value_t = 1000)]
        interval_ms: u64,
    },
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            log_level: self.log_level.clone(),
            max_stale: self.max_stale,
            repopulate: self.repopulate.then_some(true),
            negative_ttl: self.negative_ttl,
            upstream: (!self.upstream.is_empty()).then(|| self.upstream.clone()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config);
    bootstrap::log_config(cli.config.as_deref(), &config);

    let services = di::CacheServices::new(&config)?;

    match cli.command {
        Command::Query {
            host,
            record_type,
            repeat,
            interval_ms,
        } => {
            let record_type: RecordType = record_type.parse().map_err(anyhow::Error::msg)?;
            let interval = Duration::from_millis(interval_ms);

            for round in 1..=repeat.max(1) {
                let result = services.resolver.resolve_host(&host, Some(record_type)).await;
                output::print_result(round, &host, record_type, &result);

                if round < repeat {
                    tokio::time::sleep(interval).await;
                }
            }
        }
    }

    output::print_stats(&services.stats.execute());

    info!("Shutting down");
    services.shutdown().await;

    Ok(())
}
