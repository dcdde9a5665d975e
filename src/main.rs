mod commands;
mod server;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ics_filter_core::config::{BLACKLIST_FILE_ENV, SOURCE_ICS_ENV};
use ics_filter_core::{Blacklist, CalendarCache, Feed, FilterConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ics-filter")]
#[command(about = "Publish a remote calendar with blacklisted events removed")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Source ics that will be filtered
    #[arg(long, global = true, env = SOURCE_ICS_ENV)]
    source_ics: Option<String>,

    /// Filepath to the blacklist
    #[arg(long, global = true, env = BLACKLIST_FILE_ENV)]
    blacklist_file: Option<PathBuf>,

    /// How long a fetched calendar is reused before refetching (e.g. "60s", "15m")
    #[arg(long, global = true, value_parser = humantime::parse_duration)]
    cache_period: Option<Duration>,

    /// Timeout for the request to the source calendar
    #[arg(long, global = true, value_parser = humantime::parse_duration)]
    request_timeout: Option<Duration>,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose which events to blacklist
    ManageBlacklist,
    /// Print the filtered calendar to stdout
    GetFiltered,
    /// Serve the filtered calendar over HTTP
    Serve {
        /// Address to listen on
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
}

impl Cli {
    /// Flags take precedence over the environment and the config file.
    fn apply_to(&self, config: &mut FilterConfig) {
        if let Some(url) = &self.source_ics {
            config.source_url = Some(url.clone());
        }
        if let Some(path) = &self.blacklist_file {
            config.blacklist_path = Some(path.clone());
        }
        if let Some(period) = self.cache_period {
            config.freshness = period;
        }
        if let Some(timeout) = self.request_timeout {
            config.request_timeout = timeout;
        }
        if let Commands::Serve { bind: Some(bind) } = &self.command {
            config.bind = *bind;
        }
    }
}

/// The CLI needs both a source URL and a blacklist path; returns the latter.
fn require_paths(config: &FilterConfig) -> Result<PathBuf> {
    if config.source_url.is_none() {
        anyhow::bail!(
            "You should specify --source-ics if environment variable \
            {} is not specified",
            SOURCE_ICS_ENV
        );
    }
    let Some(blacklist_path) = config.blacklist_path.clone() else {
        anyhow::bail!(
            "You should specify --blacklist-file if environment variable \
            {} is not specified",
            BLACKLIST_FILE_ENV
        );
    };
    Ok(blacklist_path)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = FilterConfig::load()?;
    cli.apply_to(&mut config);

    let blacklist_path = require_paths(&config)?;

    let blacklist = Blacklist::load(&blacklist_path)?;
    let cache = CalendarCache::from_config(&config)?;

    match cli.command {
        Commands::ManageBlacklist => {
            commands::manage_blacklist::run(&cache, blacklist, &blacklist_path).await
        }
        Commands::GetFiltered => commands::get_filtered::run(&Feed::new(cache, blacklist)).await,
        Commands::Serve { .. } => {
            commands::serve::run(Feed::new(cache, blacklist), config.bind).await
        }
    }
}
