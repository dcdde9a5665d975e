//! Runtime configuration.
//!
//! Values are resolved from built-in defaults, then the optional
//! `~/.config/ics-filter/config.toml`, then environment variables.
//! Command-line flags are applied on top by the binary.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{IcsFilterError, IcsFilterResult};

pub const SOURCE_ICS_ENV: &str = "SOURCE_ICS";
pub const BLACKLIST_FILE_ENV: &str = "ICS_BLACKLIST_FILE";
pub const CACHE_PERIOD_ENV: &str = "ICS_CACHE_PERIOD";

pub const DEFAULT_BLACKLIST_FILE: &str = ".ics-events-blacklist";
pub const DEFAULT_CACHE_PERIOD: Duration = Duration::from_secs(60);
/// Freshness window used by the embeddable responder.
pub const EMBEDDED_CACHE_PERIOD: Duration = Duration::from_secs(15 * 60);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_BIND: ([u8; 4], u16) = ([0, 0, 0, 0], 8000);

/// Optional config file at ~/.config/ics-filter/config.toml
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub source_ics: Option<String>,
    pub blacklist_file: Option<PathBuf>,
    /// Human-readable duration, e.g. "60s" or "15m".
    pub cache_period: Option<String>,
    pub request_timeout: Option<String>,
    pub bind: Option<SocketAddr>,
}

impl FileConfig {
    pub fn config_path() -> IcsFilterResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| IcsFilterError::Config("Could not determine config directory".into()))?
            .join("ics-filter");

        Ok(config_dir.join("config.toml"))
    }

    /// Read the config file, or an empty config if it does not exist.
    pub fn load(path: &Path) -> IcsFilterResult<Self> {
        if !path.exists() {
            return Ok(FileConfig::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            IcsFilterError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&contents).map_err(|e| {
            IcsFilterError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub source_url: Option<String>,
    pub blacklist_path: Option<PathBuf>,
    pub freshness: Duration,
    pub request_timeout: Duration,
    pub bind: SocketAddr,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            source_url: None,
            blacklist_path: None,
            freshness: DEFAULT_CACHE_PERIOD,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            bind: SocketAddr::from(DEFAULT_BIND),
        }
    }
}

impl FilterConfig {
    /// Load from the user's config file and the process environment.
    pub fn load() -> IcsFilterResult<Self> {
        // No config directory (e.g. no HOME in a container) just means no config file.
        let file = match FileConfig::config_path() {
            Ok(path) => FileConfig::load(&path)?,
            Err(_) => FileConfig::default(),
        };
        Self::resolve(FilterConfig::default(), file, |key| std::env::var(key).ok())
    }

    /// Layer `file` and then `env` over `base`.
    pub fn resolve(
        base: FilterConfig,
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> IcsFilterResult<Self> {
        let mut config = base;

        if let Some(url) = file.source_ics {
            config.source_url = Some(url);
        }
        if let Some(path) = file.blacklist_file {
            config.blacklist_path = Some(path);
        }
        if let Some(period) = file.cache_period {
            config.freshness = parse_duration("cache_period", &period)?;
        }
        if let Some(timeout) = file.request_timeout {
            config.request_timeout = parse_duration("request_timeout", &timeout)?;
        }
        if let Some(bind) = file.bind {
            config.bind = bind;
        }

        if let Some(url) = non_empty(env(SOURCE_ICS_ENV)) {
            config.source_url = Some(url);
        }
        if let Some(path) = non_empty(env(BLACKLIST_FILE_ENV)) {
            config.blacklist_path = Some(PathBuf::from(path));
        }
        if let Some(period) = non_empty(env(CACHE_PERIOD_ENV)) {
            config.freshness = parse_duration(CACHE_PERIOD_ENV, &period)?;
        }

        Ok(config)
    }

    /// Blacklist path, falling back to `.ics-events-blacklist` in the working directory.
    pub fn blacklist_path_or_default(&self) -> PathBuf {
        self.blacklist_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BLACKLIST_FILE))
    }
}

fn parse_duration(key: &str, value: &str) -> IcsFilterResult<Duration> {
    humantime::parse_duration(value)
        .map_err(|e| IcsFilterError::Config(format!("Invalid duration for {}: {}", key, e)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
