//! Time-based cache in front of the remote calendar.
//!
//! `fetch` makes sure the snapshot is fresh enough, `current` reads it. Reading
//! never touches the network. Within the freshness window `fetch` is a no-op, so
//! every request hitting the server does not turn into an upstream request.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::calendar::Calendar;
use crate::config::FilterConfig;
use crate::error::{IcsFilterError, IcsFilterResult};

const USER_AGENT: &str = concat!("ics-filter/", env!("CARGO_PKG_VERSION"));

/// The last successfully parsed calendar together with where and when it was fetched.
#[derive(Debug)]
pub struct Snapshot {
    pub calendar: Calendar,
    pub url: String,
    pub fetched_at: Instant,
}

impl Snapshot {
    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }

    pub fn is_fresh(&self, window: Duration) -> bool {
        self.age() < window
    }
}

/// What a call to [`CalendarCache::fetch`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Snapshot is inside the freshness window; no request was made.
    Fresh,
    /// A new snapshot was downloaded and parsed.
    Refreshed,
    /// The refresh failed; the previous snapshot is still being served.
    Stale { reason: String },
}

pub struct CalendarCache {
    http: reqwest::Client,
    freshness: Duration,
    /// Configured source URL. Holding this lock is what serializes fetches.
    url: Mutex<Option<String>>,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
}

impl CalendarCache {
    pub fn new(url: Option<String>, freshness: Duration) -> IcsFilterResult<Self> {
        let config = FilterConfig {
            source_url: url,
            freshness,
            ..FilterConfig::default()
        };
        Self::from_config(&config)
    }

    pub fn from_config(config: &FilterConfig) -> IcsFilterResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| IcsFilterError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(
            config.source_url.clone(),
            config.freshness,
            http,
        ))
    }

    pub fn with_client(url: Option<String>, freshness: Duration, http: reqwest::Client) -> Self {
        CalendarCache {
            http,
            freshness,
            url: Mutex::new(url),
            snapshot: RwLock::new(None),
        }
    }

    pub fn freshness(&self) -> Duration {
        self.freshness
    }

    pub async fn url(&self) -> Option<String> {
        self.url.lock().await.clone()
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.read().is_some()
    }

    /// The current snapshot. Never performs I/O.
    pub fn current(&self) -> IcsFilterResult<Arc<Snapshot>> {
        self.snapshot
            .read()
            .clone()
            .ok_or(IcsFilterError::FetchRequired)
    }

    /// Refresh from the configured URL if the snapshot is missing or stale.
    pub async fn fetch(&self) -> IcsFilterResult<FetchOutcome> {
        self.fetch_inner(None).await
    }

    /// Like [`fetch`](Self::fetch), but `url` replaces the configured source URL.
    ///
    /// A fresh snapshot is still returned as-is; the new URL is used from the
    /// next refresh on.
    pub async fn fetch_from(&self, url: &str) -> IcsFilterResult<FetchOutcome> {
        self.fetch_inner(Some(url)).await
    }

    async fn fetch_inner(&self, explicit_url: Option<&str>) -> IcsFilterResult<FetchOutcome> {
        let mut configured = self.url.lock().await;
        if let Some(url) = explicit_url {
            *configured = Some(url.to_string());
        }

        let previous = self.snapshot.read().clone();
        if let Some(snapshot) = &previous
            && snapshot.is_fresh(self.freshness)
        {
            debug!(url = %snapshot.url, age = ?snapshot.age(), "calendar cache hit");
            return Ok(FetchOutcome::Fresh);
        }

        let url = configured
            .clone()
            .ok_or_else(|| IcsFilterError::Config("source url has never been specified".into()))?;

        let body = match self.download(&url).await {
            Ok(body) => body,
            Err(reason) => {
                if previous.is_some() {
                    warn!(%url, %reason, "failed to refresh calendar, serving cached copy");
                    return Ok(FetchOutcome::Stale { reason });
                }
                warn!(%url, %reason, "failed to fetch calendar");
                return Err(IcsFilterError::Fetch { url, reason });
            }
        };

        let calendar = Calendar::parse(&body)?;
        info!(%url, events = calendar.events().count(), "fetched calendar");

        *self.snapshot.write() = Some(Arc::new(Snapshot {
            calendar,
            url,
            fetched_at: Instant::now(),
        }));

        Ok(FetchOutcome::Refreshed)
    }

    async fn download(&self, url: &str) -> Result<String, String> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {}", status));
        }

        response.text().await.map_err(|e| e.to_string())
    }
}
