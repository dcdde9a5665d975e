//! Single-request responder for embedding behind an external gateway.
//!
//! Unlike the server in the binary, this owns no socket: the host calls
//! [`Responder::respond`] once per incoming request and writes the response
//! out itself.

use std::sync::Arc;

use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method, Response, StatusCode};
use tracing::error;

use crate::blacklist::Blacklist;
use crate::cache::CalendarCache;
use crate::config::{EMBEDDED_CACHE_PERIOD, FileConfig, FilterConfig};
use crate::error::IcsFilterResult;
use crate::feed::Feed;

const CALENDAR_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";

#[derive(Clone)]
pub struct Responder {
    feed: Arc<Feed>,
}

impl Responder {
    pub fn new(feed: Arc<Feed>) -> Self {
        Responder { feed }
    }

    /// Build from `SOURCE_ICS` / `ICS_BLACKLIST_FILE`, caching for 15 minutes.
    ///
    /// A missing source URL is not an error here; every request then answers 500.
    pub fn from_env() -> IcsFilterResult<Self> {
        let config = embedded_config(|key| std::env::var(key).ok())?;

        let blacklist = Blacklist::load(&config.blacklist_path_or_default())?;
        let cache = CalendarCache::from_config(&config)?;
        Ok(Responder::new(Arc::new(Feed::new(cache, blacklist))))
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    /// Answer one request. Never fails: errors become a 500 with an empty body.
    pub async fn respond(&self, method: &Method) -> Response<Vec<u8>> {
        if *method != Method::GET {
            return build(StatusCode::NOT_FOUND, None, Vec::new());
        }

        match self.feed.render().await {
            Ok(body) => build(
                StatusCode::OK,
                Some(CALENDAR_CONTENT_TYPE),
                body.into_bytes(),
            ),
            Err(err) => {
                error!(error = %err, "no calendar available to serve");
                build(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Some(CALENDAR_CONTENT_TYPE),
                    Vec::new(),
                )
            }
        }
    }
}

/// Embedded defaults (15 minute window) with `env` layered on top. No config file is read.
fn embedded_config(env: impl Fn(&str) -> Option<String>) -> IcsFilterResult<FilterConfig> {
    let base = FilterConfig {
        freshness: EMBEDDED_CACHE_PERIOD,
        ..FilterConfig::default()
    };
    FilterConfig::resolve(base, FileConfig::default(), env)
}

fn build(
    status: StatusCode,
    content_type: Option<&'static str>,
    body: Vec<u8>,
) -> Response<Vec<u8>> {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    if let Some(content_type) = content_type {
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    }
    response
}
