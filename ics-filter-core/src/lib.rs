//! Core of ics-filter.
//!
//! - [`blacklist`]: the set of excluded event titles and its JSON file
//! - [`cache`]: time-based cache of the remote calendar
//! - [`filter`]: builds a calendar without the blacklisted events
//! - [`feed`] and [`responder`]: the pipeline the delivery modes share

pub mod blacklist;
pub mod cache;
pub mod calendar;
pub mod config;
pub mod error;
pub mod feed;
pub mod filter;
pub mod ics;
pub mod responder;

pub use blacklist::Blacklist;
pub use cache::{CalendarCache, FetchOutcome, Snapshot};
pub use calendar::{Calendar, Component, Property};
pub use config::FilterConfig;
pub use error::{IcsFilterError, IcsFilterResult};
pub use feed::Feed;
pub use filter::{FilterStats, apply};
pub use responder::Responder;
