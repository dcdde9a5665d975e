//! The fetch → filter → serialize pipeline shared by every delivery mode.

use tracing::debug;

use crate::blacklist::Blacklist;
use crate::cache::CalendarCache;
use crate::calendar::Calendar;
use crate::error::IcsFilterResult;
use crate::filter;

pub struct Feed {
    cache: CalendarCache,
    blacklist: Blacklist,
}

impl Feed {
    pub fn new(cache: CalendarCache, blacklist: Blacklist) -> Self {
        Feed { cache, blacklist }
    }

    pub fn cache(&self) -> &CalendarCache {
        &self.cache
    }

    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    /// Make sure the cache is usable and return the filtered calendar.
    ///
    /// Fails only when there is no snapshot to serve at all; a failed refresh
    /// with an older snapshot available still succeeds.
    pub async fn filtered(&self) -> IcsFilterResult<Calendar> {
        let outcome = self.cache.fetch().await?;
        let snapshot = self.cache.current()?;

        let (calendar, stats) = filter::apply_with_stats(&snapshot.calendar, &self.blacklist);
        debug!(
            ?outcome,
            kept = stats.kept,
            removed = stats.removed,
            "filtered calendar"
        );

        Ok(calendar)
    }

    /// The filtered calendar as ICS text.
    pub async fn render(&self) -> IcsFilterResult<String> {
        Ok(self.filtered().await?.to_ics())
    }
}
