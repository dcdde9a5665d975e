//! Removes blacklisted events from a calendar.

use crate::blacklist::Blacklist;
use crate::calendar::{Calendar, Component};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub kept: usize,
    pub removed: usize,
}

/// Build a new calendar without the events whose title is blacklisted.
///
/// The result is an independent copy; `calendar` is left untouched. Events with
/// no title or an empty one are always kept, as are non-event components.
pub fn apply(calendar: &Calendar, blacklist: &Blacklist) -> Calendar {
    apply_with_stats(calendar, blacklist).0
}

pub fn apply_with_stats(calendar: &Calendar, blacklist: &Blacklist) -> (Calendar, FilterStats) {
    let mut stats = FilterStats::default();

    let components = calendar
        .components
        .iter()
        .filter(|component| {
            if is_blacklisted(component, blacklist) {
                stats.removed += 1;
                false
            } else {
                if component.is_event() {
                    stats.kept += 1;
                }
                true
            }
        })
        .cloned()
        .collect();

    let filtered = Calendar {
        properties: calendar.properties.clone(),
        components,
    };

    (filtered, stats)
}

fn is_blacklisted(component: &Component, blacklist: &Blacklist) -> bool {
    if !component.is_event() {
        return false;
    }
    match component.title() {
        Some(title) if !title.is_empty() => blacklist.contains(&title),
        _ => false,
    }
}
