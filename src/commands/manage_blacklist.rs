use std::path::Path;

use anyhow::{Context, Result};
use dialoguer::MultiSelect;
use ics_filter_core::{Blacklist, Calendar, CalendarCache};

pub async fn run(cache: &CalendarCache, mut blacklist: Blacklist, path: &Path) -> Result<()> {
    println!("Loading events name, this can take a few seconds...");

    cache
        .fetch()
        .await
        .context("Could not load the calendar to list its events")?;
    let snapshot = cache.current()?;

    let items = checklist_items(&snapshot.calendar, &blacklist);
    if items.is_empty() {
        println!("No event titles to choose from.");
        return Ok(());
    }
    let defaults: Vec<bool> = items.iter().map(|title| blacklist.contains(title)).collect();

    let selections = MultiSelect::new()
        .with_prompt("Blacklist (space to toggle, enter to confirm)")
        .items(&items)
        .defaults(&defaults)
        .interact()?;

    blacklist.replace(selections.into_iter().map(|idx| items[idx].clone()));
    blacklist.save(path)?;

    println!("Blacklist saved.");
    Ok(())
}

/// Every event title in the calendar plus every title already blacklisted,
/// each listed once. Empty titles can't be blacklisted and are left out.
fn checklist_items(calendar: &Calendar, blacklist: &Blacklist) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();

    let titles = calendar
        .event_titles()
        .into_iter()
        .chain(blacklist.iter().map(String::from));

    for title in titles {
        if !title.is_empty() && !items.contains(&title) {
            items.push(title);
        }
    }

    items
}
