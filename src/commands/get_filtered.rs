use anyhow::{Context, Result};
use ics_filter_core::Feed;

/// Fetch once and print the filtered calendar. There is no fallback output,
/// so any failure to obtain a calendar is an error.
pub async fn run(feed: &Feed) -> Result<()> {
    let ics = feed
        .render()
        .await
        .context("Could not produce the filtered calendar")?;

    print!("{}", ics);
    Ok(())
}
