//! Shared fixtures for the integration tests.

#![allow(dead_code)]

pub const CALENDAR_PATH: &str = "/team.ics";

/// Build a small VCALENDAR with one VEVENT per title.
pub fn calendar_ics(titles: &[&str]) -> String {
    let mut ics = String::from(
        "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example//Team Calendar//EN\r\n\
X-WR-CALNAME:Team\r\n",
    );
    for (i, title) in titles.iter().enumerate() {
        ics.push_str(&format!(
            "BEGIN:VEVENT\r\n\
UID:event-{i}@example.com\r\n\
SUMMARY:{title}\r\n\
DTSTART:2024010{day}T090000Z\r\n\
DTEND:2024010{day}T093000Z\r\n\
END:VEVENT\r\n",
            i = i,
            title = title,
            day = (i % 9) + 1,
        ));
    }
    ics.push_str("END:VCALENDAR\r\n");
    ics
}
