//! ICS reading and writing.
//!
//! Parsing goes through the icalendar crate's parser; generation writes the
//! owned component tree back out with RFC 5545 line folding.

mod generate;
mod parse;

pub use generate::generate_ics;
pub use parse::parse_calendar;

/// Undo RFC 5545 TEXT escaping (`\,` `\;` `\\` `\n`).
pub fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_text() {
        assert_eq!(unescape_text("Lunch\\, team"), "Lunch, team");
        assert_eq!(unescape_text("a\\;b"), "a;b");
        assert_eq!(unescape_text("line\\nbreak"), "line\nbreak");
        assert_eq!(unescape_text("back\\\\slash"), "back\\slash");
        assert_eq!(unescape_text("trailing\\"), "trailing\\");
        assert_eq!(unescape_text("1:1 Alice"), "1:1 Alice");
    }
}
