//! Owned calendar model.
//!
//! A calendar is kept as the component tree read from the wire. Only `VEVENT`
//! titles are interpreted; every other property and component is carried
//! through untouched so that re-serialization reproduces the source document.

use std::fmt;
use std::str::FromStr;

use crate::error::{IcsFilterError, IcsFilterResult};
use crate::ics;

/// A single content line, e.g. `DTSTART;TZID=Europe/Paris:20240101T100000`.
///
/// `value` is stored in its escaped wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub params: Vec<(String, Option<String>)>,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Property {
            name: name.into(),
            params: Vec::new(),
            value: value.into(),
        }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .and_then(|(_, v)| v.as_deref())
    }
}

/// A `BEGIN:<name>` ... `END:<name>` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    pub properties: Vec<Property>,
    pub components: Vec<Component>,
}

impl Component {
    pub fn new(name: impl Into<String>) -> Self {
        Component {
            name: name.into(),
            properties: Vec::new(),
            components: Vec::new(),
        }
    }

    pub fn find_prop(&self, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn is_event(&self) -> bool {
        self.name.eq_ignore_ascii_case("VEVENT")
    }

    /// Unescaped `SUMMARY`, if the component has one.
    pub fn title(&self) -> Option<String> {
        self.find_prop("SUMMARY")
            .map(|p| ics::unescape_text(&p.value))
    }
}

/// A parsed `VCALENDAR`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calendar {
    /// Calendar-level properties (VERSION, PRODID, X-WR-CALNAME, ...).
    pub properties: Vec<Property>,
    /// Child components in document order.
    pub components: Vec<Component>,
}

impl Calendar {
    pub fn parse(content: &str) -> IcsFilterResult<Self> {
        ics::parse_calendar(content)
    }

    pub fn to_ics(&self) -> String {
        ics::generate_ics(self)
    }

    pub fn events(&self) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(|c| c.is_event())
    }

    /// Titles of all events, in document order. Events without a title are skipped.
    pub fn event_titles(&self) -> Vec<String> {
        self.events().filter_map(Component::title).collect()
    }
}

impl FromStr for Calendar {
    type Err = IcsFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Calendar::parse(s)
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ics())
    }
}
