//! ICS text generation through the icalendar crate's writer.

use icalendar::parser;

use crate::calendar::{Calendar, Component, Property};

/// Serialize a calendar to CRLF-terminated ICS text, folded at 75 octets.
pub fn generate_ics(calendar: &Calendar) -> String {
    let calendar = parser::Calendar {
        properties: calendar.properties.iter().map(to_parser_property).collect(),
        components: calendar.components.iter().map(to_parser_component).collect(),
    };
    calendar.to_string()
}

fn to_parser_component(component: &Component) -> parser::Component<'_> {
    parser::Component {
        name: component.name.as_str().into(),
        properties: component.properties.iter().map(to_parser_property).collect(),
        components: component.components.iter().map(to_parser_component).collect(),
    }
}

fn to_parser_property(property: &Property) -> parser::Property<'_> {
    let params = property
        .params
        .iter()
        .map(|(key, value)| parser::Parameter {
            key: key.as_str().into(),
            val: value.as_deref().map(param_value),
        })
        .collect();

    parser::Property {
        name: property.name.as_str().into(),
        val: property.value.as_str().into(),
        params,
    }
}

// The parser drops the DQUOTEs around parameter values and the writer does not
// put them back.
fn param_value(value: &str) -> parser::ParseString<'_> {
    if value.contains([':', ';', ',']) && !value.starts_with('"') {
        format!("\"{}\"", value).into()
    } else {
        value.into()
    }
}
