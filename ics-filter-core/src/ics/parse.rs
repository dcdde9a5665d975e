//! ICS parsing using the icalendar crate's parser.

use icalendar::parser::{self, read_calendar, unfold};

use crate::calendar::{Calendar, Component, Property};
use crate::error::{IcsFilterError, IcsFilterResult};

/// Parse a full VCALENDAR document into an owned [`Calendar`].
pub fn parse_calendar(content: &str) -> IcsFilterResult<Calendar> {
    let unfolded = unfold(content.trim_start_matches('\u{feff}'));

    let starts_with_vcalendar = unfolded
        .trim_start()
        .get(..15)
        .is_some_and(|head| head.eq_ignore_ascii_case("BEGIN:VCALENDAR"));
    if !starts_with_vcalendar {
        return Err(IcsFilterError::Codec(
            "document does not start with BEGIN:VCALENDAR".into(),
        ));
    }

    let calendar = read_calendar(&unfolded).map_err(|e| IcsFilterError::Codec(e.to_string()))?;

    Ok(Calendar {
        properties: calendar.properties.iter().map(to_property).collect(),
        components: calendar.components.iter().map(to_component).collect(),
    })
}

fn to_component(component: &parser::Component) -> Component {
    Component {
        name: component.name.to_string(),
        properties: component.properties.iter().map(to_property).collect(),
        components: component.components.iter().map(to_component).collect(),
    }
}

fn to_property(property: &parser::Property) -> Property {
    let params = property
        .params
        .iter()
        .map(|p| (p.key.to_string(), p.val.as_ref().map(|v| v.to_string())))
        .collect();

    Property {
        name: property.name.to_string(),
        params,
        value: property.val.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example//Team Calendar//EN\r\n\
X-WR-CALNAME:Team\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:Europe/Paris\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\n\
UID:standup@example.com\r\n\
SUMMARY:Standup\r\n\
DTSTART;TZID=Europe/Paris:20240108T093000\r\n\
DTEND;TZID=Europe/Paris:20240108T094500\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
TRIGGER:-PT5M\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:lunch@example.com\r\n\
SUMMARY:Lunch\\, team\r\n\
LOCATION:Cafeteria\r\n\
DTSTART:20240108T120000Z\r\n\
DTEND:20240108T130000Z\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    #[test]
    fn test_parse_calendar_properties_and_components() {
        let calendar = parse_calendar(SAMPLE).expect("Should parse");

        let names: Vec<&str> = calendar.properties.iter().map(|p| p.name.as_str()).collect();
        assert!(names.contains(&"VERSION"));
        assert!(names.contains(&"X-WR-CALNAME"));

        let components: Vec<&str> = calendar.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(components, vec!["VTIMEZONE", "VEVENT", "VEVENT"]);
    }

    #[test]
    fn test_parse_keeps_nested_alarm_and_params() {
        let calendar = parse_calendar(SAMPLE).expect("Should parse");
        let standup = &calendar.components[1];

        assert_eq!(standup.components.len(), 1);
        assert_eq!(standup.components[0].name, "VALARM");

        let dtstart = standup.find_prop("DTSTART").expect("Should have DTSTART");
        assert_eq!(dtstart.param("TZID"), Some("Europe/Paris"));
        assert_eq!(dtstart.value, "20240108T093000");
    }

    #[test]
    fn test_parse_unescapes_titles() {
        let calendar = parse_calendar(SAMPLE).expect("Should parse");
        assert_eq!(calendar.event_titles(), vec!["Standup", "Lunch, team"]);
    }

    #[test]
    fn test_parse_unfolds_long_summary() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:folded@example.com\r\n\
SUMMARY:Quarterly planning \r\n with the whole team\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let calendar = parse_calendar(ics).expect("Should parse");
        assert_eq!(
            calendar.event_titles(),
            vec!["Quarterly planning with the whole team"]
        );
    }

    #[test]
    fn test_parse_rejects_non_calendar() {
        let err = parse_calendar("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, IcsFilterError::Codec(_)));
    }

    #[test]
    fn test_parse_event_without_summary() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:untitled@example.com\r\n\
DTSTART:20240108T120000Z\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let calendar = parse_calendar(ics).expect("Should parse");
        assert_eq!(calendar.events().count(), 1);
        assert_eq!(calendar.components[0].title(), None);
    }
}
