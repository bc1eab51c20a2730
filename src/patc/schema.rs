use super::model::ExtractedEvent;
use crate::schema::EventRecord;
use chrono::{NaiveDate, NaiveTime};
use tracing::error;

const ORGANIZER: &str = "Potomac Appalachian Trail Club";
const TIMEZONE: &str = "America/New_York";
const DEFAULT_VENUE: &str = "Please refer to website";
const DEFAULT_END_TIME: &str = "23:59:59";

const DATE_FORMATS: [&str; 6] = [
    "%m/%d/%Y",
    "%m/%d/%y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%Y-%m-%d",
    "%d %B %Y",
];
const TIME_FORMATS: [&str; 4] = ["%I:%M %p", "%I:%M:%S %p", "%H:%M:%S", "%H:%M"];

/// Applies the club-wide defaults to every record and derives the normalized
/// date and time columns from the extracted raw strings.
pub fn schematize_events(events: Vec<ExtractedEvent>) -> Vec<EventRecord> {
    events
        .into_iter()
        .map(|event| {
            let date = event
                .fields
                .get("Start Date")
                .map(|raw| format_date(raw))
                .unwrap_or_default();
            let start_time = event
                .fields
                .get("Start Time")
                .map(|raw| format_time(raw))
                .unwrap_or_default();

            EventRecord {
                start_date: date.clone(),
                // Single-day calendar entries: the end date mirrors the start
                end_date: date,
                start_time,
                end_time: DEFAULT_END_TIME.to_string(),
                website: event.fields.get("www").cloned(),
                name: event.name,
                venue: DEFAULT_VENUE.to_string(),
                cost: "0".to_string(),
                description: event.description,
                timezone: TIMEZONE.to_string(),
                organizers: ORGANIZER.to_string(),
                currency_symbol: "$".to_string(),
                all_day: false,
                category: event.fields.get("Event Category").cloned().unwrap_or_default(),
            }
        })
        .collect()
}

fn format_date(raw: &str) -> String {
    let raw = raw.trim();

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| {
            error!("Failed to parse date '{}'", raw);
            String::new()
        })
}

fn format_time(raw: &str) -> String {
    let raw = raw.trim();

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
        .map(|time| time.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| {
            error!("Failed to parse time '{}'", raw);
            String::new()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn extracted(fields: &[(&str, &str)]) -> ExtractedEvent {
        ExtractedEvent {
            name: "Morning Hike".to_string(),
            description: "Join us for a morning hike.".to_string(),
            fields: fields
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test_log::test]
    fn should_apply_the_club_defaults_to_every_record() {
        let records = schematize_events(vec![extracted(&[
            ("Start Date", "1/25/2019"),
            ("Start Time", "7:30 AM"),
        ])]);

        let record = &records[0];

        assert_eq!(record.currency_symbol, "$");
        assert_eq!(record.timezone, "America/New_York");
        assert_eq!(record.organizers, "Potomac Appalachian Trail Club");
        assert_eq!(record.venue, "Please refer to website");
        assert_eq!(record.end_time, "23:59:59");
        assert_eq!(record.cost, "0");
        assert!(!record.all_day);
    }

    #[test_log::test]
    fn should_normalize_slash_and_written_out_dates() {
        let records = schematize_events(vec![
            extracted(&[("Start Date", "1/25/2019"), ("Start Time", "7:30 AM")]),
            extracted(&[("Start Date", "January 26, 2019"), ("Start Time", "16:00")]),
        ]);

        assert_eq!(records[0].start_date, "2019-01-25");
        assert_eq!(records[0].end_date, "2019-01-25");
        assert_eq!(records[0].start_time, "07:30:00");
        assert_eq!(records[1].start_date, "2019-01-26");
        assert_eq!(records[1].start_time, "16:00:00");
    }

    #[test_log::test]
    fn should_substitute_an_empty_string_for_unparseable_dates() {
        let records = schematize_events(vec![extracted(&[
            ("Start Date", "whenever"),
            ("Start Time", "sunrise"),
        ])]);

        assert_eq!(records[0].start_date, "");
        assert_eq!(records[0].start_time, "");
    }

    #[test_log::test]
    fn should_map_the_category_and_website_fields() {
        let records = schematize_events(vec![extracted(&[
            ("Start Date", "1/25/2019"),
            ("Event Category", "Hiking"),
            ("www", "https://example.org/hike"),
        ])]);

        assert_eq!(records[0].category, "Hiking");
        assert_eq!(records[0].website.as_deref(), Some("https://example.org/hike"));
    }

    #[test_log::test]
    fn should_leave_missing_fields_empty() {
        let records = schematize_events(vec![extracted(&[])]);

        assert_eq!(records[0].start_date, "");
        assert_eq!(records[0].category, "");
        assert!(records[0].website.is_none());
    }
}
