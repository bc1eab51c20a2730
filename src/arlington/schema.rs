use super::api::{APIError, ArlingtonAPI};
use super::dto::ResponseEvent;
use crate::schema::EventRecord;
use crate::text::{html_to_text, parse_event_name, schematize_date};

const ORGANIZER: &str = "Arlington Parks";
const TIMEZONE: &str = "America/New_York";
const EXCLUDED_NAME_MARKERS: [&str; 2] = ["Task Force", "Forestry Commission"];
const EXCLUDED_VENUE: &str = "Earth Products Yard";
const EXCLUDED_VENUE_MARKER: &str = "Library";

/// Maps the raw API items into the canonical schema, applying the name and
/// venue exclusion rules. Events without a direct website go through the
/// search-by-name backfill, which is the only fallible step.
pub async fn schematize_events(
    events: &[ResponseEvent],
    api: &ArlingtonAPI,
) -> Result<Vec<EventRecord>, APIError> {
    let mut records = Vec::new();

    for event in events {
        let name = parse_event_name(&event.name);

        if EXCLUDED_NAME_MARKERS.iter().any(|marker| name.contains(marker)) {
            continue;
        }

        let venue = html_to_text(&event.location_name);

        if venue == EXCLUDED_VENUE || venue.contains(EXCLUDED_VENUE_MARKER) || venue.is_empty() {
            continue;
        }

        let start_date = schematize_date(&event.start_date);
        let end_date = schematize_date(&event.end_date);

        let cost = if event.free_of_charge {
            "0".to_string()
        } else if !event.cost_description.is_empty() {
            event
                .cost_description
                .chars()
                .filter(|c| c.is_ascii_digit())
                .collect()
        } else {
            String::new()
        };

        let website = if event.url.is_empty() {
            api.get_event_website(&name, &start_date, &end_date).await?
        } else {
            Some(event.url.clone())
        };

        records.push(EventRecord {
            start_date,
            end_date,
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone(),
            website,
            name,
            venue,
            cost,
            description: html_to_text(&event.description),
            timezone: TIMEZONE.to_string(),
            organizers: ORGANIZER.to_string(),
            currency_symbol: "$".to_string(),
            all_day: false,
            category: String::new(),
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, venue: &str) -> ResponseEvent {
        ResponseEvent {
            name: name.to_string(),
            description: "<p>Meet at the entrance.</p>".to_string(),
            start_date: "2019-01-25T00:00:00".to_string(),
            end_date: "2019-01-25T00:00:00".to_string(),
            start_time: "09:00:00".to_string(),
            end_time: "11:00:00".to_string(),
            url: "https://parks.arlingtonva.us/event".to_string(),
            free_of_charge: false,
            cost_description: String::new(),
            location_name: venue.to_string(),
        }
    }

    #[test_log::test(tokio::test)]
    async fn should_exclude_library_venues() {
        let events = [event("Bird Walk", "Arlington Central Library")];

        let records = schematize_events(&events, &ArlingtonAPI::default())
            .await
            .unwrap();

        assert!(records.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn should_exclude_the_earth_products_yard_and_textless_venues() {
        let events = [
            event("Mulch Giveaway", "Earth Products Yard"),
            event("Mystery Meetup", "<p>Activity # 622710</p>"),
        ];

        let records = schematize_events(&events, &ArlingtonAPI::default())
            .await
            .unwrap();

        assert!(records.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn should_keep_an_event_whose_location_is_missing_entirely() {
        let records = schematize_events(
            &[event("Bird Walk", "")],
            &ArlingtonAPI::default(),
        )
        .await
        .unwrap();

        // An absent location carries the fallback text instead of being dropped
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].venue, "See event website.");
    }

    #[test_log::test(tokio::test)]
    async fn should_exclude_committee_meetings_by_name() {
        let events = [
            event("Urban Forestry Commission Meeting", "Barcroft Park"),
            event("Park Task Force Session", "Barcroft Park"),
        ];

        let records = schematize_events(&events, &ArlingtonAPI::default())
            .await
            .unwrap();

        assert!(records.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn should_mark_free_events_with_a_zero_cost() {
        let mut free_event = event("Bird Walk", "Long Branch Nature Center");
        free_event.free_of_charge = true;

        let records = schematize_events(&[free_event], &ArlingtonAPI::default())
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cost, "0");
    }

    #[test_log::test(tokio::test)]
    async fn should_extract_the_digits_from_a_cost_description() {
        let mut paid_event = event("Campfire Night", "Gulf Branch Nature Center");
        paid_event.cost_description = "$5 per participant".to_string();

        let records = schematize_events(&[paid_event], &ArlingtonAPI::default())
            .await
            .unwrap();

        assert_eq!(records[0].cost, "5");
    }

    #[test_log::test(tokio::test)]
    async fn should_fill_the_per_source_constants() {
        let records = schematize_events(
            &[event("Bird Walk", "Long Branch Nature Center")],
            &ArlingtonAPI::default(),
        )
        .await
        .unwrap();

        let record = &records[0];

        assert_eq!(record.start_date, "2019-01-25");
        assert_eq!(record.organizers, "Arlington Parks");
        assert_eq!(record.timezone, "America/New_York");
        assert_eq!(record.currency_symbol, "$");
        assert!(!record.all_day);
    }
}
