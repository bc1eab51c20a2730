use serde::Serialize;

/// Canonical event shape shared by every source. Serializes under the
/// human-readable column names of the ingest schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    #[serde(rename = "Event Start Date")]
    pub start_date: String,
    #[serde(rename = "Event End Date")]
    pub end_date: String,
    #[serde(rename = "Event Start Time")]
    pub start_time: String,
    #[serde(rename = "Event End Time")]
    pub end_time: String,
    #[serde(rename = "Event Website")]
    pub website: Option<String>,
    #[serde(rename = "Event Name")]
    pub name: String,
    #[serde(rename = "Event Venue Name")]
    pub venue: String,
    #[serde(rename = "Event Cost")]
    pub cost: String,
    #[serde(rename = "Event Description")]
    pub description: String,
    #[serde(rename = "Timezone")]
    pub timezone: String,
    #[serde(rename = "Event Organizers")]
    pub organizers: String,
    #[serde(rename = "Event Currency Symbol")]
    pub currency_symbol: String,
    #[serde(rename = "All Day Event")]
    pub all_day: bool,
    #[serde(rename = "Event Category")]
    pub category: String,
}
