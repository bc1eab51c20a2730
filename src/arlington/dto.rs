use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct EventSearchResponse {
    pub count: usize,
    pub items: Vec<ResponseEventItem>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseEventItem {
    #[serde(rename = "vwEventWithLocation")]
    pub event: ResponseEvent,
}

// Note: the String fields need the custom deserializer due to being nullable
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEvent {
    #[serde(rename = "eventName", deserialize_with = "deserialize_str", default)]
    pub name: String,
    #[serde(rename = "eventDsc", deserialize_with = "deserialize_str", default)]
    pub description: String,
    #[serde(rename = "eventStartDate", deserialize_with = "deserialize_str", default)]
    pub start_date: String,
    #[serde(rename = "eventEndDate", deserialize_with = "deserialize_str", default)]
    pub end_date: String,
    #[serde(rename = "eventStartTime", deserialize_with = "deserialize_str", default)]
    pub start_time: String,
    #[serde(rename = "eventEndTime", deserialize_with = "deserialize_str", default)]
    pub end_time: String,
    #[serde(rename = "eventUrlText", deserialize_with = "deserialize_str", default)]
    pub url: String,
    #[serde(rename = "freeOfChargeInd", deserialize_with = "deserialize_bool", default)]
    pub free_of_charge: bool,
    #[serde(rename = "eventCostDsc", deserialize_with = "deserialize_str", default)]
    pub cost_description: String,
    #[serde(rename = "locationName", deserialize_with = "deserialize_str", default)]
    pub location_name: String,
}

fn deserialize_str<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn deserialize_bool<'de, D>(d: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => b,
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn should_deserialize_an_event_with_null_fields() {
        let response = serde_json::from_str::<EventSearchResponse>(
            r##"
              {
                "count": 1,
                "items": [{
                  "vwEventWithLocation": {
                    "eventName": "Bird Walk at Long Branch",
                    "eventDsc": "<p>Meet at the nature center.</p>",
                    "eventStartDate": "2019-01-25T00:00:00",
                    "eventEndDate": "2019-01-25T00:00:00",
                    "eventStartTime": "09:00:00",
                    "eventEndTime": "11:00:00",
                    "eventUrlText": null,
                    "freeOfChargeInd": null,
                    "eventCostDsc": null,
                    "locationName": "Long Branch Nature Center"
                  }
                }]
              }"##,
        );

        assert!(response.is_ok(), "{:?}", response);

        let response = response.unwrap();

        assert_eq!(response.count, 1);

        let event = &response.items.first().unwrap().event;

        assert_eq!(event.name, "Bird Walk at Long Branch");
        assert_eq!(event.url, "");
        assert!(!event.free_of_charge);
        assert_eq!(event.cost_description, "");
    }
}
