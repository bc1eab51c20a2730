use super::dto::{EventSearchResponse, ResponseEvent};
use crate::text::schematize_date;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use reqwest::Client;
use tracing::{error, info};

pub const ARLINGTON_API_URL: &str =
    "https://today-service.arlingtonva.us/api/event/elasticevent";
const PAGE_SIZE: usize = 5;
const TOPICS: [Topic; 2] = [Topic::Animals, Topic::Environment];

lazy_static! {
    static ref REST_CLIENT: Client = Client::new();
}

#[derive(strum::IntoStaticStr, Debug, Clone, Copy)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Topic {
    Animals,
    Environment,
}

#[derive(Debug)]
pub struct ArlingtonAPI {
    base_url: String,
}

impl Default for ArlingtonAPI {
    fn default() -> Self {
        Self::new(ARLINGTON_API_URL.to_string())
    }
}

impl ArlingtonAPI {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    /**
    Fetches every animals/environment event starting from the given date,
    page by page, in the order the API returns them.

    A transport error on the first request is logged and yields an empty
    list; any error on a later page propagates.
    */
    #[tracing::instrument(skip(self))]
    pub async fn get_events(&self, start_date: NaiveDate) -> Result<Vec<ResponseEvent>, APIError> {
        let first_page = match self.request_page(start_date, 0).await {
            Ok(page) => page,
            Err(APIError::Request(err)) => {
                error!("Exception making GET request to {}: {}", self.base_url, err);
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };

        let count = first_page.count;

        info!("Getting {} events", count);

        let mut events: Vec<ResponseEvent> = first_page
            .items
            .into_iter()
            .map(|item| item.event)
            .collect();
        let mut from = PAGE_SIZE;

        // The offset always advances by the page size, even when the server
        // returns a short page before count is reached.
        while from < count {
            let page = self.request_page(start_date, from).await?;

            events.extend(page.items.into_iter().map(|item| item.event));
            from += PAGE_SIZE;
        }

        Ok(events)
    }

    /// Looks up an event's website by searching on its name and keeping the
    /// first result whose normalized start and end dates both match exactly.
    #[tracing::instrument(skip(self))]
    pub async fn get_event_website(
        &self,
        event_name: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Option<String>, APIError> {
        let response = REST_CLIENT
            .get(&self.base_url)
            .query(&[("SearchTerm", event_name)])
            .send()
            .await
            .map_err(APIError::Request)?;
        let results = response
            .json::<EventSearchResponse>()
            .await
            .map_err(|err| {
                error!("Response parse failed: {:?}", err);
                APIError::InvalidResponse
            })?;

        Ok(results
            .items
            .into_iter()
            .map(|item| item.event)
            .find(|event| {
                schematize_date(&event.start_date) == start_date
                    && schematize_date(&event.end_date) == end_date
            })
            .map(|event| event.url))
    }

    async fn request_page(
        &self,
        start_date: NaiveDate,
        from: usize,
    ) -> Result<EventSearchResponse, APIError> {
        let mut params: Vec<(&str, String)> = vec![
            (
                "StartDate",
                format!("{}T05:00:00.000Z", start_date.format("%Y-%m-%d")),
            ),
            ("EndDate", "null".to_string()),
        ];

        for topic in TOPICS {
            let topic: &'static str = topic.into();

            params.push(("TopicCode", topic.to_string()));
        }

        params.extend([
            ("ParkingAvailable", "false".to_string()),
            ("NearBus", "false".to_string()),
            ("NearRail", "false".to_string()),
            ("NearBikeShare", "false".to_string()),
            ("From", from.to_string()),
            ("Size", PAGE_SIZE.to_string()),
            ("OrderBy", "featured".to_string()),
            ("EndTime", "86400000".to_string()),
        ]);

        let response = REST_CLIENT
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(APIError::Request)?;

        response.json::<EventSearchResponse>().await.map_err(|err| {
            error!("Response parse failed: {:?}", err);
            APIError::InvalidResponse
        })
    }
}

#[derive(Debug)]
pub enum APIError {
    Request(reqwest::Error),
    InvalidResponse,
}
