use super::model::{ExtractedEvent, FieldValue};
use itertools::Itertools;
use lazy_static::lazy_static;
use reqwest::Client;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::BTreeMap;
use tracing::info;

pub const PATC_BASE_URL: &str = "https://www.patc.net/PATC/Calendar/PATC/";
const CALENDAR_INDEX_PATH: &str =
    "Custom/Calendar.aspx?hkey=9fc06544-1c54-4a47-9efc-8fcd2420a646";
const DETAIL_LINK_MARKER: &str = "calendar.aspx";
const LABEL_KEYWORDS: [&str; 4] = ["Start Time", "Start Date", "Event Category", "www"];

lazy_static! {
    static ref REST_CLIENT: Client = Client::new();
    static ref ANCHOR: Selector = Selector::parse("a").expect("Failed to parse selector");
    static ref TABLE_HEADER: Selector = Selector::parse("th").expect("Failed to parse selector");
    static ref PARAGRAPH: Selector = Selector::parse("p").expect("Failed to parse selector");
    static ref LABEL: Selector = Selector::parse("strong").expect("Failed to parse selector");
}

#[derive(Debug)]
pub struct PatcAPI {
    base_url: String,
}

impl Default for PatcAPI {
    fn default() -> Self {
        Self::new(PATC_BASE_URL.to_string())
    }
}

impl PatcAPI {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    /**
    Crawls the calendar index and scrapes every linked detail page.

    Detail pages missing the expected markup are skipped; a failing fetch
    or an ambiguous label propagates.
    */
    #[tracing::instrument(skip(self))]
    pub async fn get_events(&self) -> Result<Vec<ExtractedEvent>, APIError> {
        let index = self.fetch_page(CALENDAR_INDEX_PATH).await?;
        let detail_paths = extract_detail_paths(&index);
        let mut events = Vec::new();

        for path in detail_paths {
            let page = self.fetch_page(&path).await?;

            // Faulty calendar events that cannot be parsed are skipped
            if let Some(event) = extract_event_fields(&page)? {
                events.push(event);
            }
        }

        Ok(events)
    }

    async fn fetch_page(&self, subpath: &str) -> Result<String, APIError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), subpath);

        REST_CLIENT
            .get(&url)
            .send()
            .await
            .map_err(APIError::Request)?
            .error_for_status()
            .map_err(APIError::Request)?
            .text()
            .await
            .map_err(APIError::Request)
    }
}

fn extract_detail_paths(index_html: &str) -> Vec<String> {
    let document = Html::parse_document(index_html);

    document
        .select(&ANCHOR)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| href.contains(DETAIL_LINK_MARKER))
        .filter_map(|href| href.rsplit('/').next())
        .inspect(|page| info!("found calendar event, {}", page))
        .map(|page| format!("Custom/{}", page))
        .collect()
}

/// Extracts the name (last table header), description (last paragraph) and
/// keyword fields from a detail page. Returns `None` when the page lacks the
/// expected elements.
pub fn extract_event_fields(page_html: &str) -> Result<Option<ExtractedEvent>, APIError> {
    let document = Html::parse_document(page_html);

    let name = match document.select(&TABLE_HEADER).last() {
        Some(header) => header.text().collect::<String>().trim().to_string(),
        None => return Ok(None),
    };
    let description = match document.select(&PARAGRAPH).last() {
        Some(paragraph) => paragraph.text().collect::<String>().trim().to_string(),
        None => return Ok(None),
    };

    let mut fields = BTreeMap::new();

    for paragraph in document.select(&PARAGRAPH) {
        let paragraph_text: String = paragraph.text().collect();

        if !LABEL_KEYWORDS
            .iter()
            .any(|word| paragraph_text.contains(&format!("{}:", word)))
        {
            continue;
        }

        info!("found event info: {}", paragraph_text.trim());

        // Each keyword paragraph must carry exactly one emphasized label
        let label = paragraph
            .select(&LABEL)
            .exactly_one()
            .map_err(|_| APIError::AmbiguousLabel(paragraph_text.trim().to_string()))?;
        let label_text: String = label.text().collect();
        let category = label_text
            .rsplit_once(':')
            .map(|(before, _)| before)
            .unwrap_or("")
            .to_string();

        let value = if category == "www" {
            let link = paragraph
                .select(&ANCHOR)
                .exactly_one()
                .map_err(|_| APIError::AmbiguousLabel(paragraph_text.trim().to_string()))?;

            FieldValue::Link(link.value().attr("href").unwrap_or_default().to_string())
        } else {
            FieldValue::Text(trailing_text(&paragraph))
        };
        let cleaned: String = value
            .into_string()
            .chars()
            .filter(|c| c.is_ascii())
            .collect();

        fields.insert(category, cleaned.trim().to_string());
    }

    Ok(Some(ExtractedEvent {
        name,
        description,
        fields,
    }))
}

/// Text of the paragraph's trailing child, whether it is a bare text node
/// or a nested element.
fn trailing_text(paragraph: &ElementRef) -> String {
    match paragraph.last_child() {
        Some(node) => match node.value() {
            Node::Text(text) => text.to_string(),
            _ => ElementRef::wrap(node)
                .map(|element| element.text().collect())
                .unwrap_or_default(),
        },
        None => String::new(),
    }
}

#[derive(Debug)]
pub enum APIError {
    Request(reqwest::Error),
    AmbiguousLabel(String),
}
