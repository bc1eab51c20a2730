use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::error;

const MISSING_TEXT_FALLBACK: &str = "See event website.";
const BOILERPLATE_MARKER: &str = "Activity #";
const REMOVAL_PHRASE: &str = "Invasive Plant Removal";
const REMOVAL_ABBREVIATIONS: [&str; 2] = ["RiP", "RIP"];

lazy_static! {
    static ref MULTI_SPACE: Regex = Regex::new(" {2,}").expect("Failed to create space regex");
    static ref PARAGRAPH: Selector = Selector::parse("p").expect("Failed to parse selector");
}

/// Extracts the human-readable text from an HTML fragment.
///
/// Paragraphs carrying the registration boilerplate ("Activity #") are
/// dropped; fragments without paragraphs fall back to their full text.
pub fn html_to_text(html: &str) -> String {
    let text = if html.is_empty() {
        MISSING_TEXT_FALLBACK.to_string()
    } else {
        let fragment = Html::parse_fragment(html);
        let paragraphs: Vec<_> = fragment.select(&PARAGRAPH).collect();

        if paragraphs.is_empty() {
            fragment
                .root_element()
                .text()
                .collect::<String>()
                .trim()
                .to_string()
        } else {
            let mut joined = String::new();

            for paragraph in paragraphs {
                let paragraph_text: String = paragraph.text().collect();

                if !paragraph_text.contains(BOILERPLATE_MARKER) {
                    joined.push_str(&paragraph_text);
                    joined.push(' ');
                }
            }

            joined.trim().to_string()
        }
    };

    MULTI_SPACE.replace_all(&text, " ").to_string()
}

/// Rewrites the inconsistently abbreviated invasive-plant-removal event names
/// ("RIP", "RiP", or the spelled-out phrase) into the single canonical
/// "<base name> Invasive Plant Removal" form. Idempotent; names without any
/// marker only go through [`html_to_text`].
pub fn parse_event_name(event_name: &str) -> String {
    let has_marker = REMOVAL_ABBREVIATIONS
        .iter()
        .any(|abbreviation| event_name.contains(abbreviation))
        || event_name.contains(REMOVAL_PHRASE);

    if !has_marker {
        return html_to_text(event_name);
    }

    let ascii_only: String = event_name.chars().filter(|c| c.is_ascii()).collect();
    let mut name = MULTI_SPACE.replace_all(&ascii_only, "").to_string();

    for abbreviation in REMOVAL_ABBREVIATIONS {
        name = name.replace(abbreviation, "");
    }
    name = name.replace(" - ", "");

    if !event_name.contains(REMOVAL_PHRASE) {
        name = format!("{} {}", name, REMOVAL_PHRASE);
    }

    let name = MULTI_SPACE.replace_all(&name, " ").trim().to_string();

    html_to_text(&name)
}

/// Converts a `YYYY-MM-DDTHH:MM:SS` timestamp into its `YYYY-MM-DD` date.
/// Unparseable input logs and yields an empty string rather than aborting
/// the pipeline.
pub fn schematize_date(event_date: &str) -> String {
    match chrono::NaiveDateTime::parse_from_str(event_date, "%Y-%m-%dT%H:%M:%S") {
        Ok(parsed) => parsed.format("%Y-%m-%d").to_string(),
        Err(err) => {
            error!("Exception schematizing this {}: {}", event_date, err);
            String::new()
        }
    }
}
