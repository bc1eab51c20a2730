use std::collections::BTreeMap;

/// Fields pulled off one calendar detail page, keyed by label keyword,
/// before normalization into the canonical schema.
#[derive(Debug, Clone)]
pub struct ExtractedEvent {
    pub name: String,
    pub description: String,
    pub fields: BTreeMap<String, String>,
}

/// A keyword paragraph's value is either its trailing plain text or a
/// link-bearing element whose href is the value.
#[derive(Debug)]
pub enum FieldValue {
    Text(String),
    Link(String),
}

impl FieldValue {
    pub fn into_string(self) -> String {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Link(href) => href,
        }
    }
}
