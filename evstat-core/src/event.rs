//! Event rows as delivered by the data store.
//!
//! The store owns these records; evstat only ever reads a snapshot of them.
//! Date columns are kept as the raw strings the store returned so that a
//! malformed row can be reported instead of silently defaulted. Parsing into
//! a typed window happens once, in `DateWindow::for_event`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A calendar-bound event (exhibition, market day, festival, ...)
///
/// Columns are read leniently: null becomes empty, and a number or other
/// non-string value is kept as its JSON text. A row with odd columns still
/// loads, and a bad date is rejected for that row alone by `DateWindow`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: String,

    // Scheduling
    /// First day of the event. Missing or null comes through as an empty
    /// string and is rejected at classification time, not at load time.
    #[serde(default, alias = "startDate", deserialize_with = "deserialize_text")]
    pub start_date: String,
    /// Last day of the event; absent or empty means a single-day event
    #[serde(
        default,
        alias = "endDate",
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<String>,
    /// Display-only wall-clock time, e.g. "19:30"
    #[serde(
        default,
        alias = "startTime",
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<String>,

    // Payload
    #[serde(default, deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        alias = "imageUrl",
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
}

impl Event {
    pub fn new(id: impl Into<String>, title: impl Into<String>, start_date: impl Into<String>) -> Self {
        Event {
            id: id.into(),
            title: title.into(),
            start_date: start_date.into(),
            end_date: None,
            start_time: None,
            location: None,
            category: None,
            description: None,
            image_url: None,
        }
    }

    pub fn with_end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// The end date column, treating blank strings as absent.
    pub fn end_date(&self) -> Option<&str> {
        self.end_date.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Text fields covered by free-text search.
    pub(crate) fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str()).chain(
            [&self.location, &self.category, &self.description]
                .into_iter()
                .filter_map(|f| f.as_deref()),
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Text of a JSON value: strings as-is, numbers and other values as their JSON form.
///
/// Ids come back as integers from serial columns and as strings from uuid columns.
fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_text(Value::deserialize(deserializer)?))
}
