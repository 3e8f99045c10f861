use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::common::Identified;
use super::image::Image;

/// Format used by date inputs and event payloads.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// A club event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: u32,
    pub name: String,
    #[serde(with = "event_date")]
    pub date: NaiveDateTime,
    pub description: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

/// Body of an event create or update. Only the calendar day is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    pub name: String,
    pub date: NaiveDate,
    pub description: String,
}

impl Event {
    /// The event date as a date-input value (`YYYY-MM-DD`).
    pub fn date_input_value(&self) -> String {
        self.date.format(DATE_INPUT_FORMAT).to_string()
    }

    pub fn payload(&self) -> EventPayload {
        EventPayload {
            name: self.name.clone(),
            date: self.date.date(),
            description: self.description.clone(),
        }
    }
}

impl Identified for Event {
    fn id(&self) -> u32 {
        self.id
    }
}

/// Parse an event timestamp as the backend may send it: RFC 3339, a naive
/// ISO datetime with optional fraction, or a bare date.
pub fn parse_event_date(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    // Keep the wall-clock time of the given offset; the day a date input
    // shows must be the day the event happens there.
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(input, DATE_INPUT_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

mod event_date {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&date.format("%Y-%m-%dT%H:%M:%S"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_event_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("unrecognised event date `{raw}`")))
    }
}
