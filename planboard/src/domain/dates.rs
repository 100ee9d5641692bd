use serde::{Deserialize, Deserializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Parse a calendar date as entered in a form or returned by the backend.
///
/// Accepts `YYYY-MM-DD` and full RFC 3339 timestamps (the date part is kept).
pub fn parse_date(input: &str) -> Result<Date, time::error::Parse> {
    let input = input.trim();
    match Date::parse(input, format_description!("[year]-[month]-[day]")) {
        Ok(date) => Ok(date),
        Err(err) => OffsetDateTime::parse(input, &Rfc3339)
            .map(|timestamp| timestamp.date())
            .map_err(|_| err),
    }
}

/// ISO-8601 calendar date, the wire format for project dates.
pub fn to_iso(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Human readable date, e.g. "Jan 15, 2025".
pub fn format_date(date: Date) -> String {
    date.format(format_description!(
        "[month repr:short] [day padding:none], [year]"
    ))
    .unwrap_or_else(|_| to_iso(date))
}

/// Truncate to `max_chars` characters, appending "..." when shortened.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}

pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(|e| serde::de::Error::custom(format!("invalid date {raw:?}: {e}")))
}
