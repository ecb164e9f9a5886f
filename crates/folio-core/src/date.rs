//! Date normalization for front-matter values.
//!
//! Listings sort on the normalized string, so every kind of content funnels
//! its `date` field through [`format_date`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_yaml::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Normalize a front-matter date value to `YYYY-MM-DD`.
///
/// - absent, null, `false`, `0` or an empty string → `""`
/// - a date or timestamp scalar → its UTC calendar date
/// - anything else → its string form, unvalidated
pub fn format_date(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "true".to_string(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => match parse_native_date(s) {
            Some(date) => format_naive_date(date),
            None => s.clone(),
        },
        Value::Sequence(items) => items
            .iter()
            .map(|item| format_date(Some(item)))
            .collect::<Vec<_>>()
            .join(","),
        Value::Mapping(_) => serde_json::to_string(value).unwrap_or_default(),
        Value::Tagged(tagged) => format_date(Some(&tagged.value)),
    }
}

/// Format a calendar date as `YYYY-MM-DD`.
pub fn format_naive_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format the UTC date portion of a timestamp as `YYYY-MM-DD`.
pub fn format_datetime(datetime: DateTime<Utc>) -> String {
    format_naive_date(datetime.date_naive())
}

/// Recognize the scalars YAML front-matter treats as timestamps.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (offsets are folded into UTC)
/// and offset-less `YYYY-MM-DD[T ]HH:MM:SS[.f]` which are taken as UTC.
pub fn parse_native_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if is_calendar_date(s) {
        return NaiveDate::parse_from_str(s, DATE_FORMAT).ok();
    }

    // Everything below starts with a full calendar date.
    if !s.get(..10).is_some_and(is_calendar_date) {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
        return Some(datetime.with_timezone(&Utc).date_naive());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|datetime| datetime.date())
}

/// `YYYY-MM-DD` with zero-padded fields.
fn is_calendar_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
