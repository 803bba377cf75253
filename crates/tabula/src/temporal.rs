//! Date and datetime parsing for `date`/`datetime` columns.
//!
//! All instants are naive UTC. Numbers and [`Timestamp`](crate::Timestamp)s are
//! milliseconds since the Unix epoch; text accepts RFC 3339 and the common
//! ISO-like layouts.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::column::DataType;
use crate::value::Value;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a textual date or datetime.
pub fn parse_instant_str(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Reads a field value as an instant.
pub fn parse_instant(value: &Value<'_>) -> Option<NaiveDateTime> {
    match value {
        Value::Timestamp(ts) => from_millis(ts.as_millis()),
        Value::Number(n) => from_millis(n.to_f64() as i64),
        Value::String(s) => parse_instant_str(s),
        _ => None,
    }
}

fn from_millis(millis: i64) -> Option<NaiveDateTime> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
}

/// Truncates to the start of the day for `date` columns; other types keep the
/// full instant.
pub fn truncate(instant: NaiveDateTime, data_type: DataType) -> NaiveDateTime {
    match data_type {
        DataType::Date => instant.date().and_time(NaiveTime::MIN),
        _ => instant,
    }
}

/// Parses a field value and truncates it for the data type.
pub fn instant_for(value: &Value<'_>, data_type: DataType) -> Option<NaiveDateTime> {
    parse_instant(value).map(|i| truncate(i, data_type))
}

/// Parses an operand and truncates it for the data type.
pub fn operand_instant(text: &str, data_type: DataType) -> Option<NaiveDateTime> {
    parse_instant_str(text).map(|i| truncate(i, data_type))
}
