//! Tolerant parsing of the textual values found in the source exports.
//!
//! Unparseable values become `None`; callers decide whether a row survives.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DAY_FIRST_FORMATS: [&str; 6] = [
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d/%m/%Y",
    "%d-%m-%Y",
];

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim().trim_matches('"').trim();
    (!value.is_empty()).then_some(value)
}

/// Parse an ISO-8601-like timestamp (`T` or space separated, optional
/// seconds/fraction/offset) or a plain `YYYY-MM-DD` date at midnight.
///
/// Offsets are normalized to UTC.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = non_empty(value)?;

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.naive_utc());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parse a day-first calendar date (`DD/MM/YYYY`, `DD-MM-YYYY`, optionally
/// followed by a time), falling back to ISO forms.
pub fn parse_day_first_date(value: &str) -> Option<NaiveDate> {
    let value = non_empty(value)?;

    DAY_FIRST_FORMATS
        .iter()
        .find_map(|fmt| {
            NaiveDateTime::parse_from_str(value, fmt)
                .map(|ts| ts.date())
                .or_else(|_| NaiveDate::parse_from_str(value, fmt))
                .ok()
        })
        .or_else(|| parse_timestamp(value).map(|ts| ts.date()))
}

/// Parse a finite number, accepting a decimal comma (`"12,5"`).
pub fn parse_number(value: &str) -> Option<f64> {
    let value = non_empty(value)?;

    let parsed = value.parse::<f64>().ok().or_else(|| {
        if value.contains('.') {
            None
        } else {
            value.replace(',', ".").parse::<f64>().ok()
        }
    })?;
    parsed.is_finite().then_some(parsed)
}
