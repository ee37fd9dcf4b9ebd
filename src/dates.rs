//! Display formatting for manifest timestamps and item dates.
//!
//! Neither formatter rejects bad input: an unparseable string renders with
//! `NaN` fields, the same way a browser prints an invalid `Date`.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a date or timestamp into local wall-clock time.
///
/// Offsets are converted to the local zone. Naive date-times are taken as
/// local already, and bare dates as local midnight.
pub fn parse_local(input: &str) -> Option<NaiveDateTime> {
    let s = input.trim();
    if s.is_empty() { return None; }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    if let Some(dt) = NAIVE_FORMATS.iter().find_map(|f| NaiveDateTime::parse_from_str(s, f).ok()) {
        return Some(dt);
    }
    DATE_FORMATS.iter().find_map(|f| NaiveDate::parse_from_str(s, f).ok())?.and_hms_opt(0, 0, 0)
}

/// `2024-03-05` -> `2024年3月5日`.
pub fn format_date(input: &str) -> String {
    match parse_local(input) {
        Some(d) => format!("{}年{}月{}日", d.year(), d.month(), d.day()),
        None => "NaN年NaN月NaN日".to_string(),
    }
}

/// `YYYY-MM-DD HH:MM` for the "last updated" display. `None` or an empty
/// string means now.
pub fn format_timestamp(timestamp: Option<&str>) -> String {
    format_timestamp_at(timestamp, Local::now().naive_local())
}

pub fn format_timestamp_at(timestamp: Option<&str>, now: NaiveDateTime) -> String {
    let parsed = match timestamp {
        Some(ts) if !ts.is_empty() => parse_local(ts),
        _ => Some(now),
    };
    match parsed {
        Some(d) => d.format("%Y-%m-%d %H:%M").to_string(),
        None => "NaN-NaN-NaN NaN:NaN".to_string(),
    }
}
