//! Post date parsing and recency ordering.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-time layouts accepted in addition to RFC 3339.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parses a post date into a Unix timestamp in seconds.
///
/// Accepts RFC 3339 timestamps, plain `YYYY-MM-DD` dates (midnight UTC) and a few
/// offset-less date-time layouts (interpreted as UTC). Anything else is `None`.
pub fn parse_post_date(date: &str) -> Option<i64> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.timestamp());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date, format) {
            return Some(dt.and_utc().timestamp());
        }
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}

/// Orders two dates most recent first.
///
/// Valid dates sort descending and every unparseable or missing date sorts after all
/// valid ones. Two invalid dates compare equal; callers break that tie by id.
pub fn newest_first(a: &str, b: &str) -> Ordering {
    match (parse_post_date(a), parse_post_date(b)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
