//! Parsing of recency timestamps.
//!
//! The feeds are not consistent about timestamp shape: host `last_seen` is
//! RFC 3339 with a `Z` suffix, other fields arrive as bare dates. String
//! comparison is wrong across these shapes, so everything is parsed to an
//! instant before any ordering decision.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Parse a recency field into a comparable instant.
///
/// `None` for anything unparseable; the deduplicator treats `None` as the
/// minimum possible value so one malformed timestamp never aborts an
/// export.
pub fn parse_recency(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, format) {
            return Some(parsed.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}
