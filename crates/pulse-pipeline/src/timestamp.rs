//! UTC normalization of ISO-8601-like timestamps.
//!
//! A value carrying an explicit offset is converted to UTC. A value without
//! one is *assigned* UTC as-is, not interpreted in the host's local zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Offset-bearing layouts tried after RFC 3339.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Naive layouts; `%.f` also matches a value with no fractional part.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses `raw` into a UTC timestamp.
///
/// Returns `None` for an empty string or anything that does not parse; the
/// caller decides whether that is worth reporting. A bare `YYYY-MM-DD`
/// date is read as midnight UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // A trailing `Z` after a space-separated time is not RFC 3339 but is
    // common enough in exports to accept.
    if let Some(naive) = s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        if let Some(dt) = parse_naive(naive) {
            return Some(dt.and_utc());
        }
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    if let Some(naive) = parse_naive(s) {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}
