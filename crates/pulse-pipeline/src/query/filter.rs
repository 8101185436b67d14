use chrono::{DateTime, NaiveDate, Utc};
use pulse_core::{is_placeholder, ActivityRecord};

use crate::timestamp::parse_timestamp;

/// Filter criteria. Every field is optional; an absent criterion keeps all
/// records on that axis, and supplied criteria are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityFilter {
    /// Inclusive lower bound on `created_at`.
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`.
    pub end_date: Option<DateTime<Utc>>,
    /// Inclusive lower bound on total engagement.
    pub min_engagement: Option<u64>,
    /// Case-insensitive substring matched against post text, author name,
    /// and author occupation. An empty string disables the search.
    pub search_text: Option<String>,
}

impl ActivityFilter {
    /// Date window covering whole calendar days: `start` from 00:00:00 UTC
    /// through `end` at 23:59:59 UTC.
    #[must_use]
    pub fn for_date_range(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: start.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()),
            end_date: end.and_hms_opt(23, 59, 59).map(|dt| dt.and_utc()),
            ..Self::default()
        }
    }

    /// Returns `true` if either date bound is set.
    #[must_use]
    pub fn has_date_bounds(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Returns `true` if `record` satisfies every supplied criterion.
    #[must_use]
    pub fn matches(&self, record: &ActivityRecord) -> bool {
        self.matches_with_needle(record, self.search_needle().as_deref())
    }

    fn matches_with_needle(&self, record: &ActivityRecord, needle: Option<&str>) -> bool {
        self.matches_dates(record)
            && self
                .min_engagement
                .map_or(true, |min| record.total_engagement() >= min)
            && needle.map_or(true, |n| matches_search(record, n))
    }

    /// A record without `created_at` cannot be shown to fall inside a window,
    /// so it is dropped whenever any bound is present.
    fn matches_dates(&self, record: &ActivityRecord) -> bool {
        if !self.has_date_bounds() {
            return true;
        }
        let Some(created_at) = record.created_at else {
            return false;
        };
        self.start_date.map_or(true, |start| created_at >= start)
            && self.end_date.map_or(true, |end| created_at <= end)
    }

    /// Lowercased search text, or `None` when search is disabled.
    fn search_needle(&self) -> Option<String> {
        self.search_text
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// Placeholder author fields count as absent and never match.
fn matches_search(record: &ActivityRecord, needle: &str) -> bool {
    [
        record.post_text.as_str(),
        record.author_name.as_str(),
        record.author_occupation.as_str(),
    ]
    .into_iter()
    .filter(|field| !field.is_empty() && !is_placeholder(field))
    .any(|field| field.to_lowercase().contains(needle))
}

/// Returns the records matching `filter`, in their original relative order.
#[must_use]
pub fn filter_records(records: &[ActivityRecord], filter: &ActivityFilter) -> Vec<ActivityRecord> {
    let needle = filter.search_needle();
    records
        .iter()
        .filter(|record| filter.matches_with_needle(record, needle.as_deref()))
        .cloned()
        .collect()
}

/// Parses a textual date bound with the same rules as record timestamps:
/// an explicit offset is converted to UTC, a naive value is taken as UTC.
#[must_use]
pub fn parse_date_bound(raw: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(raw)
}
