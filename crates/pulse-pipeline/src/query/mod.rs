//! Query layer over a normalized dataset: filter, then sort.
//!
//! Neither operation mutates a record. Filtering returns an order-preserving
//! subsequence; sorting is stable.

mod filter;
mod sort;

use pulse_core::ActivityRecord;

pub use filter::{filter_records, parse_date_bound, ActivityFilter};
pub use sort::{sort_records, sort_records_by_name, SortDirection, SortKey, UnknownSortKey};

/// A filter plus an optional ordering, applied in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityQuery {
    pub filter: ActivityFilter,
    /// `None` keeps the filtered records in source order.
    pub sort: Option<(SortKey, SortDirection)>,
}

impl ActivityQuery {
    /// Runs the filter and then the sort over `records`.
    #[must_use]
    pub fn apply(&self, records: &[ActivityRecord]) -> Vec<ActivityRecord> {
        let filtered = filter_records(records, &self.filter);
        match self.sort {
            Some((key, direction)) => sort_records(filtered, key, direction),
            None => filtered,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{TimeZone, Utc};

    use super::*;

    fn record(text: &str, likes: u64, day: Option<u32>) -> ActivityRecord {
        ActivityRecord {
            author_name: "Jane Doe".to_string(),
            author_occupation: "Founder".to_string(),
            author_image_url: pulse_core::NOT_AVAILABLE.to_string(),
            author_profile_url: pulse_core::NOT_AVAILABLE.to_string(),
            post_text: text.to_string(),
            created_at: day.map(|d| Utc.with_ymd_and_hms(2024, 3, d, 12, 0, 0).unwrap()),
            likes,
            comments: 0,
            shares: 0,
            reactions: BTreeMap::new(),
            post_url: String::new(),
        }
    }

    #[test]
    fn default_query_is_identity() {
        let records = vec![record("a", 1, Some(1)), record("b", 2, None)];
        assert_eq!(ActivityQuery::default().apply(&records), records);
    }

    #[test]
    fn apply_filters_before_sorting() {
        let records = vec![
            record("launch recap", 3, Some(1)),
            record("hiring", 50, Some(2)),
            record("launch day", 9, Some(3)),
        ];
        let query = ActivityQuery {
            filter: ActivityFilter {
                search_text: Some("launch".to_string()),
                ..ActivityFilter::default()
            },
            sort: Some((SortKey::Likes, SortDirection::Descending)),
        };
        let texts: Vec<String> = query
            .apply(&records)
            .into_iter()
            .map(|r| r.post_text)
            .collect();
        assert_eq!(texts, vec!["launch day", "launch recap"]);
    }

    #[test]
    fn apply_on_empty_dataset_is_empty() {
        let query = ActivityQuery {
            filter: ActivityFilter {
                min_engagement: Some(1),
                ..ActivityFilter::default()
            },
            sort: Some((SortKey::CreatedAt, SortDirection::Ascending)),
        };
        assert!(query.apply(&[]).is_empty());
    }
}
