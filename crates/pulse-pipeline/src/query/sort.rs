use std::cmp::Ordering;
use std::str::FromStr;

use pulse_core::ActivityRecord;
use thiserror::Error;

/// Fields a dataset can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
    TotalEngagement,
    Likes,
    Comments,
    Shares,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::CreatedAt,
        SortKey::TotalEngagement,
        SortKey::Likes,
        SortKey::Comments,
        SortKey::Shares,
    ];

    /// Column name of the key, e.g. `"total_engagement"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::CreatedAt => "created_at",
            SortKey::TotalEngagement => "total_engagement",
            SortKey::Likes => "likes",
            SortKey::Comments => "comments",
            SortKey::Shares => "shares",
        }
    }

    /// Looks up a key by column name. Unknown names return `None`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key \"{0}\"")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

/// Sort direction. Defaults to descending: newest or highest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Sorts `records` by `key` in `direction`.
///
/// The sort is stable: records with equal keys keep their input order in
/// both directions. When sorting by `created_at`, records without a
/// timestamp are placed last regardless of direction.
#[must_use]
pub fn sort_records(
    mut records: Vec<ActivityRecord>,
    key: SortKey,
    direction: SortDirection,
) -> Vec<ActivityRecord> {
    records.sort_by(|a, b| compare(a, b, key, direction));
    records
}

/// Sorts by a key given as a column name. An unrecognized name returns the
/// records unchanged.
#[must_use]
pub fn sort_records_by_name(
    records: Vec<ActivityRecord>,
    key: &str,
    ascending: bool,
) -> Vec<ActivityRecord> {
    match SortKey::parse(key) {
        Some(key) => sort_records(records, key, SortDirection::from_ascending(ascending)),
        None => records,
    }
}

fn compare(a: &ActivityRecord, b: &ActivityRecord, key: SortKey, direction: SortDirection) -> Ordering {
    match key {
        SortKey::CreatedAt => match (a.created_at, b.created_at) {
            (Some(x), Some(y)) => direction.apply(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::TotalEngagement => {
            direction.apply(a.total_engagement().cmp(&b.total_engagement()))
        }
        SortKey::Likes => direction.apply(a.likes.cmp(&b.likes)),
        SortKey::Comments => direction.apply(a.comments.cmp(&b.comments)),
        SortKey::Shares => direction.apply(a.shares.cmp(&b.shares)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{TimeZone, Utc};

    use super::*;

    fn record(id: &str, likes: u64, comments: u64, day: Option<u32>) -> ActivityRecord {
        ActivityRecord {
            author_name: "Author".to_string(),
            author_occupation: pulse_core::NOT_AVAILABLE.to_string(),
            author_image_url: pulse_core::NOT_AVAILABLE.to_string(),
            author_profile_url: pulse_core::NOT_AVAILABLE.to_string(),
            post_text: id.to_string(),
            created_at: day.map(|d| Utc.with_ymd_and_hms(2024, 5, d, 8, 0, 0).unwrap()),
            likes,
            comments,
            shares: 0,
            reactions: BTreeMap::new(),
            post_url: format!("https://example.com/{id}"),
        }
    }

    fn ids(records: &[ActivityRecord]) -> Vec<&str> {
        records.iter().map(|r| r.post_text.as_str()).collect()
    }

    #[test]
    fn sort_key_parse_round_trips_names() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(SortKey::parse("author_name"), None);
        assert_eq!(SortKey::parse("Likes"), None);
    }

    #[test]
    fn sort_key_from_str_names_the_bad_key() {
        assert_eq!("shares".parse::<SortKey>(), Ok(SortKey::Shares));
        let err = "views".parse::<SortKey>().unwrap_err();
        assert_eq!(err.to_string(), "unknown sort key \"views\"");
    }

    #[test]
    fn default_direction_is_descending() {
        assert_eq!(SortDirection::default(), SortDirection::Descending);
    }

    #[test]
    fn sort_by_likes_descending_and_ascending() {
        let records = vec![record("a", 5, 0, None), record("b", 9, 0, None), record("c", 1, 0, None)];
        let desc = sort_records(records.clone(), SortKey::Likes, SortDirection::Descending);
        assert_eq!(ids(&desc), vec!["b", "a", "c"]);
        let asc = sort_records(records, SortKey::Likes, SortDirection::Ascending);
        assert_eq!(ids(&asc), vec!["c", "a", "b"]);
    }

    #[test]
    fn sort_by_comments_and_shares_reads_their_own_counts() {
        let mut low_shares = record("low_shares", 0, 9, None);
        low_shares.shares = 1;
        let mut high_shares = record("high_shares", 0, 2, None);
        high_shares.shares = 8;
        let records = vec![low_shares, high_shares];

        let by_comments = sort_records(records.clone(), SortKey::Comments, SortDirection::Descending);
        assert_eq!(ids(&by_comments), vec!["low_shares", "high_shares"]);
        let by_shares = sort_records(records, SortKey::Shares, SortDirection::Descending);
        assert_eq!(ids(&by_shares), vec!["high_shares", "low_shares"]);
    }

    #[test]
    fn sort_by_total_engagement_uses_derived_sum() {
        let records = vec![record("a", 5, 0, None), record("b", 1, 10, None)];
        let out = sort_records(records, SortKey::TotalEngagement, SortDirection::Descending);
        assert_eq!(ids(&out), vec!["b", "a"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys_in_both_directions() {
        let records = vec![
            record("first", 3, 0, None),
            record("other", 7, 0, None),
            record("second", 3, 0, None),
            record("third", 3, 0, None),
        ];
        let desc = sort_records(records.clone(), SortKey::Likes, SortDirection::Descending);
        assert_eq!(ids(&desc), vec!["other", "first", "second", "third"]);
        let asc = sort_records(records, SortKey::Likes, SortDirection::Ascending);
        assert_eq!(ids(&asc), vec!["first", "second", "third", "other"]);
    }

    #[test]
    fn sort_by_created_at_puts_undated_last_in_both_directions() {
        let records = vec![
            record("undated-1", 0, 0, None),
            record("may-3", 0, 0, Some(3)),
            record("undated-2", 0, 0, None),
            record("may-1", 0, 0, Some(1)),
            record("may-2", 0, 0, Some(2)),
        ];
        let desc = sort_records(records.clone(), SortKey::CreatedAt, SortDirection::Descending);
        assert_eq!(
            ids(&desc),
            vec!["may-3", "may-2", "may-1", "undated-1", "undated-2"]
        );
        let asc = sort_records(records, SortKey::CreatedAt, SortDirection::Ascending);
        assert_eq!(
            ids(&asc),
            vec!["may-1", "may-2", "may-3", "undated-1", "undated-2"]
        );
    }

    #[test]
    fn sort_all_undated_keeps_input_order() {
        let records = vec![record("x", 0, 0, None), record("y", 0, 0, None)];
        let out = sort_records(records, SortKey::CreatedAt, SortDirection::Descending);
        assert_eq!(ids(&out), vec!["x", "y"]);
    }

    #[test]
    fn sort_by_unknown_name_is_noop() {
        let records = vec![record("a", 1, 0, None), record("b", 9, 0, None)];
        let out = sort_records_by_name(records.clone(), "popularity", false);
        assert_eq!(out, records);
    }

    #[test]
    fn sort_by_name_honours_ascending_flag() {
        let records = vec![record("a", 0, 4, None), record("b", 0, 2, None)];
        let out = sort_records_by_name(records, "comments", true);
        assert_eq!(ids(&out), vec!["b", "a"]);
    }

    #[test]
    fn sort_empty_is_empty() {
        assert!(sort_records(Vec::new(), SortKey::Shares, SortDirection::Ascending).is_empty());
    }
}
