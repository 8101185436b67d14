use std::collections::BTreeMap;

use pulse_core::ActivityRecord;
use serde::Serialize;

/// Headline numbers for a (usually filtered) dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_posts: usize,
    pub total_engagement: u64,
    /// Mean engagement per post, rounded to two decimals. `0.0` when empty.
    pub average_engagement: f64,
    /// Reaction counts summed across all posts.
    pub reactions: BTreeMap<String, u64>,
}

impl Summary {
    #[must_use]
    pub fn of(records: &[ActivityRecord]) -> Self {
        let total_engagement = records
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.total_engagement()));

        let mut reactions: BTreeMap<String, u64> = BTreeMap::new();
        for record in records {
            for (label, count) in &record.reactions {
                let entry = reactions.entry(label.clone()).or_insert(0);
                *entry = entry.saturating_add(*count);
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let average_engagement = if records.is_empty() {
            0.0
        } else {
            let mean = total_engagement as f64 / records.len() as f64;
            (mean * 100.0).round() / 100.0
        };

        Self {
            total_posts: records.len(),
            total_engagement,
            average_engagement,
            reactions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(likes: u64, comments: u64, shares: u64, reactions: &[(&str, u64)]) -> ActivityRecord {
        ActivityRecord {
            author_name: "A".to_string(),
            author_occupation: pulse_core::NOT_AVAILABLE.to_string(),
            author_image_url: pulse_core::NOT_AVAILABLE.to_string(),
            author_profile_url: pulse_core::NOT_AVAILABLE.to_string(),
            post_text: String::new(),
            created_at: None,
            likes,
            comments,
            shares,
            reactions: reactions
                .iter()
                .map(|(k, v)| ((*k).to_string(), *v))
                .collect(),
            post_url: String::new(),
        }
    }

    #[test]
    fn summary_of_empty_dataset() {
        let summary = Summary::of(&[]);
        assert_eq!(summary.total_posts, 0);
        assert_eq!(summary.total_engagement, 0);
        assert!(summary.average_engagement.abs() < f64::EPSILON);
        assert!(summary.reactions.is_empty());
    }

    #[test]
    fn summary_totals_and_rounded_average() {
        let records = vec![
            record(2, 1, 0, &[("LIKE", 2)]),
            record(5, 0, 0, &[("LIKE", 4), ("PRAISE", 1)]),
            record(0, 0, 0, &[]),
        ];
        let summary = Summary::of(&records);
        assert_eq!(summary.total_posts, 3);
        assert_eq!(summary.total_engagement, 8);
        // 8 / 3 = 2.666..
        assert!((summary.average_engagement - 2.67).abs() < 1e-9);
        assert_eq!(summary.reactions["LIKE"], 6);
        assert_eq!(summary.reactions["PRAISE"], 1);
    }
}
