//! Normalization from raw activity API types to [`pulse_core::ActivityRecord`].
//!
//! Normalization never fails. Missing nested fields take their defaults and a
//! malformed timestamp becomes an absent `created_at` plus a
//! [`NormalizeWarning`] returned alongside the records. Nothing here logs.

use pulse_core::{ActivityRecord, NOT_AVAILABLE};

use crate::timestamp::parse_timestamp;
use crate::types::{ActivityResponse, RawActivity, RawAuthor, RawMetrics};

/// Normalized dataset plus the diagnostics produced while building it.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// One record per source activity, in source order.
    pub records: Vec<ActivityRecord>,
    pub warnings: Vec<NormalizeWarning>,
}

/// A recoverable data problem found during normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeWarning {
    /// `created_at` was present but could not be parsed; the record keeps
    /// `created_at = None`.
    MalformedTimestamp {
        /// Position of the record in the source `activity` list.
        index: usize,
        post_url: Option<String>,
        raw: String,
    },
}

impl std::fmt::Display for NormalizeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeWarning::MalformedTimestamp {
                index,
                post_url,
                raw,
            } => write!(
                f,
                "record {index} ({}): unparseable created_at \"{raw}\"",
                post_url.as_deref().unwrap_or("no url")
            ),
        }
    }
}

/// Normalizes every activity in `response`, preserving order.
#[must_use]
pub fn normalize(response: ActivityResponse) -> Normalized {
    let mut normalized = Normalized {
        records: Vec::with_capacity(response.activity.len()),
        warnings: Vec::new(),
    };

    for (index, raw) in response.activity.into_iter().enumerate() {
        let (record, warning) = normalize_activity(raw, index);
        normalized.records.push(record);
        normalized.warnings.extend(warning);
    }

    normalized
}

/// Normalizes an undecoded response value.
///
/// Anything that is not an object with an `activity` array (including a
/// top-level array or `null`) yields an empty dataset.
#[must_use]
pub fn normalize_value(value: serde_json::Value) -> Normalized {
    let response = if value.is_object() {
        serde_json::from_value::<ActivityResponse>(value).unwrap_or_default()
    } else {
        ActivityResponse::default()
    };
    normalize(response)
}

/// Normalizes a single [`RawActivity`] found at `index` in the source list.
fn normalize_activity(raw: RawActivity, index: usize) -> (ActivityRecord, Option<NormalizeWarning>) {
    let author = raw.author.unwrap_or_default();
    let metrics = raw.metrics.unwrap_or_default();

    let (created_at, warning) = match raw.created_at.as_deref().map(str::trim) {
        None | Some("") => (None, None),
        Some(value) => match parse_timestamp(value) {
            Some(ts) => (Some(ts), None),
            None => (
                None,
                Some(NormalizeWarning::MalformedTimestamp {
                    index,
                    post_url: raw.url.clone(),
                    raw: value.to_owned(),
                }),
            ),
        },
    };

    let RawAuthor {
        title,
        occupation,
        image_url,
        url: profile_url,
    } = author;
    let RawMetrics {
        likes,
        comments,
        shares,
        reactions,
    } = metrics;

    let record = ActivityRecord {
        author_name: or_placeholder(title),
        author_occupation: or_placeholder(occupation),
        author_image_url: or_placeholder(image_url),
        author_profile_url: or_placeholder(profile_url),
        post_text: raw.text.unwrap_or_default(),
        created_at,
        likes: likes.unwrap_or(0),
        comments: comments.unwrap_or(0),
        shares: shares.unwrap_or(0),
        reactions,
        post_url: raw.url.unwrap_or_default(),
    };

    (record, warning)
}

/// Author fields: absent or blank becomes [`NOT_AVAILABLE`].
fn or_placeholder(value: Option<String>) -> String {
    value
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
