//! Raw activity API response types.
//!
//! ## Observed shape
//!
//! ```text
//! {"activity": [
//!   {"author":  {"title", "occupation", "image_url", "url"},
//!    "metrics": {"likes", "comments", "shares", "reactions": {"LIKE": 12, ...}},
//!    "text", "created_at", "url"}
//! ]}
//! ```
//!
//! Every field is optional in practice. Posts without engagement omit
//! `metrics` entirely, reshared posts can carry `author: null`, and counts
//! occasionally arrive as numeric strings. The deserializers below never fail
//! on a field-level mismatch: a value of the wrong JSON type is treated as
//! absent, and the normalizer applies the per-field defaults.
//!
//! `reactions` is usually an object keyed by reaction label. Some responses
//! send a list of `{"type": "LIKE", "count": 12}` entries instead; both forms
//! decode into the same map.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level response: `{"activity": [...]}`.
///
/// A missing, null, or non-array `activity` decodes as an empty list.
/// Entries that are not JSON objects are dropped.
#[derive(Debug, Default, Deserialize)]
pub struct ActivityResponse {
    #[serde(default, deserialize_with = "lenient_list")]
    pub activity: Vec<RawActivity>,
}

/// One source record, before normalization.
#[derive(Debug, Default, Deserialize)]
pub struct RawActivity {
    #[serde(default, deserialize_with = "lenient_object")]
    pub author: Option<RawAuthor>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub metrics: Option<RawMetrics>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
}

/// Nested `author` object.
#[derive(Debug, Default, Deserialize)]
pub struct RawAuthor {
    /// Display name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub occupation: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image_url: Option<String>,
    /// Profile URL.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
}

/// Nested `metrics` object.
#[derive(Debug, Default, Deserialize)]
pub struct RawMetrics {
    #[serde(default, deserialize_with = "lenient_count")]
    pub likes: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub comments: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub shares: Option<u64>,
    #[serde(default, deserialize_with = "lenient_reactions")]
    pub reactions: BTreeMap<String, u64>,
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .filter(Value::is_object)
        .and_then(|v| serde_json::from_value(v).ok()))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(count_from_value))
}

fn lenient_reactions<'de, D>(deserializer: D) -> Result<BTreeMap<String, u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let reactions = match value {
        Some(Value::Object(map)) => map
            .into_iter()
            .filter_map(|(label, count)| count_from_value(&count).map(|n| (label, n)))
            .collect(),
        Some(Value::Array(entries)) => entries.iter().filter_map(reaction_entry).collect(),
        _ => BTreeMap::new(),
    };
    Ok(reactions)
}

/// Reads a `{"type": "LIKE", "count": 12}` list entry.
fn reaction_entry(entry: &Value) -> Option<(String, u64)> {
    let label = ["type", "name", "reaction"]
        .iter()
        .find_map(|key| entry.get(*key).and_then(Value::as_str))?;
    let count = entry.get("count").and_then(count_from_value)?;
    Some((label.to_string(), count))
}

/// Interprets a JSON value as a non-negative count.
///
/// Accepts unsigned integers, non-negative floats (truncated), and numeric
/// strings. Negative, non-finite, or non-numeric values yield `None`.
pub(crate) fn count_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let truncated = f as u64;
                    truncated
                })
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}
