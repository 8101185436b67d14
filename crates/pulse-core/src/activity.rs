use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Placeholder written into author fields the source did not provide.
///
/// Rendering and export code can rely on author fields always holding a
/// string; [`is_placeholder`] tells the two cases apart where it matters
/// (text search treats a placeholder as an absent value).
pub const NOT_AVAILABLE: &str = "N/A";

/// Returns `true` if `value` is the [`NOT_AVAILABLE`] placeholder.
#[must_use]
pub fn is_placeholder(value: &str) -> bool {
    value == NOT_AVAILABLE
}

/// One social-profile post, normalized into the fixed tabular schema.
///
/// Records are produced in bulk by the normalizer and never modified by the
/// query layer, which only selects and reorders them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    /// Author display name (`author.title` in the source).
    pub author_name: String,
    pub author_occupation: String,
    pub author_image_url: String,
    pub author_profile_url: String,
    /// Post body. Empty when the source had no text.
    pub post_text: String,
    /// Publication time, always UTC. `None` when the source value was absent
    /// or unparseable; never a substituted default date.
    pub created_at: Option<DateTime<Utc>>,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    /// Reaction label (e.g. `"LIKE"`, `"PRAISE"`) to count.
    pub reactions: BTreeMap<String, u64>,
    pub post_url: String,
}

impl ActivityRecord {
    /// Likes + comments + shares.
    ///
    /// Derived on every call so it can never drift from the three counts.
    #[must_use]
    pub fn total_engagement(&self) -> u64 {
        self.likes
            .saturating_add(self.comments)
            .saturating_add(self.shares)
    }

    /// Sum of all reaction counts.
    #[must_use]
    pub fn total_reactions(&self) -> u64 {
        self.reactions
            .values()
            .fold(0u64, |acc, n| acc.saturating_add(*n))
    }
}

/// Flat serialized shape shared by the JSON export and any API consumer.
#[derive(Serialize)]
struct RecordRow<'a> {
    author_name: &'a str,
    author_occupation: &'a str,
    author_image_url: &'a str,
    author_profile_url: &'a str,
    post_text: &'a str,
    created_at: Option<&'a DateTime<Utc>>,
    likes: u64,
    comments: u64,
    shares: u64,
    total_engagement: u64,
    reactions: &'a BTreeMap<String, u64>,
    post_url: &'a str,
}

impl Serialize for ActivityRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RecordRow {
            author_name: &self.author_name,
            author_occupation: &self.author_occupation,
            author_image_url: &self.author_image_url,
            author_profile_url: &self.author_profile_url,
            post_text: &self.post_text,
            created_at: self.created_at.as_ref(),
            likes: self.likes,
            comments: self.comments,
            shares: self.shares,
            total_engagement: self.total_engagement(),
            reactions: &self.reactions,
            post_url: &self.post_url,
        }
        .serialize(serializer)
    }
}
