//! CSV export and re-import.

use std::collections::BTreeMap;

use chrono::SecondsFormat;
use pulse_core::ActivityRecord;
use serde::{Deserialize, Serialize};

use super::{reactions_cell, COLUMNS};
use crate::error::PipelineError;
use crate::timestamp::parse_timestamp;

/// One CSV line. Field names match [`COLUMNS`].
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    author_name: String,
    author_occupation: String,
    author_image_url: String,
    author_profile_url: String,
    post_text: String,
    /// ISO-8601 UTC, or empty when the record has no timestamp.
    created_at: String,
    likes: u64,
    comments: u64,
    shares: u64,
    /// Written for readers of the file; ignored on import.
    total_engagement: u64,
    /// JSON object text, e.g. `{"LIKE":3}`.
    reactions: String,
    post_url: String,
}

impl CsvRow {
    fn from_record(record: &ActivityRecord) -> Result<Self, PipelineError> {
        Ok(Self {
            author_name: record.author_name.clone(),
            author_occupation: record.author_occupation.clone(),
            author_image_url: record.author_image_url.clone(),
            author_profile_url: record.author_profile_url.clone(),
            post_text: record.post_text.clone(),
            created_at: record
                .created_at
                .map(|ts| ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
                .unwrap_or_default(),
            likes: record.likes,
            comments: record.comments,
            shares: record.shares,
            total_engagement: record.total_engagement(),
            reactions: reactions_cell(&record.reactions)?,
            post_url: record.post_url.clone(),
        })
    }

    fn into_record(self) -> Result<ActivityRecord, PipelineError> {
        let reactions = if self.reactions.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&self.reactions).map_err(|e| PipelineError::Json {
                context: format!("reactions column \"{}\"", self.reactions),
                source: e,
            })?
        };

        Ok(ActivityRecord {
            author_name: self.author_name,
            author_occupation: self.author_occupation,
            author_image_url: self.author_image_url,
            author_profile_url: self.author_profile_url,
            post_text: self.post_text,
            created_at: parse_timestamp(&self.created_at),
            likes: self.likes,
            comments: self.comments,
            shares: self.shares,
            reactions,
            post_url: self.post_url,
        })
    }
}

/// UTF-8 CSV with a header row. The header is written even for an empty
/// dataset.
///
/// # Errors
///
/// Returns [`PipelineError`] if a row cannot be serialized.
pub fn to_csv(records: &[ActivityRecord]) -> Result<Vec<u8>, PipelineError> {
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(CsvRow::from_record(record)?)?;
    }
    writer
        .into_inner()
        .map_err(|e| PipelineError::Io(e.into_error()))
}

/// Reads a CSV produced by [`to_csv`] back into records.
///
/// Columns are matched by header name. `total_engagement` is recomputed from
/// the three counts rather than read from the file.
///
/// # Errors
///
/// Returns [`PipelineError::Csv`] for malformed rows and
/// [`PipelineError::Json`] for an unreadable `reactions` cell.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<ActivityRecord>, PipelineError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);
    reader
        .deserialize::<CsvRow>()
        .map(|row| row.map_err(PipelineError::from)?.into_record())
        .collect()
}
