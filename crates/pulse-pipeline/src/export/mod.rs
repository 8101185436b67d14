//! Export of a (filtered, sorted) dataset to downloadable formats.
//!
//! CSV and JSON carry timestamps as ISO-8601 UTC strings. Spreadsheet cells
//! hold naive local wall-clock strings instead.

mod table;
mod workbook;

use std::collections::BTreeMap;
use std::str::FromStr;

use pulse_core::ActivityRecord;

use crate::error::PipelineError;

pub use table::{parse_csv, to_csv};
pub use workbook::{
    clamp_cell, to_spreadsheet, to_spreadsheet_in, wall_clock, MAX_CELL_CHARS, SHEET_NAME,
};

/// Column order shared by every tabular export.
pub const COLUMNS: [&str; 12] = [
    "author_name",
    "author_occupation",
    "author_image_url",
    "author_profile_url",
    "post_text",
    "created_at",
    "likes",
    "comments",
    "shares",
    "total_engagement",
    "reactions",
    "post_url",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Spreadsheet,
}

impl ExportFormat {
    #[must_use]
    pub fn file_extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Spreadsheet => "xlsx",
        }
    }

    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
            ExportFormat::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// Download name, e.g. `linkedin_data.csv`.
    #[must_use]
    pub fn default_file_name(self) -> String {
        format!("linkedin_data.{}", self.file_extension())
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Spreadsheet => write!(f, "spreadsheet"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "spreadsheet" | "xlsx" => Ok(ExportFormat::Spreadsheet),
            _ => Err(PipelineError::UnsupportedExportFormat(s.to_string())),
        }
    }
}

/// Serializes `records` in `format`.
///
/// # Errors
///
/// Returns a [`PipelineError`] if the underlying writer fails. Format
/// selection errors happen earlier, when parsing an [`ExportFormat`].
pub fn export(records: &[ActivityRecord], format: ExportFormat) -> Result<Vec<u8>, PipelineError> {
    let bytes = match format {
        ExportFormat::Csv => to_csv(records)?,
        ExportFormat::Json => to_json(records)?,
        ExportFormat::Spreadsheet => to_spreadsheet(records)?,
    };
    tracing::debug!(
        format = %format,
        records = records.len(),
        bytes = bytes.len(),
        "exported activity records"
    );
    Ok(bytes)
}

/// JSON array of records, one object per post with the same field names as
/// the CSV columns.
///
/// # Errors
///
/// Returns [`PipelineError::Json`] if serialization fails.
pub fn to_json(records: &[ActivityRecord]) -> Result<Vec<u8>, PipelineError> {
    serde_json::to_vec(records).map_err(|e| PipelineError::Json {
        context: "json export".to_string(),
        source: e,
    })
}

/// Reactions map as a compact JSON object, for single-cell columns.
fn reactions_cell(reactions: &BTreeMap<String, u64>) -> Result<String, PipelineError> {
    serde_json::to_string(reactions).map_err(|e| PipelineError::Json {
        context: "reactions column".to_string(),
        source: e,
    })
}
