//! `.xlsx` export.

use chrono::{DateTime, Local, TimeZone, Utc};
use pulse_core::ActivityRecord;
use rust_xlsxwriter::{Format, Workbook};

use super::{reactions_cell, COLUMNS};
use crate::error::PipelineError;

pub const SHEET_NAME: &str = "activity";

const WALL_CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Longest string an `.xlsx` cell can hold, in characters.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Truncates `value` to [`MAX_CELL_CHARS`] characters on a char boundary.
#[must_use]
pub fn clamp_cell(value: &str) -> &str {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

/// Renders `ts` as a zone-less wall-clock string in `tz`.
#[must_use]
pub fn wall_clock<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> String {
    ts.with_timezone(tz)
        .naive_local()
        .format(WALL_CLOCK_FORMAT)
        .to_string()
}

/// Workbook with timestamps in the host's local time zone.
///
/// # Errors
///
/// Returns [`PipelineError::Spreadsheet`] if the workbook cannot be built.
pub fn to_spreadsheet(records: &[ActivityRecord]) -> Result<Vec<u8>, PipelineError> {
    to_spreadsheet_in(records, &Local)
}

/// Workbook with timestamps rendered as wall-clock time in `tz`.
///
/// One sheet, a bold header row, counts as numeric cells. A record without
/// `created_at` leaves its date cell blank. Text longer than
/// [`MAX_CELL_CHARS`] is truncated to fit the cell.
///
/// # Errors
///
/// Returns [`PipelineError::Spreadsheet`] if a cell cannot be written (for
/// example past the row limit) or the workbook cannot be saved.
#[allow(clippy::cast_precision_loss)]
pub fn to_spreadsheet_in<Tz: TimeZone>(
    records: &[ActivityRecord],
    tz: &Tz,
) -> Result<Vec<u8>, PipelineError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in (0u16..).zip(COLUMNS) {
        sheet.write_string_with_format(0, col, name, &header)?;
    }

    for (row, record) in (1u32..).zip(records) {
        sheet.write_string(row, 0, clamp_cell(&record.author_name))?;
        sheet.write_string(row, 1, clamp_cell(&record.author_occupation))?;
        sheet.write_string(row, 2, clamp_cell(&record.author_image_url))?;
        sheet.write_string(row, 3, clamp_cell(&record.author_profile_url))?;
        sheet.write_string(row, 4, clamp_cell(&record.post_text))?;
        if let Some(ts) = &record.created_at {
            sheet.write_string(row, 5, wall_clock(ts, tz))?;
        }
        sheet.write_number(row, 6, record.likes as f64)?;
        sheet.write_number(row, 7, record.comments as f64)?;
        sheet.write_number(row, 8, record.shares as f64)?;
        sheet.write_number(row, 9, record.total_engagement() as f64)?;
        sheet.write_string(row, 10, clamp_cell(&reactions_cell(&record.reactions)?))?;
        sheet.write_string(row, 11, clamp_cell(&record.post_url))?;
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::FixedOffset;

    use super::*;

    fn record(created_at: Option<DateTime<Utc>>) -> ActivityRecord {
        ActivityRecord {
            author_name: "A".to_string(),
            author_occupation: pulse_core::NOT_AVAILABLE.to_string(),
            author_image_url: pulse_core::NOT_AVAILABLE.to_string(),
            author_profile_url: pulse_core::NOT_AVAILABLE.to_string(),
            post_text: "hello world".to_string(),
            created_at,
            likes: 2,
            comments: 1,
            shares: 0,
            reactions: BTreeMap::new(),
            post_url: String::new(),
        }
    }

    #[test]
    fn wall_clock_drops_zone_after_shifting() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 5, 23, 30, 0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(wall_clock(&ts, &plus_two), "2024-01-06 01:30:00");
        assert_eq!(wall_clock(&ts, &Utc), "2024-01-05 23:30:00");
    }

    #[test]
    fn spreadsheet_is_a_zip_container() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap();
        let bytes = to_spreadsheet_in(&[record(Some(ts)), record(None)], &Utc).unwrap();
        assert!(bytes.starts_with(b"PK"), "xlsx output should be a zip archive");
    }

    #[test]
    fn clamp_cell_cuts_on_char_boundary() {
        let short = "héllo";
        assert_eq!(clamp_cell(short), short);

        let long = "é".repeat(MAX_CELL_CHARS + 10);
        let clamped = clamp_cell(&long);
        assert_eq!(clamped.chars().count(), MAX_CELL_CHARS);
        assert!(long.starts_with(clamped));

        let exact = "a".repeat(MAX_CELL_CHARS);
        assert_eq!(clamp_cell(&exact).len(), MAX_CELL_CHARS);
    }

    #[test]
    fn spreadsheet_truncates_oversized_post_text() {
        let mut long = record(None);
        long.post_text = "a".repeat(40_000);
        long.post_url = format!("https://example.com/{}", "p".repeat(40_000));
        let bytes = to_spreadsheet_in(&[long], &Utc).expect("long text should not abort export");
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn spreadsheet_of_empty_dataset_still_builds() {
        let bytes = to_spreadsheet(&[]).unwrap();
        assert!(!bytes.is_empty());
    }
}
