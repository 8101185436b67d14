//! `activity` command: fetch, normalize, filter, sort, print, export.

use std::path::PathBuf;

use chrono::{Days, NaiveDate};
use clap::Args;
use pulse_core::{is_placeholder, ActivityRecord, AppConfig};
use pulse_pipeline::{
    export, filter_records, normalize_value, sort_records_by_name, ActivityFilter, ExportFormat,
    SortKey, Summary,
};

const SNIPPET_CHARS: usize = 80;

#[derive(Debug, Args)]
pub struct ActivityArgs {
    /// Profile URLs to fetch
    #[arg(required_unless_present = "input")]
    pub urls: Vec<String>,

    /// Read a saved API response from FILE instead of calling the API
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// First day to include (YYYY-MM-DD, UTC)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD, UTC); defaults to today
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Window length in days when --start is not given
    #[arg(long, default_value_t = 30)]
    pub days: u64,

    /// Disable the date filter, keeping posts without a date
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pub all_dates: bool,

    /// Minimum total engagement (likes + comments + shares)
    #[arg(long)]
    pub min_engagement: Option<u64>,

    /// Case-insensitive search over post text, author name, and occupation
    #[arg(long)]
    pub search: Option<String>,

    /// Sort column: created_at, total_engagement, likes, comments, shares
    #[arg(long, default_value = "created_at")]
    pub sort_by: String,

    /// Sort ascending instead of descending
    #[arg(long)]
    pub ascending: bool,

    /// Export format: csv, json, or spreadsheet
    #[arg(long)]
    pub export: Option<String>,

    /// Export destination; defaults to linkedin_data.<ext>
    #[arg(long, requires = "export")]
    pub output: Option<PathBuf>,
}

/// Builds the API client from configuration.
///
/// # Errors
///
/// Returns an error if no API key is configured or the client cannot be built.
pub(crate) fn build_client(config: &AppConfig) -> anyhow::Result<pulse_client::NimbleClient> {
    let api_key = config.require_api_key()?;
    let client = pulse_client::NimbleClient::with_base_url(
        api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.api_base_url,
    )?;
    Ok(client)
}

/// Runs the `activity` command.
///
/// `today` anchors the default date window.
///
/// # Errors
///
/// Returns an error for an unsupported export format (checked before any
/// request is made), a missing API key, a failed fetch, an unreadable input
/// file, or a failed export write. Malformed timestamps are logged, not fatal.
pub(crate) async fn run_activity(
    config: &AppConfig,
    args: &ActivityArgs,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let export_format = args
        .export
        .as_deref()
        .map(str::parse::<ExportFormat>)
        .transpose()?;

    let raw = match &args.input {
        Some(path) => {
            let text = tokio::fs::read_to_string(path).await?;
            serde_json::from_str::<serde_json::Value>(&text)?
        }
        None => build_client(config)?.get_profile_activity(&args.urls).await?,
    };

    let normalized = normalize_value(raw);
    for warning in &normalized.warnings {
        tracing::warn!(%warning, "skipped unparseable timestamp");
    }
    tracing::info!(
        records = normalized.records.len(),
        warnings = normalized.warnings.len(),
        "normalized activity"
    );

    let filter = build_filter(args, today);
    let filtered = filter_records(&normalized.records, &filter);

    if let Err(err) = args.sort_by.parse::<SortKey>() {
        tracing::warn!(error = %err, "keeping source order");
    }
    let view = sort_records_by_name(filtered, &args.sort_by, args.ascending);

    println!("{}", render_summary(&Summary::of(&view)));
    for record in &view {
        println!("{}", render_post_line(record));
    }

    if let Some(format) = export_format {
        let bytes = export(&view, format)?;
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format.default_file_name()));
        tokio::fs::write(&path, &bytes).await?;
        println!(
            "wrote {} posts to {} ({})",
            view.len(),
            path.display(),
            format.content_type()
        );
    }

    Ok(())
}

/// Translates command-line flags into an [`ActivityFilter`].
///
/// Unless `--all-dates` is set, the window runs from `--start` (or `--days`
/// before the end) through `--end` (or `today`), as whole UTC days.
pub(crate) fn build_filter(args: &ActivityArgs, today: NaiveDate) -> ActivityFilter {
    let mut filter = if args.all_dates {
        ActivityFilter::default()
    } else {
        let end = args.end.unwrap_or(today);
        let start = args.start.unwrap_or_else(|| {
            end.checked_sub_days(Days::new(args.days))
                .unwrap_or(NaiveDate::MIN)
        });
        ActivityFilter::for_date_range(start, end)
    };
    filter.min_engagement = args.min_engagement;
    filter.search_text = args.search.clone();
    filter
}

pub(crate) fn render_summary(summary: &Summary) -> String {
    let mut out = format!(
        "Total posts: {}\nTotal engagement: {}\nAverage engagement: {:.2}",
        summary.total_posts, summary.total_engagement, summary.average_engagement
    );
    if !summary.reactions.is_empty() {
        let breakdown: Vec<String> = summary
            .reactions
            .iter()
            .map(|(label, count)| format!("{label}={count}"))
            .collect();
        out.push_str(&format!("\nReactions: {}", breakdown.join(", ")));
    }
    out
}

pub(crate) fn render_post_line(record: &ActivityRecord) -> String {
    let posted = record.created_at.map_or_else(
        || "Date not available".to_string(),
        |ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );
    let author = if is_placeholder(&record.author_occupation) {
        record.author_name.clone()
    } else {
        format!("{} ({})", record.author_name, record.author_occupation)
    };
    let snippet: String = record
        .post_text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(SNIPPET_CHARS)
        .collect();
    format!(
        "---\n{posted} | {author} | engagement {} (likes {}, comments {}, shares {})\n{snippet}",
        record.total_engagement(),
        record.likes,
        record.comments,
        record.shares
    )
}

#[cfg(test)]
#[path = "activity_test.rs"]
mod tests;
