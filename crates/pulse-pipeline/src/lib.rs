//! Activity normalization and query pipeline.
//!
//! Turns one decoded activity API response into a flat, typed dataset of
//! [`pulse_core::ActivityRecord`]s, then filters, sorts, summarizes, and
//! exports it. Everything here is synchronous and free of I/O.

pub mod error;
pub mod export;
pub mod normalize;
pub mod query;
pub mod summary;
pub mod timestamp;
pub mod types;

pub use error::PipelineError;
pub use export::{export, parse_csv, ExportFormat};
pub use normalize::{normalize, normalize_value, NormalizeWarning, Normalized};
pub use query::{
    filter_records, parse_date_bound, sort_records, sort_records_by_name, ActivityFilter,
    ActivityQuery, SortDirection, SortKey, UnknownSortKey,
};
pub use summary::Summary;
pub use timestamp::parse_timestamp;
pub use types::{ActivityResponse, RawActivity, RawAuthor, RawMetrics};
