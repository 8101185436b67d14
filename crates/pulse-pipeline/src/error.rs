use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The caller asked for an export format outside csv, json, spreadsheet.
    #[error("unsupported export format \"{0}\" (expected csv, json, or spreadsheet)")]
    UnsupportedExportFormat(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error for {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
