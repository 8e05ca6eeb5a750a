use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool merges, cleans, or emits the registry tables.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when a CSV file cannot be parsed or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when the summary cannot be serialised to JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when a record carries more fields than the header declares.
    #[error("row {row} has {found} fields but the header declares {expected}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Raised when a file does not provide every canonical column.
    #[error("missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// Raised when a cleaning rule reads a column the table does not have.
    #[error("table has no column named {0}")]
    MissingColumn(String),

    /// Raised when no file in the input directory could be merged.
    #[error("no valid CSV files to combine in {0}")]
    NoValidInputs(PathBuf),

    /// Raised when the user provides a path that does not exist.
    #[error("input not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
