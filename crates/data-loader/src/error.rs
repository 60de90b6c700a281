//! Error types for the data-loader crate.
//!
//! Every failure here is a load-time failure: once a `ModelIndex` exists it
//! is known to be consistent and nothing downstream re-checks it.

use thiserror::Error;

/// Errors that can occur while loading the model artifacts
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON bundle could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Line in an artifact file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Catalog and similarity matrix disagree on their dimensions.
    ///
    /// `row` is the first offending row, if the row count itself matched.
    #[error(
        "Similarity matrix does not match catalog of {titles} titles: \
         {rows} rows, row {row:?} has length {row_len:?}"
    )]
    DimensionMismatch {
        titles: usize,
        rows: usize,
        row: Option<usize>,
        row_len: Option<usize>,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
