//! Error types for the data-loader crate.
//!
//! Loading and exporting are the only fallible operations on a dataset.
//! Every variant carries enough context (file, column, reason) to be
//! logged once and handed back to the caller unchanged.

use thiserror::Error;

/// Errors that can occur while loading, inspecting or exporting a dataset
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Input file does not exist
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the input
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Input is not well-formed delimited data
    ///
    /// `line` is the 1-based line the reader was on, when known
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: u64,
        reason: String,
    },

    /// A column the aggregations depend on is absent from the header
    #[error("Missing required column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// Export could not be written (permissions, disk full, ...)
    #[error("Failed to write {path}: {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
