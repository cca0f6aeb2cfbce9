//! # Data Loader Crate
//!
//! This crate loads a movie metadata CSV into an immutable [`Dataset`] and
//! writes it back out as JSON Lines.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Dataset, ColumnKind, DatasetInfo)
//! - **parser**: Read CSV text into raw cells and typed movies
//! - **dataset**: Loading entry points and dataset inspection
//! - **export**: Line-delimited JSON writer
//! - **error**: Error types for loading and exporting
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use std::path::Path;
//!
//! let dataset = Dataset::load_from_csv(Path::new("movies_metadata.csv"))?;
//! println!("{} rows", dataset.info().row_count);
//!
//! dataset.export_jsonl(Path::new("movies_metadata.json"))?;
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod dataset;
pub mod export;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    Cell,
    ColumnInfo,
    ColumnKind,
    Dataset,
    DatasetInfo,
    Movie,
    // Column names
    GENRES_COLUMN,
    RELEASE_DATE_COLUMN,
    REQUIRED_COLUMNS,
    TITLE_COLUMN,
    VOTE_AVERAGE_COLUMN,
    VOTE_COUNT_COLUMN,
};
