//! Core domain types for the movie metadata dataset.
//!
//! A [`Dataset`] keeps two views of the same rows:
//! - the raw cells, in source column order, which the exporter writes back out
//! - a typed [`Movie`] per row holding only the columns the statistics read
//!
//! Both are built once at load time and never mutated afterwards.

use serde::{Deserialize, Serialize};

// =============================================================================
// Column names
// =============================================================================

pub const TITLE_COLUMN: &str = "original_title";
pub const VOTE_AVERAGE_COLUMN: &str = "vote_average";
pub const VOTE_COUNT_COLUMN: &str = "vote_count";
pub const RELEASE_DATE_COLUMN: &str = "release_date";
pub const GENRES_COLUMN: &str = "genres";

/// Columns that must be present in every loaded file
pub const REQUIRED_COLUMNS: [&str; 5] = [
    TITLE_COLUMN,
    VOTE_AVERAGE_COLUMN,
    VOTE_COUNT_COLUMN,
    RELEASE_DATE_COLUMN,
    GENRES_COLUMN,
];

/// A single raw cell. `None` is a missing value (empty field in the source).
pub type Cell = Option<String>;

// =============================================================================
// Movie
// =============================================================================

/// The typed slice of one row that the aggregations work on.
///
/// Every field is optional: real exports of this dataset have blank and
/// malformed cells, and each aggregation decides for itself how to treat them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    /// Kept as text; year derivation is lenient and lives with the aggregation
    pub release_date: Option<String>,
    /// Raw genre literal, e.g. `[{'id': 18, 'name': 'Drama'}]`
    pub genres: Option<String>,
}

// =============================================================================
// Column metadata
// =============================================================================

/// Value kind inferred for a column from its non-missing cells.
///
/// Inference picks the first kind that fits every cell, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    Integer,
    Float,
    Boolean,
    Text,
}

/// Per-column summary reported by [`Dataset::info`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub non_missing: usize,
    pub kind: ColumnKind,
}

/// Shape of a loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub row_count: usize,
    pub columns: Vec<ColumnInfo>,
}

// =============================================================================
// Dataset
// =============================================================================

/// An immutable, fully loaded table of movie rows.
///
/// There is no way to obtain a `Dataset` other than a successful load (or
/// building one from in-memory rows), so every query that takes `&Dataset`
/// is guaranteed to run against loaded data.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub(crate) columns: Vec<String>,
    pub(crate) kinds: Vec<ColumnKind>,
    pub(crate) rows: Vec<Vec<Cell>>,
    pub(crate) movies: Vec<Movie>,
}

impl Dataset {
    /// Column names in source order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Inferred kind for a column, if it exists
    pub fn column_kind(&self, name: &str) -> Option<ColumnKind> {
        self.column_index(name).map(|idx| self.kinds[idx])
    }

    /// Raw cells of one row, in source column order
    pub fn row(&self, idx: usize) -> Option<&[Cell]> {
        self.rows.get(idx).map(|r| r.as_slice())
    }

    /// Typed view of every row, in source order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}
