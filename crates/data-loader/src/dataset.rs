//! Dataset loading and inspection.
//!
//! `load_from_csv` is the main entry point. It resolves the path, reads the
//! table, checks the required columns are there, infers column kinds and
//! builds the typed `Movie` view, in that order. Errors are logged here once
//! and then returned to the caller untouched.

use crate::error::{DataLoadError, Result};
use crate::parser::{self, CoreColumns};
use crate::types::*;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;
use tracing::{error, info};

impl Dataset {
    /// Load a movie metadata CSV from disk
    pub fn load_from_csv(path: &Path) -> Result<Self> {
        let source = path.display().to_string();
        info!("Loading data from {}", source);

        let file = File::open(path).map_err(|e| {
            let err = if e.kind() == ErrorKind::NotFound {
                DataLoadError::FileNotFound {
                    path: source.clone(),
                }
            } else {
                DataLoadError::IoError(e)
            };
            error!("{}", err);
            err
        })?;

        let dataset = Self::from_reader(BufReader::new(file), &source)?;
        info!(
            "Data loaded successfully: {} rows, {} columns",
            dataset.len(),
            dataset.columns.len()
        );
        Ok(dataset)
    }

    /// Load a dataset from any reader producing CSV text
    pub fn from_reader<R: Read>(reader: R, source: &str) -> Result<Self> {
        parser::read_table(reader, source)
            .and_then(|(columns, rows)| Self::build(source, columns, rows))
            .inspect_err(|e| error!("Error loading {}: {}", source, e))
    }

    /// Build a dataset from in-memory cells.
    ///
    /// Every row must have exactly one cell per column.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        const SOURCE: &str = "<in-memory>";

        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(DataLoadError::ParseError {
                file: SOURCE.to_string(),
                line: idx as u64 + 2,
                reason: format!("expected {} fields, found {}", columns.len(), row.len()),
            });
        }

        Self::build(SOURCE, columns, rows)
    }

    fn build(source: &str, columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let core = CoreColumns::locate(&columns, source)?;

        let kinds = (0..columns.len())
            .map(|col| parser::infer_kind(rows.iter().filter_map(|row| row[col].as_deref())))
            .collect();

        let movies = rows.iter().map(|row| parser::parse_movie(row, &core)).collect();

        Ok(Self {
            columns,
            kinds,
            rows,
            movies,
        })
    }

    /// Row count plus per-column non-missing counts and kinds
    pub fn info(&self) -> DatasetInfo {
        let columns = self
            .columns
            .iter()
            .enumerate()
            .map(|(col, name)| ColumnInfo {
                name: name.clone(),
                non_missing: self.rows.iter().filter(|row| row[col].is_some()).count(),
                kind: self.kinds[col],
            })
            .collect();

        DatasetInfo {
            row_count: self.rows.len(),
            columns,
        }
    }
}
