//! Line-delimited JSON export.
//!
//! Each row becomes one JSON object on its own line. Keys are the source
//! column names in source order, values are typed by the column's inferred
//! kind and missing cells are written as `null`. There is no wrapping array.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::{error, info};

impl ColumnKind {
    /// JSON value for a raw cell of this kind.
    ///
    /// Kinds are inferred from the same cells, so a cell that fails to parse
    /// can only come from a hand-built dataset; it falls back to a string.
    pub fn json_value(&self, cell: Option<&str>) -> Value {
        let Some(raw) = cell else {
            return Value::Null;
        };

        let typed = match self {
            ColumnKind::Integer => raw
                .parse::<i64>()
                .map(Value::from)
                .or_else(|_| raw.parse::<u64>().map(Value::from))
                .ok(),
            ColumnKind::Float => parser::parse_lossless_float(raw).map(Value::from),
            ColumnKind::Boolean => parser::parse_bool(raw).map(Value::Bool),
            ColumnKind::Text => None,
        };
        typed.unwrap_or_else(|| Value::String(raw.to_string()))
    }
}

/// One row borrowed from a dataset, serialized as an ordered JSON object
struct RowRecord<'a> {
    columns: &'a [String],
    kinds: &'a [ColumnKind],
    cells: &'a [Cell],
}

impl Serialize for RowRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for ((name, kind), cell) in self.columns.iter().zip(self.kinds).zip(self.cells) {
            map.serialize_entry(name, &kind.json_value(cell.as_deref()))?;
        }
        map.end()
    }
}

impl Dataset {
    /// Typed JSON value of one cell, as the exporter writes it
    pub fn json_value(&self, row: usize, column: &str) -> Option<Value> {
        let col = self.column_index(column)?;
        let cells = self.rows.get(row)?;
        Some(self.kinds[col].json_value(cells[col].as_deref()))
    }

    /// Write every row as line-delimited JSON
    pub fn write_jsonl<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut writer = BufWriter::new(writer);
        for cells in &self.rows {
            let record = RowRecord {
                columns: &self.columns,
                kinds: &self.kinds,
                cells,
            };
            serde_json::to_writer(&mut writer, &record)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }

    /// Export every row to a JSON Lines file, replacing it if it exists
    pub fn export_jsonl(&self, path: &Path) -> Result<()> {
        let target = path.display().to_string();
        info!("Saving data to {}", target);

        File::create(path)
            .and_then(|file| self.write_jsonl(file))
            .map_err(|source| {
                let err = DataLoadError::WriteError {
                    path: target.clone(),
                    source,
                };
                error!("Error saving file to JSON: {}", err);
                err
            })?;

        info!("Data successfully saved to {} ({} rows)", target, self.len());
        Ok(())
    }
}
