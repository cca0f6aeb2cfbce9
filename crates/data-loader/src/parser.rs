//! Parser for the movie metadata CSV.
//!
//! Reading is split in three steps:
//! - `read_table` turns delimited text into a header plus raw cells
//! - `infer_kind` decides how each column is typed on export
//! - `parse_movie` pulls the typed fields the statistics need out of a row
//!
//! Quoting, embedded newlines and the UTF-8 BOM are handled by the `csv`
//! reader. Rows shorter than the header are padded with missing cells; a row
//! with more fields than the header is a parse error. Repeated header names
//! are renamed `name.1`, `name.2`, ... so every exported key is unique.
//!
//! Missing values and typing:
//! - an empty field is a missing cell and exports as `null`
//! - a column whose cells all read as integers exports them as JSON integers,
//!   so a column of bare years like `1995` becomes numbers, not strings
//! - floats only qualify when the text survives the trip through `f64`;
//!   integer text outside the exact `f64` range keeps its column as `Text`

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::collections::HashSet;
use std::io::Read;
use tracing::warn;

/// Largest integer magnitude an `f64` represents exactly (2^53)
const F64_EXACT_INTEGER: u128 = 1 << 53;

/// Read a whole delimited table from `reader`.
///
/// `source` is only used to label errors (usually the file path).
/// Empty fields become `None`; everything else is kept verbatim.
pub fn read_table<R: Read>(reader: R, source: &str) -> Result<(Vec<String>, Vec<Vec<Cell>>)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = dedupe_columns(
        csv_reader
            .headers()
            .map_err(|e| parse_error(source, &e))?
            .iter()
            .map(|h| h.to_string())
            .collect(),
    );

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| parse_error(source, &e))?;
        if record.len() > columns.len() {
            return Err(DataLoadError::ParseError {
                file: source.to_string(),
                line: record.position().map(|p| p.line()).unwrap_or(0),
                reason: format!(
                    "expected at most {} fields, found {}",
                    columns.len(),
                    record.len()
                ),
            });
        }

        let mut cells: Vec<Cell> = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    None
                } else {
                    Some(field.to_string())
                }
            })
            .collect();
        cells.resize(columns.len(), None);
        rows.push(cells);
    }

    Ok((columns, rows))
}

/// Rename repeated header names to `name.1`, `name.2`, ...
///
/// The first occurrence keeps its name, so required-column lookups still
/// find it.
pub fn dedupe_columns(columns: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::with_capacity(columns.len());
    columns
        .into_iter()
        .map(|name| {
            let mut unique = name.clone();
            let mut suffix = 1;
            while used.contains(&unique) {
                unique = format!("{name}.{suffix}");
                suffix += 1;
            }
            if unique != name {
                warn!("Renamed duplicate column '{}' to '{}'", name, unique);
            }
            used.insert(unique.clone());
            unique
        })
        .collect()
}

fn parse_error(source: &str, err: &csv::Error) -> DataLoadError {
    DataLoadError::ParseError {
        file: source.to_string(),
        line: err.position().map(|p| p.line()).unwrap_or(0),
        reason: err.to_string(),
    }
}

/// Infer the kind of a column from its non-missing cells.
///
/// A column with no values at all is `Text`, which exports every cell as `null`.
pub fn infer_kind<'a, I>(cells: I) -> ColumnKind
where
    I: IntoIterator<Item = &'a str>,
{
    let mut integer = true;
    let mut float = true;
    let mut boolean = true;
    let mut seen = false;

    for cell in cells {
        seen = true;
        integer = integer && is_integer(cell);
        float = float && parse_lossless_float(cell).is_some();
        boolean = boolean && parse_bool(cell).is_some();
        if !integer && !float && !boolean {
            return ColumnKind::Text;
        }
    }

    match (seen, integer, float, boolean) {
        (false, ..) => ColumnKind::Text,
        (true, true, _, _) => ColumnKind::Integer,
        (true, _, true, _) => ColumnKind::Float,
        (true, _, _, true) => ColumnKind::Boolean,
        _ => ColumnKind::Text,
    }
}

/// True if the text fits a JSON integer (`i64` or `u64`)
pub fn is_integer(s: &str) -> bool {
    s.parse::<i64>().is_ok() || s.parse::<u64>().is_ok()
}

/// Parse a float, rejecting `NaN` and infinities
pub fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a float for export.
///
/// Integer-looking text must be exactly representable, otherwise writing it
/// back as an `f64` would change its digits.
pub fn parse_lossless_float(s: &str) -> Option<f64> {
    let value = parse_finite(s)?;
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        let exact = trimmed.parse::<i128>().ok()?;
        if exact.unsigned_abs() > F64_EXACT_INTEGER {
            return None;
        }
    }
    Some(value)
}

pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "True" | "true" => Some(true),
        "False" | "false" => Some(false),
        _ => None,
    }
}

/// Parse a vote count.
///
/// Accepts plain integers and integral floats (`"5415.0"`), which is how the
/// column looks after a round trip through a float-typed export.
pub fn parse_vote_count(s: &str) -> Option<u64> {
    let s = s.trim();
    if let Ok(count) = s.parse::<u64>() {
        return Some(count);
    }
    let value = parse_finite(s)?;
    if value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Some(value as u64)
    } else {
        None
    }
}

/// Positions of the required columns inside the header
#[derive(Debug, Clone, Copy)]
pub(crate) struct CoreColumns {
    title: usize,
    vote_average: usize,
    vote_count: usize,
    release_date: usize,
    genres: usize,
}

impl CoreColumns {
    /// Locate every required column, failing on the first one that is absent
    pub(crate) fn locate(columns: &[String], source: &str) -> Result<Self> {
        let find = |name: &str| {
            columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| DataLoadError::MissingColumn {
                    file: source.to_string(),
                    column: name.to_string(),
                })
        };

        Ok(Self {
            title: find(TITLE_COLUMN)?,
            vote_average: find(VOTE_AVERAGE_COLUMN)?,
            vote_count: find(VOTE_COUNT_COLUMN)?,
            release_date: find(RELEASE_DATE_COLUMN)?,
            genres: find(GENRES_COLUMN)?,
        })
    }
}

/// Build the typed view of one row.
///
/// Numeric cells that don't parse are treated as missing rather than
/// rejecting the row.
pub(crate) fn parse_movie(row: &[Cell], core: &CoreColumns) -> Movie {
    let cell = |idx: usize| row.get(idx).and_then(|c| c.as_deref());

    Movie {
        title: cell(core.title).map(str::to_string),
        vote_average: cell(core.vote_average).and_then(parse_finite),
        vote_count: cell(core.vote_count).and_then(parse_vote_count),
        release_date: cell(core.release_date).map(str::to_string),
        genres: cell(core.genres).map(str::to_string),
    }
}
