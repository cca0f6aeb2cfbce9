//! Integration tests for the statistics pipeline.
//!
//! These tests load a small CSV from disk, run every report over it and
//! check the JSON Lines export against the raw CSV cells.

use data_loader::{ColumnKind, DataLoadError, Dataset};
use serde_json::Value;
use stats::{
    average_rating, movies_per_genre, movies_per_year, top_rated_movies, unique_title_count,
    TopRatedQuery,
};
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

const MOVIES_CSV: &str = r#"adult,budget,genres,id,original_title,release_date,vote_average,vote_count,imdb_ref,popularity,tmdb_ref
False,30000000,"[{'id': 16, 'name': 'Animation'}, {'id': 35, 'name': 'Comedy'}, {'id': 10751, 'name': 'Family'}]",862,Toy Story,1995-10-30,7.7,5415.0,12345678901234567890,21.946943,862
False,65000000,"[{'id': 12, 'name': 'Adventure'}, {'id': 14, 'name': 'Fantasy'}, {'id': 10751, 'name': 'Family'}]",8844,Jumanji,1995-12-15,6.9,2413.0,18446744073709551615,17,8844
False,63000000,"[{'id': 18, 'name': 'Drama'}]",550,Fight Club,1999-10-15,8.3,9678.0,7,0.5,123456789012345678901234
False,25000000,"[{'id': 18, 'name': 'Drama'}, {'id': 80, 'name': 'Crime'}]",278,The Shawshank Redemption,1994-09-23,8.5,8358.0,9007199254740993,3,1.5
False,185000000,"[{'id': 18, 'name': 'Drama'}, {'id': 28, 'name': 'Action'}, {'id': 80, 'name': 'Crime'}, {'id': 53, 'name': 'Thriller'}]",155,The Dark Knight,2008-07-16,8.3,12269.0,0,8.25,155
False,0,"[{'id': 18, 'name': 'Drama'}]",99999,Toy Story,,9.9,3.0,1,0,99999
False,0,not a genre list,12345,"Comma, In Title",1,,,2,,
True,0,[],54321,,1995-01-01,5.0,10.0,3,1.0,54321
"#;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// Check one exported value against the raw CSV text it came from
fn assert_matches_source(raw: Option<&str>, value: &Value, context: &str) {
    match (raw, value) {
        (None, Value::Null) => {}
        (Some(text), Value::String(exported)) => assert_eq!(exported, text, "{context}"),
        (Some(text), Value::Bool(exported)) => {
            assert!(matches!(text, "True" | "true" | "False" | "false"), "{context}");
            assert_eq!(*exported, text.eq_ignore_ascii_case("true"), "{context}");
        }
        (Some(text), Value::Number(number)) => {
            if let Some(exact) = number.as_u64() {
                assert_eq!(text.parse::<u64>().ok(), Some(exact), "{context}");
            } else if let Some(exact) = number.as_i64() {
                assert_eq!(text.parse::<i64>().ok(), Some(exact), "{context}");
            } else {
                let exported = number.as_f64().unwrap();
                assert_eq!(text.parse::<f64>().ok(), Some(exported), "{context}");
                // Integer text written as a float must keep every digit
                if let Ok(whole) = text.parse::<i128>() {
                    assert_eq!(exported as i128, whole, "{context}");
                }
            }
        }
        (raw, value) => panic!("{context}: {raw:?} exported as {value}"),
    }
}

fn load() -> Dataset {
    let file = write_csv(MOVIES_CSV);
    Dataset::load_from_csv(file.path()).unwrap()
}

#[test]
fn test_full_report() {
    let dataset = load();
    assert_eq!(dataset.len(), 8);

    // Six distinct titles (Toy Story appears twice) plus the missing-title group
    assert_eq!(unique_title_count(&dataset), 7);

    // (7.7 + 6.9 + 8.3 + 8.5 + 8.3 + 9.9 + 5.0) / 7
    assert_eq!(average_rating(&dataset), Some(7.8));

    let top = top_rated_movies(&dataset, &TopRatedQuery::default());
    let titles: Vec<_> = top.iter().filter_map(|m| m.title.as_deref()).collect();
    assert_eq!(titles, vec!["The Shawshank Redemption", "Fight Club", "The Dark Knight"]);

    let years = movies_per_year(&dataset);
    let total: usize = years.iter().map(|y| y.movie_count).sum();
    assert_eq!(total, dataset.len());
    let last = years.last().unwrap();
    assert_eq!(last.release_year, None);
    assert_eq!(last.movie_count, 2);
    let y1995 = years.iter().find(|y| y.release_year == Some(1995)).unwrap();
    assert_eq!(y1995.movie_count, 3);

    let genres = movies_per_genre(&dataset);
    assert_eq!(genres[0].genre_name, "Drama");
    assert_eq!(genres[0].count, 4);
    let occurrences: usize = genres.iter().map(|g| g.count).sum();
    assert_eq!(occurrences, 14);
}

#[test]
fn test_export_round_trip() {
    let dataset = load();
    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("movies.json");

    dataset.export_jsonl(&path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), dataset.len());

    for (row, line) in lines.iter().enumerate() {
        let record: Value = serde_json::from_str(line).unwrap();
        let object = record.as_object().unwrap();
        assert_eq!(object.len(), dataset.columns().len());

        let cells = dataset.row(row).unwrap();
        for (column, cell) in dataset.columns().iter().zip(cells) {
            let value = object.get(column).unwrap();
            assert_matches_source(cell.as_deref(), value, &format!("row {row}, column {column}"));
        }
    }

    assert_eq!(dataset.column_kind("imdb_ref"), Some(ColumnKind::Integer));
    assert_eq!(dataset.column_kind("popularity"), Some(ColumnKind::Float));
    assert_eq!(dataset.column_kind("tmdb_ref"), Some(ColumnKind::Text));

    let first: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["original_title"], "Toy Story");
    assert_eq!(first["vote_count"], 5415.0);
    assert_eq!(first["adult"], false);
    assert_eq!(first["imdb_ref"].as_u64(), Some(12345678901234567890));
    assert!(lines[0].contains(r#""imdb_ref":12345678901234567890"#));
    let third: Value = serde_json::from_str(lines[2]).unwrap();
    assert_eq!(third["tmdb_ref"], "123456789012345678901234");
    let seventh: Value = serde_json::from_str(lines[6]).unwrap();
    assert_eq!(seventh["vote_average"], Value::Null);
    assert_eq!(seventh["original_title"], "Comma, In Title");
}

#[test]
fn test_export_is_idempotent() {
    let dataset = load();
    let out = tempfile::tempdir().unwrap();
    let first = out.path().join("first.json");
    let second = out.path().join("second.json");

    dataset.export_jsonl(&first).unwrap();
    dataset.export_jsonl(&second).unwrap();
    dataset.export_jsonl(&first).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_short_rows_load_with_missing_cells() {
    let short_row = write_csv("original_title,vote_average,vote_count,release_date,genres\nHeat,7.7\n");
    let dataset = Dataset::load_from_csv(short_row.path()).unwrap();

    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.movies()[0].vote_average, Some(7.7));
    assert_eq!(dataset.movies()[0].vote_count, None);
    assert_eq!(movies_per_year(&dataset)[0].release_year, None);
}

#[test]
fn test_load_errors() {
    let missing = Dataset::load_from_csv(std::path::Path::new("no/such/movies.csv"));
    assert!(matches!(missing, Err(DataLoadError::FileNotFound { .. })));

    let long_row = write_csv("original_title,vote_average,vote_count,release_date,genres\nHeat,7.7,10,1995,[],extra\n");
    let parsed = Dataset::load_from_csv(long_row.path());
    assert!(matches!(parsed, Err(DataLoadError::ParseError { line: 2, .. })));

    let no_genres = write_csv("original_title,vote_average,vote_count,release_date\nHeat,7.7,10,1995\n");
    let parsed = Dataset::load_from_csv(no_genres.path());
    assert!(matches!(parsed, Err(DataLoadError::MissingColumn { .. })));
}
