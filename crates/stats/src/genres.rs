//! Genre extraction and per-genre counts.
//!
//! Each row's `genres` cell is a serialized list of `{id, name}` mappings.
//! Extraction is lossy on purpose: a cell that can't be decoded contributes
//! no genres instead of failing the whole aggregation.

use crate::literal::{self, Literal};
use data_loader::Dataset;
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Number of occurrences of one genre name across the dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreCount {
    pub genre_name: String,
    pub count: usize,
}

/// Decode the genre names from one raw `genres` cell.
///
/// Returns an empty list when the cell is not a list literal, or when any
/// element is not a mapping. Elements without a string `name` are skipped
/// and the remaining names are kept.
///
/// ```
/// use stats::extract_genres;
///
/// assert_eq!(extract_genres("[{'id': 28, 'name': 'Action'}]"), vec!["Action"]);
/// assert!(extract_genres("not a list").is_empty());
/// ```
pub fn extract_genres(raw: &str) -> Vec<String> {
    let Ok(Literal::List(items)) = literal::parse(raw) else {
        return Vec::new();
    };

    let mut names = Vec::with_capacity(items.len());
    for item in &items {
        if !matches!(item, Literal::Dict(_)) {
            return Vec::new();
        }
        if let Some(name) = item.get("name").and_then(Literal::as_str) {
            names.push(name.to_string());
        }
    }
    names
}

/// Count movies per genre, most frequent first.
///
/// A movie listed under three genres adds one to each of them, so the counts
/// sum to the number of extracted genre occurrences, not the row count.
/// Equal counts keep the order in which the genres first appear.
pub fn movies_per_genre(dataset: &Dataset) -> Vec<GenreCount> {
    // Extraction is pure, so rows are decoded in parallel; collect keeps row order
    let per_row: Vec<Vec<String>> = dataset
        .movies()
        .par_iter()
        .map(|movie| movie.genres.as_deref().map(extract_genres).unwrap_or_default())
        .collect();

    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<GenreCount> = Vec::new();
    for genre_name in per_row.into_iter().flatten() {
        match slots.get(&genre_name).copied() {
            Some(slot) => counts[slot].count += 1,
            None => {
                slots.insert(genre_name.clone(), counts.len());
                counts.push(GenreCount {
                    genre_name,
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among ties
    counts.sort_by(|a, b| b.count.cmp(&a.count));

    debug!("Counted {} distinct genres", counts.len());
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::REQUIRED_COLUMNS;

    fn dataset_with_genres(cells: &[Option<&str>]) -> Dataset {
        let columns = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        let rows = cells
            .iter()
            .map(|genres| {
                vec![
                    Some("Title".to_string()),
                    None,
                    None,
                    None,
                    genres.map(str::to_string),
                ]
            })
            .collect();
        Dataset::from_rows(columns, rows).unwrap()
    }

    #[test]
    fn test_extract_genres() {
        assert_eq!(extract_genres("[{'id': 1, 'name': 'Action'}]"), vec!["Action"]);
        assert_eq!(
            extract_genres("[{'id': 16, 'name': 'Animation'}, {'id': 10751, 'name': 'Family'}]"),
            vec!["Animation", "Family"]
        );
        assert_eq!(
            extract_genres(r#"[{"id": 10751, "name": "Children's"}]"#),
            vec!["Children's"]
        );
    }

    #[test]
    fn test_extract_genres_malformed() {
        assert!(extract_genres("").is_empty());
        assert!(extract_genres("not a list").is_empty());
        assert!(extract_genres("[]").is_empty());
        assert!(extract_genres("[{'id': 1, 'name': 'Action'}").is_empty());
        assert!(extract_genres("{'id': 1, 'name': 'Action'}").is_empty());
        assert!(extract_genres("({'id': 1, 'name': 'Action'},)").is_empty());
    }

    #[test]
    fn test_extract_genres_non_mapping_element_empties_row() {
        assert!(extract_genres("[{'id': 1, 'name': 'Action'}, 'Drama']").is_empty());
    }

    #[test]
    fn test_extract_genres_skips_elements_without_name() {
        assert_eq!(
            extract_genres("[{'id': 1}, {'id': 2, 'name': 'Drama'}, {'name': 7}]"),
            vec!["Drama"]
        );
    }

    #[test]
    fn test_movies_per_genre_counts_and_order() {
        let dataset = dataset_with_genres(&[
            Some("[{'id': 18, 'name': 'Drama'}, {'id': 35, 'name': 'Comedy'}]"),
            Some("[{'id': 35, 'name': 'Comedy'}, {'id': 28, 'name': 'Action'}]"),
            Some("[{'id': 28, 'name': 'Action'}]"),
            Some("[{'id': 99, 'name': 'Documentary'}]"),
            Some("garbage"),
            None,
        ]);

        let counts = movies_per_genre(&dataset);
        let pairs: Vec<(&str, usize)> = counts
            .iter()
            .map(|c| (c.genre_name.as_str(), c.count))
            .collect();

        // Comedy and Action tie at 2; Comedy was seen first
        assert_eq!(
            pairs,
            vec![("Comedy", 2), ("Action", 2), ("Drama", 1), ("Documentary", 1)]
        );
    }

    #[test]
    fn test_movies_per_genre_sums_occurrences_not_rows() {
        let dataset = dataset_with_genres(&[
            Some("[{'name': 'Drama'}, {'name': 'Comedy'}, {'name': 'Romance'}]"),
            Some("[]"),
        ]);

        let total: usize = movies_per_genre(&dataset).iter().map(|c| c.count).sum();
        assert_eq!(total, 3);
        assert_eq!(dataset.len(), 2);
    }
}
