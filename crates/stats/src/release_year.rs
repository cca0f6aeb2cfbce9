//! Release-year derivation and per-year counts.
//!
//! Dates are parsed leniently. Rows whose `release_date` is missing or
//! unparseable are counted in an unknown-year bucket, which always sorts
//! after every known year and is never dropped.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use data_loader::Dataset;
use std::collections::BTreeMap;
use tracing::debug;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Number of movies released in one year.
///
/// `release_year` is `None` for the unknown-year bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearlyCount {
    pub release_year: Option<i32>,
    pub movie_count: usize,
}

/// Derive a calendar year from a date-like string
pub fn release_year(raw: &str) -> Option<i32> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    // Bare year, e.g. "1995"
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().ok();
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(date.year());
    }

    if let Some(datetime) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(datetime.year());
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
        return Some(datetime.year());
    }

    // Year and month only, e.g. "1995-10"
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        .ok()
        .map(|date| date.year())
}

/// Count movies per release year, ascending, unknown year last.
///
/// Group counts always sum to the dataset's row count.
pub fn movies_per_year(dataset: &Dataset) -> Vec<YearlyCount> {
    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    let mut unknown = 0;

    for movie in dataset.movies() {
        match movie.release_date.as_deref().and_then(release_year) {
            Some(year) => *by_year.entry(year).or_insert(0) += 1,
            None => unknown += 1,
        }
    }

    debug!(
        "Grouped {} rows into {} years ({} with unknown year)",
        dataset.len(),
        by_year.len(),
        unknown
    );

    let mut counts: Vec<YearlyCount> = by_year
        .into_iter()
        .map(|(year, movie_count)| YearlyCount {
            release_year: Some(year),
            movie_count,
        })
        .collect();

    if unknown > 0 {
        counts.push(YearlyCount {
            release_year: None,
            movie_count: unknown,
        });
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::REQUIRED_COLUMNS;

    fn dataset_with_dates(dates: &[Option<&str>]) -> Dataset {
        let columns = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        let rows = dates
            .iter()
            .map(|date| vec![None, None, None, date.map(str::to_string), None])
            .collect();
        Dataset::from_rows(columns, rows).unwrap()
    }

    #[test]
    fn test_release_year_formats() {
        assert_eq!(release_year("1995-10-30"), Some(1995));
        assert_eq!(release_year(" 2008-07-16 "), Some(2008));
        assert_eq!(release_year("1995/10/30"), Some(1995));
        assert_eq!(release_year("10/30/1995"), Some(1995));
        assert_eq!(release_year("30.10.1995"), Some(1995));
        assert_eq!(release_year("1995-10-30 12:00:00"), Some(1995));
        assert_eq!(release_year("1995-10-30T12:00:00+02:00"), Some(1995));
        assert_eq!(release_year("1995"), Some(1995));
        assert_eq!(release_year("1995-10"), Some(1995));
    }

    #[test]
    fn test_release_year_unparseable() {
        assert_eq!(release_year(""), None);
        assert_eq!(release_year("1"), None);
        assert_eq!(release_year("0.065736"), None);
        assert_eq!(release_year("1995-13-45"), None);
        assert_eq!(release_year("unknown"), None);
    }

    #[test]
    fn test_movies_per_year_sorted_with_unknown_last() {
        let dataset = dataset_with_dates(&[
            Some("2001-05-01"),
            Some("1995-10-30"),
            None,
            Some("2001-12-24"),
            Some("not a date"),
            Some("1995-01-01"),
        ]);

        let counts = movies_per_year(&dataset);
        assert_eq!(
            counts,
            vec![
                YearlyCount { release_year: Some(1995), movie_count: 2 },
                YearlyCount { release_year: Some(2001), movie_count: 2 },
                YearlyCount { release_year: None, movie_count: 2 },
            ]
        );

        let total: usize = counts.iter().map(|c| c.movie_count).sum();
        assert_eq!(total, dataset.len());
    }

    #[test]
    fn test_movies_per_year_without_unknown_rows() {
        let dataset = dataset_with_dates(&[Some("1999-03-31")]);
        let counts = movies_per_year(&dataset);

        assert_eq!(counts.len(), 1);
        assert!(counts.iter().all(|c| c.release_year.is_some()));
    }
}
