//! Scalar aggregates over the whole dataset.

use data_loader::Dataset;
use std::collections::HashSet;

/// Number of distinct `original_title` values.
///
/// Missing titles form a single "unknown" group, counted once if present.
pub fn unique_title_count(dataset: &Dataset) -> usize {
    let mut titles: HashSet<&str> = HashSet::new();
    let mut has_missing = false;

    for movie in dataset.movies() {
        match movie.title.as_deref() {
            Some(title) => {
                titles.insert(title);
            }
            None => has_missing = true,
        }
    }

    titles.len() + usize::from(has_missing)
}

/// Mean `vote_average` over rows that have one, rounded to 2 decimals.
///
/// Returns `None` if no row has a rating.
pub fn average_rating(dataset: &Dataset) -> Option<f64> {
    let (sum, count) = dataset
        .movies()
        .iter()
        .filter_map(|movie| movie.vote_average)
        .fold((0.0_f64, 0_usize), |(sum, count), rating| (sum + rating, count + 1));

    if count == 0 {
        return None;
    }
    Some(round_half_away_from_zero(sum / count as f64, 2))
}

/// Round to `decimals` places; exact halves round away from zero.
///
/// `6.125` becomes `6.13` and `-6.125` becomes `-6.13`. Values whose binary
/// form sits just below a half (like `2.675`) round down, as the stored
/// number is below the midpoint.
pub fn round_half_away_from_zero(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
