//! Filter on average rating.

use crate::traits::Filter;
use data_loader::Movie;

/// Keeps movies whose `vote_average` is strictly above `min_rating`.
pub struct MinimumRatingFilter {
    min_rating: f64,
}

impl MinimumRatingFilter {
    pub fn new(min_rating: f64) -> Self {
        Self { min_rating }
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie> {
        movies
            .into_iter()
            .filter(|movie| movie.vote_average.is_some_and(|r| r > self.min_rating))
            .collect()
    }
}
