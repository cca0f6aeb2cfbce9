//! Filter on vote count.
//!
//! Keeps a handful of enthusiastic voters from pushing an obscure title to
//! the top of the rankings.

use crate::traits::Filter;
use data_loader::Movie;

/// Keeps movies whose `vote_count` is strictly above `min_votes`.
pub struct MinimumVotesFilter {
    min_votes: u64,
}

impl MinimumVotesFilter {
    pub fn new(min_votes: u64) -> Self {
        Self { min_votes }
    }
}

impl Filter for MinimumVotesFilter {
    fn name(&self) -> &str {
        "MinimumVotesFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie> {
        movies
            .into_iter()
            .filter(|movie| movie.vote_count.is_some_and(|c| c > self.min_votes))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, vote_count: Option<u64>) -> Movie {
        Movie {
            title: Some(title.to_string()),
            vote_average: Some(9.0),
            vote_count,
            release_date: None,
            genres: None,
        }
    }

    #[test]
    fn test_minimum_votes_filter() {
        let movies = vec![
            movie("Popular", Some(12_000)),
            movie("Exactly", Some(8000)),
            movie("Niche", Some(3)),
            movie("Uncounted", None),
        ];

        let filter = MinimumVotesFilter::new(8000);
        let kept = filter.apply(movies.iter().collect());

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title.as_deref(), Some("Popular"));
    }
}
