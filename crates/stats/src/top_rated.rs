//! Top-rated movies above vote and rating thresholds.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::{MinimumRatingFilter, MinimumVotesFilter};
use data_loader::Dataset;
use tracing::debug;

/// Parameters for [`top_rated_movies`].
///
/// Defaults are the 5 best movies with more than 8000 votes and an average
/// above 8.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopRatedQuery {
    pub limit: usize,
    pub min_votes: u64,
    pub min_rating: f64,
}

impl Default for TopRatedQuery {
    fn default() -> Self {
        Self {
            limit: 5,
            min_votes: 8000,
            min_rating: 8.0,
        }
    }
}

/// One row of the top-rated report
#[derive(Debug, Clone, PartialEq)]
pub struct TopMovie {
    pub title: Option<String>,
    pub vote_average: f64,
    pub vote_count: u64,
}

/// Highest-rated movies passing both thresholds, best first.
///
/// Thresholds are strict. Movies with equal ratings keep their dataset
/// order. Returns fewer than `limit` rows when fewer qualify.
pub fn top_rated_movies(dataset: &Dataset, query: &TopRatedQuery) -> Vec<TopMovie> {
    let pipeline = FilterPipeline::new()
        .add_filter(MinimumRatingFilter::new(query.min_rating))
        .add_filter(MinimumVotesFilter::new(query.min_votes));

    let mut ranked: Vec<TopMovie> = pipeline
        .apply(dataset.movies().iter().collect())
        .into_iter()
        .filter_map(|movie| {
            Some(TopMovie {
                title: movie.title.clone(),
                vote_average: movie.vote_average?,
                vote_count: movie.vote_count?,
            })
        })
        .collect();

    debug!("{} movies pass the top-rated thresholds", ranked.len());

    // sort_by is stable, so ties stay in dataset order
    ranked.sort_by(|a, b| b.vote_average.total_cmp(&a.vote_average));
    ranked.truncate(query.limit);
    ranked
}
