//! Descriptive statistics over a loaded movie [`Dataset`](data_loader::Dataset).
//!
//! Every query is a pure function of `&Dataset` that returns a fresh result;
//! nothing is cached and the dataset is never modified. Having a `Dataset`
//! value at all means loading succeeded, so queries cannot run unloaded.
//!
//! This crate provides:
//! - Scalar aggregates (unique titles, average rating)
//! - A top-rated query built on a composable [`FilterPipeline`]
//! - Per-year counts with an explicit unknown-year bucket
//! - Genre extraction from serialized genre literals, and per-genre counts
//!
//! ## Example Usage
//! ```ignore
//! use data_loader::Dataset;
//! use stats::{movies_per_genre, top_rated_movies, TopRatedQuery};
//!
//! let dataset = Dataset::load_from_csv(path)?;
//! let top = top_rated_movies(&dataset, &TopRatedQuery::default());
//! let genres = movies_per_genre(&dataset);
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod literal;
pub mod summary;
pub mod top_rated;
pub mod release_year;
pub mod genres;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use literal::{Literal, LiteralError};
pub use summary::{average_rating, round_half_away_from_zero, unique_title_count};
pub use top_rated::{top_rated_movies, TopMovie, TopRatedQuery};
pub use release_year::{movies_per_year, release_year, YearlyCount};
pub use genres::{extract_genres, movies_per_genre, GenreCount};
