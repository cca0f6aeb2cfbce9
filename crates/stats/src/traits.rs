//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that lets threshold checks be
//! composed into a [`FilterPipeline`](crate::FilterPipeline).

use data_loader::Movie;

/// A predicate stage over borrowed movies.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across threads
/// - Filters take ownership of the Vec and return a filtered Vec, keeping
///   the relative order of the movies they retain
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of movies.
    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie>;
}
