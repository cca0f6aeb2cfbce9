//! Filter implementations for the top-rated query.
//!
//! Both thresholds are strict: a movie sitting exactly on a threshold is
//! removed, and a movie with no value for the field never passes.

pub mod minimum_rating;
pub mod minimum_votes;

// Re-export for convenience
pub use minimum_rating::MinimumRatingFilter;
pub use minimum_votes::MinimumVotesFilter;
