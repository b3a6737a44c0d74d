//! Filter implementations for the query pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod genre;
pub mod decade;
pub mod minimum_year;

// Re-export for convenience
pub use genre::GenreFilter;
pub use decade::DecadeFilter;
pub use minimum_year::{MinimumYearFilter, TRENDING_MIN_YEAR};
