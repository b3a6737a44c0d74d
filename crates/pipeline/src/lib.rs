//! Pipeline for filtering and ranking movies from the loaded dataset.
//!
//! This crate provides:
//! - Filter trait and implementations (genre, decade, minimum year)
//! - FilterPipeline for composing filters
//! - Ranking (shuffle + stable rating sort) and pagination
//!
//! ## Architecture
//! A query processes the cached movies in stages:
//! 1. Filters remove movies that do not match the request
//! 2. Ranking shuffles the survivors and stable-sorts them by rating
//! 3. Pagination cuts out the requested window
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{paginate, rank, FilterPipeline};
//! use pipeline::filters::*;
//! use sources::ShuffleMode;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(GenreFilter::new("comedy"))
//!     .add_filter(DecadeFilter::for_year(1995));
//!
//! let mut matches = pipeline.apply(movies.iter().collect());
//! rank(&mut matches, ShuffleMode::Seeded(101));
//! let page = paginate(&matches, 0, 6);
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod ranking;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use ranking::{paginate, rank, sort_by_rating_desc};
