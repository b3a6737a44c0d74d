//! Filter to keep only recent releases.
//!
//! Backs the trending view, which only considers movies from 2010 on.

use crate::traits::Filter;
use data_loader::MovieRecord;

/// Release year the trending view starts from
pub const TRENDING_MIN_YEAR: i32 = 2010;

/// Removes movies released before a given year.
pub struct MinimumYearFilter {
    min_year: i32,
}

impl MinimumYearFilter {
    /// Create a new MinimumYearFilter.
    ///
    /// # Arguments
    /// * `min_year` - Earliest release year to keep (inclusive)
    pub fn new(min_year: i32) -> Self {
        Self { min_year }
    }
}

impl Filter for MinimumYearFilter {
    fn name(&self) -> &str {
        "MinimumYearFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a MovieRecord>) -> Vec<&'a MovieRecord> {
        movies
            .into_iter()
            .filter(|movie| movie.year >= self.min_year)
            .collect()
    }
}
