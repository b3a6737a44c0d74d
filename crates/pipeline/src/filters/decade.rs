//! Filter for a decade bucket.
//!
//! A requested year selects its whole decade: 1995 means 1990..=1999.

use crate::traits::Filter;
use data_loader::MovieRecord;

/// Keeps movies released in the same decade as a requested year.
///
/// ## Algorithm
/// 1. start = floor(year / 10) * 10, end = start + 9
/// 2. Clamp both to the `i32` range (only the extreme decades are cut short)
/// 3. Keep movies with start <= year <= end
pub struct DecadeFilter {
    start: i32,
    end: i32,
}

impl DecadeFilter {
    /// Create a DecadeFilter for the decade containing `year`.
    pub fn for_year(year: i32) -> Self {
        // Euclidean division floors negative years too
        let start = i64::from(year).div_euclid(10) * 10;
        let clamp = |bound: i64| bound.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        Self {
            start: clamp(start),
            end: clamp(start + 9),
        }
    }

    /// Inclusive bounds of the decade
    pub fn bounds(&self) -> (i32, i32) {
        (self.start, self.end)
    }
}

impl Filter for DecadeFilter {
    fn name(&self) -> &str {
        "DecadeFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a MovieRecord>) -> Vec<&'a MovieRecord> {
        movies
            .into_iter()
            .filter(|movie| (self.start..=self.end).contains(&movie.year))
            .collect()
    }
}
