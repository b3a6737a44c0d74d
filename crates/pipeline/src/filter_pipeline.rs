//! Ordered composition of filters.
//!
//! Every query builds a fresh `FilterPipeline` from its criteria and runs
//! the cached movies through it once.

use crate::traits::Filter;
use data_loader::MovieRecord;

/// Filters applied in insertion order; each sees only what the previous
/// one kept.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(GenreFilter::new("comedy"))
///     .add_filter(DecadeFilter::for_year(1995));
///
/// let filtered = pipeline.apply(movies.iter().collect());
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// A pipeline that keeps everything
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Append `filter` to the end of the chain.
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Add a filter only when one is given.
    ///
    /// Lets callers turn optional criteria into filters without branching.
    pub fn add_optional(self, filter: Option<impl Filter + 'static>) -> Self {
        match filter {
            Some(filter) => self.add_filter(filter),
            None => self,
        }
    }

    /// Number of filters in the pipeline
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run `movies` through every filter in order.
    ///
    /// Relative order of the survivors is preserved.
    pub fn apply<'a>(&self, movies: Vec<&'a MovieRecord>) -> Vec<&'a MovieRecord> {
        self.filters.iter().fold(movies, |current, filter| {
            let before = current.len();
            let kept = filter.apply(current);
            tracing::debug!("{}: kept {} of {} movies", filter.name(), kept.len(), before);
            kept
        })
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{DecadeFilter, GenreFilter};

    fn create_test_movies() -> Vec<MovieRecord> {
        vec![
            MovieRecord::new("movie-0", "A", 1994, &["Drama"], 8.5),
            MovieRecord::new("movie-1", "B", 1999, &["Comedy"], 7.0),
            MovieRecord::new("movie-2", "C", 2015, &["Comedy"], 9.0),
        ]
    }

    #[test]
    fn test_empty_pipeline() {
        let movies = create_test_movies();
        let pipeline = FilterPipeline::new();

        assert!(pipeline.is_empty());
        let filtered = pipeline.apply(movies.iter().collect());
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_chained_filters() {
        let movies = create_test_movies();

        let pipeline = FilterPipeline::new()
            .add_filter(GenreFilter::new("comedy"))
            .add_filter(DecadeFilter::for_year(1995));

        let filtered = pipeline.apply(movies.iter().collect());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "B");
    }

    #[test]
    fn test_optional_filters() {
        let movies = create_test_movies();

        let pipeline = FilterPipeline::new()
            .add_optional(None::<GenreFilter>)
            .add_optional(Some(DecadeFilter::for_year(2012)));

        assert_eq!(pipeline.len(), 1);
        let filtered = pipeline.apply(movies.iter().collect());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "C");
    }
}
