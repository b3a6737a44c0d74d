//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to the loaded movie set.

use data_loader::MovieRecord;

/// Core trait for filtering movies.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be used in concurrent contexts
/// - Filters work on borrowed records from the shared cache; nothing is
///   cloned until the final page is built
/// - Filters keep the relative order of the records they retain
/// - Filtering cannot fail: an unusable criterion is a no-op, not an error
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of movies.
    ///
    /// # Arguments
    /// * `movies` - The movies to filter (takes ownership of the Vec)
    ///
    /// # Returns
    /// The movies that pass, in their original relative order
    fn apply<'a>(&self, movies: Vec<&'a MovieRecord>) -> Vec<&'a MovieRecord>;
}
