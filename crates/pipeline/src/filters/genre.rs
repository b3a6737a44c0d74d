//! Filter to keep only movies matching a requested genre.
//!
//! Matching is lenient: "sci" finds "Sci-Fi" and "comedy" finds "Comedy".

use crate::traits::Filter;
use data_loader::MovieRecord;
use rayon::prelude::*;

/// Keeps movies where any genre contains the requested text,
/// case-insensitively.
///
/// ## Algorithm
/// 1. Lowercase the requested genre once
/// 2. For each movie, lowercase each genre and test for a substring match
/// 3. Keep movies with at least one match
pub struct GenreFilter {
    needle: String,
}

impl GenreFilter {
    /// Create a new GenreFilter.
    ///
    /// # Arguments
    /// * `genre` - Text to look for in each movie's genre list
    pub fn new(genre: &str) -> Self {
        Self {
            needle: genre.trim().to_lowercase(),
        }
    }
}

impl Filter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a MovieRecord>) -> Vec<&'a MovieRecord> {
        // Rayon's collect keeps the input order
        movies
            .into_par_iter()
            .filter(|movie| movie.has_genre_like(&self.needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_movies() -> Vec<MovieRecord> {
        vec![
            MovieRecord::new("movie-0", "Action Movie", 2000, &["Action", "Adventure"], 7.0),
            MovieRecord::new("movie-1", "Comedy Movie", 1995, &["Comedy"], 6.5),
            MovieRecord::new("movie-2", "Dark Comedy", 2005, &["Crime", "Dark Comedy"], 7.5),
            MovieRecord::new("movie-3", "No Genres", 2005, &[], 5.0),
        ]
    }

    #[test]
    fn test_genre_filter_case_insensitive_substring() {
        let movies = create_test_movies();
        let refs: Vec<&MovieRecord> = movies.iter().collect();

        let filter = GenreFilter::new("COMEDY");
        let filtered = filter.apply(refs);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, "movie-1");
        assert_eq!(filtered[1].id, "movie-2");
    }

    #[test]
    fn test_genre_filter_no_match() {
        let movies = create_test_movies();
        let filtered = GenreFilter::new("Western").apply(movies.iter().collect());
        assert!(filtered.is_empty());
    }
}
