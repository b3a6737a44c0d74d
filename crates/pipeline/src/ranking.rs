//! Ordering and paging of filtered movies.
//!
//! Ranking is two steps: shuffle, then a *stable* sort by rating. Equal
//! ratings therefore keep the order the shuffle gave them, which is what
//! makes seeded queries reproducible and ambient queries varied.

use data_loader::MovieRecord;
use sources::{shuffle_with, ShuffleMode};
use tracing::debug;

/// Shuffle with `mode`, then stable-sort by rating, highest first.
pub fn rank(movies: &mut [&MovieRecord], mode: ShuffleMode) {
    shuffle_with(movies, mode);
    sort_by_rating_desc(movies);
    debug!(
        "Ranked {} movies ({:?}, reproducible: {})",
        movies.len(),
        mode,
        mode.is_deterministic()
    );
}

/// Stable sort by rating, highest first.
///
/// `total_cmp` gives a total order even for NaN, so the sort never sees an
/// inconsistent comparator. Zero of either sign is one key, so 0.0 and -0.0
/// tie.
pub fn sort_by_rating_desc(movies: &mut [&MovieRecord]) {
    movies.sort_by(|a, b| rating_key(b.rating).total_cmp(&rating_key(a.rating)));
}

fn rating_key(rating: f32) -> f32 {
    if rating == 0.0 { 0.0 } else { rating }
}

/// The window `[offset, offset + limit)` of `items`, clamped to its length.
///
/// Out-of-range offsets and oversized limits yield a shorter (possibly
/// empty) slice rather than an error.
pub fn paginate<T>(items: &[T], offset: usize, limit: usize) -> &[T] {
    let start = offset.min(items.len());
    let end = offset.saturating_add(limit).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_movies() -> Vec<MovieRecord> {
        vec![
            MovieRecord::new("movie-0", "Low", 2000, &[], 5.0),
            MovieRecord::new("movie-1", "Tie A", 2000, &[], 8.0),
            MovieRecord::new("movie-2", "High", 2000, &[], 9.5),
            MovieRecord::new("movie-3", "Tie B", 2000, &[], 8.0),
            MovieRecord::new("movie-4", "Tie C", 2000, &[], 8.0),
        ]
    }

    #[test]
    fn test_sort_is_stable_and_descending() {
        let movies = create_test_movies();
        let mut refs: Vec<&MovieRecord> = movies.iter().collect();

        sort_by_rating_desc(&mut refs);

        let ids: Vec<&str> = refs.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["movie-2", "movie-1", "movie-3", "movie-4", "movie-0"]);
    }

    #[test]
    fn test_signed_zero_ratings_tie() {
        for (first, second) in [(-0.0, 0.0), (0.0, -0.0)] {
            let movies = vec![
                MovieRecord::new("movie-0", "First Zero", 2000, &[], first),
                MovieRecord::new("movie-1", "Second Zero", 2000, &[], second),
                MovieRecord::new("movie-2", "Rated", 2000, &[], 6.0),
            ];
            let mut refs: Vec<&MovieRecord> = movies.iter().collect();

            sort_by_rating_desc(&mut refs);

            let ids: Vec<&str> = refs.iter().map(|m| m.id.as_str()).collect();
            assert_eq!(ids, vec!["movie-2", "movie-0", "movie-1"]);
        }
    }

    #[test]
    fn test_seeded_rank_is_reproducible() {
        let movies = create_test_movies();

        let mut first: Vec<&MovieRecord> = movies.iter().collect();
        let mut second: Vec<&MovieRecord> = movies.iter().collect();
        rank(&mut first, ShuffleMode::Seeded(101));
        rank(&mut second, ShuffleMode::Seeded(101));

        let first_ids: Vec<&str> = first.iter().map(|m| m.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);

        // Ratings are still descending whatever the tie order
        assert!(first.windows(2).all(|w| w[0].rating >= w[1].rating));
        assert_eq!(first[0].id, "movie-2");
        assert_eq!(first[4].id, "movie-0");
    }

    #[test]
    fn test_paginate_clamps() {
        let items = [1, 2, 3, 4, 5];

        assert_eq!(paginate(&items, 0, 2), &[1, 2]);
        assert_eq!(paginate(&items, 3, 10), &[4, 5]);
        assert!(paginate(&items, 5, 6).is_empty());
        assert!(paginate(&items, 100, 6).is_empty());
        assert!(paginate(&items, 1, 0).is_empty());
        assert_eq!(paginate(&items, 2, usize::MAX), &[3, 4, 5]);
    }
}
