//! Core domain types for the movie dataset.
//!
//! Two shapes live here:
//! - `RawRow`: one loosely-shaped row as it came out of the table, every
//!   field optional and unvalidated
//! - `MovieRecord`: the canonical record every downstream query works with
//!
//! The only way from one to the other is `normalizer::normalize`.

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a movie within one load (`movie-{index}`)
pub type MovieId = String;

// =============================================================================
// Defaults applied by the normalizer
// =============================================================================

/// Year used when the source value is missing or unparsable
pub const DEFAULT_YEAR: i32 = 2000;

/// Runtime used when the source value is missing
pub const DEFAULT_RUNTIME: &str = "N/A";

/// Rating used when the source value is missing or unparsable
pub const DEFAULT_RATING: f32 = 0.0;

/// Overview used when the source value is missing
pub const DEFAULT_OVERVIEW: &str = "No overview available.";

/// Poster used when the source value is missing
pub const DEFAULT_POSTER: &str = "https://via.placeholder.com/300x450?text=No+Poster";

// =============================================================================
// Raw rows
// =============================================================================

/// One row of the source table, keyed by the columns the loader understands.
///
/// Fields are `None` when the column is absent from the header or the cell
/// is blank. Nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub title: Option<String>,
    pub year: Option<String>,
    pub runtime: Option<String>,
    pub genres: Option<String>,
    pub rating: Option<String>,
    pub overview: Option<String>,
    pub poster: Option<String>,
}

impl RawRow {
    /// Create a row carrying only a title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// True when the row has a non-blank title and can become a record
    pub fn has_title(&self) -> bool {
        self.title
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false)
    }
}

// =============================================================================
// Canonical records
// =============================================================================

/// A normalized movie. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    pub year: i32,
    pub runtime: String,
    /// Trimmed genre names in source order
    pub genres: Vec<String>,
    /// Usually within [0, 10] but not clamped
    pub rating: f32,
    pub overview: String,
    pub poster: String,
}

impl MovieRecord {
    /// Build a record with defaults for everything but the given fields.
    ///
    /// Handy for tests and demos that only care about the fields the
    /// engine filters and sorts on.
    pub fn new(
        id: impl Into<MovieId>,
        title: impl Into<String>,
        year: i32,
        genres: &[&str],
        rating: f32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year,
            runtime: DEFAULT_RUNTIME.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            rating,
            overview: DEFAULT_OVERVIEW.to_string(),
            poster: DEFAULT_POSTER.to_string(),
        }
    }

    /// Case-insensitive substring match against any genre
    pub fn has_genre_like(&self, needle_lowercase: &str) -> bool {
        self.genres
            .iter()
            .any(|genre| genre.to_lowercase().contains(needle_lowercase))
    }
}
