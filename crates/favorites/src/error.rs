//! Error types for the favorites crate.

use thiserror::Error;

/// Errors that can surface from `save` and `remove`.
///
/// Only local persistence is reported here. Remote mirroring failures are
/// carried by `MirrorOutcome` and never turn into a `FavoritesError`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FavoritesError {
    #[error("Store error for key {key}: {reason}")]
    Store { key: String, reason: String },

    #[error("Failed to encode favorites: {0}")]
    Encode(String),
}

impl FavoritesError {
    pub(crate) fn store(key: &str, reason: impl ToString) -> Self {
        Self::Store {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, FavoritesError>;
