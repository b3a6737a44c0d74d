//! Error types for the data-loader crate.
//!
//! Only the first load of a dataset can fail. Once a cache exists every
//! query is served from memory, so these errors never reach query callers
//! after a successful load.

use thiserror::Error;

/// Errors that can occur while fetching and parsing the dataset
///
/// `LoadError` is `Clone` because a single in-flight load hands its result to
/// every caller that was waiting on it. Underlying I/O and HTTP errors are
/// captured as strings for the same reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The raw source text could not be retrieved
    #[error("Failed to fetch dataset from {source_name}: {reason}")]
    Fetch { source_name: String, reason: String },

    /// The fetch did not complete within the configured bound
    #[error("Timed out after {seconds}s fetching dataset from {source_name}")]
    Timeout { source_name: String, seconds: u64 },

    /// The payload could not be read as a header-row table
    #[error("Failed to parse dataset: {reason}")]
    Parse { reason: String },

    /// The header row lacks a column the loader cannot work without
    #[error("Dataset is missing required column: {column}")]
    MissingColumn { column: String },
}

impl LoadError {
    pub(crate) fn fetch(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = LoadError::fetch("data/movies.csv", "No such file or directory");
        assert_eq!(
            err.to_string(),
            "Failed to fetch dataset from data/movies.csv: No such file or directory"
        );

        let err = LoadError::MissingColumn {
            column: "title".to_string(),
        };
        assert!(err.to_string().contains("title"));
    }
}
