//! # Data Loader Crate
//!
//! This crate loads the movie table once and keeps it in memory.
//!
//! ## Main Components
//!
//! - **types**: `RawRow` (as parsed) and `MovieRecord` (canonical)
//! - **parser**: header-row CSV into `RawRow`s
//! - **normalizer**: `RawRow` + index into `MovieRecord`, defaulting bad fields
//! - **source**: where the raw text comes from (file, HTTP, in-memory)
//! - **loader**: the single-load cache shared by every query
//! - **error**: `LoadError`
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{source_for, DatasetLoader};
//!
//! let loader = DatasetLoader::new(source_for("data/movies.csv"));
//!
//! // The first call fetches and parses; later calls reuse the cache
//! let movies = loader.load_dataset().await?;
//! println!("{} movies, first is {}", movies.len(), movies[0].title);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod normalizer;
pub mod source;
pub mod loader;

// Re-export commonly used types for convenience
pub use error::{LoadError, Result};
pub use loader::{build_records, Dataset, DatasetCache, DatasetLoader, DEFAULT_FETCH_TIMEOUT};
pub use normalizer::normalize;
pub use source::{
    source_for, DatasetSource, FileSource, HttpSource, StaticSource, DEFAULT_DATASET_PATH,
};
pub use types::{MovieId, MovieRecord, RawRow};
