//! Favorites persistence with best-effort remote mirroring.
//!
//! This crate provides:
//! - `FavoritesStore`: idempotent save, remove and lookup of favorites
//! - `KeyValueStore` with file-backed and in-memory implementations
//! - `MirrorTask`: background append of new favorites to a `RemoteSync`
//!
//! ## Example Usage
//! ```ignore
//! use favorites::{FavoritesStore, FileStore};
//! use std::sync::Arc;
//!
//! let store = FavoritesStore::new(Arc::new(FileStore::new(".reel-recs")));
//! let receipt = store.save(&movie).await?;
//! if let Some(mirror) = receipt.mirror {
//!     println!("{}", mirror.outcome().await);
//! }
//! ```

pub mod error;
pub mod entry;
pub mod store;
pub mod mirror;
pub mod favorites;

// Re-export main types
pub use error::{FavoritesError, Result};
pub use entry::FavoriteEntry;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use mirror::{MirrorOutcome, MirrorTask, FAVORITES_SHEET};
pub use favorites::{Clock, FavoritesStore, SaveOutcome, SaveReceipt, FAVORITES_KEY};
