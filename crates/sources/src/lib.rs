//! # Sources Crate
//!
//! Randomness sources and the shuffle they drive.
//!
//! ## Components
//!
//! ### Seeded Source (deterministic)
//! Sine-based generator keyed by an integer seed:
//! - Same seed, same sequence, same permutation
//! - Keeps paginated "load more" results stable between requests
//!
//! ### Ambient Source (non-deterministic)
//! OS-seeded RNG for when nobody needs to reproduce the order.
//!
//! ### Shuffle
//! Fisher–Yates over any `RandomSource`, with `ShuffleMode` to pick a
//! source explicitly.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{shuffle_with, ShuffleMode};
//!
//! let mut ids = vec!["a", "b", "c", "d"];
//! shuffle_with(&mut ids, ShuffleMode::Seeded(101));
//!
//! let mut again = vec!["a", "b", "c", "d"];
//! shuffle_with(&mut again, ShuffleMode::Seeded(101));
//! assert_eq!(ids, again);
//! ```

// Public modules
pub mod traits;
pub mod seeded;
pub mod ambient;
pub mod shuffle;

// Re-export commonly used types
pub use traits::RandomSource;
pub use seeded::SeededSource;
pub use ambient::AmbientSource;
pub use shuffle::{shuffle, shuffle_with, ShuffleMode};
