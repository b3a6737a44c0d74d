//! Server crate for the ReelRecs recommendation engine.
//!
//! This crate contains the engine that answers recommendation and trending
//! queries, plus the configuration that wires a dataset loader and a
//! favorites store together.

pub mod config;
pub mod engine;
pub mod messages;

pub use config::{EngineConfig, DEFAULT_FAVORITES_DIR};
pub use engine::{
    RecommendationEngine, RecommendationFilters, RecommendationResponse, DEFAULT_LIMIT,
    TRENDING_LIMIT,
};
