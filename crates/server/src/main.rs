//! Simple test harness for the recommendation engine.
//!
//! Loads the configured dataset, then prints one page of recommendations and
//! the trending view. `REEL_DATASET` overrides the dataset location.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use server::{EngineConfig, RecommendationEngine, RecommendationFilters};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server=debug,pipeline=debug".into()),
        )
        .init();

    info!("Starting ReelRecs engine test harness");

    let mut config = EngineConfig::default();
    if let Ok(dataset) = std::env::var("REEL_DATASET") {
        config = config.with_dataset(dataset);
    }

    info!("Loading dataset from {}...", config.dataset);
    let engine = RecommendationEngine::new(Arc::new(config.build_loader()));

    let filters = RecommendationFilters::new().with_language("en");
    let response = engine.get_recommendations(&filters).await?;
    info!(
        "{} ({} of {} results)",
        response.message,
        response.movies.len(),
        response.total_results
    );
    for (i, movie) in response.movies.iter().enumerate() {
        info!(
            "{}. {} ({}) - Rating: {:.1} [{}]",
            i + 1,
            movie.title,
            movie.year,
            movie.rating,
            movie.genres.join(", ")
        );
    }

    let trending = engine.get_trending().await?;
    info!("{}", trending.message);
    for (i, movie) in trending.movies.iter().enumerate() {
        info!("{}. {} ({}) - Rating: {:.1}", i + 1, movie.title, movie.year, movie.rating);
    }

    Ok(())
}
