use data_loader::{source_for, DatasetLoader, DEFAULT_DATASET_PATH};
use std::time::Instant;

#[tokio::main]
async fn main() {
    let location = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DATASET_PATH.to_string());

    println!("Loading dataset from {}...\n", location);

    let loader = DatasetLoader::new(source_for(&location));

    let start = Instant::now();
    let movies = loader
        .load_dataset()
        .await
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    // Second call is served from the cache
    let cached_start = Instant::now();
    let _ = loader.load_dataset().await.expect("Cache lookup failed");
    let cached_elapsed = cached_start.elapsed();

    let genres: std::collections::BTreeSet<&str> = movies
        .iter()
        .flat_map(|m| m.genres.iter().map(String::as_str))
        .collect();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Cached lookup: {:?}", cached_elapsed);
    println!("Movies: {}", movies.len());
    println!("Distinct genres: {}", genres.len());
}
