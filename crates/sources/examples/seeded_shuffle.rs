//! Example: Reproducible shuffles
//!
//! Run with: cargo run --package sources --example seeded_shuffle
//!
//! This example shows how to:
//! 1. Shuffle the same list twice with one seed and get the same order
//! 2. Move to the next seed and get a different order
//! 3. Shuffle with the ambient source

use sources::{shuffle_with, ShuffleMode};

fn main() {
    println!("=== ReelRecs Shuffle Example ===\n");

    let titles = vec![
        "Heat", "Alien", "Arrival", "Coco", "Joker", "Whiplash", "Parasite", "Superbad",
    ];

    // 'e' + offset 0, the seed the engine derives for language "en"
    let seed = 'e' as i64;

    for attempt in 1..=2 {
        let mut order = titles.clone();
        shuffle_with(&mut order, ShuffleMode::Seeded(seed));
        println!("Seed {} (attempt {}): {}", seed, attempt, order.join(", "));
    }

    let mut next_page = titles.clone();
    shuffle_with(&mut next_page, ShuffleMode::Seeded(seed + 6));
    println!("Seed {}: {}", seed + 6, next_page.join(", "));

    let mut ambient = titles;
    shuffle_with(&mut ambient, ShuffleMode::Ambient);
    println!("Ambient: {}", ambient.join(", "));
}
