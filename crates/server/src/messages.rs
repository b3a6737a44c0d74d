//! Human-readable messages attached to query responses.

use rand::seq::IndexedRandom;

/// Pool the recommendation message is drawn from
pub const RECOMMENDATION_MESSAGES: &[&str] = &[
    "Here are some movies we think you'll love!",
    "Picked just for you. Grab the popcorn!",
    "Your next favorite movie might be in here.",
    "Fresh picks based on what you asked for.",
    "Lights, camera, recommendations!",
];

/// Message on every trending response
pub const TRENDING_MESSAGE: &str = "Trending movies from 2010 onwards, highest rated first.";

/// One message from the pool, chosen uniformly at random
pub fn recommendation_message() -> &'static str {
    RECOMMENDATION_MESSAGES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(RECOMMENDATION_MESSAGES[0])
}
