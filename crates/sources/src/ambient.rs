//! Ambient Source - non-reproducible samples from the platform RNG
//!
//! Used whenever the caller does not ask for a reproducible order.

use crate::traits::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// OS-seeded random source
#[derive(Debug, Clone)]
pub struct AmbientSource {
    rng: StdRng,
}

impl AmbientSource {
    /// Create a new ambient source seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for AmbientSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for AmbientSource {
    fn name(&self) -> &str {
        "AmbientSource"
    }

    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}
