//! Injectable random selection.
//!
//! Every random choice the synthesizer makes is a uniform index draw, so the
//! seam is a single method. Implementations take `&self` so one source can
//! be shared by the concurrent units of a batch.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform index source.
pub trait RandomSource: Send + Sync {
    /// Draw an index uniformly from `0..upper`.
    ///
    /// Callers never pass `upper == 0`.
    fn pick(&self, upper: usize) -> usize;
}

/// Thread-local RNG; the production default.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, upper: usize) -> usize {
        rand::rng().random_range(0..upper.max(1))
    }
}

/// Seeded RNG for reproducible runs.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    /// Create a source whose draws are fully determined by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&self, upper: usize) -> usize {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .random_range(0..upper.max(1))
    }
}
