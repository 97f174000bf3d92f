//! Deterministic seeding for pattern randomness.
//!
//! Every pattern derives its own RNG from one base seed and a purpose string, so the
//! same `--seed` replays the same animation regardless of which other patterns ran.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hash::{DefaultHasher, Hash, Hasher};

/// Source of per-purpose seeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Seeds {
    base: u64,
}

impl Seeds {
    pub fn new(base: u64) -> Self {
        Self { base }
    }

    /// Seeds from the given value, or from OS entropy if `None`.
    pub fn from_option(seed: Option<u64>) -> Self {
        Self::new(seed.unwrap_or_else(rand::random))
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    /// Derive a seed for `purpose`. Per base seed and purpose, it is always the same.
    pub fn seed_for(&self, purpose: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.base.hash(&mut hasher);
        purpose.hash(&mut hasher);
        hasher.finish()
    }

    /// A fresh RNG for `purpose`.
    pub fn rng_for(&self, purpose: &str) -> StdRng {
        StdRng::seed_from_u64(self.seed_for(purpose))
    }
}
