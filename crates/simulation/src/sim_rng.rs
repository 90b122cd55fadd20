//! Deterministic RNG for world generation.
//!
//! Wraps `ChaCha8Rng` for cross-platform deterministic randomness. Ranges are
//! sampled as `u32` so 32-bit and 64-bit targets draw identical sequences.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct SimRng(pub ChaCha8Rng);

impl SimRng {
    /// Create a new `SimRng` seeded from the given `u64` value.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Uniform in `0..n`. `n` must be non-zero.
    pub fn below(&mut self, n: u32) -> u32 {
        self.0.gen_range(0..n)
    }

    pub fn unit(&mut self) -> f32 {
        self.0.gen::<f32>()
    }

    pub fn byte(&mut self) -> u8 {
        self.0.gen::<u8>()
    }
}
