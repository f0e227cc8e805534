//! Seeded random number generation for board layouts.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the same pairing and placement
//! - **Unbiased**: Permutations come from Fisher–Yates over indices, so every
//!   ordering of a sequence is equally likely
//!
//! ## Usage
//!
//! ```
//! use memory_match::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let perm = rng.permutation(5);
//!
//! let mut sorted = perm.clone();
//! sorted.sort();
//! assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
//!
//! // Same seed, same permutation
//! assert_eq!(GameRng::new(42).permutation(5), perm);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG used to pick and place icons.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the thread-local entropy source.
    ///
    /// The chosen seed is still recorded so a board can be reproduced
    /// from [`GameRng::seed`].
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// A uniformly random permutation of `0..len`.
    ///
    /// Entry `i` of the result is the source index whose element lands at
    /// position `i`.
    pub fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        for i in (1..len).rev() {
            let j = self.gen_range_usize(0..i + 1);
            indices.swap(i, j);
        }
        indices
    }
}
