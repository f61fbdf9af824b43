//! Deterministic random number generation for dealing.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the same layout
//! - **Forkable**: Each redeal draws from its own independent stream
//!
//! ```
//! use memory_match::core::DealRng;
//!
//! let mut rng = DealRng::new(42);
//! let mut first_deal = rng.fork();
//! let mut second_deal = rng.fork();
//!
//! let mut a: Vec<u32> = (0..20).collect();
//! let mut b = a.clone();
//! first_deal.shuffle(&mut a);
//! second_deal.shuffle(&mut b);
//! assert_ne!(a, b);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG used to shuffle decks.
///
/// Uses ChaCha8 so a seed reproduces a board exactly across platforms.
#[derive(Clone, Debug)]
pub struct DealRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl DealRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Fork this RNG into an independent stream.
    ///
    /// Each fork produces a different but deterministic sequence, so the
    /// n-th redeal of a seeded session is always the same board.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shuffled(rng: &mut DealRng) -> Vec<u32> {
        let mut data: Vec<u32> = (0..32).collect();
        rng.shuffle(&mut data);
        data
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = DealRng::new(42);
        let mut rng2 = DealRng::new(42);

        assert_eq!(shuffled(&mut rng1), shuffled(&mut rng2));
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = DealRng::new(1);
        let mut rng2 = DealRng::new(2);

        assert_ne!(shuffled(&mut rng1), shuffled(&mut rng2));
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = DealRng::new(42);
        let mut rng2 = DealRng::new(42);

        let forked1 = rng1.fork();
        let forked2 = rng2.fork();
        assert_eq!(forked1.seed(), forked2.seed());

        let again1 = rng1.fork();
        assert_ne!(forked1.seed(), again1.seed());
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = DealRng::new(42);
        let mut data = shuffled(&mut rng);

        assert_ne!(data, (0..32).collect::<Vec<_>>());

        data.sort();
        assert_eq!(data, (0..32).collect::<Vec<_>>());
    }
}
