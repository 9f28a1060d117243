//! Seeded, never-solved permutations of puzzle slots

use rand::seq::SliceRandom;
use rand::{SeedableRng, rngs::StdRng};

use crate::io::configuration::MAX_SHUFFLE_ATTEMPTS;

/// Seeded random source for reproducible shuffles
///
/// The same seed always yields the same sequence of permutations, which is
/// what makes sessions replayable in tests and shareable between players.
#[derive(Debug, Clone)]
pub struct Shuffler {
    rng: StdRng,
    seed: u64,
}

impl Shuffler {
    /// Create a deterministic shuffler
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this shuffler was created with
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Permutation of `0..len` that is never the identity
    ///
    /// Entry `i` is the slot assigned to piece `i`. Lengths below two have no
    /// non-identity permutation and are returned unchanged.
    pub fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        if len < 2 {
            return order;
        }

        for _ in 0..MAX_SHUFFLE_ATTEMPTS {
            order.shuffle(&mut self.rng);
            if !is_identity(&order) {
                return order;
            }
        }

        // A single rotation is never the identity
        order.sort_unstable();
        order.rotate_left(1);
        order
    }
}

/// Whether every position maps to itself
pub fn is_identity(order: &[usize]) -> bool {
    order.iter().enumerate().all(|(i, &slot)| i == slot)
}
