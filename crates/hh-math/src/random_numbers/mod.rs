//! Random number generators.
//!
//! Provides a wrapper around the `rand_mt` Mersenne Twister with the few
//! sampling primitives the Markov-chain simulator needs.

use hh_core::Real;
use rand_mt::Mt19937GenRand64;

/// A uniform pseudo-random number generator based on the Mersenne Twister
/// MT19937-64 algorithm. Sequences are fully determined by the seed.
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterUniformRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }

    /// Generate the next uniform deviate in `[0, 1)`.
    pub fn next_real(&mut self) -> Real {
        // top 53 bits → exactly representable in [0, 1)
        (self.rng.next_u64() >> 11) as Real / (1u64 << 53) as Real
    }

    /// Draw an index from the discrete distribution `probabilities`
    /// (non-negative, summing to one).
    ///
    /// Rounding slack in the cumulative sum falls on the last index with
    /// positive probability.
    pub fn next_index(&mut self, probabilities: &[Real]) -> usize {
        let u = self.next_real();
        let mut cumulative = 0.0;
        let mut last_positive = 0;
        for (i, &p) in probabilities.iter().enumerate() {
            if p <= 0.0 {
                continue;
            }
            cumulative += p;
            last_positive = i;
            if u < cumulative {
                return i;
            }
        }
        last_positive
    }
}
