use hh_core::{errors::Result, Size};

use super::MarkovChain;
use crate::random_numbers::MersenneTwisterUniformRng;

impl MarkovChain {
    /// Simulate `periods` state indices starting from `initial`.
    ///
    /// The first element of the returned path is `initial`. Paths are
    /// reproducible for a given `seed`.
    ///
    /// # Errors
    /// Returns an error if `initial` is not a valid state index.
    pub fn simulate(&self, initial: Size, periods: Size, seed: u64) -> Result<Vec<Size>> {
        hh_core::ensure!(
            initial < self.size(),
            "initial state {initial} out of range [0, {})",
            self.size()
        );
        let mut rng = MersenneTwisterUniformRng::new(seed);
        let rows: Vec<Vec<_>> = (0..self.size()).map(|i| self.transition().row(i)).collect();

        let mut path = Vec::with_capacity(periods);
        let mut state = initial;
        for _ in 0..periods {
            path.push(state);
            state = rng.next_index(&rows[state]);
        }
        Ok(path)
    }
}
