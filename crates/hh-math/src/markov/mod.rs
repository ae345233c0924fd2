//! Finite-state Markov chains.
//!
//! * [`rouwenhorst`] — discretise a Gaussian AR(1) process
//! * [`ergodic_distribution`] — stationary distribution of a transition matrix
//! * [`MarkovChain::simulate`] — draw a path of state indices

mod ergodic;
mod rouwenhorst;
mod simulation;

pub use ergodic::ergodic_distribution;
pub use rouwenhorst::rouwenhorst;

use hh_core::{errors::Result, Real};

use crate::matrix::Matrix;

/// Tolerance on row sums when validating a transition matrix.
pub const ROW_SUM_TOLERANCE: Real = 1e-10;

/// A finite-state Markov chain on real-valued states.
///
/// `transition[(i, j)]` is the probability of moving from state `i` to
/// state `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkovChain {
    states: Vec<Real>,
    transition: Matrix,
}

impl MarkovChain {
    /// Build a chain, checking that the transition matrix is square, matches
    /// the number of states, and is row-stochastic.
    pub fn new(states: Vec<Real>, transition: Matrix) -> Result<Self> {
        check_transition(&transition)?;
        hh_core::ensure!(
            states.len() == transition.rows(),
            "{} states but a {}x{} transition matrix",
            states.len(),
            transition.rows(),
            transition.cols()
        );
        Ok(Self { states, transition })
    }

    /// State values.
    pub fn states(&self) -> &[Real] {
        &self.states
    }

    /// Transition matrix.
    pub fn transition(&self) -> &Matrix {
        &self.transition
    }

    /// Number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Stationary distribution of the chain.
    pub fn ergodic_distribution(&self) -> Result<Vec<Real>> {
        ergodic_distribution(&self.transition)
    }

    /// Unconditional mean of the state under the ergodic distribution.
    pub fn ergodic_mean(&self) -> Result<Real> {
        let dist = self.ergodic_distribution()?;
        Ok(dist.iter().zip(&self.states).map(|(p, z)| p * z).sum())
    }

    /// Apply `f` to every state, keeping the transition matrix.
    pub fn map_states<F: Fn(Real) -> Real>(&self, f: F) -> Self {
        Self {
            states: self.states.iter().map(|&z| f(z)).collect(),
            transition: self.transition.clone(),
        }
    }
}

pub(crate) fn check_transition(transition: &Matrix) -> Result<()> {
    hh_core::ensure!(
        transition.rows() >= 1 && transition.is_square(),
        "transition matrix must be square and non-empty, got {}x{}",
        transition.rows(),
        transition.cols()
    );
    hh_core::ensure!(
        transition.is_row_stochastic(ROW_SUM_TOLERANCE),
        "transition matrix must have non-negative entries and rows summing to 1"
    );
    Ok(())
}
