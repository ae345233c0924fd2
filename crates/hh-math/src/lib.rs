//! # hh-math
//!
//! Mathematical building blocks for the household solvers: a matrix newtype
//! (over nalgebra), sup-norm comparisons, 1D interpolation, bounded scalar
//! minimisation, and finite-state Markov chains (Rouwenhorst discretisation,
//! ergodic distribution, simulation).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Floating-point comparison utilities.
pub mod comparison;

/// 1D interpolation schemes.
pub mod interpolations;

/// Finite-state Markov chains.
pub mod markov;

/// Dense real matrix.
pub mod matrix;

/// Bounded scalar minimisation.
pub mod optimization;

/// Random number generators.
pub mod random_numbers;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use comparison::{close, sup_norm_distance};
pub use interpolations::{Interpolation1D, InterpolationKind, LinearInterpolation};
pub use markov::{ergodic_distribution, rouwenhorst, MarkovChain};
pub use matrix::Matrix;
pub use optimization::{brent_minimize, ScalarMinimum};
