//! # hh-methods
//!
//! Solvers for the infinite-horizon consumption-savings problem of a single
//! household facing constant or Markov labour income:
//!
//! * [`solve_vfi_grid_search`] — value function iteration, savings on the grid
//! * [`solve_vfi_interpolated`] — value function iteration, continuous savings
//! * [`solve_egm`] — endogenous grid method on the consumption policy
//! * [`evaluate_policy`] — lifetime utility of a given savings policy
//!
//! All solvers borrow an immutable [`Parameters`], return arrays shaped
//! `(N_y, N_a)` (a single row for constant income) and attach a
//! [`Convergence`] report. Running out of iterations is reported there, never
//! raised as an error.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Endogenous grid method.
pub mod egm;

/// Fixed-point iteration driver and solver configuration.
pub mod iteration;

/// Model parameters, income process, and asset grids.
pub mod parameters;

/// Policy evaluation and budget-identity helpers.
pub mod policy;

/// CRRA period utility.
pub mod utility;

/// Value function iteration.
pub mod vfi;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use egm::{solve_egm, EgmSolution};
pub use iteration::{Convergence, SolverConfig, Status};
pub use parameters::{power_grid, Income, LogIncomeProcess, Parameters, ParametersBuilder};
pub use policy::{budget_residual, consumption_from_savings, evaluate_policy, PolicyValue};
pub use utility::Crra;
pub use vfi::{
    solve_vfi_grid_search, solve_vfi_interpolated, GridSearchSolution, InterpolatedSolution,
};
