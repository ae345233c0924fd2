//! # household
//!
//! Solvers for the infinite-horizon consumption-savings problem of a single
//! household facing a borrowing constraint and (optionally) Markov income.
//!
//! This crate is a **façade** that re-exports the public items of the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `hh-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! household = "0.1"
//! ```
//!
//! ```rust
//! use household::methods::{power_grid, solve_egm, Income, Parameters, SolverConfig};
//!
//! let par = Parameters::builder()
//!     .beta(0.96)
//!     .gamma(2.0)
//!     .r(0.04)
//!     .income(Income::rouwenhorst(3, 0.9, 0.1)?)
//!     .grid_a(power_grid(0.0, 10.0, 40, 1.4)?)
//!     .build()?;
//!
//! let sol = solve_egm(&par, &SolverConfig::egm())?;
//! assert!(sol.convergence.converged());
//! assert_eq!(sol.consumption.shape(), (3, 40));
//! # Ok::<(), household::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use hh_core as core;

/// Numerical building blocks: matrices, interpolation, Brent minimisation,
/// Markov chains, and random numbers.
pub use hh_math as math;

/// Household parameters, utility, and the VFI and EGM solvers.
pub use hh_methods as methods;

/// Commonly used items.
pub mod prelude {
    pub use hh_core::{Error, Real, Result, Size};
    pub use hh_math::{InterpolationKind, MarkovChain, Matrix};
    pub use hh_methods::{
        evaluate_policy, power_grid, solve_egm, solve_vfi_grid_search, solve_vfi_interpolated,
        Convergence, Crra, Income, Parameters, ParametersBuilder, SolverConfig, Status,
    };
}
