//! Value function iteration.
//!
//! * [`solve_vfi_grid_search`] — next-period assets restricted to the asset
//!   grid; the policy is an index into the grid
//! * [`solve_vfi_interpolated`] — continuous savings choice against an
//!   interpolated continuation value
//!
//! Both start from `V = 0` and apply the Bellman operator
//! `V(y, a) = max_{a'} u((1+r) a + y - a') + β E[V(y', a') | y]`
//! until the sup-norm change drops below the tolerance.

mod grid_search;
mod interpolated;

pub use grid_search::{solve_vfi_grid_search, GridSearchSolution};
pub use interpolated::{solve_vfi_interpolated, InterpolatedSolution};

use hh_math::Matrix;

use crate::parameters::Parameters;

/// `E[V(y', a') | y]` for every `(y, a')`.
fn expected_continuation(par: &Parameters, v: &Matrix) -> Matrix {
    par.tm_y() * v
}
