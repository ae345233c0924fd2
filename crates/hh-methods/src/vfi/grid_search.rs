use hh_core::{errors::Result, Real, Size};
use hh_math::Matrix;
use nalgebra::DMatrix;

use super::expected_continuation;
use crate::iteration::{Convergence, FixedPoint, SolverConfig};
use crate::parameters::Parameters;
use crate::utility::Crra;

/// Result of [`solve_vfi_grid_search`]. All arrays are `(N_y, N_a)`.
#[derive(Debug, Clone)]
pub struct GridSearchSolution {
    /// Value function.
    pub value: Matrix,
    /// Index into the asset grid of the optimal next-period assets.
    pub savings_index: DMatrix<Size>,
    /// Optimal next-period assets, `grid_a[savings_index]`.
    pub savings: Matrix,
    /// Consumption implied by the budget identity.
    pub consumption: Matrix,
    /// Convergence report.
    pub convergence: Convergence,
}

/// Solve the household problem by value function iteration with grid search
/// over next-period assets.
///
/// Every asset grid point not exceeding cash-at-hand is a candidate choice;
/// the first maximiser wins ties.
///
/// # Errors
/// Returns an error if `config` is invalid or the iterate becomes NaN.
/// Hitting the iteration cap is reported through
/// [`Convergence::status`](crate::Convergence), not as an error.
pub fn solve_vfi_grid_search(
    par: &Parameters,
    config: &SolverConfig,
) -> Result<GridSearchSolution> {
    let (n_y, n_a) = (par.n_y(), par.n_a());
    let grid_a = par.grid_a();
    let beta = par.beta();
    let u = Crra::new(par.gamma());
    let cah = par.cash_at_hand_matrix();

    let mut savings_index = DMatrix::<Size>::zeros(n_y, n_a);

    let (value, convergence) = FixedPoint::new("VFI", config).run(
        Matrix::zeros(n_y, n_a),
        Matrix::zeros(n_y, n_a),
        |v, v_next| {
            let ev = expected_continuation(par, v);
            for iy in 0..n_y {
                for ia in 0..n_a {
                    let x = cah[(iy, ia)];
                    let mut best = (0, Real::NEG_INFINITY);
                    // feasible choices a' <= cash-at-hand form a prefix of the grid
                    for (ja, &a_next) in grid_a.iter().enumerate().take_while(|&(_, &a)| a <= x) {
                        let candidate = u.utility(x - a_next) + beta * ev[(iy, ja)];
                        if candidate > best.1 {
                            best = (ja, candidate);
                        }
                    }
                    v_next[(iy, ia)] = best.1;
                    savings_index[(iy, ia)] = best.0;
                }
            }
            Ok(v.sup_norm_distance(v_next))
        },
    )?;

    let savings = Matrix::from_fn(n_y, n_a, |iy, ia| grid_a[savings_index[(iy, ia)]]);
    let consumption = Matrix::from_fn(n_y, n_a, |iy, ia| cah[(iy, ia)] - savings[(iy, ia)]);

    Ok(GridSearchSolution {
        value,
        savings_index,
        savings,
        consumption,
        convergence,
    })
}
