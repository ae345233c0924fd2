//! Endogenous grid method.
//!
//! Iterates on the consumption policy instead of the value function. For a
//! fixed grid of *next-period* assets `a'`, the Euler equation
//! `u'(c) = β (1+r) E[u'(c') | y]` gives today's consumption in closed form,
//! and the budget identity recovers the beginning-of-period assets that make
//! that choice optimal. Interpolating back onto the exogenous grid yields the
//! updated policy without any per-state optimisation.

use hh_core::{
    errors::{Error, Result},
    Real,
};
use hh_math::{Interpolation1D, LinearInterpolation, Matrix};

use crate::iteration::{Convergence, FixedPoint, SolverConfig};
use crate::parameters::Parameters;
use crate::utility::Crra;

/// Slack allowed when checking `c <= cash-at-hand` on extrapolated values.
const BUDGET_SLACK: Real = 1e-10;

/// Result of [`solve_egm`]. Both policies are `(N_y, N_a)` and defined on
/// the beginning-of-period asset grid.
#[derive(Debug, Clone)]
pub struct EgmSolution {
    /// Next-period assets, `cash-at-hand − consumption`.
    pub savings: Matrix,
    /// Consumption.
    pub consumption: Matrix,
    /// Convergence report (residual is the sup-norm change in consumption).
    pub convergence: Convergence,
}

/// Solve the household problem with the endogenous grid method.
///
/// Starts from consuming all cash-at-hand above the borrowing limit
/// `a_min = grid_a[0]`. Below the lowest endogenous asset level the household
/// is borrowing constrained: it saves exactly `a_min` and consumes the rest.
/// Savings are capped at the top of the asset grid, the same choice set the
/// VFI solvers search. Constant income is handled as a one-state chain.
///
/// # Errors
/// Returns an error if `gamma == 0` (the Euler equation cannot be inverted
/// for linear utility), if `config` is invalid, or if an updated policy
/// leaves `(0, cash-at-hand - a_min]`.
pub fn solve_egm(par: &Parameters, config: &SolverConfig) -> Result<EgmSolution> {
    hh_core::ensure!(
        par.gamma() > 0.0,
        "the endogenous grid method requires gamma > 0"
    );
    let (n_y, n_a) = (par.n_y(), par.n_a());
    let grid_a = par.grid_a();
    let grid_y = par.grid_y();
    let (a_min, a_max) = (par.a_min(), par.a_max());
    let gross = 1.0 + par.r();
    let beta = par.beta();
    let u = Crra::new(par.gamma());
    let cah = par.cash_at_hand_matrix();

    let mut cons_sav = vec![0.0; n_a];
    let mut assets_sav = vec![0.0; n_a];

    let (consumption, convergence) = FixedPoint::new("EGM", config).run(
        cah.map(|x| x - a_min),
        Matrix::zeros(n_y, n_a),
        |c, c_next| {
            let marginal = c.map(|x| u.marginal(x));
            let expected_marginal = par.tm_y() * &marginal;

            for iy in 0..n_y {
                for ja in 0..n_a {
                    let ee_rhs = beta * gross * expected_marginal[(iy, ja)];
                    cons_sav[ja] = u.inverse_marginal(ee_rhs);
                    assets_sav[ja] = (cons_sav[ja] + grid_a[ja] - grid_y[iy]) / gross;
                }

                let policy = LinearInterpolation::new(&assets_sav, &cons_sav).map_err(|e| {
                    Error::Runtime(format!("EGM: endogenous grid is not increasing: {e}"))
                })?;
                let constrained_below = assets_sav[0];

                for ia in 0..n_a {
                    let x = cah[(iy, ia)];
                    let ci = if grid_a[ia] <= constrained_below {
                        x - a_min
                    } else {
                        policy.value(grid_a[ia])
                    };
                    hh_core::ensure_post!(
                        ci > 0.0 && ci <= x - a_min + BUDGET_SLACK,
                        "EGM: consumption {ci} outside (0, {}] at state ({iy}, {ia})",
                        x - a_min
                    );
                    // a' = x - c stays within [a_min, a_max]
                    c_next[(iy, ia)] = ci.min(x - a_min).max(x - a_max);
                }
            }

            Ok(c.sup_norm_distance(c_next))
        },
    )?;

    // bound states report the bound itself rather than x - (x - bound)
    let savings = Matrix::from_fn(n_y, n_a, |iy, ia| {
        let (x, c) = (cah[(iy, ia)], consumption[(iy, ia)]);
        if c >= x - a_min {
            a_min
        } else if c <= x - a_max {
            a_max
        } else {
            x - c
        }
    });

    Ok(EgmSolution {
        savings,
        consumption,
        convergence,
    })
}
