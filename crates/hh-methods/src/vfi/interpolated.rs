use hh_core::{errors::Result, Real};
use hh_math::{brent_minimize, InterpolationKind, Matrix};

use super::expected_continuation;
use crate::iteration::{Convergence, FixedPoint, SolverConfig};
use crate::parameters::Parameters;
use crate::utility::Crra;

/// Abscissa tolerance of the inner savings search.
const SAVINGS_ACCURACY: Real = 1e-10;

/// Result of [`solve_vfi_interpolated`]. All arrays are `(N_y, N_a)`.
#[derive(Debug, Clone)]
pub struct InterpolatedSolution {
    /// Value function.
    pub value: Matrix,
    /// Optimal next-period assets (continuous).
    pub savings: Matrix,
    /// Consumption implied by the budget identity.
    pub consumption: Matrix,
    /// Convergence report.
    pub convergence: Convergence,
}

/// Solve the household problem by value function iteration with a
/// continuous savings choice.
///
/// Each sweep interpolates `E[V(y', ·) | y]` over the asset grid with `kind`
/// and, at every state, maximises `u(cah - a') + β · E[V](a')` with Brent's
/// method over `a' ∈ [a_min, min(cah, a_max)]`. Next-period assets never
/// leave the grid's range, so the continuation value is never extrapolated.
/// Both ends of the interval are checked explicitly, so borrowing-constrained
/// households save exactly `a_min` and the richest save exactly `a_max`.
///
/// # Errors
/// Returns an error if `config` is invalid, an interpolant cannot be built,
/// or the inner search fails.
pub fn solve_vfi_interpolated(
    par: &Parameters,
    kind: InterpolationKind,
    config: &SolverConfig,
) -> Result<InterpolatedSolution> {
    let (n_y, n_a) = (par.n_y(), par.n_a());
    let grid_a = par.grid_a();
    let (a_min, a_max) = (par.a_min(), par.a_max());
    let beta = par.beta();
    let u = Crra::new(par.gamma());
    let cah = par.cash_at_hand_matrix();

    let mut savings = Matrix::zeros(n_y, n_a);

    let (value, convergence) = FixedPoint::new("VFI-interp", config).run(
        Matrix::zeros(n_y, n_a),
        Matrix::zeros(n_y, n_a),
        |v, v_next| {
            let ev = expected_continuation(par, v);
            for iy in 0..n_y {
                let continuation = kind.build(grid_a, &ev.row(iy))?;
                for ia in 0..n_a {
                    let x = cah[(iy, ia)];
                    let upper = x.min(a_max);
                    // negated Bellman objective
                    let objective = |a_next: Real| {
                        if a_next < a_min || a_next > upper || a_next >= x {
                            return Real::INFINITY;
                        }
                        -(u.utility(x - a_next) + beta * continuation.value(a_next))
                    };
                    let interior = brent_minimize(&objective, a_min, upper, SAVINGS_ACCURACY)?;
                    let mut best = (interior.x, interior.value);
                    if upper < x {
                        let top = objective(upper);
                        if top <= best.1 {
                            best = (upper, top);
                        }
                    }
                    let bottom = objective(a_min);
                    if bottom <= best.1 {
                        best = (a_min, bottom);
                    }
                    v_next[(iy, ia)] = -best.1;
                    savings[(iy, ia)] = best.0;
                }
            }
            Ok(v.sup_norm_distance(v_next))
        },
    )?;

    let consumption = Matrix::from_fn(n_y, n_a, |iy, ia| cah[(iy, ia)] - savings[(iy, ia)]);

    Ok(InterpolatedSolution {
        value,
        savings,
        consumption,
        convergence,
    })
}
