//! Policy evaluation.
//!
//! Given a savings policy (for example from the endogenous grid method, which
//! never produces a value function), compute the lifetime utility it implies
//! by iterating `V(y, a) = u(c(y, a)) + β E[V(y', a'(y, a)) | y]` to a fixed
//! point, interpolating `V` linearly in `a'`.

use hh_core::{
    errors::{Error, Result},
    Real,
};
use hh_math::{Interpolation1D, LinearInterpolation, Matrix};

use crate::iteration::{Convergence, FixedPoint, SolverConfig};
use crate::parameters::Parameters;
use crate::utility::Crra;

/// Value implied by a fixed policy.
#[derive(Debug, Clone)]
pub struct PolicyValue {
    /// Value function, `(N_y, N_a)`.
    pub value: Matrix,
    /// Convergence report.
    pub convergence: Convergence,
}

/// Consumption implied by `savings` through the budget identity
/// `c = (1 + r) a + y − a'`.
///
/// # Errors
/// Returns an error if `savings` is not shaped `(N_y, N_a)`.
pub fn consumption_from_savings(par: &Parameters, savings: &Matrix) -> Result<Matrix> {
    check_shape(par, savings)?;
    Ok(Matrix::from_fn(par.n_y(), par.n_a(), |iy, ia| {
        par.cash_at_hand(iy, ia) - savings[(iy, ia)]
    }))
}

/// Evaluate the lifetime utility of following `savings` forever.
///
/// # Errors
/// Returns an error if `savings` has the wrong shape, leaves the asset grid's
/// range `[a_min, a_max]`, or implies non-positive consumption anywhere.
pub fn evaluate_policy(
    par: &Parameters,
    savings: &Matrix,
    config: &SolverConfig,
) -> Result<PolicyValue> {
    let consumption = consumption_from_savings(par, savings)?;
    let (a_min, a_max) = (par.a_min(), par.a_max());
    hh_core::ensure!(
        savings.iter().all(|&s| s >= a_min && s <= a_max),
        "savings policy must stay within the asset grid [{a_min}, {a_max}]"
    );
    hh_core::ensure!(
        consumption.iter().all(|&c| c > 0.0),
        "savings policy must leave strictly positive consumption"
    );

    let (n_y, n_a) = (par.n_y(), par.n_a());
    let beta = par.beta();
    let u = Crra::new(par.gamma());
    let period_utility = consumption.map(|c| u.utility(c));

    let (value, convergence) = FixedPoint::new("policy evaluation", config).run(
        Matrix::zeros(n_y, n_a),
        Matrix::zeros(n_y, n_a),
        |v, v_next| {
            let ev = par.tm_y() * v;
            for iy in 0..n_y {
                let continuation = LinearInterpolation::new(par.grid_a(), &ev.row(iy))?;
                for ia in 0..n_a {
                    v_next[(iy, ia)] =
                        period_utility[(iy, ia)] + beta * continuation.value(savings[(iy, ia)]);
                }
            }
            Ok(v.sup_norm_distance(v_next))
        },
    )?;

    Ok(PolicyValue { value, convergence })
}

fn check_shape(par: &Parameters, m: &Matrix) -> Result<()> {
    if m.rows() != par.n_y() {
        return Err(Error::DimensionMismatch {
            expected: par.n_y(),
            found: m.rows(),
        });
    }
    if m.cols() != par.n_a() {
        return Err(Error::DimensionMismatch {
            expected: par.n_a(),
            found: m.cols(),
        });
    }
    Ok(())
}

/// Largest violation of `consumption + savings = cash-at-hand` over the
/// state space.
pub fn budget_residual(par: &Parameters, savings: &Matrix, consumption: &Matrix) -> Real {
    let mut worst: Real = 0.0;
    for iy in 0..par.n_y() {
        for ia in 0..par.n_a() {
            let gap = consumption[(iy, ia)] + savings[(iy, ia)] - par.cash_at_hand(iy, ia);
            worst = worst.max(gap.abs());
        }
    }
    worst
}
