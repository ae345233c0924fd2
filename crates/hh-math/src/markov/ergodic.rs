use hh_core::{errors::Result, Real};
use nalgebra::{DMatrix, DVector};

use super::check_transition;
use crate::matrix::Matrix;

/// Stationary distribution `μ` of a row-stochastic transition matrix, i.e.
/// the probability vector with `μ · T = μ`.
///
/// `μ` spans the null space of `Tᵀ − I`. One equation of that singular system
/// is redundant, so its last row is replaced by the normalisation `Σ μ = 1`
/// and the resulting system `M μ = e_last` is solved by LU decomposition.
/// The solution is renormalised to remove floating-point drift.
///
/// # Errors
/// Returns an error if `transition` is not a square row-stochastic matrix,
/// or if the chain has no unique stationary distribution (singular system).
pub fn ergodic_distribution(transition: &Matrix) -> Result<Vec<Real>> {
    check_transition(transition)?;
    let n = transition.rows();

    let mut m: DMatrix<Real> = transition.inner().transpose() - DMatrix::identity(n, n);
    m.row_mut(n - 1).fill(1.0);
    let mut rhs = DVector::zeros(n);
    rhs[n - 1] = 1.0;

    let Some(mu) = m.lu().solve(&rhs) else {
        hh_core::fail!("transition matrix has no unique ergodic distribution");
    };

    let total: Real = mu.sum();
    hh_core::ensure_post!(
        (total - 1.0).abs() < 1e-9,
        "ergodic distribution sums to {total}"
    );
    hh_core::ensure_post!(
        mu.iter().all(|&p| p > -1e-10),
        "ergodic distribution has negative mass"
    );

    let total: Real = mu.iter().map(|&p| p.max(0.0)).sum();
    Ok(mu.iter().map(|&p| p.max(0.0) / total).collect())
}
