use hh_core::{errors::Result, Real};

use super::MarkovChain;
use crate::matrix::Matrix;

/// Discretise the AR(1) process `z' = mu (1 - rho) + rho z + eps`,
/// `eps ~ N(0, sigma²)`, into an `n`-state Markov chain using the
/// Rouwenhorst method (Kopecky & Suen, 2010).
///
/// The states are `n` equally spaced points on `mu ± sqrt(n-1) σ / sqrt(1-ρ²)`.
///
/// # Errors
/// Returns an error if `n < 1`, `sigma < 0`, or `|rho| >= 1`.
pub fn rouwenhorst(n: usize, mu: Real, rho: Real, sigma: Real) -> Result<MarkovChain> {
    hh_core::ensure!(n >= 1, "invalid number of states: {n}");
    hh_core::ensure!(sigma >= 0.0, "sigma must be non-negative, got {sigma}");
    hh_core::ensure!(
        rho.abs() < 1.0,
        "cannot create a stationary process with |rho| >= 1 (rho = {rho})"
    );
    hh_core::ensure!(mu.is_finite(), "mu must be finite, got {mu}");

    if n == 1 {
        // degenerate chain: variance and autocorrelation are irrelevant
        return MarkovChain::new(vec![mu], Matrix::identity(1));
    }

    let p = (1.0 + rho) / 2.0;
    let q = 1.0 - p;
    let mut pi = Matrix::from_row_slice(2, 2, &[p, q, q, p]);

    for k in 2..n {
        // overlay the k×k matrix on the four corners of a (k+1)×(k+1) one
        let mut next = Matrix::zeros(k + 1, k + 1);
        for i in 0..k {
            for j in 0..k {
                let x = pi[(i, j)];
                next[(i, j)] += p * x;
                next[(i, j + 1)] += q * x;
                next[(i + 1, j)] += q * x;
                next[(i + 1, j + 1)] += p * x;
            }
        }
        // interior rows received two overlapping contributions
        for i in 1..k {
            for j in 0..=k {
                next[(i, j)] /= 2.0;
            }
        }
        pi = next;
    }

    let phi = ((n - 1) as Real).sqrt() * sigma / (1.0 - rho * rho).sqrt();
    let step = 2.0 * phi / (n - 1) as Real;
    let states = (0..n).map(|i| mu - phi + step * i as Real).collect();

    MarkovChain::new(states, pi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn single_state_is_degenerate() {
        let chain = rouwenhorst(1, 0.3, 0.9, 0.2).unwrap();
        assert_eq!(chain.states(), &[0.3]);
        assert_eq!(chain.transition(), &Matrix::identity(1));
    }

    #[test]
    fn two_states_without_persistence() {
        let chain = rouwenhorst(2, 0.0, 0.0, 1.0).unwrap();
        assert_eq!(
            chain.transition(),
            &Matrix::from_row_slice(2, 2, &[0.5, 0.5, 0.5, 0.5])
        );
        assert_abs_diff_eq!(chain.states()[0], -1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(chain.states()[1], 1.0, epsilon = 1e-15);
    }

    #[test]
    fn three_states_closed_form() {
        let rho = 0.6;
        let p = (1.0 + rho) / 2.0;
        let q = 1.0 - p;
        let chain = rouwenhorst(3, 0.0, rho, 0.1).unwrap();
        let expected = [
            [p * p, 2.0 * p * q, q * q],
            [p * q, p * p + q * q, p * q],
            [q * q, 2.0 * p * q, p * p],
        ];
        for (i, row) in expected.iter().enumerate() {
            for (j, &e) in row.iter().enumerate() {
                assert_abs_diff_eq!(chain.transition()[(i, j)], e, epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn state_grid_spacing_and_mean() {
        let (n, mu, rho, sigma) = (5, 1.0, 0.95, 0.2);
        let chain = rouwenhorst(n, mu, rho, sigma).unwrap();
        let phi = 2.0 * sigma / (1.0 - rho * rho).sqrt();
        assert_abs_diff_eq!(chain.states()[0], mu - phi, epsilon = 1e-12);
        assert_abs_diff_eq!(chain.states()[4], mu + phi, epsilon = 1e-12);
        assert_abs_diff_eq!(chain.states()[2], mu, epsilon = 1e-12);
    }

    #[test]
    fn invalid_arguments() {
        assert!(rouwenhorst(0, 0.0, 0.5, 0.1).is_err());
        assert!(rouwenhorst(3, 0.0, 0.5, -0.1).is_err());
        assert!(rouwenhorst(3, 0.0, 1.0, 0.1).is_err());
        assert!(rouwenhorst(3, 0.0, -1.2, 0.1).is_err());
    }
}
