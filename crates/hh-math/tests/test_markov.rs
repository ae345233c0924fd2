//! Invariants of the Rouwenhorst discretisation and the ergodic solver.

use hh_core::Error;
use hh_math::markov::{ergodic_distribution, rouwenhorst, MarkovChain};
use hh_math::Matrix;
use proptest::prelude::*;

fn binomial_half(n: usize) -> Vec<f64> {
    // Rouwenhorst chains are stationary at Binomial(n-1, 1/2)
    let k = n - 1;
    let mut coeffs = vec![1.0_f64; n];
    for i in 1..k {
        coeffs[i] = coeffs[i - 1] * (k - i + 1) as f64 / i as f64;
    }
    let scale = 0.5_f64.powi(k as i32);
    coeffs.iter().map(|c| c * scale).collect()
}

fn left_multiply(mu: &[f64], tm: &Matrix) -> Vec<f64> {
    (0..tm.cols())
        .map(|j| (0..tm.rows()).map(|i| mu[i] * tm[(i, j)]).sum())
        .collect()
}

#[test]
fn rouwenhorst_ergodic_distribution_is_binomial() {
    for n in 2..=9 {
        let chain = rouwenhorst(n, 0.0, 0.9, 0.1).unwrap();
        let mu = chain.ergodic_distribution().unwrap();
        for (got, want) in mu.iter().zip(binomial_half(n)) {
            assert!(
                (got - want).abs() < 1e-10,
                "n = {n}: got {got}, expected {want}"
            );
        }
    }
}

#[test]
fn simulated_frequencies_match_ergodic_distribution() {
    let chain = rouwenhorst(3, 0.0, 0.5, 0.2).unwrap();
    let mu = chain.ergodic_distribution().unwrap();
    let periods = 200_000;
    let path = chain.simulate(0, periods, 2023).unwrap();
    for (state, &p) in mu.iter().enumerate() {
        let freq = path.iter().filter(|&&s| s == state).count() as f64 / periods as f64;
        assert!(
            (freq - p).abs() < 0.01,
            "state {state}: frequency {freq}, ergodic mass {p}"
        );
    }
}

#[test]
fn ergodic_of_dense_chain_is_invariant() {
    let tm = Matrix::from_row_slice(
        3,
        3,
        &[0.7, 0.2, 0.1, 0.3, 0.4, 0.3, 0.05, 0.15, 0.8],
    );
    let chain = MarkovChain::new(vec![0.5, 1.0, 1.5], tm.clone()).unwrap();
    let mu = chain.ergodic_distribution().unwrap();
    let mu_next = left_multiply(&mu, &tm);
    for (a, b) in mu.iter().zip(&mu_next) {
        assert!((a - b).abs() < 1e-12);
    }
}

/// Random `n × n` matrix with strictly positive rows normalised to one.
fn stochastic_matrix() -> impl Strategy<Value = Matrix> {
    (1usize..8).prop_flat_map(|n| {
        prop::collection::vec(0.01f64..1.0, n * n).prop_map(move |raw| {
            let mut data = raw;
            for row in data.chunks_mut(n) {
                let total: f64 = row.iter().sum();
                row.iter_mut().for_each(|p| *p /= total);
            }
            Matrix::from_row_slice(n, n, &data)
        })
    })
}

proptest! {
    #[test]
    fn rouwenhorst_rows_are_stochastic(
        n in 1usize..12,
        rho in -0.99f64..0.99,
        sigma in 0.0f64..1.0,
    ) {
        let chain = rouwenhorst(n, 0.0, rho, sigma).unwrap();
        let tm = chain.transition();
        prop_assert_eq!(tm.shape(), (n, n));
        for s in tm.row_sums() {
            prop_assert!((s - 1.0).abs() < 1e-12);
        }
        prop_assert!(tm.iter().all(|&p| p >= 0.0));
        prop_assert!(chain.states().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn ergodic_distribution_is_stationary(
        n in 1usize..10,
        rho in -0.95f64..0.95,
    ) {
        let chain = rouwenhorst(n, 0.0, rho, 0.2).unwrap();
        let mu = ergodic_distribution(chain.transition()).unwrap();
        prop_assert!((mu.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        prop_assert!(mu.iter().all(|&p| p >= 0.0));
        let mu_next = left_multiply(&mu, chain.transition());
        for (a, b) in mu.iter().zip(&mu_next) {
            prop_assert!((a - b).abs() < 1e-10);
        }
    }

    #[test]
    fn ergodic_distribution_of_any_positive_chain(tm in stochastic_matrix()) {
        let mu = ergodic_distribution(&tm).unwrap();
        prop_assert_eq!(mu.len(), tm.rows());
        prop_assert!((mu.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        prop_assert!(mu.iter().all(|&p| p >= 0.0));
        let mu_next = left_multiply(&mu, &tm);
        for (a, b) in mu.iter().zip(&mu_next) {
            prop_assert!((a - b).abs() < 1e-10, "{} vs {}", a, b);
        }
    }

    #[test]
    fn rows_not_summing_to_one_are_invalid(
        tm in stochastic_matrix(),
        row in 0usize..8,
        factor in 1.01f64..2.0,
    ) {
        let (n, _) = tm.shape();
        let row = row % n;
        let mut data: Vec<f64> = (0..n * n).map(|k| tm[(k / n, k % n)]).collect();
        for p in &mut data[row * n..(row + 1) * n] {
            *p *= factor;
        }
        let bad = Matrix::from_row_slice(n, n, &data);
        prop_assert!(matches!(
            ergodic_distribution(&bad),
            Err(Error::InvalidArgument(_))
        ));
        prop_assert!(matches!(
            MarkovChain::new(vec![0.0; n], bad),
            Err(Error::InvalidArgument(_))
        ));
    }
}
