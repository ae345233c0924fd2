//! Fixed-point iteration driver shared by every solver.
//!
//! A solve moves through `Initialized → Iterating → {Converged,
//! MaxIterReached}`. Each sweep reads only the previous iterate and writes
//! into a second buffer; the two buffers swap roles after the sweep, so
//! updates within one sweep never see each other.
//!
//! Reaching the iteration cap is reported, not raised: the caller receives
//! the last iterate together with [`Status::MaxIterReached`].

use std::time::{Duration, Instant};

use hh_core::{errors::Result, Real, Size};
use log::{debug, info, warn};

/// Tolerance and iteration cap of a fixed-point solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Stop once the sup-norm change between iterates falls below this.
    pub tolerance: Real,
    /// Maximum number of sweeps.
    pub max_iterations: Size,
}

impl SolverConfig {
    /// Create a validated configuration.
    ///
    /// # Errors
    /// Returns an error unless `tolerance` is positive and finite and
    /// `max_iterations >= 1`.
    pub fn new(tolerance: Real, max_iterations: Size) -> Result<Self> {
        let config = Self {
            tolerance,
            max_iterations,
        };
        config.validate()?;
        Ok(config)
    }

    /// Defaults for value function iteration: `1e-5`, 1 000 sweeps.
    pub fn vfi() -> Self {
        Self {
            tolerance: 1e-5,
            max_iterations: 1_000,
        }
    }

    /// Defaults for the endogenous grid method: `1e-8`, 10 000 sweeps.
    pub fn egm() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 10_000,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        hh_core::ensure!(
            self.tolerance > 0.0 && self.tolerance.is_finite(),
            "tolerance must be positive and finite, got {}",
            self.tolerance
        );
        hh_core::ensure!(
            self.max_iterations >= 1,
            "max_iterations must be at least 1"
        );
        Ok(())
    }
}

/// Terminal state of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The sup-norm change fell below the tolerance.
    Converged,
    /// The iteration cap was hit first; the result is the last iterate.
    MaxIterReached,
}

/// Convergence report returned with every solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Convergence {
    /// How the iteration ended.
    pub status: Status,
    /// Number of sweeps performed.
    pub iterations: Size,
    /// Sup-norm change in the final sweep.
    pub residual: Real,
    /// Wall-clock time spent iterating.
    pub elapsed: Duration,
}

impl Convergence {
    /// `true` if the tolerance was met.
    pub fn converged(&self) -> bool {
        self.status == Status::Converged
    }
}

enum IterationState {
    Initialized,
    Iterating { iteration: Size, residual: Real },
    Done(Status, Size, Real),
}

/// Double-buffered fixed-point loop.
pub(crate) struct FixedPoint<'a> {
    name: &'static str,
    config: &'a SolverConfig,
}

impl<'a> FixedPoint<'a> {
    pub(crate) fn new(name: &'static str, config: &'a SolverConfig) -> Self {
        Self { name, config }
    }

    /// Iterate `sweep(previous, next) -> residual` from `initial` until the
    /// residual drops below the tolerance or the cap is reached. `scratch`
    /// is the second buffer and must have the same shape as `initial`.
    ///
    /// Returns the last iterate and the convergence report.
    pub(crate) fn run<B, F>(&self, initial: B, scratch: B, mut sweep: F) -> Result<(B, Convergence)>
    where
        F: FnMut(&B, &mut B) -> Result<Real>,
    {
        self.config.validate()?;
        let start = Instant::now();
        let mut current = initial;
        let mut next = scratch;
        let mut state = IterationState::Initialized;

        loop {
            state = match state {
                IterationState::Initialized => IterationState::Iterating {
                    iteration: 0,
                    residual: Real::INFINITY,
                },
                IterationState::Iterating {
                    iteration,
                    residual,
                } if iteration >= self.config.max_iterations => {
                    IterationState::Done(Status::MaxIterReached, iteration, residual)
                }
                IterationState::Iterating { iteration, .. } => {
                    let residual = sweep(&current, &mut next)?;
                    std::mem::swap(&mut current, &mut next);
                    let iteration = iteration + 1;
                    if residual.is_nan() {
                        hh_core::fail!("{}: iterate became NaN in sweep {iteration}", self.name);
                    }
                    if residual < self.config.tolerance {
                        IterationState::Done(Status::Converged, iteration, residual)
                    } else {
                        if iteration == 1 || iteration % 10 == 0 {
                            debug!(
                                "{}: iteration {iteration:4}, residual={residual:.2e}",
                                self.name
                            );
                        }
                        IterationState::Iterating {
                            iteration,
                            residual,
                        }
                    }
                }
                IterationState::Done(status, iterations, residual) => {
                    let convergence = Convergence {
                        status,
                        iterations,
                        residual,
                        elapsed: start.elapsed(),
                    };
                    self.report(&convergence);
                    return Ok((current, convergence));
                }
            };
        }
    }

    fn report(&self, c: &Convergence) {
        match c.status {
            Status::Converged => info!(
                "{}: converged after {} iterations ({:.3} sec.): residual={:.2e}",
                self.name,
                c.iterations,
                c.elapsed.as_secs_f64(),
                c.residual
            ),
            Status::MaxIterReached => warn!(
                "{}: did not converge in {} iterations: residual={:.2e} > tolerance={:.2e}",
                self.name, c.iterations, c.residual, self.config.tolerance
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // x ↦ x / 2 + 1 contracts to 2
    fn halving(prev: &Vec<f64>, next: &mut Vec<f64>) -> Result<f64> {
        for (n, p) in next.iter_mut().zip(prev) {
            *n = 0.5 * p + 1.0;
        }
        Ok(hh_math::sup_norm_distance(prev, next))
    }

    #[test]
    fn converges_to_fixed_point() {
        let config = SolverConfig::new(1e-10, 200).unwrap();
        let (x, conv) = FixedPoint::new("test", &config)
            .run(vec![0.0; 3], vec![0.0; 3], halving)
            .unwrap();
        assert!(conv.converged());
        assert!(conv.residual < 1e-10);
        for v in x {
            assert_abs_diff_eq!(v, 2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn reports_cap_without_failing() {
        let config = SolverConfig::new(1e-12, 5).unwrap();
        let (x, conv) = FixedPoint::new("test", &config)
            .run(vec![0.0], vec![0.0], halving)
            .unwrap();
        assert_eq!(conv.status, Status::MaxIterReached);
        assert_eq!(conv.iterations, 5);
        // 1 + 1/2 + 1/4 + 1/8 + 1/16
        assert_abs_diff_eq!(x[0], 1.9375, epsilon = 1e-15);
        assert_abs_diff_eq!(conv.residual, 0.0625, epsilon = 1e-15);
    }

    #[test]
    fn sweeps_read_only_the_previous_iterate() {
        // every entry depends on its left neighbour in the previous iterate
        let config = SolverConfig::new(1e-12, 1).unwrap();
        let shift = |prev: &Vec<f64>, next: &mut Vec<f64>| -> Result<f64> {
            next[0] = 1.0;
            for i in 1..prev.len() {
                next[i] = prev[i - 1];
            }
            Ok(1.0)
        };
        let (x, _) = FixedPoint::new("test", &config)
            .run(vec![0.0; 4], vec![0.0; 4], shift)
            .unwrap();
        assert_eq!(x, vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn nan_iterate_is_an_error() {
        let config = SolverConfig::vfi();
        let res = FixedPoint::new("test", &config).run(0.0, 0.0, |_: &f64, n: &mut f64| {
            *n = f64::NAN;
            Ok(f64::NAN)
        });
        assert!(res.is_err());
    }

    #[test]
    fn invalid_config() {
        assert!(SolverConfig::new(0.0, 10).is_err());
        assert!(SolverConfig::new(f64::NAN, 10).is_err());
        assert!(SolverConfig::new(1e-6, 0).is_err());
        assert_eq!(SolverConfig::egm().max_iterations, 10_000);
    }
}
