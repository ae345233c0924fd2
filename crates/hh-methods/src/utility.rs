//! CRRA period utility.

use hh_core::Real;

/// Constant-relative-risk-aversion utility
/// `u(c) = (c^(1-γ) - 1) / (1-γ)`, with `u(c) = ln c` at `γ = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crra {
    gamma: Real,
}

impl Crra {
    /// Utility with relative risk aversion `gamma >= 0`.
    pub fn new(gamma: Real) -> Self {
        debug_assert!(gamma >= 0.0);
        Self { gamma }
    }

    /// Relative risk aversion.
    pub fn gamma(&self) -> Real {
        self.gamma
    }

    /// Period utility of consuming `c`.
    ///
    /// Non-positive consumption is infeasible and yields `-inf`, which any
    /// feasible choice dominates.
    #[inline]
    pub fn utility(&self, c: Real) -> Real {
        debug_assert!(!c.is_nan(), "utility evaluated at NaN consumption");
        if c <= 0.0 {
            return Real::NEG_INFINITY;
        }
        if self.gamma == 1.0 {
            c.ln()
        } else {
            (c.powf(1.0 - self.gamma) - 1.0) / (1.0 - self.gamma)
        }
    }

    /// Marginal utility `c^(-γ)`.
    #[inline]
    pub fn marginal(&self, c: Real) -> Real {
        debug_assert!(c > 0.0, "marginal utility at non-positive consumption {c}");
        c.powf(-self.gamma)
    }

    /// Consumption at which marginal utility equals `mu`, i.e. `mu^(-1/γ)`.
    /// Requires `γ > 0`.
    #[inline]
    pub fn inverse_marginal(&self, mu: Real) -> Real {
        debug_assert!(self.gamma > 0.0);
        mu.powf(-1.0 / self.gamma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn log_utility_at_unit_risk_aversion() {
        let u = Crra::new(1.0);
        assert_abs_diff_eq!(u.utility(std::f64::consts::E), 1.0, epsilon = 1e-15);
        assert_eq!(u.utility(1.0), 0.0);
    }

    #[test]
    fn crra_form() {
        let u = Crra::new(2.0);
        assert_abs_diff_eq!(u.utility(2.0), 0.5, epsilon = 1e-15);
        // close to log utility for gamma near one
        let near_log = Crra::new(1.0 + 1e-7);
        assert_abs_diff_eq!(near_log.utility(3.0), 3.0_f64.ln(), epsilon = 1e-6);
    }

    #[test]
    fn risk_neutral_is_linear() {
        let u = Crra::new(0.0);
        assert_abs_diff_eq!(u.utility(4.0), 3.0, epsilon = 1e-15);
    }

    #[test]
    fn infeasible_consumption_is_dominated() {
        let u = Crra::new(2.0);
        assert_eq!(u.utility(0.0), Real::NEG_INFINITY);
        assert_eq!(u.utility(-1.0), Real::NEG_INFINITY);
        assert_eq!(Crra::new(1.0).utility(0.0), Real::NEG_INFINITY);
    }

    #[test]
    fn inverse_marginal_round_trips() {
        let u = Crra::new(3.0);
        let c = 1.7;
        assert_abs_diff_eq!(u.inverse_marginal(u.marginal(c)), c, epsilon = 1e-12);
    }
}
