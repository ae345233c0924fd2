//! Model parameters and grids.
//!
//! [`Parameters`] is immutable once built: solvers only ever borrow it.
//! Construct it with [`Parameters::builder`], which validates everything
//! up front so that malformed economics never reach an iteration loop.

use hh_core::{
    errors::{Error, Result},
    Rate, Real, Size,
};
use hh_math::{MarkovChain, Matrix};

/// Default curvature of [`power_grid`]; values above one put more points near
/// the lower bound.
pub const DEFAULT_GRID_CURVATURE: Real = 1.4;

/// Asset grid `a_min + (a_max - a_min) · t^curvature` for `n` equally spaced
/// `t ∈ [0, 1]`.
///
/// # Errors
/// Returns an error unless `n >= 2`, `a_min < a_max`, and `curvature > 0`.
pub fn power_grid(a_min: Real, a_max: Real, n: Size, curvature: Real) -> Result<Vec<Real>> {
    hh_core::ensure!(n >= 2, "asset grid needs at least 2 points, got {n}");
    hh_core::ensure!(
        a_min.is_finite() && a_max.is_finite() && a_min < a_max,
        "invalid asset grid bounds [{a_min}, {a_max}]"
    );
    hh_core::ensure!(
        curvature > 0.0 && curvature.is_finite(),
        "grid curvature must be positive, got {curvature}"
    );
    let last = (n - 1) as Real;
    let mut grid: Vec<Real> = (0..n)
        .map(|i| a_min + (a_max - a_min) * (i as Real / last).powf(curvature))
        .collect();
    // pin the end points exactly
    grid[0] = a_min;
    grid[n - 1] = a_max;
    Ok(grid)
}

// ── Income ────────────────────────────────────────────────────────────────────

/// Persistence and volatility of the log-income AR(1) process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogIncomeProcess {
    /// Autocorrelation of log income.
    pub rho: Real,
    /// Conditional standard deviation of log income innovations.
    pub sigma: Real,
}

/// Labour income process.
#[derive(Debug, Clone, PartialEq)]
pub enum Income {
    /// Constant income `y` every period.
    Deterministic {
        /// Income level.
        y: Real,
    },
    /// Income following a finite-state Markov chain (states in levels).
    Stochastic {
        /// Income states and transition matrix.
        chain: MarkovChain,
        /// The AR(1) process the chain discretises, when known.
        process: Option<LogIncomeProcess>,
    },
}

impl Income {
    /// Constant income.
    pub fn deterministic(y: Real) -> Self {
        Income::Deterministic { y }
    }

    /// Income states `grid_y` with transition matrix `tm_y`.
    pub fn stochastic(grid_y: Vec<Real>, tm_y: Matrix) -> Result<Self> {
        Ok(Income::Stochastic {
            chain: MarkovChain::new(grid_y, tm_y)?,
            process: None,
        })
    }

    /// Discretise log income `log y' = rho log y + eps`, `eps ~ N(0, sigma²)`,
    /// on `n` states with the Rouwenhorst method, and express it in levels
    /// normalised so that mean income under the ergodic distribution is one.
    pub fn rouwenhorst(n: Size, rho: Real, sigma: Real) -> Result<Self> {
        let log_chain = hh_math::rouwenhorst(n, 0.0, rho, sigma)?;
        let levels = log_chain.map_states(Real::exp);
        let mean = levels.ergodic_mean()?;
        Ok(Income::Stochastic {
            chain: levels.map_states(|y| y / mean),
            process: Some(LogIncomeProcess { rho, sigma }),
        })
    }

    /// View the income process as a Markov chain; constant income is
    /// the chain with a single absorbing state.
    fn to_chain(&self) -> Result<MarkovChain> {
        match self {
            Income::Deterministic { y } => MarkovChain::new(vec![*y], Matrix::identity(1)),
            Income::Stochastic { chain, .. } => Ok(chain.clone()),
        }
    }
}

// ── Parameters ────────────────────────────────────────────────────────────────

/// Economic parameters and grids of the household problem.
#[derive(Debug, Clone)]
pub struct Parameters {
    beta: Real,
    gamma: Real,
    r: Rate,
    grid_a: Vec<Real>,
    income: Income,
    chain: MarkovChain,
}

impl Parameters {
    /// Start building a parameter set with the default calibration
    /// (`beta = 0.96`, `gamma = 1`, `r = 0.04`, constant income of one).
    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::default()
    }

    /// Discount factor.
    pub fn beta(&self) -> Real {
        self.beta
    }

    /// Relative risk aversion.
    pub fn gamma(&self) -> Real {
        self.gamma
    }

    /// Interest rate.
    pub fn r(&self) -> Rate {
        self.r
    }

    /// Asset grid (strictly increasing).
    pub fn grid_a(&self) -> &[Real] {
        &self.grid_a
    }

    /// Lowest asset level, the borrowing limit for next-period assets.
    pub fn a_min(&self) -> Real {
        self.grid_a[0]
    }

    /// Highest asset level. Next-period assets never exceed it, so value
    /// and policy functions are only evaluated on the grid's range.
    pub fn a_max(&self) -> Real {
        self.grid_a[self.grid_a.len() - 1]
    }

    /// Income process as supplied.
    pub fn income(&self) -> &Income {
        &self.income
    }

    /// Income states; a single state for constant income.
    pub fn grid_y(&self) -> &[Real] {
        self.chain.states()
    }

    /// Income transition matrix; `[[1]]` for constant income.
    pub fn tm_y(&self) -> &Matrix {
        self.chain.transition()
    }

    /// Number of asset grid points.
    pub fn n_a(&self) -> Size {
        self.grid_a.len()
    }

    /// Number of income states.
    pub fn n_y(&self) -> Size {
        self.chain.size()
    }

    /// `true` if income is constant.
    pub fn is_deterministic(&self) -> bool {
        matches!(self.income, Income::Deterministic { .. })
    }

    /// Cash-at-hand `(1 + r) a + y` at income state `iy` and asset point `ia`.
    #[inline]
    pub fn cash_at_hand(&self, iy: Size, ia: Size) -> Real {
        (1.0 + self.r) * self.grid_a[ia] + self.chain.states()[iy]
    }

    /// Cash-at-hand on the whole `(N_y, N_a)` state space.
    pub fn cash_at_hand_matrix(&self) -> Matrix {
        Matrix::from_fn(self.n_y(), self.n_a(), |iy, ia| self.cash_at_hand(iy, ia))
    }
}

/// Builder for [`Parameters`].
#[derive(Debug, Clone)]
pub struct ParametersBuilder {
    beta: Real,
    gamma: Real,
    r: Rate,
    grid_a: Option<Vec<Real>>,
    income: Income,
}

impl Default for ParametersBuilder {
    fn default() -> Self {
        Self {
            beta: 0.96,
            gamma: 1.0,
            r: 0.04,
            grid_a: None,
            income: Income::deterministic(1.0),
        }
    }
}

impl ParametersBuilder {
    /// Set the discount factor.
    pub fn beta(mut self, beta: Real) -> Self {
        self.beta = beta;
        self
    }

    /// Set relative risk aversion.
    pub fn gamma(mut self, gamma: Real) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set the interest rate.
    pub fn r(mut self, r: Rate) -> Self {
        self.r = r;
        self
    }

    /// Set the asset grid.
    pub fn grid_a(mut self, grid_a: Vec<Real>) -> Self {
        self.grid_a = Some(grid_a);
        self
    }

    /// Set the income process.
    pub fn income(mut self, income: Income) -> Self {
        self.income = income;
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    /// Returns [`hh_core::Error::InvalidArgument`] if any parameter is out of
    /// range, the asset grid is missing, too short, not strictly increasing,
    /// or starts below zero, or an income state is not strictly positive.
    pub fn build(self) -> Result<Parameters> {
        let ParametersBuilder {
            beta,
            gamma,
            r,
            grid_a,
            income,
        } = self;

        hh_core::ensure!(beta > 0.0 && beta < 1.0, "beta must lie in (0, 1), got {beta}");
        hh_core::ensure!(
            gamma >= 0.0 && gamma.is_finite(),
            "gamma must be finite and non-negative, got {gamma}"
        );
        hh_core::ensure!(r > -1.0 && r.is_finite(), "r must be finite and > -1, got {r}");

        let Some(grid_a) = grid_a else {
            return Err(Error::InvalidArgument("asset grid not set".into()));
        };
        hh_core::ensure!(
            grid_a.len() >= 2,
            "asset grid needs at least 2 points, got {}",
            grid_a.len()
        );
        hh_core::ensure!(
            grid_a.iter().all(|a| a.is_finite()),
            "asset grid contains non-finite values"
        );
        hh_core::ensure!(
            grid_a.windows(2).all(|w| w[0] < w[1]),
            "asset grid must be strictly increasing"
        );
        hh_core::ensure!(
            grid_a[0] >= 0.0,
            "borrowing is not supported: asset grid starts at {}",
            grid_a[0]
        );

        let chain = income.to_chain()?;
        hh_core::ensure!(
            chain.states().iter().all(|&y| y > 0.0 && y.is_finite()),
            "income states must be finite and strictly positive"
        );
        let y_min = chain.states().iter().copied().fold(Real::INFINITY, Real::min);
        hh_core::ensure!(
            (1.0 + r) * grid_a[0] + y_min > grid_a[0],
            "lowest asset grid point is not affordable in the lowest income state"
        );

        Ok(Parameters {
            beta,
            gamma,
            r,
            grid_a,
            income,
            chain,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn power_grid_is_front_loaded() {
        let g = power_grid(0.0, 10.0, 50, 1.4).unwrap();
        assert_eq!(g.len(), 50);
        assert_eq!(g[0], 0.0);
        assert_eq!(g[49], 10.0);
        assert!(g.windows(2).all(|w| w[0] < w[1]));
        // spacing widens towards the top
        assert!(g[1] - g[0] < g[49] - g[48]);
    }

    #[test]
    fn power_grid_rejects_bad_input() {
        assert!(power_grid(0.0, 10.0, 1, 1.4).is_err());
        assert!(power_grid(1.0, 1.0, 5, 1.4).is_err());
        assert!(power_grid(0.0, 1.0, 5, 0.0).is_err());
    }

    #[test]
    fn default_calibration() {
        let par = Parameters::builder()
            .grid_a(power_grid(0.0, 10.0, 5, 1.0).unwrap())
            .build()
            .unwrap();
        assert_eq!(par.beta(), 0.96);
        assert_eq!(par.gamma(), 1.0);
        assert_eq!(par.r(), 0.04);
        assert!(par.is_deterministic());
        assert_eq!(par.grid_y(), &[1.0]);
        assert_eq!(par.tm_y(), &Matrix::identity(1));
        assert_abs_diff_eq!(par.cash_at_hand(0, 4), 11.4, epsilon = 1e-12);
    }

    #[test]
    fn rouwenhorst_income_has_unit_mean() {
        let income = Income::rouwenhorst(3, 0.95, 0.2).unwrap();
        let Income::Stochastic { chain, process } = &income else {
            panic!("expected stochastic income");
        };
        assert_abs_diff_eq!(chain.ergodic_mean().unwrap(), 1.0, epsilon = 1e-12);
        assert_eq!(process.unwrap().rho, 0.95);
        assert!(chain.states().iter().all(|&y| y > 0.0));
    }

    #[test]
    fn cash_at_hand_matrix_shape() {
        let par = Parameters::builder()
            .grid_a(vec![0.0, 1.0, 2.0])
            .income(Income::rouwenhorst(2, 0.5, 0.1).unwrap())
            .build()
            .unwrap();
        let cah = par.cash_at_hand_matrix();
        assert_eq!(cah.shape(), (2, 3));
        assert_abs_diff_eq!(cah[(1, 2)], 2.08 + par.grid_y()[1], epsilon = 1e-12);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let grid = vec![0.0, 1.0, 2.0];
        let build = |b: ParametersBuilder| b.grid_a(grid.clone()).build();
        for builder in [
            Parameters::builder().beta(1.0),
            Parameters::builder().beta(0.0),
            Parameters::builder().gamma(-0.5),
            Parameters::builder().r(-1.0),
            Parameters::builder().income(Income::deterministic(0.0)),
        ] {
            assert!(matches!(build(builder), Err(Error::InvalidArgument(_))));
        }
    }

    #[test]
    fn invalid_grids_are_rejected() {
        for grid in [
            vec![0.0],
            vec![0.0, 2.0, 1.0],
            vec![0.0, 1.0, 1.0],
            vec![-1.0, 0.0, 1.0],
            vec![0.0, Real::NAN],
        ] {
            let res = Parameters::builder().grid_a(grid).build();
            assert!(matches!(res, Err(Error::InvalidArgument(_))));
        }
        assert!(Parameters::builder().build().is_err());
    }

    #[test]
    fn non_stochastic_income_matrix_is_rejected() {
        let tm = Matrix::from_row_slice(2, 2, &[0.5, 0.6, 0.5, 0.5]);
        assert!(Income::stochastic(vec![0.5, 1.5], tm).is_err());
    }
}
