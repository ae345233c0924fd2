//! 1D interpolation trait and implementations.
//!
//! Every scheme here is built once from a strictly increasing grid of nodes
//! and extrapolates linearly beyond the first and last node, so callers can
//! evaluate continuation values or policies slightly outside the grid.

mod monotone_cubic;

pub use monotone_cubic::MonotoneCubicSpline;

use hh_core::{errors::Result, Real};

/// A 1D interpolation function `f: R → R` defined by a set of known points.
pub trait Interpolation1D: std::fmt::Debug {
    /// Evaluate the interpolation at `x`.
    fn value(&self, x: Real) -> Real;

    /// Return the lower bound of the interpolation domain.
    fn x_min(&self) -> Real;

    /// Return the upper bound of the interpolation domain.
    fn x_max(&self) -> Real;

    /// Return `true` if `x` is within the interpolation range.
    fn is_in_range(&self, x: Real) -> bool {
        x >= self.x_min() && x <= self.x_max()
    }
}

/// Selects which interpolation scheme a solver builds from its samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationKind {
    /// Piecewise-linear interpolation.
    #[default]
    Linear,
    /// Fritsch-Carlson monotone cubic Hermite spline.
    MonotoneCubic,
}

impl InterpolationKind {
    /// Build an interpolant of this kind through `(xs, ys)`.
    ///
    /// # Errors
    /// Returns an error if the nodes are not strictly increasing or the
    /// slices disagree in length.
    pub fn build(self, xs: &[Real], ys: &[Real]) -> Result<Box<dyn Interpolation1D>> {
        Ok(match self {
            InterpolationKind::Linear => Box::new(LinearInterpolation::new(xs, ys)?),
            InterpolationKind::MonotoneCubic => Box::new(MonotoneCubicSpline::new(xs, ys)?),
        })
    }
}

pub(crate) fn check_nodes(xs: &[Real], ys: &[Real]) -> Result<()> {
    hh_core::ensure!(xs.len() >= 2, "need at least 2 points for interpolation");
    hh_core::ensure!(
        xs.len() == ys.len(),
        "xs and ys must have the same length ({} vs {})",
        xs.len(),
        ys.len()
    );
    hh_core::ensure!(
        xs.windows(2).all(|w| w[0] < w[1]),
        "interpolation nodes must be strictly increasing"
    );
    Ok(())
}

/// Index `i` of the interval `[xs[i], xs[i+1]]` used to evaluate `x`.
///
/// Points left of the grid map to the first interval and points right of it
/// to the last, which turns the interpolation formula into linear
/// extrapolation.
pub(crate) fn locate(xs: &[Real], x: Real) -> usize {
    let n = xs.len();
    if x <= xs[0] {
        return 0;
    }
    if x >= xs[n - 1] {
        return n - 2;
    }
    let mut lo = 0;
    let mut hi = n - 1;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if xs[mid] <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

// ── Linear ────────────────────────────────────────────────────────────────────

/// Linear interpolation with linear extrapolation.
///
/// `f(x) = y[i] + (y[i+1] - y[i]) * (x - x[i]) / (x[i+1] - x[i])`
#[derive(Debug, Clone)]
pub struct LinearInterpolation {
    xs: Vec<Real>,
    ys: Vec<Real>,
}

impl LinearInterpolation {
    /// Construct a linear interpolation from strictly increasing `xs` and
    /// corresponding `ys`.
    ///
    /// # Errors
    /// Returns an error if the slices have different lengths, fewer than 2
    /// points, or `xs` is not strictly increasing.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        check_nodes(xs, ys)?;
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    /// Evaluate at every point of `at`.
    pub fn values(&self, at: &[Real]) -> Vec<Real> {
        at.iter().map(|&x| self.value(x)).collect()
    }
}

impl Interpolation1D for LinearInterpolation {
    fn x_min(&self) -> Real {
        self.xs[0]
    }

    fn x_max(&self) -> Real {
        self.xs[self.xs.len() - 1]
    }

    fn value(&self, x: Real) -> Real {
        let i = locate(&self.xs, x);
        let dx = self.xs[i + 1] - self.xs[i];
        self.ys[i] + (x - self.xs[i]) * (self.ys[i + 1] - self.ys[i]) / dx
    }
}
