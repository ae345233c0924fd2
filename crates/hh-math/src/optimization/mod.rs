//! Bounded scalar minimisation.
//!
//! [`brent_minimize`] is Brent's derivative-free method: golden-section steps
//! safeguarded by successive parabolic interpolation. The objective is only
//! ever evaluated strictly inside `(lower, upper)`, so objectives that are
//! `+inf` on an infeasible boundary are handled naturally.

use hh_core::{
    errors::{Error, Result},
    Real,
};

const MAX_ITERATIONS: usize = 500;
const DEFAULT_ACCURACY: Real = 1.0e-10;
/// `(3 - √5) / 2`
const GOLDEN: Real = 0.381_966_011_250_105_1;

/// Result of a scalar minimisation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarMinimum {
    /// Minimising abscissa.
    pub x: Real,
    /// Objective value at `x`.
    pub value: Real,
    /// Number of iterations performed.
    pub iterations: usize,
}

/// Minimise `f` on `[lower, upper]` using Brent's method.
///
/// `accuracy` is the absolute tolerance on the abscissa; a non-positive value
/// selects a default of `1e-10`.
///
/// # Errors
/// Returns an error if the interval is empty or not finite, or if the search
/// does not terminate within the iteration cap.
pub fn brent_minimize<F>(f: F, lower: Real, upper: Real, accuracy: Real) -> Result<ScalarMinimum>
where
    F: Fn(Real) -> Real,
{
    hh_core::ensure!(
        lower.is_finite() && upper.is_finite() && lower < upper,
        "invalid bracket [{lower}, {upper}]"
    );
    let acc = if accuracy > 0.0 {
        accuracy
    } else {
        DEFAULT_ACCURACY
    };
    let sqrt_eps = Real::EPSILON.sqrt();

    let (mut a, mut b) = (lower, upper);
    let mut x = a + GOLDEN * (b - a);
    let (mut w, mut v) = (x, x);
    let mut fx = f(x);
    let (mut fw, mut fv) = (fx, fx);
    let mut d: Real = 0.0;
    let mut e: Real = 0.0;

    for iter in 0..MAX_ITERATIONS {
        let xm = 0.5 * (a + b);
        let tol1 = sqrt_eps * x.abs() + acc / 3.0;
        let tol2 = 2.0 * tol1;
        if (x - xm).abs() <= tol2 - 0.5 * (b - a) {
            return Ok(ScalarMinimum {
                x,
                value: fx,
                iterations: iter,
            });
        }

        let mut golden = true;
        if e.abs() > tol1 {
            // parabola through (v, fv), (w, fw), (x, fx)
            let r = (x - w) * (fx - fv);
            let mut q = (x - v) * (fx - fw);
            let mut p = (x - v) * q - (x - w) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            } else {
                q = -q;
            }
            let e_prev = e;
            e = d;
            if p.abs() < (0.5 * q * e_prev).abs() && p > q * (a - x) && p < q * (b - x) {
                d = p / q;
                let u = x + d;
                if u - a < tol2 || b - u < tol2 {
                    d = tol1.copysign(xm - x);
                }
                golden = false;
            }
        }
        if golden {
            e = if x >= xm { a - x } else { b - x };
            d = GOLDEN * e;
        }

        let u = if d.abs() >= tol1 {
            x + d
        } else {
            x + tol1.copysign(d)
        };
        let fu = f(u);

        if fu <= fx {
            if u >= x {
                a = x;
            } else {
                b = x;
            }
            v = w;
            fv = fw;
            w = x;
            fw = fx;
            x = u;
            fx = fu;
        } else {
            if u < x {
                a = u;
            } else {
                b = u;
            }
            if fu <= fw || w == x {
                v = w;
                fv = fw;
                w = u;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        }
    }

    Err(Error::Runtime(format!(
        "Brent minimiser: maximum iterations ({MAX_ITERATIONS}) reached"
    )))
}
