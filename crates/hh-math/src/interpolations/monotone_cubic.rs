//! Shape-preserving cubic interpolation (Fritsch & Carlson, 1980).
//!
//! Node tangents start from the average of the neighbouring secants, are set
//! to zero at local extrema, and are scaled back wherever they would let the
//! cubic overshoot. Each piece is then stored in power form around its left
//! node. Beyond the grid the spline follows the end tangents.

use hh_core::{errors::Result, Real};

use super::{check_nodes, locate, Interpolation1D};

/// Piecewise cubic that is monotone wherever the data are.
#[derive(Debug, Clone)]
pub struct MonotoneCubicSpline {
    xs: Vec<Real>,
    ys: Vec<Real>,
    // per piece: slope, quadratic and cubic coefficient in (x - xs[i])
    pieces: Vec<[Real; 3]>,
    end_slopes: (Real, Real),
}

impl MonotoneCubicSpline {
    /// Fit the spline through `(xs, ys)`.
    ///
    /// # Errors
    /// Same conditions as [`LinearInterpolation::new`](super::LinearInterpolation::new).
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        check_nodes(xs, ys)?;
        let secants: Vec<Real> = xs
            .windows(2)
            .zip(ys.windows(2))
            .map(|(x, y)| (y[1] - y[0]) / (x[1] - x[0]))
            .collect();
        let m = tangents(&secants);

        let pieces = secants
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let h = xs[i + 1] - xs[i];
                let (m0, m1) = (m[i], m[i + 1]);
                [m0, (3.0 * s - 2.0 * m0 - m1) / h, (m0 + m1 - 2.0 * s) / (h * h)]
            })
            .collect();

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            pieces,
            end_slopes: (m[0], m[m.len() - 1]),
        })
    }
}

fn tangents(secants: &[Real]) -> Vec<Real> {
    let k = secants.len();
    let mut m = Vec::with_capacity(k + 1);
    m.push(secants[0]);
    for w in secants.windows(2) {
        m.push(if w[0] * w[1] > 0.0 { 0.5 * (w[0] + w[1]) } else { 0.0 });
    }
    m.push(secants[k - 1]);

    for (i, &s) in secants.iter().enumerate() {
        if s == 0.0 {
            m[i] = 0.0;
            m[i + 1] = 0.0;
            continue;
        }
        let (a, b) = (m[i] / s, m[i + 1] / s);
        let norm = a.hypot(b);
        if norm > 3.0 {
            m[i] = 3.0 * a * s / norm;
            m[i + 1] = 3.0 * b * s / norm;
        }
    }
    m
}

impl Interpolation1D for MonotoneCubicSpline {
    fn x_min(&self) -> Real {
        self.xs[0]
    }

    fn x_max(&self) -> Real {
        self.xs[self.xs.len() - 1]
    }

    fn value(&self, x: Real) -> Real {
        let last = self.xs.len() - 1;
        if x < self.xs[0] {
            return self.ys[0] + self.end_slopes.0 * (x - self.xs[0]);
        }
        if x > self.xs[last] {
            return self.ys[last] + self.end_slopes.1 * (x - self.xs[last]);
        }
        let i = locate(&self.xs, x);
        let [c1, c2, c3] = self.pieces[i];
        let dx = x - self.xs[i];
        self.ys[i] + dx * (c1 + dx * (c2 + dx * c3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample(s: &MonotoneCubicSpline, lo: f64, hi: f64, n: usize) -> Vec<f64> {
        (0..=n)
            .map(|i| s.value(lo + (hi - lo) * i as f64 / n as f64))
            .collect()
    }

    #[test]
    fn passes_through_nodes() {
        let xs = [0.0, 0.3, 1.1, 2.0, 4.5];
        let ys = [1.0, 1.2, 2.5, 2.6, 4.0];
        let s = MonotoneCubicSpline::new(&xs, &ys).unwrap();
        for (&x, &y) in xs.iter().zip(&ys) {
            assert_abs_diff_eq!(s.value(x), y, epsilon = 1e-12);
        }
    }

    #[test]
    fn keeps_value_function_shape_increasing() {
        let xs: Vec<f64> = (0..12).map(|i| 10.0 * (i as f64 / 11.0).powf(1.4)).collect();
        let ys: Vec<f64> = xs.iter().map(|a| (1.04 * a + 1.0).ln()).collect();
        let s = MonotoneCubicSpline::new(&xs, &ys).unwrap();
        let v = sample(&s, 0.0, 10.0, 400);
        assert!(v.windows(2).all(|w| w[1] >= w[0] - 1e-12));
    }

    #[test]
    fn plateau_does_not_overshoot() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [0.0, 1.0, 1.0, 1.0, 3.0];
        let s = MonotoneCubicSpline::new(&xs, &ys).unwrap();
        for v in sample(&s, 1.0, 3.0, 50) {
            assert_abs_diff_eq!(v, 1.0, epsilon = 1e-12);
        }
        assert!(sample(&s, 0.0, 4.0, 200).windows(2).all(|w| w[1] >= w[0] - 1e-12));
    }

    #[test]
    fn reproduces_straight_lines_everywhere() {
        let xs = [0.0, 1.0, 3.0];
        let ys = [1.0, 3.0, 7.0];
        let s = MonotoneCubicSpline::new(&xs, &ys).unwrap();
        assert_abs_diff_eq!(s.value(2.0), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.value(4.0), 9.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.value(-1.0), -1.0, epsilon = 1e-12);
    }
}
