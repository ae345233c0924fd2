//! `Matrix` — a two-dimensional matrix of reals.
//!
//! This is a thin newtype around `nalgebra::DMatrix<f64>`. It is used both
//! for Markov transition matrices and for value/policy functions laid out as
//! `(income state, asset grid point)`.

use hh_core::Real;
use nalgebra::DMatrix;
use std::ops::{Index, IndexMut, Mul};

use crate::comparison::sup_norm_distance;

/// A dynamically-sized 2D matrix of `Real` values (row-major access).
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix(DMatrix<Real>);

impl Matrix {
    /// Create a zero-filled `rows × cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self(DMatrix::zeros(rows, cols))
    }

    /// Create a matrix filled with `value`.
    pub fn from_element(rows: usize, cols: usize, value: Real) -> Self {
        Self(DMatrix::from_element(rows, cols, value))
    }

    /// Create an identity matrix of size `n × n`.
    pub fn identity(n: usize) -> Self {
        Self(DMatrix::identity(n, n))
    }

    /// Create from a row-major data slice.
    pub fn from_row_slice(rows: usize, cols: usize, data: &[Real]) -> Self {
        Self(DMatrix::from_row_slice(rows, cols, data))
    }

    /// Create from a function of `(row, col)`.
    pub fn from_fn<F: FnMut(usize, usize) -> Real>(rows: usize, cols: usize, f: F) -> Self {
        Self(DMatrix::from_fn(rows, cols, f))
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.0.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.0.ncols()
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.0.shape()
    }

    /// Return `true` if the matrix is square.
    pub fn is_square(&self) -> bool {
        self.0.nrows() == self.0.ncols()
    }

    /// Borrow the inner `DMatrix`.
    pub fn inner(&self) -> &DMatrix<Real> {
        &self.0
    }

    /// Extract a row as a `Vec`.
    pub fn row(&self, i: usize) -> Vec<Real> {
        self.0.row(i).iter().copied().collect()
    }

    /// Sum of each row.
    pub fn row_sums(&self) -> Vec<Real> {
        self.0.row_iter().map(|r| r.sum()).collect()
    }

    /// Return `true` if all entries are non-negative and every row sums to
    /// one within `tolerance`.
    pub fn is_row_stochastic(&self, tolerance: Real) -> bool {
        self.0.iter().all(|&x| x >= 0.0)
            && self.row_sums().iter().all(|s| (s - 1.0).abs() <= tolerance)
    }

    /// Element-wise apply.
    pub fn map<F: Fn(Real) -> Real>(&self, f: F) -> Self {
        Self(self.0.map(f))
    }

    /// Sup-norm distance `max |a_ij - b_ij|` to a matrix of the same shape.
    pub fn sup_norm_distance(&self, other: &Matrix) -> Real {
        debug_assert_eq!(self.shape(), other.shape());
        sup_norm_distance(self.0.as_slice(), other.0.as_slice())
    }

    /// Iterator over all elements (column-major).
    pub fn iter(&self) -> impl Iterator<Item = &Real> {
        self.0.iter()
    }
}

// ── From / Into ───────────────────────────────────────────────────────────────

impl From<DMatrix<Real>> for Matrix {
    fn from(m: DMatrix<Real>) -> Self {
        Self(m)
    }
}

// ── Indexing ──────────────────────────────────────────────────────────────────

impl Index<(usize, usize)> for Matrix {
    type Output = Real;
    fn index(&self, (i, j): (usize, usize)) -> &Real {
        &self.0[(i, j)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Real {
        &mut self.0[(i, j)]
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────────

impl Mul for &Matrix {
    type Output = Matrix;
    fn mul(self, rhs: &Matrix) -> Matrix {
        Matrix(&self.0 * &rhs.0)
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.0.nrows() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for j in 0..self.0.ncols() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.0[(i, j)])?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
