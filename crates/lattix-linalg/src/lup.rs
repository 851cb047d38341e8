//! LUP decomposition and the operations derived from it.
//!
//! Partial pivoting by maximal magnitude keeps the elimination stable;
//! a pivot below the scalar's tolerance means the matrix is singular,
//! and that single failure mode propagates uniformly to determinant,
//! inverse and solve.

use lattix_scalar::{Magnitude, Scalar, Tolerance};

use crate::dense_matrix::DenseMatrix;
use crate::error::{Error, Result};

/// The result of a partial-pivot LUP decomposition.
///
/// `lu` holds the combined factors: the strict lower triangle is `L`
/// (unit diagonal implied) and the upper triangle including the diagonal
/// is `U`. `perm` records the row permutation as a reordering of
/// `0..n`, and `swaps` counts the row exchanges performed, which fixes
/// the determinant's sign.
#[derive(Debug, Clone, PartialEq)]
pub struct LupDecomposition<R> {
    lu: DenseMatrix<R>,
    perm: Vec<usize>,
    swaps: usize,
}

impl<R: Scalar> LupDecomposition<R> {
    /// The combined L/U factor matrix.
    #[must_use]
    pub fn lu(&self) -> &DenseMatrix<R> {
        &self.lu
    }

    /// The row permutation applied during pivoting.
    #[must_use]
    pub fn perm(&self) -> &[usize] {
        &self.perm
    }

    /// The number of row swaps performed.
    #[must_use]
    pub fn swaps(&self) -> usize {
        self.swaps
    }

    /// The determinant of the decomposed matrix.
    ///
    /// Product of `U`'s diagonal, negated when the swap count is odd.
    #[must_use]
    pub fn det(&self) -> R {
        let n = self.lu.num_rows();
        let mut det = R::one();
        for i in 0..n {
            det = det * self.lu[(i, i)].clone();
        }
        if self.swaps % 2 == 1 {
            -det
        } else {
            det
        }
    }

    /// Solves `A * x = b` for the decomposed `A`.
    ///
    /// Forward substitution through `L` against the permuted right-hand
    /// side, then backward substitution through `U`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSizeMismatch`] if `b.len()` differs from
    /// the matrix dimension.
    pub fn solve(&self, b: &[R]) -> Result<Vec<R>> {
        let n = self.lu.num_rows();
        if b.len() != n {
            return Err(Error::BufferSizeMismatch {
                expected: n,
                got: b.len(),
            });
        }
        let mut x = vec![R::zero(); n];
        for i in 0..n {
            let mut acc = b[self.perm[i]].clone();
            for k in 0..i {
                acc = acc - self.lu[(i, k)].clone() * x[k].clone();
            }
            x[i] = acc;
        }
        for i in (0..n).rev() {
            let mut acc = x[i].clone();
            for k in i + 1..n {
                acc = acc - self.lu[(i, k)].clone() * x[k].clone();
            }
            x[i] = acc / self.lu[(i, i)].clone();
        }
        Ok(x)
    }

    /// The inverse of the decomposed matrix.
    ///
    /// Each column of the inverse is obtained by substituting the
    /// corresponding permuted identity column, written column by column
    /// into the result.
    #[must_use]
    pub fn inverse(&self) -> DenseMatrix<R> {
        let n = self.lu.num_rows();
        let mut inv: DenseMatrix<R> = DenseMatrix::zeros(n, n);
        for j in 0..n {
            for i in 0..n {
                let mut acc = if self.perm[i] == j { R::one() } else { R::zero() };
                for k in 0..i {
                    acc = acc - self.lu[(i, k)].clone() * inv[(k, j)].clone();
                }
                inv[(i, j)] = acc;
            }
            for i in (0..n).rev() {
                let mut acc = inv[(i, j)].clone();
                for k in i + 1..n {
                    acc = acc - self.lu[(i, k)].clone() * inv[(k, j)].clone();
                }
                inv[(i, j)] = acc / self.lu[(i, i)].clone();
            }
        }
        inv
    }
}

impl<R: Scalar + Magnitude + Tolerance> DenseMatrix<R> {
    /// Decomposes the matrix into combined L/U factors and a row
    /// permutation, using partial pivoting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSquare`] for a rectangular matrix and
    /// [`Error::Singular`] when the best remaining pivot in some column
    /// falls below the scalar's tolerance.
    pub fn lup(&self) -> Result<LupDecomposition<R>> {
        if !self.is_square() {
            return Err(Error::NotSquare {
                rows: self.num_rows(),
                cols: self.num_cols(),
            });
        }
        let n = self.num_rows();
        let mut lu = self.clone();
        let mut perm: Vec<usize> = (0..n).collect();
        let mut swaps = 0;

        for i in 0..n {
            let mut imax = i;
            let mut max_mag = lu[(i, i)].magnitude();
            for k in i + 1..n {
                let mag = lu[(k, i)].magnitude();
                if mag > max_mag {
                    max_mag = mag;
                    imax = k;
                }
            }
            if max_mag < R::tolerance() {
                return Err(Error::Singular);
            }
            if imax != i {
                lu.swap_rows(i, imax)?;
                perm.swap(i, imax);
                swaps += 1;
            }
            let pivot = lu[(i, i)].clone();
            for j in i + 1..n {
                let factor = lu[(j, i)].clone() / pivot.clone();
                lu[(j, i)] = factor.clone();
                for k in i + 1..n {
                    let scaled = lu[(i, k)].clone() * factor.clone();
                    lu[(j, k)] = lu[(j, k)].clone() - scaled;
                }
            }
        }

        Ok(LupDecomposition { lu, perm, swaps })
    }

    /// The determinant, via LUP decomposition.
    ///
    /// # Errors
    ///
    /// Fails exactly when [`DenseMatrix::lup`] fails.
    pub fn det(&self) -> Result<R> {
        Ok(self.lup()?.det())
    }

    /// Option-returning form of [`DenseMatrix::det`].
    #[must_use]
    pub fn checked_det(&self) -> Option<R> {
        self.det().ok()
    }

    /// The inverse, via LUP decomposition.
    ///
    /// # Errors
    ///
    /// Fails exactly when [`DenseMatrix::lup`] fails.
    pub fn inverse(&self) -> Result<Self> {
        Ok(self.lup()?.inverse())
    }

    /// Option-returning form of [`DenseMatrix::inverse`].
    #[must_use]
    pub fn checked_inverse(&self) -> Option<Self> {
        self.inverse().ok()
    }

    /// Solves `self * x = b`, via LUP decomposition.
    ///
    /// # Errors
    ///
    /// Fails when [`DenseMatrix::lup`] fails or `b` has the wrong length.
    pub fn solve(&self, b: &[R]) -> Result<Vec<R>> {
        self.lup()?.solve(b)
    }

    /// Option-returning form of [`DenseMatrix::solve`].
    #[must_use]
    pub fn checked_solve(&self, b: &[R]) -> Option<Vec<R>> {
        self.solve(b).ok()
    }
}
