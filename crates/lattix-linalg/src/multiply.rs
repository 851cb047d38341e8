//! Matrix multiplication strategy.
//!
//! `A (m x k) * B (k x n) -> C (m x n)`. The strategy pads the operands
//! to the next power of two of `max(m, k, n)`; when that dimension is at
//! most [`DIRECT_THRESHOLD`] it multiplies directly (transposing `B` once
//! so every output cell is a dot product of two contiguous rows), and
//! otherwise it recurses with Strassen's seven-product scheme, falling
//! back to the direct kernel at the same threshold.
//!
//! The parallel variant is a strict three-level fork-join: quadrant
//! extraction for the two operands, then the seven products, then the
//! four recombination sums, with a join barrier between levels. Every
//! task owns its operands outright, so no synchronization beyond the
//! joins is needed.

use std::ops::{Mul, Sub};

use num_traits::Zero;

use crate::dense_matrix::DenseMatrix;
use crate::error::{Error, Result};

/// Largest padded dimension handled by the direct kernel.
///
/// An empirical constant: below this size the bookkeeping of the
/// recursive scheme costs more than the cubic kernel saves. It also
/// bounds the recursion, which falls back to the direct kernel at the
/// same size.
pub const DIRECT_THRESHOLD: usize = 64;

impl<R> DenseMatrix<R>
where
    R: Clone + Zero + Mul<Output = R> + Sub<Output = R>,
{
    /// Multiplies two matrices sequentially.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleDimensions`] if
    /// `self.num_cols() != other.num_rows()`.
    pub fn mm(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        Ok(multiply(self, other))
    }

    /// Multiplies two matrices with fork-join parallelism.
    ///
    /// Produces the same result as [`DenseMatrix::mm`]; only the
    /// scheduling differs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleDimensions`] if
    /// `self.num_cols() != other.num_rows()`.
    pub fn mm_parallel(&self, other: &Self) -> Result<Self>
    where
        R: Send + Sync,
    {
        self.check_compatible(other)?;
        Ok(multiply_parallel(self, other))
    }

    /// Option-returning form of [`DenseMatrix::mm`].
    #[must_use]
    pub fn checked_mm(&self, other: &Self) -> Option<Self> {
        self.mm(other).ok()
    }

    /// Option-returning form of [`DenseMatrix::mm_parallel`].
    #[must_use]
    pub fn checked_mm_parallel(&self, other: &Self) -> Option<Self>
    where
        R: Send + Sync,
    {
        self.mm_parallel(other).ok()
    }

    fn check_compatible(&self, other: &Self) -> Result<()> {
        if self.num_cols() == other.num_rows() {
            Ok(())
        } else {
            Err(Error::IncompatibleDimensions {
                lhs: (self.num_rows(), self.num_cols()),
                rhs: (other.num_rows(), other.num_cols()),
            })
        }
    }
}

impl<R> Mul for &DenseMatrix<R>
where
    R: Clone + Zero + Mul<Output = R> + Sub<Output = R> + Send + Sync,
{
    type Output = DenseMatrix<R>;

    /// Multiplies via the parallel strategy.
    ///
    /// # Panics
    ///
    /// Panics if the inner dimensions differ. Use
    /// [`DenseMatrix::checked_mm_parallel`] for the non-panicking form.
    fn mul(self, other: Self) -> DenseMatrix<R> {
        assert_eq!(
            self.num_cols(),
            other.num_rows(),
            "inner dimensions differ"
        );
        multiply_parallel(self, other)
    }
}

/// The power-of-two dimension both operands are padded to.
fn padded_dim<R>(a: &DenseMatrix<R>, b: &DenseMatrix<R>) -> usize {
    a.num_rows()
        .max(a.num_cols())
        .max(b.num_cols())
        .next_power_of_two()
}

fn pad<R: Clone + Zero>(m: &DenseMatrix<R>, dim: usize) -> DenseMatrix<R> {
    let mut padded = m.clone();
    padded.resize(dim, dim);
    padded
}

fn multiply<R>(a: &DenseMatrix<R>, b: &DenseMatrix<R>) -> DenseMatrix<R>
where
    R: Clone + Zero + Mul<Output = R> + Sub<Output = R>,
{
    let dim = padded_dim(a, b);
    if dim <= DIRECT_THRESHOLD {
        return multiply_direct(a, b);
    }
    let mut c = strassen(&pad(a, dim), &pad(b, dim));
    c.resize(a.num_rows(), b.num_cols());
    c
}

fn multiply_parallel<R>(a: &DenseMatrix<R>, b: &DenseMatrix<R>) -> DenseMatrix<R>
where
    R: Clone + Zero + Mul<Output = R> + Sub<Output = R> + Send + Sync,
{
    let dim = padded_dim(a, b);
    if dim <= DIRECT_THRESHOLD {
        return multiply_direct(a, b);
    }
    let mut c = strassen_parallel(&pad(a, dim), &pad(b, dim));
    c.resize(a.num_rows(), b.num_cols());
    c
}

/// Cubic kernel for small operands.
///
/// Transposes `b` once so that each output cell is a dot product of two
/// contiguous rows, which is friendlier to the cache than walking `b`'s
/// columns at stride.
fn multiply_direct<R>(a: &DenseMatrix<R>, b: &DenseMatrix<R>) -> DenseMatrix<R>
where
    R: Clone + Zero + Mul<Output = R>,
{
    let bt = b.transpose();
    DenseMatrix::from_fn(a.num_rows(), b.num_cols(), |i, j| {
        a.row(i)
            .iter()
            .zip(bt.row(j))
            .fold(R::zero(), |acc, (x, y)| acc + x.clone() * y.clone())
    })
}

/// Extracts the four quadrants of a square, even-dimensioned matrix.
///
/// Order: top-left, top-right, bottom-left, bottom-right. Each quadrant
/// is an independent owned value.
fn split<R: Clone>(m: &DenseMatrix<R>) -> [DenseMatrix<R>; 4] {
    let n = m.num_rows();
    let mid = n / 2;
    [
        m.submatrix(0..mid, 0..mid),
        m.submatrix(0..mid, mid..n),
        m.submatrix(mid..n, 0..mid),
        m.submatrix(mid..n, mid..n),
    ]
}

/// Reassembles four quadrants into one matrix of twice their dimension.
fn assemble<R: Clone + Zero>(
    c11: &DenseMatrix<R>,
    c12: &DenseMatrix<R>,
    c21: &DenseMatrix<R>,
    c22: &DenseMatrix<R>,
) -> DenseMatrix<R> {
    let mid = c11.num_rows();
    let mut c = DenseMatrix::zeros(mid * 2, mid * 2);
    c.copy_block_from(c11, 0, 0);
    c.copy_block_from(c12, 0, mid);
    c.copy_block_from(c21, mid, 0);
    c.copy_block_from(c22, mid, mid);
    c
}

/// Recursive Strassen multiplication of square power-of-two operands.
fn strassen<R>(a: &DenseMatrix<R>, b: &DenseMatrix<R>) -> DenseMatrix<R>
where
    R: Clone + Zero + Mul<Output = R> + Sub<Output = R>,
{
    if a.num_rows() <= DIRECT_THRESHOLD {
        return multiply_direct(a, b);
    }

    let [a11, a12, a21, a22] = split(a);
    let [b11, b12, b21, b22] = split(b);

    let p1 = strassen(&(&a11 + &a22), &(&b11 + &b22));
    let p2 = strassen(&(&a21 + &a22), &b11);
    let p3 = strassen(&a11, &(&b12 - &b22));
    let p4 = strassen(&a22, &(&b21 - &b11));
    let p5 = strassen(&(&a11 + &a12), &b22);
    let p6 = strassen(&(&a21 - &a11), &(&b11 + &b12));
    let p7 = strassen(&(&a12 - &a22), &(&b21 + &b22));

    let c11 = &(&(&p1 + &p4) + &p7) - &p5;
    let c12 = &p3 + &p5;
    let c21 = &p2 + &p4;
    let c22 = &(&(&p1 - &p2) + &p3) + &p6;

    assemble(&c11, &c12, &c21, &c22)
}

/// Fork-join Strassen multiplication of square power-of-two operands.
///
/// Three levels, each joined before the next begins: the two quadrant
/// extractions, the seven products, the four recombination sums. A panic
/// inside any task propagates through its join and aborts the whole
/// multiplication.
fn strassen_parallel<R>(a: &DenseMatrix<R>, b: &DenseMatrix<R>) -> DenseMatrix<R>
where
    R: Clone + Zero + Mul<Output = R> + Sub<Output = R> + Send + Sync,
{
    if a.num_rows() <= DIRECT_THRESHOLD {
        return multiply_direct(a, b);
    }

    let ([a11, a12, a21, a22], [b11, b12, b21, b22]) = rayon::join(|| split(a), || split(b));

    let ((p1, (p2, p3)), ((p4, p5), (p6, p7))) = rayon::join(
        || {
            rayon::join(
                || strassen_parallel(&(&a11 + &a22), &(&b11 + &b22)),
                || {
                    rayon::join(
                        || strassen_parallel(&(&a21 + &a22), &b11),
                        || strassen_parallel(&a11, &(&b12 - &b22)),
                    )
                },
            )
        },
        || {
            rayon::join(
                || {
                    rayon::join(
                        || strassen_parallel(&a22, &(&b21 - &b11)),
                        || strassen_parallel(&(&a11 + &a12), &b22),
                    )
                },
                || {
                    rayon::join(
                        || strassen_parallel(&(&a21 - &a11), &(&b11 + &b12)),
                        || strassen_parallel(&(&a12 - &a22), &(&b21 + &b22)),
                    )
                },
            )
        },
    );

    let ((c11, c12), (c21, c22)) = rayon::join(
        || {
            rayon::join(
                || &(&(&p1 + &p4) + &p7) - &p5,
                || &p3 + &p5,
            )
        },
        || {
            rayon::join(
                || &p2 + &p4,
                || &(&(&p1 - &p2) + &p3) + &p6,
            )
        },
    );

    assemble(&c11, &c12, &c21, &c22)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_2x2() {
        let a = DenseMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = DenseMatrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
        let c = a.mm(&b).unwrap();
        assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_mm_rectangular() {
        let a = DenseMatrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        let b = DenseMatrix::from_rows(vec![vec![7, 8], vec![9, 10], vec![11, 12]]);
        let c = a.mm(&b).unwrap();
        assert_eq!(c.num_rows(), 2);
        assert_eq!(c.num_cols(), 2);
        assert_eq!(c.as_slice(), &[58, 64, 139, 154]);
    }

    #[test]
    fn test_mm_incompatible() {
        let a: DenseMatrix<i64> = DenseMatrix::zeros(2, 3);
        let b: DenseMatrix<i64> = DenseMatrix::zeros(2, 3);
        assert_eq!(
            a.mm(&b),
            Err(Error::IncompatibleDimensions {
                lhs: (2, 3),
                rhs: (2, 3)
            })
        );
        assert!(a.checked_mm(&b).is_none());
        assert!(a.checked_mm_parallel(&b).is_none());
    }

    #[test]
    fn test_mm_identity() {
        let m = DenseMatrix::from_fn(5, 5, |i, j| (i * 5 + j) as i64);
        let id = DenseMatrix::identity(5);
        assert_eq!(m.mm(&id).unwrap(), m);
        assert_eq!(id.mm(&m).unwrap(), m);
    }

    #[test]
    fn test_mm_empty_operands() {
        let a: DenseMatrix<i64> = DenseMatrix::zeros(2, 0);
        let b: DenseMatrix<i64> = DenseMatrix::zeros(0, 3);
        let c = a.mm(&b).unwrap();
        assert_eq!((c.num_rows(), c.num_cols()), (2, 3));
        assert!(c.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_strassen_path_matches_direct() {
        // 96 pads to 128 > DIRECT_THRESHOLD, forcing one Strassen level.
        let a = DenseMatrix::from_fn(96, 96, |i, j| ((i * 31 + j * 7) % 13) as i64 - 6);
        let b = DenseMatrix::from_fn(96, 96, |i, j| ((i * 5 + j * 17) % 11) as i64 - 5);
        assert_eq!(a.mm(&b).unwrap(), multiply_direct(&a, &b));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let a = DenseMatrix::from_fn(70, 90, |i, j| ((i * 3 + j) % 7) as i64);
        let b = DenseMatrix::from_fn(90, 65, |i, j| ((i + j * 5) % 9) as i64);
        assert_eq!(a.mm(&b).unwrap(), a.mm_parallel(&b).unwrap());
    }

    #[test]
    fn test_mul_operator() {
        let a = DenseMatrix::from_rows(vec![vec![1, 2], vec![3, 4]]);
        let b = DenseMatrix::from_rows(vec![vec![5, 6], vec![7, 8]]);
        assert_eq!((&a * &b).as_slice(), &[19, 22, 43, 50]);
    }

    #[test]
    #[should_panic(expected = "inner dimensions differ")]
    fn test_mul_operator_panics_on_mismatch() {
        let a: DenseMatrix<i64> = DenseMatrix::zeros(2, 3);
        let b: DenseMatrix<i64> = DenseMatrix::zeros(2, 3);
        let _ = &a * &b;
    }
}
