//! Element-wise arithmetic on dense matrices.
//!
//! Each operation exists in a panicking operator form and a `checked_*`
//! form returning `None` on dimension mismatch, mirroring the std
//! arithmetic convention.

use std::ops::{Add, Mul, Neg, Sub};

use crate::dense_matrix::DenseMatrix;
use crate::error::{Error, Result};

impl<R> DenseMatrix<R> {
    /// Element-wise sum.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the dimensions differ.
    pub fn add(&self, other: &Self) -> Result<Self>
    where
        R: Clone + Add<Output = R>,
    {
        self.check_same_shape(other)?;
        Ok(self.zip_with(other, |a, b| a.clone() + b.clone()))
    }

    /// Element-wise difference.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the dimensions differ.
    pub fn sub(&self, other: &Self) -> Result<Self>
    where
        R: Clone + Sub<Output = R>,
    {
        self.check_same_shape(other)?;
        Ok(self.zip_with(other, |a, b| a.clone() - b.clone()))
    }

    /// Option-returning form of [`DenseMatrix::add`].
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self>
    where
        R: Clone + Add<Output = R>,
    {
        self.add(other).ok()
    }

    /// Option-returning form of [`DenseMatrix::sub`].
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self>
    where
        R: Clone + Sub<Output = R>,
    {
        self.sub(other).ok()
    }

    fn check_same_shape(&self, other: &Self) -> Result<()> {
        if self.num_rows() == other.num_rows() && self.num_cols() == other.num_cols() {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                lhs: (self.num_rows(), self.num_cols()),
                rhs: (other.num_rows(), other.num_cols()),
            })
        }
    }

    /// Multiplies every entry by a scalar. Always succeeds.
    #[must_use]
    pub fn scale(&self, scalar: &R) -> Self
    where
        R: Clone + Mul<Output = R>,
    {
        self.map(|v| v.clone() * scalar.clone())
    }

    /// Applies `f` to every entry, producing a new matrix.
    #[must_use]
    pub fn map(&self, f: impl Fn(&R) -> R) -> Self {
        Self::from_fn(self.num_rows(), self.num_cols(), |i, j| f(&self[(i, j)]))
    }

    fn zip_with(&self, other: &Self, f: impl Fn(&R, &R) -> R) -> Self {
        assert_eq!(
            (self.num_rows(), self.num_cols()),
            (other.num_rows(), other.num_cols()),
            "matrix dimensions differ"
        );
        Self::from_fn(self.num_rows(), self.num_cols(), |i, j| {
            f(&self[(i, j)], &other[(i, j)])
        })
    }
}

impl<R: Clone + Add<Output = R>> Add for &DenseMatrix<R> {
    type Output = DenseMatrix<R>;

    /// # Panics
    ///
    /// Panics if the dimensions differ. Use
    /// [`DenseMatrix::checked_add`] for the non-panicking form.
    fn add(self, other: Self) -> DenseMatrix<R> {
        self.zip_with(other, |a, b| a.clone() + b.clone())
    }
}

impl<R: Clone + Sub<Output = R>> Sub for &DenseMatrix<R> {
    type Output = DenseMatrix<R>;

    /// # Panics
    ///
    /// Panics if the dimensions differ. Use
    /// [`DenseMatrix::checked_sub`] for the non-panicking form.
    fn sub(self, other: Self) -> DenseMatrix<R> {
        self.zip_with(other, |a, b| a.clone() - b.clone())
    }
}

impl<R: Clone + Mul<Output = R>> Mul<R> for &DenseMatrix<R> {
    type Output = DenseMatrix<R>;

    /// Scalar multiplication. Always succeeds.
    fn mul(self, scalar: R) -> DenseMatrix<R> {
        self.scale(&scalar)
    }
}

impl<R: Clone + Neg<Output = R>> Neg for &DenseMatrix<R> {
    type Output = DenseMatrix<R>;

    fn neg(self) -> DenseMatrix<R> {
        self.map(|v| -v.clone())
    }
}
