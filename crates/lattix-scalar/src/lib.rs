//! # lattix-scalar
//!
//! Scalar capability traits for the Lattix dense matrix engine.
//!
//! Matrix operations are gated on exactly the capabilities they need
//! rather than on one monolithic "number" trait:
//! - [`Magnitude`] — absolute value, used for pivot selection
//! - [`Tolerance`] — a fixed singularity threshold for elimination
//! - [`Scalar`] — the arithmetic bundle elimination algorithms require
//!
//! Only types with a meaningful rounding model (floats) implement
//! [`Tolerance`], so LUP-based operations are statically restricted to
//! scalars where epsilon comparisons make sense.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::{One, Zero};

/// Types with an absolute value.
///
/// Partial pivoting selects the candidate with maximal magnitude, so any
/// scalar used in elimination must expose one.
pub trait Magnitude {
    /// Returns the absolute value of `self`.
    #[must_use]
    fn magnitude(&self) -> Self;
}

/// Types with a fixed singularity threshold.
///
/// Elimination algorithms treat a pivot whose magnitude falls below
/// [`Tolerance::tolerance`] as zero. The threshold is a per-type constant,
/// not a function of the matrix being decomposed.
pub trait Tolerance: Magnitude + PartialOrd + Sized {
    /// The smallest magnitude considered distinguishable from zero.
    #[must_use]
    fn tolerance() -> Self;

    /// Returns true if `self` is indistinguishable from zero.
    #[must_use]
    fn is_negligible(&self) -> bool {
        self.magnitude() < Self::tolerance()
    }
}

/// The arithmetic bundle required by elimination algorithms.
///
/// Decomposition, substitution and rank reduction divide by pivots and
/// subtract scaled rows, so they need the full field-like operation set.
/// Simpler operations (element-wise sums, scalar multiply) keep their own
/// narrower `std::ops` bounds and do not require `Scalar`.
pub trait Scalar:
    Clone
    + Debug
    + PartialEq
    + PartialOrd
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
}

impl<T> Scalar for T where
    T: Clone
        + Debug
        + PartialEq
        + PartialOrd
        + Zero
        + One
        + Add<Output = Self>
        + Sub<Output = Self>
        + Mul<Output = Self>
        + Div<Output = Self>
        + Neg<Output = Self>
{
}

macro_rules! impl_magnitude_signed {
    ($($t:ty),*) => {
        $(
            impl Magnitude for $t {
                fn magnitude(&self) -> Self {
                    self.abs()
                }
            }
        )*
    };
}

impl_magnitude_signed!(i8, i16, i32, i64, i128, isize, f32, f64);

impl Tolerance for f32 {
    fn tolerance() -> Self {
        1e-5
    }
}

impl Tolerance for f64 {
    fn tolerance() -> Self {
        1e-9
    }
}
