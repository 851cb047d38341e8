//! # lattix-linalg
//!
//! Dense matrix engine for Lattix.
//!
//! This crate provides:
//! - Flat-buffer row-major matrix storage with checked, unchecked and
//!   `Option`-returning accessors
//! - Element-wise arithmetic with panicking operators and `checked_*` duals
//! - A multiplication strategy: a transpose-based direct kernel for small
//!   operands and recursive Strassen multiplication for large ones, in
//!   sequential and fork-join-parallel (rayon) variants
//! - LUP decomposition with partial pivoting, and determinant, inverse and
//!   linear-system solve built on it
//! - Rank computation by Gaussian column reduction
//!
//! ## Algorithm selection
//!
//! Multiplication pads to the next power of two of the largest operand
//! dimension and switches to Strassen above
//! [`multiply::DIRECT_THRESHOLD`]; the recursion bottoms out at the same
//! threshold.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dense_matrix;
pub mod error;
pub mod lup;
pub mod multiply;
pub mod ops;
pub mod rank;

pub use dense_matrix::DenseMatrix;
pub use error::{Error, Result};
pub use lup::LupDecomposition;
pub use multiply::DIRECT_THRESHOLD;
