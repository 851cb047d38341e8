//! Error types for lattix-linalg.

use thiserror::Error;

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by fallible matrix operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A row index past the end of the matrix.
    #[error("row index {row} out of bounds for matrix with {rows} rows")]
    RowOutOfBounds {
        /// The offending index.
        row: usize,
        /// Number of rows in the matrix.
        rows: usize,
    },

    /// A column index past the end of the matrix.
    #[error("column index {col} out of bounds for matrix with {cols} columns")]
    ColOutOfBounds {
        /// The offending index.
        col: usize,
        /// Number of columns in the matrix.
        cols: usize,
    },

    /// A supplied buffer whose length does not match the matrix.
    #[error("buffer of length {got} does not match expected length {expected}")]
    BufferSizeMismatch {
        /// Required length.
        expected: usize,
        /// Supplied length.
        got: usize,
    },

    /// Operand shapes that differ where an element-wise operation needs
    /// them identical.
    #[error("dimension mismatch: {lhs:?} vs {rhs:?}")]
    DimensionMismatch {
        /// Shape of the left operand.
        lhs: (usize, usize),
        /// Shape of the right operand.
        rhs: (usize, usize),
    },

    /// Operand shapes that cannot be multiplied.
    #[error("cannot multiply {lhs:?} by {rhs:?}: inner dimensions differ")]
    IncompatibleDimensions {
        /// Shape of the left operand.
        lhs: (usize, usize),
        /// Shape of the right operand.
        rhs: (usize, usize),
    },

    /// A square-only operation applied to a rectangular matrix.
    #[error("matrix is {rows}x{cols}, expected square")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Decomposition met a pivot below the scalar's tolerance.
    #[error("matrix is singular to working precision")]
    Singular,
}
