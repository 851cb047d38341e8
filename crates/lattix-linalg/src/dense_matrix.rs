//! Dense matrix storage and accessors.
//!
//! A [`DenseMatrix`] owns a single flat buffer in row-major order. Every
//! higher layer of the engine (arithmetic, multiplication, decomposition,
//! rank) operates through the accessors defined here.

use std::fmt;
use std::ops::{Index, IndexMut, Range};

use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// Dense matrix stored in row-major order.
///
/// The entry at `(row, col)` lives at `data[row * num_cols + col]`, and
/// `data.len() == num_rows * num_cols` always holds. A matrix owns its
/// buffer exclusively: cloning copies the buffer, moving transfers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseMatrix<R> {
    /// Matrix entries in row-major order.
    data: Vec<R>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
}

impl<R: Zero + Clone> DenseMatrix<R> {
    /// Creates a new matrix filled with zeros.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![R::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Creates a new zero-filled matrix. Alias of [`DenseMatrix::zeros`].
    #[must_use]
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        Self::zeros(num_rows, num_cols)
    }

    /// Creates a matrix from a possibly ragged 2D structure.
    ///
    /// Shorter rows are padded with zeros to the length of the longest row.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<R>>) -> Self {
        if rows.is_empty() {
            return Self::zeros(0, 0);
        }
        let num_rows = rows.len();
        let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut data = Vec::with_capacity(num_rows * num_cols);
        for mut row in rows {
            row.resize(num_cols, R::zero());
            data.append(&mut row);
        }
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Creates an identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self
    where
        R: One,
    {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = R::one();
        }
        m
    }

    /// Resizes the matrix to `new_rows x new_cols` in place.
    ///
    /// The overlapping rectangle keeps its values; any newly exposed
    /// entries are zero. Used by the multiplication strategy to pad
    /// operands to a power of two and to truncate the padded result.
    pub fn resize(&mut self, new_rows: usize, new_cols: usize) {
        let mut data = vec![R::zero(); new_rows * new_cols];
        let rows = self.num_rows.min(new_rows);
        let cols = self.num_cols.min(new_cols);
        for i in 0..rows {
            let src = i * self.num_cols;
            let dst = i * new_cols;
            data[dst..dst + cols].clone_from_slice(&self.data[src..src + cols]);
        }
        self.data = data;
        self.num_rows = new_rows;
        self.num_cols = new_cols;
    }
}

impl<R> DenseMatrix<R> {
    /// Creates a matrix by evaluating `init` at every position.
    #[must_use]
    pub fn from_fn(num_rows: usize, num_cols: usize, mut init: impl FnMut(usize, usize) -> R) -> Self {
        let mut data = Vec::with_capacity(num_rows * num_cols);
        for i in 0..num_rows {
            for j in 0..num_cols {
                data.push(init(i, j));
            }
        }
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from a row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSizeMismatch`] if `data.len()` is not
    /// `num_rows * num_cols`.
    pub fn from_vec(num_rows: usize, num_cols: usize, data: Vec<R>) -> Result<Self> {
        if data.len() != num_rows * num_cols {
            return Err(Error::BufferSizeMismatch {
                expected: num_rows * num_cols,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            num_rows,
            num_cols,
        })
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    /// Returns the underlying row-major buffer.
    #[must_use]
    pub fn as_slice(&self) -> &[R] {
        &self.data
    }

    /// Returns a reference to the entry at (row, col).
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&R> {
        if row < self.num_rows && col < self.num_cols {
            Some(&self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns a mutable reference to the entry at (row, col).
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut R> {
        if row < self.num_rows && col < self.num_cols {
            Some(&mut self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns a reference to the entry at (row, col) without bounds checks.
    ///
    /// # Safety
    ///
    /// `row < self.num_rows()` and `col < self.num_cols()` must hold.
    #[must_use]
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> &R {
        debug_assert!(row < self.num_rows && col < self.num_cols);
        unsafe { self.data.get_unchecked(row * self.num_cols + col) }
    }

    /// Returns a mutable reference to the entry at (row, col) without
    /// bounds checks.
    ///
    /// # Safety
    ///
    /// `row < self.num_rows()` and `col < self.num_cols()` must hold.
    pub unsafe fn get_unchecked_mut(&mut self, row: usize, col: usize) -> &mut R {
        debug_assert!(row < self.num_rows && col < self.num_cols);
        let idx = row * self.num_cols + col;
        unsafe { self.data.get_unchecked_mut(idx) }
    }

    /// Returns a slice of the specified row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.num_rows()`.
    #[must_use]
    pub fn row(&self, row: usize) -> &[R] {
        // Slice indexing alone would not catch a bad row when the matrix
        // has zero columns.
        assert!(row < self.num_rows, "row index {row} out of bounds");
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Returns a mutable slice of the specified row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.num_rows()`.
    pub fn row_mut(&mut self, row: usize) -> &mut [R] {
        assert!(row < self.num_rows, "row index {row} out of bounds");
        let start = row * self.num_cols;
        &mut self.data[start..start + self.num_cols]
    }

    /// Returns a slice of the specified row, or an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowOutOfBounds`] if `row >= self.num_rows()`.
    pub fn try_row(&self, row: usize) -> Result<&[R]> {
        self.check_row(row)?;
        Ok(self.row(row))
    }

    /// Overwrites the specified row from a slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowOutOfBounds`] for a bad index and
    /// [`Error::BufferSizeMismatch`] if `values` has the wrong length.
    pub fn set_row(&mut self, row: usize, values: &[R]) -> Result<()>
    where
        R: Clone,
    {
        self.check_row(row)?;
        if values.len() != self.num_cols {
            return Err(Error::BufferSizeMismatch {
                expected: self.num_cols,
                got: values.len(),
            });
        }
        self.row_mut(row).clone_from_slice(values);
        Ok(())
    }

    /// Returns a column as a vector.
    ///
    /// Storage is row-major, so this is a strided gather.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColOutOfBounds`] if `col >= self.num_cols()`.
    pub fn col(&self, col: usize) -> Result<Vec<R>>
    where
        R: Clone,
    {
        self.check_col(col)?;
        Ok((0..self.num_rows)
            .map(|row| self.data[row * self.num_cols + col].clone())
            .collect())
    }

    /// Overwrites a column from a slice (strided scatter).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColOutOfBounds`] for a bad index and
    /// [`Error::BufferSizeMismatch`] if `values` has the wrong length.
    pub fn set_col(&mut self, col: usize, values: &[R]) -> Result<()>
    where
        R: Clone,
    {
        self.check_col(col)?;
        if values.len() != self.num_rows {
            return Err(Error::BufferSizeMismatch {
                expected: self.num_rows,
                got: values.len(),
            });
        }
        for (row, val) in values.iter().enumerate() {
            self.data[row * self.num_cols + col] = val.clone();
        }
        Ok(())
    }

    /// Swaps two rows in place. Swapping a row with itself is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowOutOfBounds`] if either index is invalid.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_row(a)?;
        self.check_row(b)?;
        // Indices validated above.
        unsafe { self.swap_rows_unchecked(a, b) };
        Ok(())
    }

    /// Swaps two rows without bounds checks.
    ///
    /// # Safety
    ///
    /// Both `a < self.num_rows()` and `b < self.num_rows()` must hold.
    pub unsafe fn swap_rows_unchecked(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        debug_assert!(a < self.num_rows && b < self.num_rows);
        let ptr = self.data.as_mut_ptr();
        // Distinct rows never overlap in a row-major buffer.
        unsafe {
            std::ptr::swap_nonoverlapping(
                ptr.add(a * self.num_cols),
                ptr.add(b * self.num_cols),
                self.num_cols,
            );
        }
    }

    /// Swaps two columns in place. Swapping a column with itself is a no-op.
    ///
    /// Costs one element swap per row at stride `num_cols`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColOutOfBounds`] if either index is invalid.
    pub fn swap_cols(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_col(a)?;
        self.check_col(b)?;
        // Indices validated above.
        unsafe { self.swap_cols_unchecked(a, b) };
        Ok(())
    }

    /// Swaps two columns without bounds checks.
    ///
    /// # Safety
    ///
    /// Both `a < self.num_cols()` and `b < self.num_cols()` must hold.
    pub unsafe fn swap_cols_unchecked(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        debug_assert!(a < self.num_cols && b < self.num_cols);
        for row in 0..self.num_rows {
            let base = row * self.num_cols;
            self.data.swap(base + a, base + b);
        }
    }

    /// Removes one row, decrementing the row count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowOutOfBounds`] if `row >= self.num_rows()`.
    pub fn remove_row(&mut self, row: usize) -> Result<()> {
        self.check_row(row)?;
        let start = row * self.num_cols;
        self.data.drain(start..start + self.num_cols);
        self.num_rows -= 1;
        Ok(())
    }

    /// Removes one column, decrementing the column count.
    ///
    /// Costs one strided erase per row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColOutOfBounds`] if `col >= self.num_cols()`.
    pub fn remove_col(&mut self, col: usize) -> Result<()> {
        self.check_col(col)?;
        let cols = self.num_cols;
        let mut idx = 0;
        self.data.retain(|_| {
            let keep = idx % cols != col;
            idx += 1;
            keep
        });
        self.num_cols -= 1;
        Ok(())
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row < self.num_rows {
            Ok(())
        } else {
            Err(Error::RowOutOfBounds {
                row,
                rows: self.num_rows,
            })
        }
    }

    fn check_col(&self, col: usize) -> Result<()> {
        if col < self.num_cols {
            Ok(())
        } else {
            Err(Error::ColOutOfBounds {
                col,
                cols: self.num_cols,
            })
        }
    }
}

impl<R: Clone> DenseMatrix<R> {
    /// Returns the transpose of the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.num_cols {
            for i in 0..self.num_rows {
                data.push(self.data[i * self.num_cols + j].clone());
            }
        }
        Self {
            data,
            num_rows: self.num_cols,
            num_cols: self.num_rows,
        }
    }

    /// Copies the rectangle `rows x cols` out into a new owned matrix.
    ///
    /// # Panics
    ///
    /// Panics if either range exceeds the matrix bounds.
    #[must_use]
    pub fn submatrix(&self, rows: Range<usize>, cols: Range<usize>) -> Self {
        assert!(rows.end <= self.num_rows && cols.end <= self.num_cols);
        let mut data = Vec::with_capacity(rows.len() * cols.len());
        let (num_rows, num_cols) = (rows.len(), cols.len());
        for i in rows {
            let start = i * self.num_cols + cols.start;
            data.extend_from_slice(&self.data[start..start + num_cols]);
        }
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Copies `src` into this matrix with its top-left corner at
    /// `(row_off, col_off)`.
    ///
    /// # Panics
    ///
    /// Panics if `src` does not fit at that offset.
    pub fn copy_block_from(&mut self, src: &Self, row_off: usize, col_off: usize) {
        assert!(row_off + src.num_rows <= self.num_rows);
        assert!(col_off + src.num_cols <= self.num_cols);
        for i in 0..src.num_rows {
            let dst = (row_off + i) * self.num_cols + col_off;
            self.data[dst..dst + src.num_cols].clone_from_slice(src.row(i));
        }
    }
}

impl<R> Index<(usize, usize)> for DenseMatrix<R> {
    type Output = R;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        debug_assert!(row < self.num_rows && col < self.num_cols);
        &self.data[row * self.num_cols + col]
    }
}

impl<R> IndexMut<(usize, usize)> for DenseMatrix<R> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        debug_assert!(row < self.num_rows && col < self.num_cols);
        &mut self.data[row * self.num_cols + col]
    }
}

impl<R> Index<usize> for DenseMatrix<R> {
    type Output = [R];

    /// Indexes by row, yielding the row slice.
    fn index(&self, row: usize) -> &Self::Output {
        self.row(row)
    }
}

impl<R: fmt::Display> fmt::Display for DenseMatrix<R> {
    /// Human-readable dump: tab-separated rows, each newline-terminated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.num_rows {
            for (j, value) in self.row(i).iter().enumerate() {
                if j > 0 {
                    write!(f, "\t")?;
                }
                write!(f, "{value}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_zeros() {
        let m: DenseMatrix<i64> = DenseMatrix::zeros(3, 4);
        assert_eq!(m.num_rows(), 3);
        assert_eq!(m.num_cols(), 4);
        assert!(m.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_new_is_zeros() {
        let m: DenseMatrix<i64> = DenseMatrix::new(2, 3);
        assert_eq!(m, DenseMatrix::zeros(2, 3));
    }

    #[test]
    fn test_from_fn() {
        let m = DenseMatrix::from_fn(2, 3, |i, j| i * 10 + j);
        assert_eq!(m[(0, 0)], 0);
        assert_eq!(m[(1, 2)], 12);
    }

    #[test]
    fn test_from_vec_length_checked() {
        let err = DenseMatrix::from_vec(2, 2, vec![1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            Error::BufferSizeMismatch {
                expected: 4,
                got: 3
            }
        );
    }

    #[test]
    fn test_from_rows_pads_ragged_input() {
        let m = DenseMatrix::from_rows(vec![vec![1, 2, 3], vec![4], vec![5, 6]]);
        assert_eq!(m.num_rows(), 3);
        assert_eq!(m.num_cols(), 3);
        assert_eq!(m.row(1), &[4, 0, 0]);
        assert_eq!(m.row(2), &[5, 6, 0]);
    }

    #[test]
    fn test_identity() {
        let id: DenseMatrix<i64> = DenseMatrix::identity(3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(id[(i, j)], i64::from(i == j));
            }
        }
    }

    #[test]
    fn test_get_bounds() {
        let m = DenseMatrix::from_fn(2, 3, |i, j| i + j);
        assert_eq!(m.get(1, 2), Some(&3));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 3), None);
    }

    #[test]
    fn test_get_unchecked() {
        let m = DenseMatrix::from_fn(2, 2, |i, j| i * 2 + j);
        // Safety: indices are in bounds.
        assert_eq!(unsafe { *m.get_unchecked(1, 1) }, 3);
    }

    #[test]
    fn test_row_and_col_access() {
        let m = DenseMatrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        assert_eq!(m.row(0), &[1, 2, 3]);
        assert_eq!(m.try_row(5), Err(Error::RowOutOfBounds { row: 5, rows: 2 }));
        assert_eq!(m.col(1).unwrap(), vec![2, 5]);
        assert_eq!(m.col(3), Err(Error::ColOutOfBounds { col: 3, cols: 3 }));
    }

    #[test]
    #[should_panic(expected = "row index 1 out of bounds")]
    fn test_row_bound_checked_with_zero_cols() {
        let m: DenseMatrix<i64> = DenseMatrix::zeros(1, 0);
        let _ = m.row(1);
    }

    #[test]
    #[should_panic(expected = "row index 3 out of bounds")]
    fn test_row_mut_bound_checked_with_zero_cols() {
        let mut m: DenseMatrix<i64> = DenseMatrix::zeros(2, 0);
        let _ = m.row_mut(3);
    }

    #[test]
    fn test_set_row_and_col() {
        let mut m: DenseMatrix<i64> = DenseMatrix::zeros(2, 2);
        m.set_row(0, &[1, 2]).unwrap();
        m.set_col(1, &[7, 8]).unwrap();
        assert_eq!(m.as_slice(), &[1, 7, 0, 8]);
        assert!(m.set_row(0, &[1]).is_err());
        assert!(m.set_col(2, &[1, 2]).is_err());
    }

    #[test]
    fn test_swap_rows_and_cols() {
        let mut m = DenseMatrix::from_rows(vec![vec![1, 2], vec![3, 4]]);
        m.swap_rows(0, 1).unwrap();
        assert_eq!(m.as_slice(), &[3, 4, 1, 2]);
        m.swap_cols(0, 1).unwrap();
        assert_eq!(m.as_slice(), &[4, 3, 2, 1]);

        // Self-swap is a no-op.
        let before = m.clone();
        m.swap_rows(1, 1).unwrap();
        m.swap_cols(0, 0).unwrap();
        assert_eq!(m, before);

        assert_eq!(
            m.swap_rows(0, 2),
            Err(Error::RowOutOfBounds { row: 2, rows: 2 })
        );
    }

    #[test]
    fn test_remove_row_and_col() {
        let mut m = DenseMatrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]);
        m.remove_row(1).unwrap();
        assert_eq!(m.num_rows(), 2);
        assert_eq!(m.as_slice(), &[1, 2, 3, 7, 8, 9]);
        m.remove_col(0).unwrap();
        assert_eq!(m.num_cols(), 2);
        assert_eq!(m.as_slice(), &[2, 3, 8, 9]);
        assert!(m.remove_col(2).is_err());
    }

    #[test]
    fn test_resize_preserves_overlap() {
        let mut m = DenseMatrix::from_rows(vec![vec![1, 2], vec![3, 4]]);
        m.resize(3, 3);
        assert_eq!(m.as_slice(), &[1, 2, 0, 3, 4, 0, 0, 0, 0]);
        m.resize(2, 2);
        assert_eq!(m.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_transpose_involution() {
        let m = DenseMatrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        let t = m.transpose();
        assert_eq!(t.num_rows(), 3);
        assert_eq!(t.num_cols(), 2);
        assert_eq!(t[(0, 1)], 4);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_submatrix_and_copy_block() {
        let m = DenseMatrix::from_fn(4, 4, |i, j| i * 4 + j);
        let sub = m.submatrix(1..3, 1..3);
        assert_eq!(sub.as_slice(), &[5, 6, 9, 10]);

        let mut dst: DenseMatrix<usize> = DenseMatrix::zeros(4, 4);
        dst.copy_block_from(&sub, 2, 2);
        assert_eq!(dst[(2, 2)], 5);
        assert_eq!(dst[(3, 3)], 10);
        assert_eq!(dst[(0, 0)], 0);
    }

    #[test]
    fn test_row_indexing() {
        let m = DenseMatrix::from_rows(vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(&m[1], &[3, 4]);
    }

    #[test]
    fn test_display() {
        let m = DenseMatrix::from_rows(vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(m.to_string(), "1\t2\n3\t4\n");
    }
}
