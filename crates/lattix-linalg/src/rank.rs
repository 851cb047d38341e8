//! Rank computation by Gaussian column reduction.

use lattix_scalar::{Scalar, Tolerance};

use crate::dense_matrix::DenseMatrix;

impl<R: Scalar + Tolerance> DenseMatrix<R> {
    /// The rank of the matrix: its number of linearly independent rows.
    ///
    /// Works on a copy. Iterates candidate pivot rows; a negligible pivot
    /// is first repaired by swapping in a lower row with a usable entry,
    /// and failing that the working rank shrinks and the pivot column is
    /// overwritten with the last still-active column so the same row
    /// index is retried. A usable pivot is eliminated from every other
    /// row by scaled subtraction.
    #[must_use]
    pub fn rank(&self) -> usize {
        let mut m = self.clone();
        let rows = m.num_rows();
        let mut rank = m.num_cols();
        let mut row = 0;

        while row < rank {
            if row >= rows {
                // Every processed row yielded a pivot; nothing below to
                // pivot the remaining columns against.
                rank = row;
                break;
            }
            if !m[(row, row)].is_negligible() {
                let pivot = m[(row, row)].clone();
                for r in 0..rows {
                    if r == row {
                        continue;
                    }
                    let factor = m[(r, row)].clone() / pivot.clone();
                    for c in 0..rank {
                        let scaled = m[(row, c)].clone() * factor.clone();
                        m[(r, c)] = m[(r, c)].clone() - scaled;
                    }
                }
                row += 1;
                continue;
            }

            // Try to repair the pivot from a lower row.
            let swap = (row + 1..rows).find(|&r| !m[(r, row)].is_negligible());
            if let Some(r) = swap {
                // Indices are in range.
                unsafe { m.swap_rows_unchecked(row, r) };
            } else {
                // Column carries no new pivot: compact it away and retry
                // the same row index against the last active column.
                rank -= 1;
                for r in 0..rows {
                    m[(r, row)] = m[(r, rank)].clone();
                }
            }
        }

        rank
    }
}
