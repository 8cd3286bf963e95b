use std::collections::BTreeMap;

use march_core::linear::Operator;
use thiserror::Error;

/// Errors that can occur when assembling a [`CsrMatrix`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CsrError {
    #[error("entry ({row}, {col}) is outside a {n}x{n} matrix")]
    OutOfBounds { row: usize, col: usize, n: usize },
}

/// A square sparse matrix in compressed sparse row format.
///
/// - `row_ptr[i]..row_ptr[i + 1]` indexes the entries of row `i`
/// - `col_idx` holds their column indices, sorted within each row
/// - `values` holds their values
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    n: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<f64>,
}

impl CsrMatrix {
    /// Assembles an `n x n` matrix from `(row, col, value)` entries.
    ///
    /// Duplicate entries are summed, the way element contributions are
    /// accumulated during assembly.
    ///
    /// # Errors
    ///
    /// Returns [`CsrError::OutOfBounds`] if an entry lies outside the matrix.
    pub fn from_triplets(n: usize, triplets: &[(usize, usize, f64)]) -> Result<Self, CsrError> {
        let mut entries = BTreeMap::new();
        for &(row, col, value) in triplets {
            if row >= n || col >= n {
                return Err(CsrError::OutOfBounds { row, col, n });
            }
            *entries.entry((row, col)).or_insert(0.0) += value;
        }

        let mut row_ptr = vec![0; n + 1];
        let mut col_idx = Vec::with_capacity(entries.len());
        let mut values = Vec::with_capacity(entries.len());

        for ((row, col), value) in entries {
            row_ptr[row + 1] += 1;
            col_idx.push(col);
            values.push(value);
        }
        for i in 0..n {
            row_ptr[i + 1] += row_ptr[i];
        }

        Ok(Self {
            n,
            row_ptr,
            col_idx,
            values,
        })
    }

    /// Creates the `n x n` identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        Self {
            n,
            row_ptr: (0..=n).collect(),
            col_idx: (0..n).collect(),
            values: vec![1.0; n],
        }
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns the entry at `(row, col)`, or zero if it is not stored.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row >= self.n {
            return 0.0;
        }
        let range = self.row_ptr[row]..self.row_ptr[row + 1];
        self.col_idx[range.clone()]
            .binary_search(&col)
            .map_or(0.0, |offset| self.values[range.start + offset])
    }
}

impl Operator for CsrMatrix {
    fn dim(&self) -> usize {
        self.n
    }

    fn apply(&self, x: &[f64], y: &mut [f64]) {
        for (row, y) in y.iter_mut().enumerate().take(self.n) {
            let range = self.row_ptr[row]..self.row_ptr[row + 1];
            *y = self.col_idx[range.clone()]
                .iter()
                .zip(&self.values[range])
                .map(|(&col, value)| value * x[col])
                .sum();
        }
    }

    fn diagonal(&self) -> Option<Vec<f64>> {
        Some((0..self.n).map(|i| self.get(i, i)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn tridiagonal() -> CsrMatrix {
        CsrMatrix::from_triplets(
            3,
            &[
                (0, 0, 4.0),
                (0, 1, -1.0),
                (1, 0, -1.0),
                (1, 1, 4.0),
                (1, 2, -1.0),
                (2, 1, -1.0),
                (2, 2, 4.0),
            ],
        )
        .expect("valid entries")
    }

    #[test]
    fn multiplies_vector() {
        let mut y = [0.0; 3];
        tridiagonal().apply(&[1.0, 2.0, 3.0], &mut y);

        assert_relative_eq!(y[0], 2.0);
        assert_relative_eq!(y[1], 4.0);
        assert_relative_eq!(y[2], 10.0);
    }

    #[test]
    fn sums_duplicate_entries() {
        let matrix = CsrMatrix::from_triplets(2, &[(0, 0, 1.0), (0, 0, 2.5), (1, 0, -1.0)])
            .expect("valid entries");

        assert_eq!(matrix.nnz(), 2);
        assert_relative_eq!(matrix.get(0, 0), 3.5);
        assert_relative_eq!(matrix.get(1, 0), -1.0);
        assert_relative_eq!(matrix.get(1, 1), 0.0);
    }

    #[test]
    fn exposes_diagonal() {
        assert_eq!(tridiagonal().diagonal(), Some(vec![4.0, 4.0, 4.0]));
        assert_eq!(CsrMatrix::identity(2).diagonal(), Some(vec![1.0, 1.0]));
    }

    #[test]
    fn rejects_out_of_bounds_entries() {
        let result = CsrMatrix::from_triplets(2, &[(0, 2, 1.0)]);
        assert_eq!(
            result,
            Err(CsrError::OutOfBounds {
                row: 0,
                col: 2,
                n: 2
            })
        );
    }
}
