use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A row-major matrix of numeric features.
///
/// One row per time-indexed observation, one column per feature. Rows are
/// immutable once the matrix is built; ragged input is rejected at
/// construction so every downstream consumer can assume a rectangle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureMatrix {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl FeatureMatrix {
    /// Build a matrix from per-row slices.
    ///
    /// The column count is taken from the first row. Returns
    /// [`Error::RaggedMatrix`] if any later row disagrees.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);

        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::RaggedMatrix {
                    row: i,
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Build a matrix from a flat row-major buffer.
    pub fn from_flat(data: Vec<f32>, cols: usize) -> Result<Self> {
        if cols == 0 || data.len() % cols != 0 {
            return Err(Error::RaggedMatrix {
                row: data.len() / cols.max(1),
                expected: cols,
                actual: data.len() % cols.max(1),
            });
        }
        let rows = data.len() / cols;
        Ok(Self { data, rows, cols })
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True when the matrix has no rows or no columns.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Get one row as a slice.
    ///
    /// # Panics
    /// Panics if `i >= self.rows()`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f32] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterate over rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    /// Raw row-major buffer.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}
