//! OD matrix storage, shape validation and row decomposition.
//!
//! Matrices arrive either as a flat row-major sequence of N² demands or as
//! an N×N grid. Both are normalised to a flat row-major `Vec<f64>` so that
//! origin row `n` is the contiguous slice `[n*N, (n+1)*N)`.

use crate::error::{NlodError, Result};

/// Square origin-destination demand matrix, stored flat and row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct OdMatrix {
    data: Vec<f64>,
    side: usize,
}

impl OdMatrix {
    /// Build from a flat row-major sequence of length N².
    pub fn from_flat(data: Vec<f64>) -> Result<Self> {
        let side = integer_sqrt(data.len()).ok_or(NlodError::NotPerfectSquare(data.len()))?;
        check_finite(&data)?;
        Ok(OdMatrix { data, side })
    }

    /// Build from an N×N grid of rows (origins) by columns (destinations).
    pub fn from_grid<R: AsRef<[f64]>>(grid: &[R]) -> Result<Self> {
        let rows = grid.len();
        let cols = grid.first().map_or(0, |r| r.as_ref().len());

        let mut data = Vec::with_capacity(rows * cols);
        for (row, r) in grid.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != cols {
                return Err(NlodError::RaggedGrid {
                    row,
                    len: r.len(),
                    expected: cols,
                });
            }
            data.extend_from_slice(r);
        }

        if rows != cols {
            return Err(NlodError::NonSquareShape { rows, cols });
        }
        check_finite(&data)?;
        Ok(OdMatrix { data, side: rows })
    }

    /// Build from an n-dimensional shape plus flat row-major data.
    ///
    /// Only 1-D (`[N²]`) and 2-D (`[N, N]`) shapes are accepted.
    pub fn from_shape_vec(shape: &[usize], data: Vec<f64>) -> Result<Self> {
        if shape.len() != 1 && shape.len() != 2 {
            return Err(NlodError::UnsupportedDimensionality(shape.len()));
        }
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(NlodError::ShapeDataMismatch {
                shape: shape.to_vec(),
                expected,
                actual: data.len(),
            });
        }
        if let &[rows, cols] = shape {
            if rows != cols {
                return Err(NlodError::NonSquareShape { rows, cols });
            }
        }
        Self::from_flat(data)
    }

    /// Side length N (number of origins = number of destinations).
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Total element count N².
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Demand from origin `n` to every destination.
    ///
    /// # Panics
    /// Panics if `n >= self.side()`.
    #[inline]
    pub fn row(&self, n: usize) -> &[f64] {
        row_slice(&self.data, self.side, n)
    }

    /// All origin rows, in origin order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        // chunks(0) panics; an empty matrix simply yields no rows
        self.data.chunks(self.side.max(1))
    }

    /// Sum of every demand in the matrix.
    pub fn total_demand(&self) -> f64 {
        self.data.iter().sum()
    }
}

/// Contiguous row `n` of a flattened `side`×`side` matrix.
#[inline]
pub fn row_slice(flat: &[f64], side: usize, n: usize) -> &[f64] {
    &flat[side * n..side * (n + 1)]
}

/// Confirm two matrices are congruent and non-empty; returns the side length.
pub fn validate_pair(a: &OdMatrix, b: &OdMatrix) -> Result<usize> {
    if a.len() != b.len() {
        return Err(NlodError::SizeMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    if a.side() == 0 {
        return Err(NlodError::EmptyMatrix);
    }
    Ok(a.side())
}

/// Validate two flat sequences and wrap them as matrices.
///
/// Checks run in the order: equal element count, perfect square,
/// non-empty, finite demands.
pub fn pair_from_flat(a: &[f64], b: &[f64]) -> Result<(OdMatrix, OdMatrix)> {
    if a.len() != b.len() {
        return Err(NlodError::SizeMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    let ma = OdMatrix::from_flat(a.to_vec())?;
    let mb = OdMatrix::from_flat(b.to_vec())?;
    validate_pair(&ma, &mb)?;
    Ok((ma, mb))
}

/// Exact integer square root, or `None` if `n` is not a perfect square.
pub fn integer_sqrt(n: usize) -> Option<usize> {
    let mut root = (n as f64).sqrt() as usize;
    // correct float rounding at the edges of the f64 mantissa
    while root.checked_mul(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).is_some_and(|sq| sq <= n) {
        root += 1;
    }
    (root * root == n).then_some(root)
}

/// First non-finite demand in `data`, as a `NonFiniteDemand` error.
pub(crate) fn check_finite(data: &[f64]) -> Result<()> {
    match data.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(NlodError::NonFiniteDemand {
            index,
            value: data[index],
        }),
        None => Ok(()),
    }
}
