//! Error types for NLOD computation.
//!
//! Shape errors are always fatal to a call: the caller has to supply
//! corrected input. There is no internal recovery or retry.

use thiserror::Error;

/// Result type alias for NLOD operations.
pub type Result<T> = std::result::Result<T, NlodError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NlodError {
    /// Input shape has a dimensionality other than 1 or 2
    #[error("invalid matrix dimension: expected 1 or 2 axes, got {0}")]
    UnsupportedDimensionality(usize),

    /// Declared shape does not cover the supplied data
    #[error("shape {shape:?} describes {expected} elements but {actual} were supplied")]
    ShapeDataMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    /// A 2-D grid whose rows have different lengths
    #[error("ragged grid: row {row} has {len} columns, expected {expected}")]
    RaggedGrid { row: usize, len: usize, expected: usize },

    /// A 2-D grid that is not N×N
    #[error("matrices must be square: got {rows}x{cols}")]
    NonSquareShape { rows: usize, cols: usize },

    #[error("matrices must have the same size: {left} vs {right} elements")]
    SizeMismatch { left: usize, right: usize },

    #[error("matrices must be square: {0} elements is not a perfect square")]
    NotPerfectSquare(usize),

    #[error("matrices are empty")]
    EmptyMatrix,

    #[error("demand at flat index {index} is not finite ({value})")]
    NonFiniteDemand { index: usize, value: f64 },

    /// Both rows of an origin carry zero total demand
    #[error("origin row {row} has zero combined demand; local NLOD is undefined")]
    DegenerateRow { row: usize },

    #[error("invalid option: {0}")]
    InvalidOption(String),
}

impl NlodError {
    /// Returns true for the shape-validation family of errors.
    #[inline]
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            NlodError::UnsupportedDimensionality(_)
                | NlodError::ShapeDataMismatch { .. }
                | NlodError::RaggedGrid { .. }
                | NlodError::NonSquareShape { .. }
                | NlodError::SizeMismatch { .. }
                | NlodError::NotPerfectSquare(_)
                | NlodError::EmptyMatrix
        )
    }
}
