//! FerrousNLOD - structural comparison of origin-destination matrices.
//!
//! Computes the Normalized Levenshtein distance for OD matrices (NLOD): each
//! origin row of both matrices is ranked by demand, the two ranked rows are
//! aligned with a demand-weighted edit distance, the alignment cost is
//! normalised by the row pair's combined demand, and the mean over all
//! origins is returned.
//!
//! Behara K, Bhaskar A, Chung E, "A novel approach for the structural
//! comparison of origin-destination matrices: Levenshtein distance",
//! Transportation Research Part C (2020), doi:10.1016/j.trc.2020.01.005
//!
//! ```
//! use ferrous_nlod::nlod_flat;
//!
//! let x = [3.0, 4.0, 6.0, 10.0, 7.0, 4.0, 5.0, 11.0, 12.0, 8.0, 5.0, 6.0, 13.0, 7.0, 9.0, 6.0];
//! let y = [10.0, 9.0, 12.0, 16.0, 17.0, 10.0, 13.0, 11.0, 11.0, 14.0, 12.0, 18.0, 12.0, 13.0, 19.0, 15.0];
//! let score = nlod_flat(&x, &y).unwrap();
//! assert!((score - 0.59389).abs() < 1e-5);
//! assert_eq!(nlod_flat(&x, &x).unwrap(), 0.0);
//! ```

pub mod core;
pub mod defaults;
pub mod error;
pub mod matrix;
pub mod nlod_opt;

pub use crate::core::alignment::{align_rows, local_distance, AlignmentTable, EditOp, RowAlignment};
pub use crate::core::nlod::{
    local_nlod, nlod, nlod_flat, nlod_grid, nlod_report, nlod_with, score_row, NlodReport, RowScore,
};
pub use crate::core::ranking::{rank_row, RankedEntry, RankedRow};
pub use error::{NlodError, Result};
pub use matrix::OdMatrix;
pub use nlod_opt::{NlodOpt, ZeroDemandPolicy};
