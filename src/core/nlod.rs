//! Row-wise normalisation and aggregation into the final NLOD score.
//!
//! Each origin row pair is ranked, aligned and divided by its combined demand
//! mass; the NLOD is the mean of those local scores. Rows are independent, so
//! they can be spread over the rayon pool. Per-row results are always
//! gathered in origin order and summed sequentially, which keeps serial and
//! parallel runs bit-identical.

use rayon::prelude::*;

use crate::core::alignment::local_distance;
use crate::core::ranking::rank_row;
use crate::error::{NlodError, Result};
use crate::matrix::{check_finite, pair_from_flat, validate_pair, OdMatrix};
use crate::nlod_opt::{NlodOpt, ZeroDemandPolicy};

/// Score of one origin row pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowScore {
    pub row: usize,
    pub local_distance: f64,
    /// Sum of every demand in both rows (the normalisation denominator)
    pub demand_mass: f64,
    pub local_nlod: f64,
}

/// NLOD together with the per-row scores it was averaged from.
#[derive(Debug, Clone, PartialEq)]
pub struct NlodReport {
    pub nlod: f64,
    pub rows: Vec<RowScore>,
}

impl NlodReport {
    /// Origin row with the largest local NLOD (first one on ties).
    pub fn worst_row(&self) -> Option<&RowScore> {
        self.rows.iter().fold(None, |best: Option<&RowScore>, r| match best {
            Some(b) if b.local_nlod >= r.local_nlod => Some(b),
            _ => Some(r),
        })
    }
}

/// Rank, align and normalise one origin row pair.
pub fn score_row(
    row: usize,
    row_x: &[f64],
    row_y: &[f64],
    policy: ZeroDemandPolicy,
) -> Result<RowScore> {
    let x = rank_row(row_x);
    let y = rank_row(row_y);

    let local_distance = local_distance(&x, &y);
    let demand_mass = x.total_demand() + y.total_demand();

    let local_nlod = if demand_mass == 0.0 {
        match policy {
            ZeroDemandPolicy::Error => return Err(NlodError::DegenerateRow { row }),
            ZeroDemandPolicy::Zero => 0.0,
        }
    } else {
        local_distance / demand_mass
    };

    log::trace!(
        "row {}: distance={} mass={} local_nlod={}",
        row,
        local_distance,
        demand_mass,
        local_nlod
    );

    Ok(RowScore {
        row,
        local_distance,
        demand_mass,
        local_nlod,
    })
}

/// Local NLOD of a single pair of equal-length rows.
///
/// A zero-demand pair under `ZeroDemandPolicy::Error` reports row 0. A
/// non-finite demand is reported by its index into `row_x` followed by `row_y`.
pub fn local_nlod(row_x: &[f64], row_y: &[f64], policy: ZeroDemandPolicy) -> Result<f64> {
    if row_x.len() != row_y.len() {
        return Err(NlodError::SizeMismatch {
            left: row_x.len(),
            right: row_y.len(),
        });
    }
    check_finite(row_x)?;
    check_finite(row_y).map_err(|e| match e {
        NlodError::NonFiniteDemand { index, value } => NlodError::NonFiniteDemand {
            index: row_x.len() + index,
            value,
        },
        other => other,
    })?;
    score_row(0, row_x, row_y, policy).map(|s| s.local_nlod)
}

/// NLOD of two matrices, with every per-row score.
pub fn nlod_report(a: &OdMatrix, b: &OdMatrix, opt: &NlodOpt) -> Result<NlodReport> {
    opt.validate()
        .map_err(|errors| NlodError::InvalidOption(errors.join("; ")))?;
    let side = validate_pair(a, b)?;
    let policy = opt.zero_demand;

    let scored: Vec<Result<RowScore>> = if opt.use_parallel(side) {
        (0..side)
            .into_par_iter()
            .map(|n| score_row(n, a.row(n), b.row(n), policy))
            .collect()
    } else {
        (0..side)
            .map(|n| score_row(n, a.row(n), b.row(n), policy))
            .collect()
    };
    // first failure in origin order, regardless of scheduling
    let rows = scored.into_iter().collect::<Result<Vec<_>>>()?;

    let total: f64 = rows.iter().map(|r| r.local_nlod).sum();
    let nlod = total / side as f64;

    log::debug!(
        "NLOD over {} origin rows ({}): {}",
        side,
        if opt.use_parallel(side) { "parallel" } else { "serial" },
        nlod
    );

    Ok(NlodReport { nlod, rows })
}

/// NLOD of two matrices with explicit options.
pub fn nlod_with(a: &OdMatrix, b: &OdMatrix, opt: &NlodOpt) -> Result<f64> {
    nlod_report(a, b, opt).map(|r| r.nlod)
}

/// NLOD of two matrices with default options.
pub fn nlod(a: &OdMatrix, b: &OdMatrix) -> Result<f64> {
    nlod_with(a, b, &NlodOpt::default())
}

/// NLOD of two flat row-major sequences of N² demands.
pub fn nlod_flat(a: &[f64], b: &[f64]) -> Result<f64> {
    let (a, b) = pair_from_flat(a, b)?;
    nlod(&a, &b)
}

/// NLOD of two N×N grids.
pub fn nlod_grid<R: AsRef<[f64]>>(a: &[R], b: &[R]) -> Result<f64> {
    let a = OdMatrix::from_grid(a)?;
    let b = OdMatrix::from_grid(b)?;
    nlod(&a, &b)
}
