//! Demand ranking for a single origin row.
//!
//! Larger flows should meet larger flows first, so each row is reordered by
//! demand, largest first. Destination identity travels with each demand; the
//! aligner compares identities, not positions.

/// One (destination, demand) pair of a ranked row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedEntry {
    pub destination: usize,
    pub demand: f64,
}

/// A row's entries ordered by descending demand.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedRow(Vec<RankedEntry>);

impl RankedRow {
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[RankedEntry] {
        &self.0
    }

    /// Sum of all demands, accumulated in ranked order.
    pub fn total_demand(&self) -> f64 {
        self.0.iter().map(|e| e.demand).sum()
    }

    /// Destination ids in rank order.
    pub fn destinations(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().map(|e| e.destination)
    }
}

impl std::ops::Index<usize> for RankedRow {
    type Output = RankedEntry;

    #[inline]
    fn index(&self, rank: usize) -> &RankedEntry {
        &self.0[rank]
    }
}

/// Rank a row of demands, largest first.
///
/// `slice::sort_by` is stable, so equal demands keep ascending destination
/// order. `0.0` and `-0.0` compare equal. Inputs are finite once they are
/// inside an `OdMatrix`; any NaN that reaches here is ranked last, so the
/// comparator stays a total order.
pub fn rank_row(row: &[f64]) -> RankedRow {
    let mut entries: Vec<RankedEntry> = row
        .iter()
        .enumerate()
        .map(|(destination, &demand)| RankedEntry {
            destination,
            demand,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.demand
            .partial_cmp(&a.demand)
            .unwrap_or_else(|| a.demand.is_nan().cmp(&b.demand.is_nan()))
    });
    RankedRow(entries)
}
