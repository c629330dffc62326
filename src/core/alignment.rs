//! Weighted edit-distance alignment of two ranked demand rows.
//!
//! The "alphabet" is destination identity and every edit is charged by demand
//! magnitude instead of a unit cost:
//!
//! ```text
//!   L[0,0] = 0
//!   L[0,j] = L[0,j-1] + AX(j)          delete X's j-th entry
//!   L[i,0] = L[i-1,0] + AY(i)          insert Y's i-th entry
//!   L[i,j] = min(L[i-1,j] + AY(i),
//!                L[i,j-1] + AX(j),
//!                L[i-1,j-1] + C(i,j))
//!
//!   C(i,j) = |AX(j) - AY(i)|   if DX(j) == DY(i)
//!          =  AX(j) + AY(i)    otherwise
//! ```
//!
//! Rows of the table follow Y's rank, columns follow X's rank. Swapping X and
//! Y transposes the table, so `local_distance(x, y) == local_distance(y, x)`.

use crate::core::ranking::RankedRow;

pub const TB_DIAG: u8 = 0; // Match or substitution
pub const TB_DEL: u8 = 1; // Consume an X entry alone (move left)
pub const TB_INS: u8 = 2; // Consume a Y entry alone (move up)

/// Dense `(M+1)×(M+1)` accumulated-cost table, row-major.
#[derive(Debug, Clone)]
pub struct AlignmentTable {
    cells: Vec<f64>,
    cols: usize,
}

impl AlignmentTable {
    fn new(rows: usize, cols: usize) -> Self {
        AlignmentTable {
            cells: vec![0.0; rows * cols],
            cols,
        }
    }

    #[inline(always)]
    fn idx(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }

    /// Accumulated cost after `i` Y entries and `j` X entries.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[self.idx(i, j)]
    }

    #[inline(always)]
    fn set(&mut self, i: usize, j: usize, v: f64) {
        let k = self.idx(i, j);
        self.cells[k] = v;
    }

    /// Number of table rows (Y length + 1).
    pub fn rows(&self) -> usize {
        self.cells.len() / self.cols
    }

    /// Number of table columns (X length + 1).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The bottom-right cell: the local distance.
    pub fn distance(&self) -> f64 {
        self.get(self.rows() - 1, self.cols - 1)
    }
}

/// A single step of a traced alignment. Ranks index into the ranked rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditOp {
    /// Same destination at both ranks; charged the demand difference.
    Match { x: usize, y: usize, cost: f64 },
    /// Different destinations aligned diagonally; charged both demands.
    Substitute { x: usize, y: usize, cost: f64 },
    /// X entry with no partner.
    Delete { x: usize, cost: f64 },
    /// Y entry with no partner.
    Insert { y: usize, cost: f64 },
}

impl EditOp {
    #[inline]
    pub fn cost(&self) -> f64 {
        match *self {
            EditOp::Match { cost, .. }
            | EditOp::Substitute { cost, .. }
            | EditOp::Delete { cost, .. }
            | EditOp::Insert { cost, .. } => cost,
        }
    }
}

/// Full result of aligning two ranked rows.
#[derive(Debug, Clone)]
pub struct RowAlignment {
    pub distance: f64,
    pub table: AlignmentTable,
    /// Edit operations from the first ranks to the last.
    pub ops: Vec<EditOp>,
}

/// Cost of aligning X's entry at `xr` with Y's entry at `yr` diagonally.
#[inline(always)]
fn diagonal_cost(x: &RankedRow, xr: usize, y: &RankedRow, yr: usize) -> (f64, bool) {
    let (ex, ey) = (x[xr], y[yr]);
    if ex.destination == ey.destination {
        ((ex.demand - ey.demand).abs(), true)
    } else {
        (ex.demand + ey.demand, false)
    }
}

fn fill(x: &RankedRow, y: &RankedRow, mut tb: Option<&mut Vec<u8>>) -> AlignmentTable {
    let (m_x, m_y) = (x.len(), y.len());
    let mut table = AlignmentTable::new(m_y + 1, m_x + 1);

    if let Some(tb) = tb.as_mut() {
        tb.clear();
        tb.resize((m_y + 1) * (m_x + 1), TB_DIAG);
        for j in 1..=m_x {
            tb[j] = TB_DEL;
        }
        for i in 1..=m_y {
            tb[i * (m_x + 1)] = TB_INS;
        }
    }

    // Borders: cumulative demand of each ranked row
    for j in 1..=m_x {
        let v = table.get(0, j - 1) + x[j - 1].demand;
        table.set(0, j, v);
    }
    for i in 1..=m_y {
        let v = table.get(i - 1, 0) + y[i - 1].demand;
        table.set(i, 0, v);
    }

    for i in 1..=m_y {
        let ay = y[i - 1].demand;
        for j in 1..=m_x {
            let ax = x[j - 1].demand;
            let (c, _) = diagonal_cost(x, j - 1, y, i - 1);

            let up = table.get(i - 1, j) + ay;
            let left = table.get(i, j - 1) + ax;
            let diag = table.get(i - 1, j - 1) + c;

            let (best, code) = if diag <= left && diag <= up {
                (diag, TB_DIAG)
            } else if left <= up {
                (left, TB_DEL)
            } else {
                (up, TB_INS)
            };

            table.set(i, j, best);
            if let Some(tb) = tb.as_mut() {
                tb[i * (m_x + 1) + j] = code;
            }
        }
    }

    table
}

/// Minimum total cost to turn ranked row `x` into ranked row `y`.
///
/// Equal-length rows of length 0 give a 1×1 table and a distance of 0.
pub fn local_distance(x: &RankedRow, y: &RankedRow) -> f64 {
    debug_assert_eq!(x.len(), y.len(), "ranked rows must have equal length");
    fill(x, y, None).distance()
}

/// Align two ranked rows and recover the edit operations from the table.
///
/// On equal-cost choices the traceback prefers the diagonal, then a delete,
/// then an insert.
pub fn align_rows(x: &RankedRow, y: &RankedRow) -> RowAlignment {
    debug_assert_eq!(x.len(), y.len(), "ranked rows must have equal length");

    let mut tb = Vec::new();
    let table = fill(x, y, Some(&mut tb));
    let cols = table.cols();

    let mut ops = Vec::with_capacity(x.len() + y.len());
    let (mut i, mut j) = (y.len(), x.len());
    while i > 0 || j > 0 {
        match tb[i * cols + j] {
            TB_DIAG => {
                let (cost, same) = diagonal_cost(x, j - 1, y, i - 1);
                ops.push(if same {
                    EditOp::Match { x: j - 1, y: i - 1, cost }
                } else {
                    EditOp::Substitute { x: j - 1, y: i - 1, cost }
                });
                i -= 1;
                j -= 1;
            }
            TB_DEL => {
                ops.push(EditOp::Delete {
                    x: j - 1,
                    cost: x[j - 1].demand,
                });
                j -= 1;
            }
            _ => {
                ops.push(EditOp::Insert {
                    y: i - 1,
                    cost: y[i - 1].demand,
                });
                i -= 1;
            }
        }
    }
    ops.reverse();

    RowAlignment {
        distance: table.distance(),
        table,
        ops,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ranking::rank_row;

    fn dist(a: &[f64], b: &[f64]) -> f64 {
        local_distance(&rank_row(a), &rank_row(b))
    }

    #[test]
    fn test_single_entry_base_case() {
        // Same destination: only the demand difference is charged
        assert_eq!(dist(&[3.0], &[5.0]), 2.0);
        assert_eq!(dist(&[5.0], &[5.0]), 0.0);
    }

    #[test]
    fn test_empty_rows() {
        let aln = align_rows(&rank_row(&[]), &rank_row(&[]));
        assert_eq!(aln.distance, 0.0);
        assert_eq!((aln.table.rows(), aln.table.cols()), (1, 1));
        assert!(aln.ops.is_empty());
    }

    #[test]
    fn test_borders_are_cumulative_demand() {
        let x = rank_row(&[1.0, 4.0, 2.0]); // ranked demands 4, 2, 1
        let y = rank_row(&[3.0, 3.0, 0.0]); // ranked demands 3, 3, 0
        let aln = align_rows(&x, &y);
        let t = &aln.table;
        assert_eq!((t.get(0, 1), t.get(0, 2), t.get(0, 3)), (4.0, 6.0, 7.0));
        assert_eq!((t.get(1, 0), t.get(2, 0), t.get(3, 0)), (3.0, 6.0, 6.0));
    }

    #[test]
    fn test_selftest_rows() {
        // Origin rows of the 4x4 self-test matrices
        assert_eq!(dist(&[3.0, 4.0, 6.0, 10.0], &[10.0, 9.0, 12.0, 16.0]), 30.0);
        assert_eq!(dist(&[7.0, 4.0, 5.0, 11.0], &[17.0, 10.0, 13.0, 11.0]), 46.0);
        assert_eq!(dist(&[12.0, 8.0, 5.0, 6.0], &[11.0, 14.0, 12.0, 18.0]), 60.0);
        assert_eq!(dist(&[13.0, 7.0, 9.0, 6.0], &[12.0, 13.0, 19.0, 15.0]), 62.0);
    }

    #[test]
    fn test_swapped_rows_give_same_distance() {
        let a = [13.0, 7.0, 9.0, 6.0];
        let b = [12.0, 13.0, 19.0, 15.0];
        assert_eq!(dist(&a, &b), dist(&b, &a));

        let x = rank_row(&a);
        let y = rank_row(&b);
        let xy = align_rows(&x, &y).table;
        let yx = align_rows(&y, &x).table;
        for i in 0..xy.rows() {
            for j in 0..xy.cols() {
                assert_eq!(xy.get(i, j), yx.get(j, i));
            }
        }
    }

    #[test]
    fn test_traceback_costs_sum_to_distance() {
        let x = rank_row(&[1.0, 3.0, 3.0]);
        let y = rank_row(&[3.0, 3.0, 1.0]);
        let aln = align_rows(&x, &y);
        assert_eq!(aln.distance, 6.0);

        let total: f64 = aln.ops.iter().map(EditOp::cost).sum();
        assert_eq!(total, aln.distance);

        // Every entry of both rows is consumed exactly once
        let consumed_x = aln
            .ops
            .iter()
            .filter(|op| !matches!(op, EditOp::Insert { .. }))
            .count();
        let consumed_y = aln
            .ops
            .iter()
            .filter(|op| !matches!(op, EditOp::Delete { .. }))
            .count();
        assert_eq!((consumed_x, consumed_y), (3, 3));
    }

    #[test]
    fn test_identical_rows_trace_all_matches() {
        let x = rank_row(&[2.0, 9.0, 4.0]);
        let aln = align_rows(&x, &x);
        assert_eq!(aln.distance, 0.0);
        assert_eq!(
            aln.ops,
            vec![
                EditOp::Match { x: 0, y: 0, cost: 0.0 },
                EditOp::Match { x: 1, y: 1, cost: 0.0 },
                EditOp::Match { x: 2, y: 2, cost: 0.0 },
            ]
        );
    }

    #[test]
    fn test_rank_shift_is_cheaper_than_full_rewrite() {
        // Destination 1 dominates X, destination 0 dominates Y. The
        // alignment can slide one rank instead of paying both rows in full.
        let x = rank_row(&[1.0, 2.0]); // (1,2) (0,1)
        let y = rank_row(&[2.0, 1.0]); // (0,2) (1,1)
        let aln = align_rows(&x, &y);
        assert_eq!(aln.distance, 4.0);
        assert!(aln.distance < x.total_demand() + y.total_demand());
    }
}
