//! Needleman-Wunsch / Wagner-Fischer edit distance with traceback.
//!
//! Rows of the matrix follow `b`, columns follow `a`: cell `(i, j)` is the
//! cost of turning the first `j` tokens of `a` into the first `i` tokens of
//! `b`. Moving down is an insertion, moving right a deletion.
use std::cmp::min;
use std::ops::{Index, IndexMut};

use serde::Serialize;
use tracing::{debug, warn};

use crate::cost_model::{Cost, CostModel};
use crate::edit_script::{EditOp, EditScript};
use crate::tokenize::{equal, Token};

/// Matrices with more cells than this trigger a warning: memory is quadratic.
pub const LARGE_MATRIX_CELLS: usize = 1 << 28;

/// The result of aligning two sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alignment<'a> {
    pub distance: Cost,
    pub script: EditScript<'a>,
}

/// A dense `(m+1) x (n+1)` matrix of costs, stored row major.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    width: usize,
    cells: Vec<Cost>,
}

impl DistanceMatrix {
    fn new(rows: usize, cols: usize) -> Self {
        DistanceMatrix {
            width: cols,
            cells: vec![0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len() / self.width
    }

    pub fn cols(&self) -> usize {
        self.width
    }

    pub fn row(&self, i: usize) -> &[Cost] {
        &self.cells[i * self.width..(i + 1) * self.width]
    }
}

impl Index<(usize, usize)> for DistanceMatrix {
    type Output = Cost;

    fn index(&self, (i, j): (usize, usize)) -> &Cost {
        &self.cells[i * self.width + j]
    }
}

impl IndexMut<(usize, usize)> for DistanceMatrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Cost {
        &mut self.cells[i * self.width + j]
    }
}

/// The three ways to reach a cell, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Diagonal,
    Insertion,
    Deletion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NW {
    pub cm: CostModel,
    pub case_sensitive: bool,
}

impl Default for NW {
    fn default() -> Self {
        NW::new(CostModel::unit(), true)
    }
}

impl NW {
    pub fn new(cm: CostModel, case_sensitive: bool) -> Self {
        NW { cm, case_sensitive }
    }

    fn sub_cost(&self, ca: Token, cb: Token) -> Cost {
        if equal(ca, cb, self.case_sensitive) {
            0
        } else {
            self.cm.sub
        }
    }

    /// Fill row `i` (for token `cb` of `b`) from row `i-1`.
    fn next_row(&self, i: usize, cb: Token, a: &[Token], prev: &[Cost], next: &mut [Cost]) {
        next[0] = (i as Cost).saturating_mul(self.cm.ins);
        for (j0, &ca) in a.iter().enumerate() {
            // Change from 0 to 1 based indexing.
            let j = j0 + 1;
            next[j] = min(
                min(
                    prev[j].saturating_add(self.cm.ins),
                    next[j - 1].saturating_add(self.cm.del),
                ),
                prev[j - 1].saturating_add(self.sub_cost(ca, cb)),
            );
        }
    }

    fn first_row(&self, row: &mut [Cost]) {
        for (j, c) in row.iter_mut().enumerate() {
            *c = (j as Cost).saturating_mul(self.cm.del);
        }
    }

    /// Build the full distance matrix.
    pub fn matrix(&self, a: &[Token], b: &[Token]) -> DistanceMatrix {
        let (n, m) = (a.len(), b.len());
        let cells = (m + 1).saturating_mul(n + 1);
        if cells > LARGE_MATRIX_CELLS {
            warn!(cells, "Large alignment matrix; memory use is quadratic in the input length");
        }
        let mut d = DistanceMatrix::new(m + 1, n + 1);
        self.first_row(&mut d.cells[..n + 1]);
        for (i0, &cb) in b.iter().enumerate() {
            let i = i0 + 1;
            let (done, rest) = d.cells.split_at_mut(i * (n + 1));
            self.next_row(i, cb, a, &done[(i - 1) * (n + 1)..], &mut rest[..n + 1]);
        }
        d
    }

    /// The edit distance only, using two rows of memory.
    pub fn cost(&self, a: &[Token], b: &[Token]) -> Cost {
        let ref mut prev: Vec<Cost> = vec![0; a.len() + 1];
        let ref mut next: Vec<Cost> = vec![0; a.len() + 1];
        self.first_row(next);
        for (i0, &cb) in b.iter().enumerate() {
            std::mem::swap(prev, next);
            self.next_row(i0 + 1, cb, a, prev, next);
        }
        next[a.len()]
    }

    /// The edit distance and an optimal edit script.
    pub fn align<'a>(&self, a: &[Token<'a>], b: &[Token<'a>]) -> Alignment<'a> {
        let d = self.matrix(a, b);
        let distance = d[(b.len(), a.len())];
        let script = self.track_path(&d, a, b);
        debug!(
            n = a.len(),
            m = b.len(),
            distance,
            cigar = %script.cigar(),
            "aligned"
        );
        Alignment { distance, script }
    }

    /// Pick the predecessor of `(x, y)` on an optimal path.
    ///
    /// Only predecessors whose value plus the step cost equals `d[(x, y)]`
    /// qualify. Among those the smallest value wins, ties going to the
    /// diagonal, then insertion, then deletion.
    fn parent(&self, d: &DistanceMatrix, a: &[Token], b: &[Token], x: usize, y: usize) -> Step {
        let cur = d[(x, y)];
        let candidates = [
            (
                Step::Diagonal,
                d[(x - 1, y - 1)],
                self.sub_cost(a[y - 1], b[x - 1]),
            ),
            (Step::Insertion, d[(x - 1, y)], self.cm.ins),
            (Step::Deletion, d[(x, y - 1)], self.cm.del),
        ];
        let mut best: Option<(Step, Cost)> = None;
        for (step, value, cost) in candidates {
            if value.saturating_add(cost) != cur {
                continue;
            }
            if best.map_or(true, |(_, v)| value < v) {
                best = Some((step, value));
            }
        }
        // The recurrence guarantees one of the three realizes the cell.
        best.map_or(Step::Diagonal, |(step, _)| step)
    }

    /// Walk back from `(m, n)` to `(0, 0)`, collecting edits.
    fn track_path<'a>(&self, d: &DistanceMatrix, a: &[Token<'a>], b: &[Token<'a>]) -> EditScript<'a> {
        let mut ops = Vec::with_capacity(a.len() + b.len());
        let (mut x, mut y) = (b.len(), a.len());
        while x > 0 && y > 0 {
            match self.parent(d, a, b, x, y) {
                Step::Diagonal => {
                    if equal(a[y - 1], b[x - 1], self.case_sensitive) {
                        ops.push(EditOp::Equal(a[y - 1]));
                    } else {
                        // Reversed below, so the deletion comes first.
                        ops.push(EditOp::Insertion(b[x - 1]));
                        ops.push(EditOp::Deletion(a[y - 1]));
                    }
                    x -= 1;
                    y -= 1;
                }
                Step::Insertion => {
                    ops.push(EditOp::Insertion(b[x - 1]));
                    x -= 1;
                }
                Step::Deletion => {
                    ops.push(EditOp::Deletion(a[y - 1]));
                    y -= 1;
                }
            }
        }
        ops.extend(a[..y].iter().rev().map(|&t| EditOp::Deletion(t)));
        ops.extend(b[..x].iter().rev().map(|&t| EditOp::Insertion(t)));
        ops.reverse();
        ops.into()
    }
}

/// Align `a` and `b` with the given costs.
pub fn align<'a>(
    a: &[Token<'a>],
    b: &[Token<'a>],
    cm: &CostModel,
    case_sensitive: bool,
) -> Alignment<'a> {
    NW::new(*cm, case_sensitive).align(a, b)
}
