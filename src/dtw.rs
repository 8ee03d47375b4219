//! Dynamic time warping between two finite sequences.
//!
//! Classic O(m·n) dynamic programming over a dense cost matrix. The comparator
//! only ever aligns small windows, so no pruning or approximation is done.
//!
//! Ties between predecessor cells are broken in a fixed order: the diagonal
//! step first, then the step that advances only in `x`, then the step that
//! advances only in `y`. The same rule is used when filling the matrix and when
//! backtracking, so the recovered path always realises the reported cost.
//!
//! `NaN` costs (from degenerate frames) are ranked after every finite cost when
//! choosing a predecessor, so a single bad frame cannot redirect the path
//! through itself when a finite route exists.

use ndarray::Array2;

/// Result of aligning two sequences
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// Minimal cumulative cost
    pub cost: f64,
    /// Warping path from `(0, 0)` to `(m - 1, n - 1)`, as `(x index, y index)` pairs
    pub path: Vec<(usize, usize)>,
}

impl Alignment {
    /// Smallest `x` index aligned with the given `y` index
    #[must_use]
    pub fn first_x_for(&self, y: usize) -> Option<usize> {
        self.path.iter().filter(|&&(_, j)| j == y).map(|&(i, _)| i).min()
    }
}

/// Predecessor step into a cell, in tie-break priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Diagonal,
    AdvanceX,
    AdvanceY,
}

fn rank(cost: f64) -> f64 {
    if cost.is_nan() {
        f64::INFINITY
    } else {
        cost
    }
}

/// Cheapest predecessor of interior cell `(i, j)`, with `i, j >= 1`
fn best_step(cost: &Array2<f64>, i: usize, j: usize) -> (Step, f64) {
    let candidates = [
        (Step::Diagonal, cost[[i - 1, j - 1]]),
        (Step::AdvanceX, cost[[i - 1, j]]),
        (Step::AdvanceY, cost[[i, j - 1]]),
    ];

    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        // Strict comparison keeps the earlier candidate on ties
        if rank(candidate.1) < rank(best.1) {
            best = *candidate;
        }
    }
    best
}

/// Align `x` against `y` under the distance function `dist`
///
/// # Panics
///
/// Panics if either sequence is empty.
pub fn dtw<T, F>(x: &[T], y: &[T], mut dist: F) -> Alignment
where
    F: FnMut(&T, &T) -> f64,
{
    assert!(
        !x.is_empty() && !y.is_empty(),
        "DTW requires non-empty sequences (got {} and {})",
        x.len(),
        y.len()
    );

    let (m, n) = (x.len(), y.len());
    let mut cost = Array2::from_elem((m, n), f64::INFINITY);

    cost[[0, 0]] = dist(&x[0], &y[0]);
    for j in 1..n {
        cost[[0, j]] = cost[[0, j - 1]] + dist(&x[0], &y[j]);
    }
    for i in 1..m {
        cost[[i, 0]] = cost[[i - 1, 0]] + dist(&x[i], &y[0]);
    }

    for i in 1..m {
        for j in 1..n {
            let (_, previous) = best_step(&cost, i, j);
            cost[[i, j]] = previous + dist(&x[i], &y[j]);
        }
    }

    Alignment {
        cost: cost[[m - 1, n - 1]],
        path: backtrack(&cost),
    }
}

fn backtrack(cost: &Array2<f64>) -> Vec<(usize, usize)> {
    let (m, n) = cost.dim();
    let (mut i, mut j) = (m - 1, n - 1);
    let mut path = Vec::with_capacity(m + n - 1);

    while i > 0 || j > 0 {
        path.push((i, j));
        let step = if i == 0 {
            Step::AdvanceY
        } else if j == 0 {
            Step::AdvanceX
        } else {
            best_step(cost, i, j).0
        };
        match step {
            Step::Diagonal => {
                i -= 1;
                j -= 1;
            }
            Step::AdvanceX => i -= 1,
            Step::AdvanceY => j -= 1,
        }
    }
    path.push((0, 0));
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abs_diff(a: &f64, b: &f64) -> f64 {
        (a - b).abs()
    }

    #[test]
    fn test_identical_sequences_follow_diagonal() {
        let seq = [1.0, 2.0, 3.0];
        let alignment = dtw(&seq, &seq, |_, _| 0.0);
        assert_eq!(alignment.cost, 0.0);
        assert_eq!(alignment.path, vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_known_alignment() {
        let x = [0.0, 1.0, 1.0, 2.0];
        let y = [0.0, 1.0, 2.0];
        let alignment = dtw(&x, &y, abs_diff);
        assert_eq!(alignment.cost, 0.0);
        assert_eq!(alignment.path, vec![(0, 0), (1, 1), (2, 1), (3, 2)]);
        assert_eq!(alignment.first_x_for(1), Some(1));
        assert_eq!(alignment.first_x_for(2), Some(3));
    }

    #[test]
    fn test_single_element_sequences() {
        let alignment = dtw(&[1.0], &[4.0], abs_diff);
        assert_eq!(alignment.cost, 3.0);
        assert_eq!(alignment.path, vec![(0, 0)]);
    }

    #[test]
    fn test_boundary_row_and_column() {
        let row = dtw(&[0.0], &[1.0, 2.0, 3.0], abs_diff);
        assert_eq!(row.cost, 6.0);
        assert_eq!(row.path, vec![(0, 0), (0, 1), (0, 2)]);

        let column = dtw(&[1.0, 2.0, 3.0], &[0.0], abs_diff);
        assert_eq!(column.cost, 6.0);
        assert_eq!(column.path, vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn test_uniform_cost_prefers_diagonal() {
        let alignment = dtw(&[0.0; 3], &[0.0; 2], |_, _| 1.0);
        assert_eq!(alignment.cost, 3.0);
        assert_eq!(alignment.path, vec![(0, 0), (1, 0), (2, 1)]);
    }

    #[test]
    fn test_tie_prefers_x_step_over_y_step() {
        let table = [[0.0, 0.0, 0.0], [0.0, 5.0, 1.0], [0.0, 1.0, 0.0]];
        let alignment = dtw(&[0usize, 1, 2], &[0usize, 1, 2], |&i, &j| table[i][j]);
        assert_eq!(alignment.cost, 1.0);
        assert_eq!(alignment.path, vec![(0, 0), (0, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_nan_cell_is_avoided_when_possible() {
        let table = [[0.0, 0.0, 0.0], [0.0, f64::NAN, 0.0], [0.0, 0.0, 0.0]];
        let alignment = dtw(&[0usize, 1, 2], &[0usize, 1, 2], |&i, &j| table[i][j]);
        assert_eq!(alignment.cost, 0.0);
        assert!(!alignment.path.contains(&(1, 1)));
    }

    #[test]
    fn test_nan_row_keeps_path_well_formed() {
        let x = [0.0, f64::NAN, 1.0];
        let y = [0.0, 1.0];
        let alignment = dtw(&x, &y, abs_diff);
        // Every path visits row 1, so the cost is NaN
        assert!(alignment.cost.is_nan());
        assert_eq!(alignment.path, vec![(0, 0), (1, 0), (2, 1)]);
    }

    #[test]
    #[should_panic(expected = "DTW requires non-empty sequences")]
    fn test_empty_sequence_panics() {
        let empty: [f64; 0] = [];
        let _ = dtw(&empty, &[1.0], abs_diff);
    }
}
