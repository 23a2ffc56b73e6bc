//! Dynamic time warping over sequences of feature vectors.
//!
//! Two variants share one windowed dynamic-programming core:
//!
//! - [`dtw_align`]: exact DTW over the full `n x m` grid, `O(n*m)`.
//! - [`fast_dtw_align`]: FastDTW (Salvador & Chan). The sequences are
//!   recursively halved, aligned at the coarse resolution, and the coarse
//!   path is projected back and widened by `radius` to form the search
//!   window at full resolution. Runs in `O((n+m) * radius)`.
//!
//! Recurrence: `D(i, j) = d(x_i, y_j) + min(D(i-1, j), D(i, j-1), D(i-1, j-1))`.
//! Ties between predecessors resolve in that order.
//!
//! Empty inputs never fail: two empty sequences are at distance 0, and an
//! empty sequence is infinitely far from a non-empty one.

use std::ops::Range;

/// Local distance between two aligned feature vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalMetric {
    /// L2 norm of the difference.
    #[default]
    Euclidean,
    /// L1 norm of the difference.
    Manhattan,
}

impl LocalMetric {
    /// Distance between `a` and `b`. Extra trailing components of the longer
    /// vector are ignored.
    #[must_use]
    pub fn distance(self, a: &[f64], b: &[f64]) -> f64 {
        let diffs = a.iter().zip(b.iter()).map(|(x, y)| x - y);
        match self {
            Self::Euclidean => diffs.map(|d| d * d).sum::<f64>().sqrt(),
            Self::Manhattan => diffs.map(f64::abs).sum(),
        }
    }
}

/// Result of aligning two sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// Cumulative cost of the optimal path.
    pub distance: f64,
    /// Matched index pairs from `(0, 0)` to `(n-1, m-1)`.
    /// Empty when either sequence is empty.
    pub path: Vec<(usize, usize)>,
}

impl Alignment {
    fn empty(distance: f64) -> Self {
        Self {
            distance,
            path: Vec::new(),
        }
    }
}

/// Exact DTW distance.
#[must_use]
pub fn dtw_distance(x: &[Vec<f64>], y: &[Vec<f64>], metric: LocalMetric) -> f64 {
    dtw_align(x, y, metric).distance
}

/// FastDTW distance with the given search radius.
#[must_use]
pub fn fast_dtw_distance(
    x: &[Vec<f64>],
    y: &[Vec<f64>],
    radius: usize,
    metric: LocalMetric,
) -> f64 {
    fast_dtw_align(x, y, radius, metric).distance
}

/// Exact DTW alignment over the full grid.
#[must_use]
pub fn dtw_align(x: &[Vec<f64>], y: &[Vec<f64>], metric: LocalMetric) -> Alignment {
    let window: Vec<Range<usize>> = vec![0..y.len(); x.len()];
    windowed_dtw(x, y, &window, metric)
}

/// FastDTW alignment.
#[must_use]
pub fn fast_dtw_align(
    x: &[Vec<f64>],
    y: &[Vec<f64>],
    radius: usize,
    metric: LocalMetric,
) -> Alignment {
    let min_size = radius.saturating_add(2);
    if x.len() < min_size || y.len() < min_size {
        return dtw_align(x, y, metric);
    }

    let x_coarse = reduce_by_half(x);
    let y_coarse = reduce_by_half(y);
    let coarse = fast_dtw_align(&x_coarse, &y_coarse, radius, metric);

    let window = expand_window(&coarse.path, x.len(), y.len(), radius);
    windowed_dtw(x, y, &window, metric)
}

/// Average adjacent pairs. An odd trailing element is dropped.
fn reduce_by_half(seq: &[Vec<f64>]) -> Vec<Vec<f64>> {
    seq.chunks_exact(2)
        .map(|pair| {
            pair[0]
                .iter()
                .zip(pair[1].iter())
                .map(|(a, b)| (a + b) / 2.0)
                .collect()
        })
        .collect()
}

/// Project a coarse path to full resolution, widened by `radius`.
///
/// Returns, for every row `i` of the fine grid, the contiguous column range
/// that may be visited. The widened band is clipped to the coarse grid, so
/// the cost is bounded by the path length times `radius` whatever the radius.
fn expand_window(
    path: &[(usize, usize)],
    len_x: usize,
    len_y: usize,
    radius: usize,
) -> Vec<Range<usize>> {
    let (coarse_x, coarse_y) = (len_x / 2, len_y / 2);
    if coarse_x == 0 || coarse_y == 0 {
        return vec![0..len_y; len_x];
    }

    // Inclusive column span of every coarse row.
    let mut spans: Vec<Option<(usize, usize)>> = vec![None; coarse_x];
    for &(i, j) in path {
        let lo = j.saturating_sub(radius);
        let hi = j.saturating_add(radius).min(coarse_y - 1);
        let rows = i.saturating_sub(radius)..=i.saturating_add(radius).min(coarse_x - 1);
        for span in &mut spans[rows] {
            *span = Some(span.map_or((lo, hi), |(a, b)| (a.min(lo), b.max(hi))));
        }
    }

    // The last coarse cell also covers the odd element dropped by halving.
    let fine_end = |c: usize, len: usize| if 2 * c + 2 == len - 1 { 2 * c + 3 } else { 2 * c + 2 };

    let mut window = vec![0..0; len_x];
    for (c, span) in spans.into_iter().enumerate() {
        if let Some((lo, hi)) = span {
            let columns = 2 * lo..fine_end(hi, len_y);
            for row in &mut window[2 * c..fine_end(c, len_x)] {
                *row = columns.clone();
            }
        }
    }

    window
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// From `(i-1, j)`.
    AdvanceX,
    /// From `(i, j-1)`.
    AdvanceY,
    /// From `(i-1, j-1)`.
    Diagonal,
}

/// Cumulative cost table restricted to one column range per row.
struct CostTable<'w> {
    window: &'w [Range<usize>],
    rows: Vec<Vec<(f64, Step)>>,
}

impl<'w> CostTable<'w> {
    fn new(window: &'w [Range<usize>]) -> Self {
        let rows = window
            .iter()
            .map(|range| vec![(f64::INFINITY, Step::Diagonal); range.len()])
            .collect();
        Self { window, rows }
    }

    /// Cost of cell `(i, j)`, treating `(-1, -1)` as the zero-cost origin
    /// and everything outside the window as unreachable.
    fn cost(&self, i: Option<usize>, j: Option<usize>) -> f64 {
        match (i, j) {
            (None, None) => 0.0,
            (Some(i), Some(j)) => self.get(i, j).map_or(f64::INFINITY, |cell| cell.0),
            _ => f64::INFINITY,
        }
    }

    fn get(&self, i: usize, j: usize) -> Option<(f64, Step)> {
        let range = self.window.get(i)?;
        if range.contains(&j) {
            Some(self.rows[i][j - range.start])
        } else {
            None
        }
    }

    fn set(&mut self, i: usize, j: usize, value: (f64, Step)) {
        let start = self.window[i].start;
        self.rows[i][j - start] = value;
    }
}

fn windowed_dtw(
    x: &[Vec<f64>],
    y: &[Vec<f64>],
    window: &[Range<usize>],
    metric: LocalMetric,
) -> Alignment {
    match (x.is_empty(), y.is_empty()) {
        (true, true) => return Alignment::empty(0.0),
        (true, false) | (false, true) => return Alignment::empty(f64::INFINITY),
        (false, false) => {}
    }

    let mut table = CostTable::new(window);

    for (i, range) in window.iter().enumerate() {
        for j in range.clone() {
            let local = metric.distance(&x[i], &y[j]);
            let prev_i = i.checked_sub(1);
            let prev_j = j.checked_sub(1);

            let candidates = [
                (table.cost(prev_i, Some(j)), Step::AdvanceX),
                (table.cost(Some(i), prev_j), Step::AdvanceY),
                (table.cost(prev_i, prev_j), Step::Diagonal),
            ];

            let mut best = candidates[0];
            for candidate in &candidates[1..] {
                if candidate.0 < best.0 {
                    best = *candidate;
                }
            }

            table.set(i, j, (local + best.0, best.1));
        }
    }

    let (n, m) = (x.len(), y.len());
    let distance = table.cost(Some(n - 1), Some(m - 1));
    if !distance.is_finite() {
        return Alignment::empty(f64::INFINITY);
    }

    Alignment {
        distance,
        path: backtrack(&table, n - 1, m - 1),
    }
}

fn backtrack(table: &CostTable<'_>, mut i: usize, mut j: usize) -> Vec<(usize, usize)> {
    let mut path = vec![(i, j)];
    while let Some((_, step)) = table.get(i, j) {
        match (step, i, j) {
            (_, 0, 0) => break,
            (Step::AdvanceX, i_, _) if i_ > 0 => i -= 1,
            (Step::AdvanceY, _, j_) if j_ > 0 => j -= 1,
            (Step::Diagonal, i_, j_) if i_ > 0 && j_ > 0 => {
                i -= 1;
                j -= 1;
            }
            _ => break,
        }
        path.push((i, j));
    }
    path.reverse();
    path
}
