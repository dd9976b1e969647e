//! Top-k selection over one row of a similarity matrix
//!
//! [`select_top_k`] is a partial selection with a bounded min-heap: O(n log k),
//! no ordering among the returned indices. [`rank_excluding`] is what the
//! refresh cycle uses: it drops the note's own column, selects, and sorts the
//! selection by descending score so the first entries are the most similar.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Heap entry ordered by score, lower index winning ties.
#[derive(Debug, Clone, Copy)]
struct Scored {
    index: usize,
    score: f32,
}

impl Scored {
    fn key(&self) -> f32 {
        // NaN never outranks a real score
        if self.score.is_nan() {
            f32::NEG_INFINITY
        } else {
            self.score
        }
    }
}

impl Ord for Scored {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key()
            .total_cmp(&other.key())
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Scored {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Scored {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scored {}

/// Indices of the `k` highest scores in `row`, in no particular order.
///
/// - `k == 0` returns nothing
/// - `k >= row.len()` returns every index
/// - otherwise no excluded score is strictly greater than an included one;
///   among equal scores the lower index is kept
pub fn select_top_k(row: &[f32], k: usize) -> Vec<usize> {
    if k == 0 {
        return Vec::new();
    }
    if k >= row.len() {
        return (0..row.len()).collect();
    }

    let mut heap: BinaryHeap<Reverse<Scored>> = BinaryHeap::with_capacity(k + 1);
    for (index, &score) in row.iter().enumerate() {
        let entry = Scored { index, score };
        if heap.len() < k {
            heap.push(Reverse(entry));
        } else if heap.peek().is_some_and(|Reverse(min)| entry > *min) {
            heap.pop();
            heap.push(Reverse(entry));
        }
    }

    heap.into_iter().map(|Reverse(entry)| entry.index).collect()
}

/// Up to `k` indices of `row` other than `self_index`, most similar first.
///
/// Returned indices refer to positions in the full row. Ties keep roster
/// order. `self_index` outside the row excludes nothing.
pub fn rank_excluding(row: &[f32], self_index: usize, k: usize) -> Vec<usize> {
    let candidates: Vec<usize> = (0..row.len()).filter(|&i| i != self_index).collect();
    let scores: Vec<f32> = candidates.iter().map(|&i| row[i]).collect();

    let mut selected: Vec<Scored> = select_top_k(&scores, k)
        .into_iter()
        .map(|pos| Scored {
            index: candidates[pos],
            score: scores[pos],
        })
        .collect();
    selected.sort_by(|a, b| b.cmp(a));
    selected.into_iter().map(|entry| entry.index).collect()
}
