//! Progress bounds for binary-insertion ranking.
//!
//! Pure functions of list sizes. Used for user-facing feedback only, never for
//! control flow.

/// `floor(log2(n))` for `n >= 1`.
fn floor_log2(n: usize) -> usize {
    debug_assert!(n >= 1);
    (usize::BITS - 1 - n.leading_zeros()) as usize
}

/// `ceil(log2(n))` for `n >= 1`.
fn ceil_log2(n: usize) -> usize {
    debug_assert!(n >= 1);
    if n <= 1 {
        0
    } else {
        floor_log2(n - 1) + 1
    }
}

/// Worst-case comparisons to rank `source_len` items by binary insertion.
///
/// `sum(floor(log2(i)) + 1)` for `i` in `1..source_len`. The first item is free.
pub fn theoretical_total_comparisons(source_len: usize) -> usize {
    (1..source_len).map(|i| floor_log2(i) + 1).sum()
}

/// Worst-case comparisons that can be spent on the insertion that produced a
/// list of `list_len` items: `ceil(log2(list_len))`.
///
/// Returns 0 for an empty or singleton list.
pub fn theoretical_item_comparisons(list_len: usize) -> usize {
    if list_len == 0 {
        return 0;
    }
    ceil_log2(list_len)
}

/// Snapshot of progress counters for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progress {
    /// Comparisons answered so far, plus boosts for early insertions.
    pub progress: usize,
    /// `theoretical_total_comparisons(source_len)`.
    pub max_progress: usize,
    /// Comparisons answered for the item currently being placed.
    pub item_progress: usize,
    /// Worst case for placing the current item.
    pub max_item_progress: usize,
}

impl Progress {
    /// Overall completion in `[0.0, 1.0]`. A ranking with nothing to compare is done.
    pub fn fraction(&self) -> f64 {
        if self.max_progress == 0 {
            return 1.0;
        }
        (self.progress as f64 / self.max_progress as f64).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= self.max_progress
    }
}
