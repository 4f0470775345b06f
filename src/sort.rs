//! Insertion sort, three renditions.
//!
//! Every entry point clones the input up front and sorts the copy; the
//! slice passed in is never mutated.

use tracing::instrument;

/// Insertion sort by adjacent swaps: each element bubbles backwards one
/// position at a time until its predecessor is no larger.
#[instrument(level = "debug", skip(slice))]
pub fn insertion_sort_swap<T: Ord + Clone>(slice: &[T]) -> Vec<T> {
    let mut a = slice.to_vec();
    for x in 1..a.len() {
        let mut y = x;
        while y > 0 && a[y] < a[y - 1] {
            a.swap(y - 1, y);
            y -= 1;
        }
    }
    a
}

/// Insertion sort by shifting: remembers the element to place, slides the
/// larger predecessors up one slot each, then drops the element in. Fewer
/// writes than the swap rendition.
#[instrument(level = "debug", skip(slice))]
pub fn insertion_sort_shift<T: Ord + Clone>(slice: &[T]) -> Vec<T> {
    insertion_sort_by(slice, |lhs, rhs| lhs < rhs)
}

/// Comparator-parameterized insertion sort. `is_ordered_before(a, b)` must
/// answer whether `a` sorts before `b`. Stable: equal elements keep their
/// input order.
#[instrument(level = "debug", skip(slice, is_ordered_before))]
pub fn insertion_sort_by<T: Clone, F>(slice: &[T], is_ordered_before: F) -> Vec<T>
where
    F: Fn(&T, &T) -> bool,
{
    let mut a = slice.to_vec();
    for x in 1..a.len() {
        let mut y = x;
        let temp = a[y].clone();
        while y > 0 && is_ordered_before(&temp, &a[y - 1]) {
            a[y] = a[y - 1].clone();
            y -= 1;
        }
        a[y] = temp;
    }
    a
}
