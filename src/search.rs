//! Binary search over a sorted slice, recursive and iterative renditions.
//!
//! Both renditions implement the same halving logic and must agree on every
//! input. The slice must already be sorted ascending; on unsorted input the
//! result is meaningless.

use std::ops::Range;
use tracing::instrument;

/// Recursive binary search within `range`. Returns the index of `key`, or
/// `None` when `key` is not present in that range.
#[instrument(level = "trace", skip(a, key))]
pub fn recursive_binary_search<T: Ord>(a: &[T], key: &T, range: Range<usize>) -> Option<usize> {
    if range.start >= range.end {
        return None;
    }
    let mid_index = range.start + (range.end - range.start) / 2;
    if a[mid_index] > *key {
        recursive_binary_search(a, key, range.start..mid_index)
    } else if a[mid_index] < *key {
        recursive_binary_search(a, key, mid_index + 1..range.end)
    } else {
        Some(mid_index)
    }
}

/// Loop-based binary search over the whole slice.
#[instrument(level = "trace", skip(a, key))]
pub fn iterative_binary_search<T: Ord>(a: &[T], key: &T) -> Option<usize> {
    let mut lower_bound = 0;
    let mut upper_bound = a.len();
    while lower_bound < upper_bound {
        let mid_index = lower_bound + (upper_bound - lower_bound) / 2;
        if a[mid_index] == *key {
            return Some(mid_index);
        } else if a[mid_index] < *key {
            lower_bound = mid_index + 1;
        } else {
            upper_bound = mid_index;
        }
    }
    None
}
