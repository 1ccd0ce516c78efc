//! In-place heap sort with caller-supplied ordering
//!
//! Used both to keep the backing file chronological and to order every
//! report. The sort is **not stable**: records whose keys compare equal may
//! come out in any relative order.

use std::cmp::Ordering;

/// Direction of a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Sort `items` in place by a key derived from each record.
///
/// Composite orderings are expressed as tuples, with
/// [`std::cmp::Reverse`] on the components that should run high to low.
/// Keys that cannot be compared (NaN) are treated as equal.
pub fn heap_sort_by_key<T, K, F>(items: &mut [T], mut key: F, order: SortOrder)
where
    K: PartialOrd,
    F: FnMut(&T) -> K,
{
    heap_sort_by(items, |a, b| compare_keys(&key(a), &key(b)), order);
}

/// Total ordering over partially ordered keys; incomparable keys are equal
pub fn compare_keys<K: PartialOrd>(a: &K, b: &K) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Sort `items` in place with a comparator. O(n log n), no allocation.
pub fn heap_sort_by<T, F>(items: &mut [T], mut compare: F, order: SortOrder)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }

    // Max-heap for ascending output, min-heap for descending
    let mut before = |a: &T, b: &T| match order {
        SortOrder::Ascending => compare(a, b) == Ordering::Greater,
        SortOrder::Descending => compare(a, b) == Ordering::Less,
    };

    for root in (0..len / 2).rev() {
        sift_down(items, root, len, &mut before);
    }

    for end in (1..len).rev() {
        items.swap(0, end);
        sift_down(items, 0, end, &mut before);
    }
}

/// Restore the heap property for the subtree at `root`, considering only
/// `items[..heap_size]`
fn sift_down<T, F>(items: &mut [T], mut root: usize, heap_size: usize, before: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    loop {
        let left = 2 * root + 1;
        let right = left + 1;
        let mut top = root;

        if left < heap_size && before(&items[left], &items[top]) {
            top = left;
        }
        if right < heap_size && before(&items[right], &items[top]) {
            top = right;
        }
        if top == root {
            return;
        }

        items.swap(root, top);
        root = top;
    }
}

// ==================== Tests ====================
