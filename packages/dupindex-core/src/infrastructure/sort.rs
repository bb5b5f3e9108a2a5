//! Sorting and searching over indirect storage
//!
//! The packed index keeps its records in parallel primitive arrays, so it
//! cannot hand `slice::sort` a slice of elements. [`Sortable`] abstracts
//! the three operations sorting actually needs — size, swap, compare by
//! position — and lets one engine reorder whatever backing storage a
//! caller has, with no per-element allocation and no boxed comparators.
//!
//! # Precondition
//!
//! `is_less` must be a strict weak ordering over positions. The engine
//! does not check this; a non-transitive or non-irreflexive comparison
//! produces unspecified element order or non-termination.

/// Comparable, swappable positions over arbitrary backing storage
pub trait Sortable {
    /// Number of elements
    fn size(&self) -> usize;

    /// Exchange the elements at positions `i` and `j`
    fn swap(&mut self, i: usize, j: usize);

    /// True when the element at `i` orders strictly before the one at `j`
    fn is_less(&self, i: usize, j: usize) -> bool;
}

/// Sort `data` ascending by `is_less`
///
/// Hybrid quicksort: partitions of five or fewer elements are finished
/// with a recursion-free bubble sort; larger partitions take the middle
/// element as pivot and partition in place.
pub fn sort<S: Sortable>(data: &mut S) {
    let n = data.size();
    if n > 1 {
        quick_sort(data, 0, n - 1);
    }
}

/// Count of elements strictly less than a probe (exclusive lower bound)
///
/// `less_than_probe(i)` must report whether the element at position `i`
/// orders strictly before the probe value, under the same ordering the
/// storage is sorted by. Returns the first position whose element is not
/// less than the probe; `len` when every element is.
pub fn lower_bound<F>(len: usize, mut less_than_probe: F) -> usize
where
    F: FnMut(usize) -> bool,
{
    let mut lower = 0;
    let mut upper = len;
    while lower < upper {
        let mid = (lower + upper) >> 1;
        if less_than_probe(mid) {
            lower = mid + 1;
        } else {
            upper = mid;
        }
    }
    lower
}

// `lo` and `hi` are inclusive bounds.
fn quick_sort<S: Sortable>(data: &mut S, lo: usize, hi: usize) {
    if hi - lo < 5 {
        bubble_sort(data, lo, hi);
        return;
    }

    let mut i = lo;
    let mut j = hi;
    let mut pivot = lo + (hi - lo) / 2;
    while i <= j {
        while data.is_less(i, pivot) {
            i += 1;
        }
        while data.is_less(pivot, j) {
            j -= 1;
        }
        if i <= j {
            if i != j {
                data.swap(i, j);
                // The swap may have moved the pivot element itself; keep
                // tracking its position or later comparisons partition
                // against the wrong element when keys repeat.
                if pivot == i {
                    pivot = j;
                } else if pivot == j {
                    pivot = i;
                }
            }
            i += 1;
            if j == 0 {
                break;
            }
            j -= 1;
        }
    }
    if lo < j {
        quick_sort(data, lo, j);
    }
    if i < hi {
        quick_sort(data, i, hi);
    }
}

// `lo` and `hi` are inclusive bounds.
fn bubble_sort<S: Sortable>(data: &mut S, lo: usize, hi: usize) {
    let mut upper = hi;
    while upper > lo {
        for j in lo..upper {
            if data.is_less(j + 1, j) {
                data.swap(j, j + 1);
            }
        }
        upper -= 1;
    }
}
