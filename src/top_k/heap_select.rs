//! Production Top-K strategy: a min-heap capped at k entries.

use super::{Key, TopKSelector};
use crate::frequency::FrequencyTable;
use crate::types::{RankedEntry, TopKResult};
use crate::utils::logging;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Keeps the k largest-by-count entries seen so far in a bounded min-heap
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundedHeapSelect;

impl<T: Key> TopKSelector<T> for BoundedHeapSelect {
    fn select(&self, table: &FrequencyTable<T>, k: usize) -> TopKResult<T> {
        select_top_k_by_heap(table, k)
    }

    fn name(&self) -> &'static str {
        "heap"
    }
}

/// Heap slot ordered by count, then by push order.
///
/// Among equal counts the later push compares smaller, so it is evicted
/// first and earlier entries survive the cut.
struct Slot<T> {
    count: u64,
    seq: usize,
    value: T,
}

impl<T> Slot<T> {
    fn key(&self) -> (u64, Reverse<usize>) {
        (self.count, Reverse(self.seq))
    }
}

impl<T> PartialEq for Slot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for Slot<T> {}

impl<T> PartialOrd for Slot<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Slot<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Returns the `k` most frequent entries of `table` in O(n log k).
///
/// Ties are broken by the table's iteration order, which is unspecified, so
/// the result may differ from [`super::select_top_k_by_sort`] on entries
/// whose counts are equal at the cut.
pub fn select_top_k_by_heap<T: Key>(table: &FrequencyTable<T>, k: usize) -> TopKResult<T> {
    // Clamp before sizing the heap; k may be far above the distinct count.
    let k = k.min(table.len());
    if k == 0 {
        return Vec::new();
    }

    let mut heap: BinaryHeap<Reverse<Slot<T>>> = BinaryHeap::with_capacity(k + 1);
    for (seq, (value, count)) in table.iter().enumerate() {
        heap.push(Reverse(Slot {
            count: *count,
            seq,
            value: value.clone(),
        }));
        if heap.len() > k {
            heap.pop();
        }
    }

    // Pops come out ascending; reversing gives count descending without a sort.
    let mut entries = Vec::with_capacity(heap.len());
    while let Some(Reverse(slot)) = heap.pop() {
        entries.push(RankedEntry::new(slot.value, slot.count));
    }
    entries.reverse();

    logging::log("TOP_K", &format!(
        "Heap selection kept {} of {} distinct values",
        entries.len(),
        table.len()
    ));
    entries
}
