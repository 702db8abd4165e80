//! Reference Top-K strategy: sort everything, keep the head.

use super::{Key, TopKSelector};
use crate::frequency::FrequencyTable;
use crate::types::{RankedEntry, TopKResult};
use crate::utils::logging;

/// Sorts all entries by count descending, ties by value ascending
#[derive(Debug, Clone, Copy, Default)]
pub struct SortSelect;

impl<T: Key> TopKSelector<T> for SortSelect {
    fn select(&self, table: &FrequencyTable<T>, k: usize) -> TopKResult<T> {
        select_top_k_by_sort(table, k)
    }

    fn name(&self) -> &'static str {
        "sort"
    }
}

/// Returns the `k` most frequent entries of `table`.
///
/// Equal counts are ordered by value ascending, so the output is fully
/// deterministic. `k` larger than the number of distinct values is clamped.
pub fn select_top_k_by_sort<T: Key>(table: &FrequencyTable<T>, k: usize) -> TopKResult<T> {
    if k == 0 {
        return Vec::new();
    }

    let mut entries: Vec<RankedEntry<T>> = table
        .iter()
        .map(|(value, count)| RankedEntry::new(value.clone(), *count))
        .collect();

    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    entries.truncate(k);

    logging::log("TOP_K", &format!(
        "Sort selection kept {} of {} distinct values",
        entries.len(),
        table.len()
    ));
    entries
}
