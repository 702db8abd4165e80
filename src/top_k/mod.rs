use crate::frequency::FrequencyTable;
use crate::types::TopKResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use thiserror::Error;

pub mod heap_select;
pub mod sort_select;

pub use heap_select::{select_top_k_by_heap, BoundedHeapSelect};
pub use sort_select::{select_top_k_by_sort, SortSelect};


#[derive(Debug, Error, PartialEq)]
pub enum TopKError {
    #[error("Invalid parameter: k must be non-negative, got {0}")]
    InvalidParameter(i64),
    #[error("Unknown selection strategy: {0}")]
    UnknownStrategy(String),
}

/// Values that can be ranked by a selector
pub trait Key: Eq + Hash + Ord + Clone {}

impl<T: Eq + Hash + Ord + Clone> Key for T {}

/// Picks the `k` most frequent entries of a frequency table.
///
/// Implementations return `min(k, table.len())` entries ordered by count
/// descending and never fail; `k = 0` yields an empty result.
pub trait TopKSelector<T: Key> {
    /// Select the top `k` entries
    fn select(&self, table: &FrequencyTable<T>, k: usize) -> TopKResult<T>;

    /// Short name used in logs and reports
    fn name(&self) -> &'static str;
}

/// The selection algorithm to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionStrategy {
    /// Full sort of all entries, O(n log n)
    Sort,
    /// Bounded min-heap of size k, O(n log k)
    #[default]
    Heap,
}

impl SelectionStrategy {
    /// Runs the selector behind this strategy
    pub fn select<T: Key>(&self, table: &FrequencyTable<T>, k: usize) -> TopKResult<T> {
        match self {
            SelectionStrategy::Sort => SortSelect.select(table, k),
            SelectionStrategy::Heap => BoundedHeapSelect.select(table, k),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SelectionStrategy::Sort => "sort",
            SelectionStrategy::Heap => "heap",
        }
    }
}

impl FromStr for SelectionStrategy {
    type Err = TopKError;

    /// Accepts `sort`/`heap` and the numeric menu codes `0` (sort) and `1` (heap)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sort" | "0" => Ok(SelectionStrategy::Sort),
            "heap" | "1" => Ok(SelectionStrategy::Heap),
            other => Err(TopKError::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Validates a caller supplied K. Negative values are rejected, never coerced.
pub fn checked_k(k: i64) -> Result<usize, TopKError> {
    usize::try_from(k).map_err(|_| TopKError::InvalidParameter(k))
}
