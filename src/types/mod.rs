use serde::{Deserialize, Serialize};
use std::fmt;

pub mod constants;

/// A value together with the number of times it was observed
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry<T> {
    /// The observed value
    pub value: T,
    /// How many times the value occurred, always at least 1
    pub count: u64,
}

impl<T> RankedEntry<T> {
    pub fn new(value: T, count: u64) -> Self {
        Self { value, count }
    }

    /// Converts the entry into a plain `(value, count)` pair
    pub fn into_pair(self) -> (T, u64) {
        (self.value, self.count)
    }
}

impl<T> From<(T, u64)> for RankedEntry<T> {
    fn from((value, count): (T, u64)) -> Self {
        Self { value, count }
    }
}

impl<T: fmt::Display> fmt::Display for RankedEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data={},freq={}", self.value, self.count)
    }
}

/// Top-K selection output, ordered by count descending.
///
/// Holds `min(k, distinct values)` entries. The order among equal counts
/// depends on the strategy that produced it.
pub type TopKResult<T> = Vec<RankedEntry<T>>;
