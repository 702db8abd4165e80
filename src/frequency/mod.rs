//! Frequency aggregation of a multiset of values.

use std::collections::hash_map;
use std::collections::HashMap;
use std::hash::Hash;

/// Mapping from an observed value to how many times it occurred.
///
/// Built once from a batch of values and never mutated afterwards. Every
/// stored count is at least 1 and the counts sum to the number of
/// observations. Iteration order is unspecified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<T: Eq + Hash> {
    counts: HashMap<T, u64>,
    total: u64,
}

impl<T: Eq + Hash> FrequencyTable<T> {
    /// Counts every value of `values`, inserting a fresh entry on first occurrence
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut counts = HashMap::new();
        let mut total = 0u64;
        for value in values {
            *counts.entry(value).or_insert(0) += 1;
            total += 1;
        }
        Self { counts, total }
    }

    /// Count of `value`, or `None` if it was never observed
    pub fn get(&self, value: &T) -> Option<u64> {
        self.counts.get(value).copied()
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of observations the table was built from
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn iter(&self) -> hash_map::Iter<'_, T, u64> {
        self.counts.iter()
    }

    /// Entries sorted by value, for rendering
    pub fn sorted_by_value(&self) -> Vec<(&T, u64)>
    where
        T: Ord,
    {
        let mut entries: Vec<_> = self.counts.iter().map(|(v, c)| (v, *c)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl<T: Eq + Hash> Default for FrequencyTable<T> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
            total: 0,
        }
    }
}

impl<T: Eq + Hash> FromIterator<T> for FrequencyTable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<'a, T: Eq + Hash> IntoIterator for &'a FrequencyTable<T> {
    type Item = (&'a T, &'a u64);
    type IntoIter = hash_map::Iter<'a, T, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

/// Builds the frequency table of `values`. An empty input yields an empty table.
pub fn count<T, I>(values: I) -> FrequencyTable<T>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    FrequencyTable::from_values(values)
}
