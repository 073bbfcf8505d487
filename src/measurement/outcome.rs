//! Outcome frequency tables.

use std::collections::BTreeMap;
use std::collections::btree_map;

/// Counts of each distinct value returned by a callable.
///
/// Keys iterate in ascending order, which is the order the distribution
/// report prints them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeTable<T: Ord> {
    counts: BTreeMap<T, u64>,
    total: u64,
}

impl<T: Ord> OutcomeTable<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
            total: 0,
        }
    }

    /// Count one occurrence of `value`.
    pub fn record(&mut self, value: T) {
        *self.counts.entry(value).or_insert(0) += 1;
        self.total += 1;
    }

    /// Occurrences of `value`.
    pub fn count(&self, value: &T) -> u64 {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> btree_map::Iter<'_, T, u64> {
        self.counts.iter()
    }

    /// `(value, percentage)` pairs in ascending key order, relative to
    /// `cycles` invocations.
    pub fn percentages(&self, cycles: u64) -> impl Iterator<Item = (&T, f64)> + '_ {
        let per_percent = cycles as f64 / 100.0;
        self.counts
            .iter()
            .map(move |(value, &count)| (value, count as f64 / per_percent))
    }
}

impl<T: Ord> Default for OutcomeTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for OutcomeTable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut table = Self::new();
        for value in iter {
            table.record(value);
        }
        table
    }
}

impl<'a, T: Ord> IntoIterator for &'a OutcomeTable<T> {
    type Item = (&'a T, &'a u64);
    type IntoIter = btree_map::Iter<'a, T, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
