//! Relation counters with get-or-zero semantics.

use std::collections::BTreeMap;

/// Mapping from relation key to a non-negative count.
///
/// Absent keys read as zero, and all point-wise arithmetic treats them so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationCounts<K: Ord> {
    counts: BTreeMap<K, u32>,
}

impl<K: Ord> Default for RelationCounts<K> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone> RelationCounts<K> {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the count for a key (zero when absent).
    pub fn get(&self, key: &K) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Increase a key's count by one.
    pub fn increment(&mut self, key: K) {
        self.add(key, 1);
    }

    /// Increase a key's count. Adding zero leaves the map untouched.
    pub fn add(&mut self, key: K, amount: u32) {
        if amount == 0 {
            return;
        }
        *self.counts.entry(key).or_insert(0) += amount;
    }

    /// Add every count of another map into this one.
    pub fn merge(&mut self, other: &RelationCounts<K>) {
        for (key, count) in &other.counts {
            self.add(key.clone(), *count);
        }
    }

    /// Point-wise sum of two maps.
    pub fn merged(&self, other: &RelationCounts<K>) -> RelationCounts<K> {
        let mut sum = self.clone();
        sum.merge(other);
        sum
    }

    /// Whether every key's count here is at least its count in `earlier`.
    pub fn dominates(&self, earlier: &RelationCounts<K>) -> bool {
        earlier
            .counts
            .iter()
            .all(|(key, count)| self.get(key) >= *count)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.counts.contains_key(key)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|c| u64::from(*c)).sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u32)> {
        self.counts.iter().map(|(key, count)| (key, *count))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.counts.keys()
    }
}

impl<K: Ord + Clone> FromIterator<(K, u32)> for RelationCounts<K> {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (key, count) in iter {
            counts.add(key, count);
        }
        counts
    }
}
