//! Frequency counting

use std::collections::hash_map::{self, HashMap};

/// Occurrence counts per distinct key
///
/// Every stored count is at least 1; an absent key has been seen zero times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap {
    counts: HashMap<String, u64>,
}

impl FrequencyMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for a key, zero when unseen
    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing has been counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate over (key, count) pairs in arbitrary order
    pub fn iter(&self) -> hash_map::Iter<'_, String, u64> {
        self.counts.iter()
    }

    /// Add `n` occurrences of `key`; a zero `n` leaves the map unchanged
    pub fn add(&mut self, key: &str, n: u64) {
        if n == 0 {
            return;
        }
        match self.counts.get_mut(key) {
            Some(count) => *count += n,
            None => {
                self.counts.insert(key.to_string(), n);
            }
        }
    }

    /// Fold another map into this one, summing counts per key
    pub fn merge(&mut self, other: FrequencyMap) {
        if self.counts.is_empty() {
            self.counts = other.counts;
            return;
        }
        for (key, n) in other.counts {
            *self.counts.entry(key).or_insert(0) += n;
        }
    }
}

impl<'a> IntoIterator for &'a FrequencyMap {
    type Item = (&'a String, &'a u64);
    type IntoIter = hash_map::Iter<'a, String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut map = FrequencyMap::new();
        for (key, n) in iter {
            let key: String = key.into();
            map.add(&key, n);
        }
        map
    }
}

/// Owns one frequency map and increments it during the processing pass
#[derive(Debug, Clone, Default)]
pub struct FrequencyAggregator {
    map: FrequencyMap,
}

impl FrequencyAggregator {
    /// Create an aggregator with no counts
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `key`
    pub fn record(&mut self, key: &str) {
        self.map.add(key, 1);
    }

    /// Read-only view of the current counts
    pub fn snapshot(&self) -> &FrequencyMap {
        &self.map
    }

    /// Absorb the counts of another aggregator
    pub fn merge(&mut self, other: FrequencyAggregator) {
        self.map.merge(other.map);
    }

    /// Give up ownership of the counts
    pub fn into_map(self) -> FrequencyMap {
        self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_record_inserts_then_increments() {
        let mut agg = FrequencyAggregator::new();
        agg.record("fox");
        assert_eq!(agg.snapshot().get("fox"), 1);
        agg.record("fox");
        agg.record("hen");
        assert_eq!(agg.snapshot().get("fox"), 2);
        assert_eq!(agg.snapshot().get("hen"), 1);
        assert_eq!(agg.snapshot().len(), 2);
        assert_eq!(agg.snapshot().total(), 3);
    }

    #[test]
    fn test_absent_key_is_zero() {
        let map = FrequencyMap::new();
        assert_eq!(map.get("missing"), 0);
        assert!(map.is_empty());
    }

    #[test]
    fn test_add_zero_does_not_insert() {
        let mut map = FrequencyMap::new();
        map.add("ghost", 0);
        assert!(map.is_empty());
    }

    #[test]
    fn test_merge_sums_counts() {
        let mut left: FrequencyMap = [("quick", 2), ("fox", 1)].into_iter().collect();
        let right: FrequencyMap = [("fox", 1), ("runs", 1)].into_iter().collect();
        left.merge(right);

        assert_eq!(left.get("quick"), 2);
        assert_eq!(left.get("fox"), 2);
        assert_eq!(left.get("runs"), 1);
        assert_eq!(left.len(), 3);
    }

    #[test]
    fn test_merge_into_empty() {
        let mut agg = FrequencyAggregator::new();
        let mut other = FrequencyAggregator::new();
        other.record("casa blanca");
        agg.merge(other);
        assert_eq!(agg.into_map().get("casa blanca"), 1);
    }

    #[test]
    fn test_independent_aggregators() {
        let mut words = FrequencyAggregator::new();
        let mut phrases = FrequencyAggregator::new();
        words.record("casa");
        phrases.record("casa blanca");

        assert_eq!(words.snapshot().get("casa blanca"), 0);
        assert_eq!(phrases.snapshot().get("casa"), 0);
    }

    proptest! {
        #[test]
        fn prop_count_independent_of_order(
            mut keys in proptest::collection::vec("[a-c]{1,2}", 0..60),
        ) {
            let mut forward = FrequencyAggregator::new();
            for key in &keys {
                forward.record(key);
            }

            keys.reverse();
            let mut backward = FrequencyAggregator::new();
            for key in &keys {
                backward.record(key);
            }

            prop_assert_eq!(forward.snapshot(), backward.snapshot());
            for key in &keys {
                let expected = keys.iter().filter(|k| *k == key).count() as u64;
                prop_assert_eq!(forward.snapshot().get(key), expected);
            }
        }

        #[test]
        fn prop_split_and_merge_matches_single_pass(
            keys in proptest::collection::vec("[a-d]", 0..60),
            split in 0usize..60,
        ) {
            let split = split.min(keys.len());
            let mut whole = FrequencyAggregator::new();
            keys.iter().for_each(|k| whole.record(k));

            let mut left = FrequencyAggregator::new();
            let mut right = FrequencyAggregator::new();
            keys[..split].iter().for_each(|k| left.record(k));
            keys[split..].iter().for_each(|k| right.record(k));
            left.merge(right);

            prop_assert_eq!(left.snapshot(), whole.snapshot());
        }
    }
}
