//! Word → count tables.
//!
//! A table only ever grows: words are added, counts increase, and merging
//! adds counts instead of replacing them.

use std::collections::btree_map::{self, BTreeMap};

/// Mapping from word to the number of times it was seen.
///
/// Backed by a [`BTreeMap`] so iteration is always in ascending word order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterTable {
    counts: BTreeMap<String, u64>,
}

impl CounterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one occurrence of `word`.
    #[inline]
    pub fn add(&mut self, word: impl Into<String>) {
        self.add_count(word, 1);
    }

    /// Adds `count` occurrences of `word`, saturating at `u64::MAX`.
    pub fn add_count(&mut self, word: impl Into<String>, count: u64) {
        let slot = self.counts.entry(word.into()).or_insert(0);
        *slot = slot.saturating_add(count);
    }

    /// Adds `count` occurrences of `word` unless the sum would overflow.
    ///
    /// Returns `false` and leaves the table untouched on overflow.
    pub fn checked_add_count(&mut self, word: &str, count: u64) -> bool {
        let current = self.get(word).unwrap_or(0);
        match current.checked_add(count) {
            Some(sum) => {
                self.counts.insert(word.to_owned(), sum);
                true
            }
            None => false,
        }
    }

    /// Folds `other` into `self`, summing counts of shared words.
    ///
    /// Sums saturate at `u64::MAX`.
    pub fn merge(&mut self, other: CounterTable) {
        for (word, count) in other.counts {
            self.add_count(word, count);
        }
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word).copied()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |acc, count| acc.saturating_add(*count))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }
}

impl<W: Into<String>> Extend<W> for CounterTable {
    fn extend<I: IntoIterator<Item = W>>(&mut self, words: I) {
        for word in words {
            self.add(word);
        }
    }
}

impl<W: Into<String>> FromIterator<W> for CounterTable {
    fn from_iter<I: IntoIterator<Item = W>>(words: I) -> Self {
        let mut table = Self::new();
        table.extend(words);
        table
    }
}

impl IntoIterator for CounterTable {
    type Item = (String, u64);
    type IntoIter = btree_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_repeated_words() {
        let table: CounterTable = ["the", "cat", "the"].into_iter().collect();
        assert_eq!(table.get("the"), Some(2));
        assert_eq!(table.get("cat"), Some(1));
        assert_eq!(table.get("dog"), None);
        assert_eq!(table.len(), 2);
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn merge_adds_counts() {
        let mut left: CounterTable = ["the", "cat", "sat"].into_iter().collect();
        let right: CounterTable = ["the", "dog", "sat"].into_iter().collect();
        left.merge(right);
        assert_eq!(left.get("the"), Some(2));
        assert_eq!(left.get("sat"), Some(2));
        assert_eq!(left.get("cat"), Some(1));
        assert_eq!(left.get("dog"), Some(1));
        assert_eq!(left.total(), 6);
    }

    #[test]
    fn merge_is_commutative() {
        let a: CounterTable = ["x", "y", "y"].into_iter().collect();
        let b: CounterTable = ["y", "z"].into_iter().collect();

        let mut ab = a.clone();
        ab.merge(b.clone());
        let mut ba = b;
        ba.merge(a);
        assert_eq!(ab, ba);
    }

    #[test]
    fn overflowing_counts_saturate() {
        let mut table = CounterTable::new();
        table.add_count("cat", u64::MAX);
        table.add("cat");
        assert_eq!(table.get("cat"), Some(u64::MAX));

        let mut other = CounterTable::new();
        other.add_count("cat", 7);
        table.merge(other);
        assert_eq!(table.get("cat"), Some(u64::MAX));
    }

    #[test]
    fn checked_add_refuses_overflow() {
        let mut table = CounterTable::new();
        assert!(table.checked_add_count("cat", u64::MAX - 1));
        assert!(table.checked_add_count("cat", 1));
        assert!(!table.checked_add_count("cat", 1));
        assert_eq!(table.get("cat"), Some(u64::MAX));
        assert!(table.checked_add_count("dog", 0));
        assert_eq!(table.get("dog"), Some(0));
    }

    #[test]
    fn iterates_in_word_order() {
        let table: CounterTable = ["pear", "apple", "fig"].into_iter().collect();
        let words: Vec<&str> = table.iter().map(|(w, _)| w).collect();
        assert_eq!(words, ["apple", "fig", "pear"]);
    }
}
