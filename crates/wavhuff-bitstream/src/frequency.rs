//! Symbol frequency counting

use indexmap::IndexMap;
use wavhuff_core::Symbol;

/// Occurrence counts keyed by symbol, iterated in first-seen order
#[derive(Debug, Clone)]
pub struct FrequencyTable<S: Symbol> {
    counts: IndexMap<S, u64>,
}

impl<S: Symbol> FrequencyTable<S> {
    pub fn new() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }

    pub fn from_symbols(symbols: &[S]) -> Self {
        let mut table = Self::new();
        for &symbol in symbols {
            table.add(symbol);
        }
        table
    }

    pub fn add(&mut self, symbol: S) {
        *self.counts.entry(symbol).or_insert(0) += 1;
    }

    pub fn get(&self, symbol: &S) -> Option<u64> {
        self.counts.get(symbol).copied()
    }

    /// Number of distinct symbols
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, u64)> + '_ {
        self.counts.iter().map(|(symbol, &count)| (symbol, count))
    }
}

impl<S: Symbol> Default for FrequencyTable<S> {
    fn default() -> Self {
        Self::new()
    }
}
