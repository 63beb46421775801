//! Unigram and n-gram counting.

use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub term: String,
    pub count: u64,
}

/// Term counts that remember the order in which terms were first seen.
///
/// First-seen order is the tie-break for [`FrequencyTable::top`], which keeps
/// rankings reproducible across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, term: &str) {
        self.add_count(term, 1);
    }

    pub fn add_count(&mut self, term: &str, count: u64) {
        if count == 0 {
            return;
        }
        match self.index.get(term) {
            Some(&slot) => self.entries[slot].count += count,
            None => {
                self.index.insert(term.to_string(), self.entries.len());
                self.entries.push(FrequencyEntry { term: term.to_string(), count });
            }
        }
    }

    /// Fold another table into this one. Terms new to `self` are appended in
    /// `other`'s first-seen order.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for entry in &other.entries {
            self.add_count(&entry.term, entry.count);
        }
    }

    pub fn get(&self, term: &str) -> Option<u64> {
        self.index.get(term).map(|&slot| self.entries[slot].count)
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &FrequencyEntry> {
        self.entries.iter()
    }

    /// The `k` most frequent entries, count descending, ties by first-seen order.
    pub fn top(&self, k: usize) -> Vec<&FrequencyEntry> {
        let mut ranked: Vec<&FrequencyEntry> = self.entries.iter().collect();
        // stable sort keeps first-seen order among equal counts
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(k);
        ranked
    }
}

impl<S: AsRef<str>> FromIterator<S> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = Self::new();
        for term in iter {
            table.add(term.as_ref());
        }
        table
    }
}

/// Count occurrences of each token.
pub fn frequency<S: AsRef<str>>(tokens: &[S]) -> FrequencyTable {
    tokens.iter().collect()
}

/// Count every contiguous window of `n` tokens, joined by a single space.
///
/// Fewer than `n` tokens (or `n == 0`) gives an empty table.
pub fn ngrams<S: AsRef<str>>(tokens: &[S], n: usize) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    if n == 0 || tokens.len() < n {
        return table;
    }
    let mut gram = String::new();
    for window in tokens.windows(n) {
        gram.clear();
        for (i, token) in window.iter().enumerate() {
            if i > 0 {
                gram.push(' ');
            }
            gram.push_str(token.as_ref());
        }
        table.add(&gram);
    }
    table
}
