// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dense index of a token inside a `Vocabulary`, in `[0, V)`.
pub type TokenId = usize;

/// An opaque topical label, e.g. "rec.sport.hockey".
pub type Category = String;

/// Sparse bag-of-words counts over a fixed vocabulary.
/// Only indices with a nonzero count are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentVector {
    counts: BTreeMap<TokenId, u32>,
}

impl DocumentVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, token_id: TokenId) {
        *self.counts.entry(token_id).or_insert(0) += 1;
    }

    pub fn count(&self, token_id: TokenId) -> u32 {
        self.counts.get(&token_id).copied().unwrap_or(0)
    }

    /// Nonzero entries in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, u32)> + '_ {
        self.counts.iter().map(|(&id, &count)| (id, count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct indices with a nonzero count.
    pub fn nnz(&self) -> usize {
        self.counts.len()
    }

    /// Total number of recognised token occurrences.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }
}

/// A chosen category and the posterior probability behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub confidence: f64,
}
