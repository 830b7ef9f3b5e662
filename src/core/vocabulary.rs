// --- File: src/core/vocabulary.rs
use crate::config::VocabularyConfig;
use crate::core::types::{DocumentVector, TokenId};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

// --- Vocabulary: immutable token <-> index mapping shared by training and inference ---

/// A bijective mapping from token to a dense index in `[0, V)`.
/// Only the ordered token list is serialized; the lookup table is rebuilt on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    tokens: Vec<String>,
    index: HashMap<String, TokenId>,
}

impl TryFrom<Vec<String>> for Vocabulary {
    type Error = String;

    fn try_from(tokens: Vec<String>) -> Result<Self, Self::Error> {
        let mut index = HashMap::with_capacity(tokens.len());
        for (id, token) in tokens.iter().enumerate() {
            if index.insert(token.clone(), id).is_some() {
                return Err(format!("duplicate vocabulary token '{}'", token));
            }
        }
        Ok(Self { tokens, index })
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.tokens
    }
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn index_of(&self, token: &str) -> Option<TokenId> {
        self.index.get(token).copied()
    }

    /// Tokens in index order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Counts occurrences of known tokens. Unknown tokens are ignored.
    /// O(n) in the number of tokens.
    pub fn vectorize<S: AsRef<str>>(&self, tokens: &[S]) -> DocumentVector {
        let mut vector = DocumentVector::new();
        for token in tokens {
            if let Some(id) = self.index_of(token.as_ref()) {
                vector.increment(id);
            }
        }
        vector
    }
}

// --- VocabularyBuilder: accumulates corpus statistics during training ---

#[derive(Debug, Clone)]
pub struct VocabularyBuilder {
    config: VocabularyConfig,
    /// Number of documents each token appears in.
    doc_freq: HashMap<String, usize>,
    /// Total occurrences of each token across the corpus.
    term_freq: HashMap<String, u64>,
    n_documents: usize,
}

impl VocabularyBuilder {
    pub fn new(config: VocabularyConfig) -> Self {
        Self {
            config,
            doc_freq: HashMap::new(),
            term_freq: HashMap::new(),
            n_documents: 0,
        }
    }

    pub fn add_document<S: AsRef<str>>(&mut self, tokens: &[S]) {
        self.n_documents += 1;
        let mut seen = HashSet::new();
        for token in tokens {
            let token = token.as_ref();
            *self.term_freq.entry(token.to_string()).or_insert(0) += 1;
            if seen.insert(token) {
                *self.doc_freq.entry(token.to_string()).or_insert(0) += 1;
            }
        }
    }

    /// Applies the document-frequency bounds, then keeps the `max_features`
    /// most frequent survivors. Indices follow descending corpus frequency,
    /// ties broken lexically.
    pub fn build(self) -> Vocabulary {
        let n = self.n_documents.max(1) as f64;
        let min_df = self.config.min_df;
        let max_df = self.config.max_df;

        let mut candidates: Vec<(String, u64)> = self
            .term_freq
            .into_iter()
            .filter(|(token, _)| {
                let df = self.doc_freq.get(token).copied().unwrap_or(0);
                df >= min_df && (df as f64 / n) <= max_df
            })
            .collect();

        candidates.sort_by(|(a_tok, a_freq), (b_tok, b_freq)| {
            Reverse(*a_freq).cmp(&Reverse(*b_freq)).then_with(|| a_tok.cmp(b_tok))
        });
        candidates.truncate(self.config.max_features);

        let tokens: Vec<String> = candidates.into_iter().map(|(token, _)| token).collect();
        let index = tokens
            .iter()
            .enumerate()
            .map(|(id, token)| (token.clone(), id))
            .collect();
        Vocabulary { tokens, index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_owned).collect()
    }

    fn builder(max_features: usize) -> VocabularyBuilder {
        VocabularyBuilder::new(VocabularyConfig {
            max_features,
            ..VocabularyConfig::default()
        })
    }

    #[test]
    fn drops_rare_and_ubiquitous_tokens() {
        let mut b = builder(100);
        b.add_document(&doc("common orbit orbit rocket"));
        b.add_document(&doc("common orbit hockey"));
        b.add_document(&doc("common puck hockey"));
        let vocab = b.build();

        // "common" is in every document, "rocket" and "puck" in only one.
        assert_eq!(vocab.tokens(), &["orbit".to_string(), "hockey".to_string()]);
    }

    #[test]
    fn respects_max_features_with_lexical_tie_break() {
        let mut b = builder(2);
        for _ in 0..2 {
            b.add_document(&doc("zeta alpha beta"));
            b.add_document(&doc("zeta alpha beta zeta"));
            b.add_document(&doc("filler"));
        }
        let vocab = b.build();

        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.index_of("zeta"), Some(0));
        assert_eq!(vocab.index_of("alpha"), Some(1));
        assert_eq!(vocab.index_of("beta"), None);
    }

    #[test]
    fn empty_corpus_yields_empty_vocabulary() {
        let vocab = builder(10).build();
        assert!(vocab.is_empty());
        assert!(vocab.vectorize(&doc("anything at all")).is_empty());
    }

    #[test]
    fn vectorize_counts_known_tokens_only() {
        let vocab = Vocabulary::try_from(vec!["orbit".to_string(), "launch".to_string()]).unwrap();
        let vector = vocab.vectorize(&doc("orbit launch orbit unknown orbit"));

        assert_eq!(vector.count(0), 3);
        assert_eq!(vector.count(1), 1);
        assert_eq!(vector.nnz(), 2);
        assert_eq!(vector.total(), 4);
    }

    #[test]
    fn rejects_duplicate_tokens() {
        let result = Vocabulary::try_from(vec!["dup".to_string(), "dup".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn survives_bincode_roundtrip_with_lookup_intact() {
        let vocab = Vocabulary::try_from(vec!["alpha".to_string(), "beta".to_string()]).unwrap();
        let bytes = bincode::serialize(&vocab).unwrap();
        let restored: Vocabulary = bincode::deserialize(&bytes).unwrap();
        assert_eq!(restored.index_of("beta"), Some(1));
        assert_eq!(restored, vocab);
    }
}
