use crate::core::naive_bayes::NaiveBayesModel;
use crate::core::tokenizer::Tokenizer;
use crate::core::types::{Category, Classification};
use crate::core::vocabulary::Vocabulary;
use crate::error::{ClassifierError, Result};
use crate::fallback::KeywordClassifier;
use crate::persistence::{load_from_disk, ModelArtifact};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Anything that can turn raw text into a category and a confidence.
/// Implementations are immutable once built, so they can be shared freely
/// across threads.
pub trait Classifier: Send + Sync {
    /// Scores `text` given its already-normalized `tokens`, so callers that
    /// tokenized once for display do not pay for it again. Backends pick
    /// whichever view they need.
    fn classify_tokens(&self, text: &str, tokens: &[String]) -> Classification;

    fn classify(&self, text: &str) -> Classification {
        self.classify_tokens(text, &Tokenizer::new().tokenize(text))
    }

    /// The closed set of categories this classifier may return.
    fn categories(&self) -> &[Category];

    fn name(&self) -> &'static str;
}

/// Learned backend: inference tokenization, vectorization, then scoring.
#[derive(Debug, Clone)]
pub struct NaiveBayesClassifier {
    vocabulary: Vocabulary,
    model: NaiveBayesModel,
}

impl NaiveBayesClassifier {
    pub fn new(vocabulary: Vocabulary, model: NaiveBayesModel) -> Self {
        Self { vocabulary, model }
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        Self::new(artifact.vocabulary, artifact.model)
    }

    /// Posterior over `categories()` for the given text.
    pub fn posterior(&self, text: &str) -> Vec<f64> {
        let tokens = Tokenizer::new().tokenize(text);
        self.model.predict_proba(&self.vocabulary.vectorize(&tokens))
    }
}

impl Classifier for NaiveBayesClassifier {
    fn classify_tokens(&self, _text: &str, tokens: &[String]) -> Classification {
        self.model.predict(&self.vocabulary.vectorize(tokens))
    }

    fn categories(&self) -> &[Category] {
        self.model.categories()
    }

    fn name(&self) -> &'static str {
        "naive-bayes"
    }
}

/// The payload returned to callers of the inference entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub confidence: f64,
    pub processed_text: String,
}

// The engine picks its backend once; callers never branch on which one is active.
pub struct ClassifierEngine {
    tokenizer: Tokenizer,
    backend: Box<dyn Classifier>,
}

impl ClassifierEngine {
    pub fn new(backend: Box<dyn Classifier>) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            backend,
        }
    }

    pub fn fallback() -> Self {
        Self::new(Box::new(KeywordClassifier::new()))
    }

    /// Loads the trained artifact at `path`. A missing artifact selects the
    /// keyword fallback; an unreadable or corrupt one is an error.
    pub fn from_file_or_fallback(path: &Path) -> Result<Self> {
        match load_from_disk(path) {
            Ok(artifact) => {
                log::debug!(
                    "Loaded model from '{}' ({} categories, {} features)",
                    path.display(),
                    artifact.model.categories().len(),
                    artifact.vocabulary.len()
                );
                Ok(Self::new(Box::new(NaiveBayesClassifier::from_artifact(artifact))))
            }
            Err(ClassifierError::ModelNotFound(missing)) => {
                log::warn!(
                    "No trained model at '{}', using keyword fallback classifier",
                    missing.display()
                );
                Ok(Self::fallback())
            }
            Err(e) => Err(e),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn categories(&self) -> &[Category] {
        self.backend.categories()
    }

    pub fn classify(&self, text: &str) -> ClassificationResult {
        let tokens = self.tokenizer.tokenize(text);
        let Classification { category, confidence } = self.backend.classify_tokens(text, &tokens);
        let processed_text = Tokenizer::join(&tokens);
        ClassificationResult {
            category,
            confidence,
            processed_text,
        }
    }
}
