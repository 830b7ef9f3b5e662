// File: src/config.rs
use crate::error::{ClassifierError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Bounds applied when selecting the vocabulary from a training corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// Upper bound on the number of retained tokens.
    pub max_features: usize,
    /// A token must occur in at least this many documents.
    pub min_df: usize,
    /// Tokens occurring in more than this share of documents are dropped.
    pub max_df: f64,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            min_df: 2,
            max_df: 0.95,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub data_dir: PathBuf,
    pub model_path: PathBuf,
    pub max_files_per_category: usize,
    pub vocabulary: VocabularyConfig,
    /// Additive smoothing constant for the conditional estimates.
    pub alpha: f64,
    pub test_fraction: f64,
    pub seed: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("20_newsgroups"),
            model_path: PathBuf::from("model.bin"),
            max_files_per_category: 100,
            vocabulary: VocabularyConfig::default(),
            alpha: 1.0,
            test_fraction: 0.25,
            seed: 42,
        }
    }
}

impl ClassifierConfig {
    /// Reads a TOML file; fields absent from the file keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(ClassifierError::InvalidConfig(format!(
                "alpha must be a positive number, got {}",
                self.alpha
            )));
        }
        if !(0.0..1.0).contains(&self.test_fraction) {
            return Err(ClassifierError::InvalidConfig(format!(
                "test_fraction must lie in [0, 1), got {}",
                self.test_fraction
            )));
        }
        if !(self.vocabulary.max_df > 0.0 && self.vocabulary.max_df <= 1.0) {
            return Err(ClassifierError::InvalidConfig(format!(
                "vocabulary.max_df must lie in (0, 1], got {}",
                self.vocabulary.max_df
            )));
        }
        if self.vocabulary.max_features == 0 {
            return Err(ClassifierError::InvalidConfig(
                "vocabulary.max_features must be at least 1".to_string(),
            ));
        }
        if self.max_files_per_category == 0 {
            return Err(ClassifierError::InvalidConfig(
                "max_files_per_category must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
