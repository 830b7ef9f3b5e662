// File: src/corpus.rs
use crate::core::tokenizer::Tokenizer;
use crate::core::types::Category;
use crate::error::{ClassifierError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// One preprocessed training document.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledDocument {
    pub category: Category,
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub documents: Vec<LabeledDocument>,
}

impl Corpus {
    pub fn new(documents: Vec<LabeledDocument>) -> Self {
        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Sorted, de-duplicated category labels.
    pub fn categories(&self) -> Vec<Category> {
        self.documents
            .iter()
            .map(|doc| doc.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Reads a directory-per-category corpus. Directory and file names are
/// visited in lexical order and at most `max_files_per_category` files are
/// read from each category.
pub struct CorpusLoader {
    tokenizer: Tokenizer,
    max_files_per_category: usize,
}

impl CorpusLoader {
    pub fn new(max_files_per_category: usize) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            max_files_per_category,
        }
    }

    pub fn load(&self, root: &Path) -> Result<Corpus> {
        if !root.is_dir() {
            return Err(ClassifierError::CorpusNotFound(root.to_path_buf()));
        }

        let category_dirs = sorted_entries(root, |p| p.is_dir())?;
        log::info!(
            "Found {} categories in '{}'",
            category_dirs.len(),
            root.display()
        );

        let mut documents = Vec::new();
        for dir in category_dirs {
            let Some(category) = dir.file_name().and_then(|n| n.to_str()) else {
                log::warn!("Skipping category directory with non UTF-8 name: {:?}", dir);
                continue;
            };

            let files = match sorted_entries(&dir, |p| p.is_file()) {
                Ok(files) => files,
                Err(e) => {
                    log::warn!("Error listing {}: {}", dir.display(), e);
                    continue;
                }
            };
            log::info!("Loading {} documents from {}", files.len(), category);

            for file in files.into_iter().take(self.max_files_per_category) {
                match self.read_document(&file) {
                    Ok(tokens) if tokens.is_empty() => {
                        log::debug!("Skipping {}: no tokens after preprocessing", file.display());
                    }
                    Ok(tokens) => documents.push(LabeledDocument {
                        category: category.to_string(),
                        tokens,
                    }),
                    Err(e) => log::warn!("Error reading {}: {}", file.display(), e),
                }
            }
        }

        if documents.is_empty() {
            return Err(ClassifierError::EmptyCorpus);
        }
        Ok(Corpus::new(documents))
    }

    fn read_document(&self, path: &Path) -> Result<Vec<String>> {
        let bytes = fs::read(path)?;
        // Undecodable bytes are dropped rather than failing the document.
        let text: String = String::from_utf8_lossy(&bytes)
            .chars()
            .filter(|&c| c != char::REPLACEMENT_CHARACTER)
            .collect();
        Ok(self.tokenizer.tokenize_document(&text))
    }
}

fn sorted_entries(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if keep(&path) {
            entries.push(path);
        }
    }
    entries.sort();
    Ok(entries)
}
