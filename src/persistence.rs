// File: src/persistence.rs
use crate::core::naive_bayes::NaiveBayesModel;
use crate::core::types::Category;
use crate::core::vocabulary::Vocabulary;
use crate::error::{ClassifierError, Result};
use bincode::Options;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Bumped whenever the serialized layout changes.
pub const FORMAT_VERSION: u32 = 1;

// Same byte layout as `bincode::serialize`, spelled out so loads can add a
// size limit without changing the format.
fn artifact_codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
}

/// Everything inference needs, saved and loaded as one unit. The model's
/// feature indices only mean something against this exact vocabulary.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub vocabulary: Vocabulary,
    pub model: NaiveBayesModel,
    /// Held-out accuracy measured at training time, if a held-out split existed.
    pub accuracy: Option<f64>,
}

impl ModelArtifact {
    pub fn new(vocabulary: Vocabulary, model: NaiveBayesModel, accuracy: Option<f64>) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            vocabulary,
            model,
            accuracy,
        }
    }

    pub fn categories(&self) -> &[Category] {
        self.model.categories()
    }

    pub fn validate(&self) -> Result<()> {
        if self.format_version != FORMAT_VERSION {
            return Err(ClassifierError::CorruptModel(format!(
                "unsupported format version {} (expected {})",
                self.format_version, FORMAT_VERSION
            )));
        }
        self.model.validate(self.vocabulary.len())
    }
}

/// Writes the artifact to a temp file beside `path` and renames it into
/// place, so readers never observe a half-written model.
pub fn save_to_disk(artifact: &ModelArtifact, path: &Path) -> Result<()> {
    artifact.validate()?;

    let parent_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        artifact_codec().serialize_into(&mut writer, artifact)?;
        writer.flush()?;
    }

    temp_file
        .persist(path)
        .map_err(|e| ClassifierError::Io(e.error))?;
    log::info!("Model saved to '{}'", path.display());
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<ModelArtifact> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ClassifierError::ModelNotFound(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    // No length prefix in a valid artifact can exceed the file itself.
    let limit = file.metadata()?.len();
    let reader = BufReader::new(file);
    let artifact: ModelArtifact = artifact_codec().with_limit(limit).deserialize_from(reader)?;
    artifact.validate()?;
    Ok(artifact)
}
