// File: src/error.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize or deserialize the model: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No trained model found at '{}'", .0.display())]
    ModelNotFound(PathBuf),

    #[error("Model artifact is corrupt: {0}")]
    CorruptModel(String),

    #[error("Data directory '{}' not found", .0.display())]
    CorpusNotFound(PathBuf),

    #[error("No training documents found")]
    EmptyCorpus,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
