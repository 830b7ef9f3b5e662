// src/lib.rs

pub mod config;
pub mod core;
pub mod corpus;
pub mod error;
pub mod fallback;
pub mod persistence;
pub mod training;

pub use crate::config::ClassifierConfig;
pub use crate::core::engine::{Classifier, ClassificationResult, ClassifierEngine};
pub use crate::error::ClassifierError;
