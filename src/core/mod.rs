// src/core/mod.rs

pub mod engine;
pub mod naive_bayes;
pub mod tokenizer;
pub mod types;
pub mod vocabulary;
