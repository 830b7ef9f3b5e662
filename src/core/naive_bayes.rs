// File: src/core/naive_bayes.rs
use crate::core::types::{Category, Classification, DocumentVector};
use crate::error::{ClassifierError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Trained multinomial Naive Bayes parameters, stored in log space.
///
/// `categories` is sorted and every row of `feature_log_prob` is a full
/// distribution over the `n_features` vocabulary indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayesModel {
    categories: Vec<Category>,
    class_log_prior: Vec<f64>,
    /// `|categories| x n_features`, row-major by category.
    feature_log_prob: Vec<Vec<f64>>,
    n_features: usize,
}

pub struct NaiveBayesTrainer {
    alpha: f64,
}

impl NaiveBayesTrainer {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }

    /// Estimates priors and Lidstone-smoothed conditionals from labeled vectors.
    /// O(samples * nnz + |categories| * n_features).
    pub fn fit(
        &self,
        samples: &[(DocumentVector, Category)],
        n_features: usize,
    ) -> Result<NaiveBayesModel> {
        if samples.is_empty() {
            return Err(ClassifierError::EmptyCorpus);
        }
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(ClassifierError::InvalidConfig(format!(
                "alpha must be a positive number, got {}",
                self.alpha
            )));
        }

        // BTreeMap keeps categories in lexical order.
        let mut doc_counts: BTreeMap<&str, u64> = BTreeMap::new();
        for (_, category) in samples {
            *doc_counts.entry(category.as_str()).or_insert(0) += 1;
        }
        let categories: Vec<Category> = doc_counts.keys().map(|c| c.to_string()).collect();
        let row_of: BTreeMap<&str, usize> = doc_counts
            .keys()
            .enumerate()
            .map(|(row, c)| (*c, row))
            .collect();

        let mut feature_counts = vec![vec![0u64; n_features]; categories.len()];
        for (vector, category) in samples {
            let row = &mut feature_counts[row_of[category.as_str()]];
            for (id, count) in vector.iter() {
                let slot = row.get_mut(id).ok_or_else(|| {
                    ClassifierError::InvalidInput(format!(
                        "feature index {} outside vocabulary of size {}",
                        id, n_features
                    ))
                })?;
                *slot += count as u64;
            }
        }

        let total_docs = samples.len() as f64;
        let class_log_prior: Vec<f64> = doc_counts
            .values()
            .map(|&count| (count as f64 / total_docs).ln())
            .collect();

        let smoothing_mass = self.alpha * n_features as f64;
        let feature_log_prob: Vec<Vec<f64>> = feature_counts
            .iter()
            .map(|row| {
                let total: u64 = row.iter().sum();
                let log_denominator = (total as f64 + smoothing_mass).ln();
                row.iter()
                    .map(|&count| (count as f64 + self.alpha).ln() - log_denominator)
                    .collect::<Vec<f64>>()
            })
            .collect();

        log::debug!(
            "Fitted Naive Bayes over {} categories and {} features",
            categories.len(),
            n_features
        );

        Ok(NaiveBayesModel {
            categories,
            class_log_prior,
            feature_log_prob,
            n_features,
        })
    }
}

impl NaiveBayesModel {
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn class_log_prior(&self) -> &[f64] {
        &self.class_log_prior
    }

    pub fn feature_log_prob(&self, category_index: usize) -> Option<&[f64]> {
        self.feature_log_prob.get(category_index).map(Vec::as_slice)
    }

    /// `log P(c) + sum_i count_i * log P(i|c)` for every category, walking only
    /// the nonzero entries of the vector.
    pub fn joint_log_likelihood(&self, vector: &DocumentVector) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(&prior, row)| {
                vector
                    .iter()
                    .filter_map(|(id, count)| row.get(id).map(|lp| count as f64 * lp))
                    .fold(prior, |acc, term| acc + term)
            })
            .collect()
    }

    /// Posterior distribution in category order; sums to 1.
    pub fn predict_proba(&self, vector: &DocumentVector) -> Vec<f64> {
        softmax(&self.joint_log_likelihood(vector))
    }

    /// Highest-scoring category. Ties go to the lexically first category,
    /// which is the first one in the sorted category list.
    pub fn predict(&self, vector: &DocumentVector) -> Classification {
        let probabilities = self.predict_proba(vector);
        let mut best = 0;
        for (idx, &p) in probabilities.iter().enumerate().skip(1) {
            if p > probabilities[best] {
                best = idx;
            }
        }
        Classification {
            category: self.categories[best].clone(),
            confidence: probabilities[best],
        }
    }

    /// Structural checks used when loading a persisted model.
    pub fn validate(&self, expected_features: usize) -> Result<()> {
        let corrupt = |reason: String| Err(ClassifierError::CorruptModel(reason));

        if self.categories.is_empty() {
            return corrupt("model has no categories".to_string());
        }
        if self.categories.windows(2).any(|w| w[0] >= w[1]) {
            return corrupt("categories are not sorted and unique".to_string());
        }
        if self.n_features != expected_features {
            return corrupt(format!(
                "model expects {} features but vocabulary has {}",
                self.n_features, expected_features
            ));
        }
        if self.class_log_prior.len() != self.categories.len()
            || self.feature_log_prob.len() != self.categories.len()
        {
            return corrupt("parameter tables do not match category count".to_string());
        }
        if self.feature_log_prob.iter().any(|row| row.len() != self.n_features) {
            return corrupt("conditional table row has wrong width".to_string());
        }
        let all_finite = self.class_log_prior.iter().all(|v| v.is_finite())
            && self.feature_log_prob.iter().flatten().all(|v| v.is_finite());
        if !all_finite {
            return corrupt("non-finite log probability".to_string());
        }
        if !sums_to_one(&self.class_log_prior) {
            return corrupt("class priors do not sum to 1".to_string());
        }
        // With no features every row is empty and there is nothing to normalize.
        if self.n_features > 0 {
            if let Some(row) = self.feature_log_prob.iter().position(|r| !sums_to_one(r)) {
                return corrupt(format!(
                    "conditional distribution for '{}' does not sum to 1",
                    self.categories[row]
                ));
            }
        }
        Ok(())
    }
}

const NORMALIZATION_TOLERANCE: f64 = 1e-6;

fn sums_to_one(log_probs: &[f64]) -> bool {
    let total: f64 = log_probs.iter().map(|lp| lp.exp()).sum();
    (total - 1.0).abs() <= NORMALIZATION_TOLERANCE
}

/// Max-subtracted softmax so large negative log scores do not underflow to 0/0.
fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|&s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
