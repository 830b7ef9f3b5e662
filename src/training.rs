// File: src/training.rs
use crate::config::ClassifierConfig;
use crate::core::naive_bayes::{NaiveBayesModel, NaiveBayesTrainer};
use crate::core::types::{Category, DocumentVector};
use crate::core::vocabulary::{Vocabulary, VocabularyBuilder};
use crate::corpus::{Corpus, LabeledDocument};
use crate::error::{ClassifierError, Result};
use crate::persistence::ModelArtifact;
use std::collections::BTreeMap;

/// Held-out results for a single category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub category: Category,
    pub support: usize,
    pub correct: usize,
}

impl CategoryScore {
    pub fn recall(&self) -> Option<f64> {
        (self.support > 0).then(|| self.correct as f64 / self.support as f64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// `None` when there was nothing to evaluate.
    pub accuracy: Option<f64>,
    pub per_category: Vec<CategoryScore>,
}

#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub n_train: usize,
    pub n_test: usize,
    pub vocabulary_size: usize,
    pub evaluation: Evaluation,
}

pub struct TrainingOutcome {
    pub artifact: ModelArtifact,
    pub report: TrainingReport,
}

/// Splits per category: each category's documents are shuffled with a
/// seeded RNG and `round(n * test_fraction)` of them are held out, leaving
/// at least one document per category for training.
pub fn stratified_split(
    documents: Vec<LabeledDocument>,
    test_fraction: f64,
    seed: u64,
) -> (Vec<LabeledDocument>, Vec<LabeledDocument>) {
    let mut by_category: BTreeMap<Category, Vec<LabeledDocument>> = BTreeMap::new();
    for doc in documents {
        by_category.entry(doc.category.clone()).or_default().push(doc);
    }

    let mut rng = fastrand::Rng::with_seed(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();
    for (_, mut docs) in by_category {
        rng.shuffle(&mut docs);
        let n = docs.len();
        let n_test = ((n as f64 * test_fraction).round() as usize).min(n.saturating_sub(1));
        let held_out = docs.split_off(n - n_test);
        train.extend(docs);
        test.extend(held_out);
    }
    (train, test)
}

/// Scores `model` on labeled documents, vectorized with `vocabulary`.
pub fn evaluate(
    vocabulary: &Vocabulary,
    model: &NaiveBayesModel,
    documents: &[LabeledDocument],
) -> Evaluation {
    let mut scores: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for doc in documents {
        let predicted = model.predict(&vocabulary.vectorize(&doc.tokens));
        let entry = scores.entry(doc.category.as_str()).or_insert((0, 0));
        entry.0 += 1;
        if predicted.category == doc.category {
            entry.1 += 1;
        }
    }

    let correct: usize = scores.values().map(|&(_, c)| c).sum();
    let accuracy = (!documents.is_empty()).then(|| correct as f64 / documents.len() as f64);
    let per_category = scores
        .into_iter()
        .map(|(category, (support, correct))| CategoryScore {
            category: category.to_string(),
            support,
            correct,
        })
        .collect();

    Evaluation {
        accuracy,
        per_category,
    }
}

/// Batch training: split, build the vocabulary on the training partition,
/// fit, then measure held-out accuracy.
pub struct TrainingPipeline {
    config: ClassifierConfig,
}

impl TrainingPipeline {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, corpus: Corpus) -> Result<TrainingOutcome> {
        self.config.validate()?;
        if corpus.is_empty() {
            return Err(ClassifierError::EmptyCorpus);
        }
        log::info!(
            "Loaded {} documents from {} categories",
            corpus.len(),
            corpus.categories().len()
        );

        let (train, test) =
            stratified_split(corpus.documents, self.config.test_fraction, self.config.seed);
        log::info!("Split into {} training and {} held-out documents", train.len(), test.len());

        let mut builder = VocabularyBuilder::new(self.config.vocabulary.clone());
        for doc in &train {
            builder.add_document(&doc.tokens);
        }
        let vocabulary = builder.build();
        if vocabulary.is_empty() {
            log::warn!("Vocabulary is empty; predictions will follow class priors only");
        } else {
            log::info!("Vocabulary holds {} tokens", vocabulary.len());
        }

        let samples: Vec<(DocumentVector, Category)> = train
            .iter()
            .map(|doc| (vocabulary.vectorize(&doc.tokens), doc.category.clone()))
            .collect();
        let model = NaiveBayesTrainer::new(self.config.alpha).fit(&samples, vocabulary.len())?;

        let evaluation = evaluate(&vocabulary, &model, &test);
        match evaluation.accuracy {
            Some(accuracy) => log::info!("Held-out accuracy: {:.4}", accuracy),
            None => log::warn!("No held-out documents; accuracy not measured"),
        }

        let report = TrainingReport {
            n_train: train.len(),
            n_test: test.len(),
            vocabulary_size: vocabulary.len(),
            evaluation: evaluation.clone(),
        };
        let artifact = ModelArtifact::new(vocabulary, model, evaluation.accuracy);
        Ok(TrainingOutcome { artifact, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(category: &str, text: &str) -> LabeledDocument {
        LabeledDocument {
            category: category.to_string(),
            tokens: text.split_whitespace().map(str::to_owned).collect(),
        }
    }

    fn corpus() -> Vec<LabeledDocument> {
        let mut docs = Vec::new();
        for i in 0..8 {
            docs.push(doc("sci.space", &format!("orbit launch shuttle space{}", i)));
            docs.push(doc("rec.autos", &format!("engine brakes sedan autos{}", i)));
        }
        docs.push(doc("talk.politics.guns", "rifle permit"));
        docs
    }

    #[test]
    fn split_is_stratified_and_keeps_a_training_doc_per_category() {
        let (train, test) = stratified_split(corpus(), 0.25, 42);
        let count = |set: &[LabeledDocument], c: &str| set.iter().filter(|d| d.category == c).count();

        assert_eq!(count(&test, "sci.space"), 2);
        assert_eq!(count(&test, "rec.autos"), 2);
        assert_eq!(count(&test, "talk.politics.guns"), 0);
        assert_eq!(count(&train, "talk.politics.guns"), 1);
        assert_eq!(train.len() + test.len(), 17);
    }

    #[test]
    fn split_is_reproducible_for_a_seed() {
        let a = stratified_split(corpus(), 0.25, 7);
        let b = stratified_split(corpus(), 0.25, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_test_fraction_holds_nothing_out() {
        let (train, test) = stratified_split(corpus(), 0.0, 42);
        assert!(test.is_empty());
        assert_eq!(train.len(), 17);
    }

    #[test]
    fn pipeline_trains_and_scores_separable_data() {
        let outcome = TrainingPipeline::new(ClassifierConfig::default())
            .run(Corpus::new(corpus()))
            .unwrap();

        let report = &outcome.report;
        assert_eq!(report.n_test, 4);
        assert_eq!(report.evaluation.accuracy, Some(1.0));
        assert_eq!(outcome.artifact.accuracy, Some(1.0));
        assert_eq!(
            outcome.artifact.categories(),
            &["rec.autos", "sci.space", "talk.politics.guns"]
        );
        // Per-document suffixes occur once each and never reach the vocabulary.
        assert!(outcome.artifact.vocabulary.index_of("space0").is_none());
        assert!(outcome.artifact.vocabulary.index_of("orbit").is_some());
        assert!(outcome.artifact.validate().is_ok());
    }

    #[test]
    fn per_category_scores_cover_held_out_categories() {
        let outcome = TrainingPipeline::new(ClassifierConfig::default())
            .run(Corpus::new(corpus()))
            .unwrap();
        let per_category = &outcome.report.evaluation.per_category;

        assert_eq!(per_category.len(), 2);
        assert!(per_category.iter().all(|s| s.support == 2 && s.recall() == Some(1.0)));
    }

    #[test]
    fn empty_corpus_is_a_configuration_error() {
        let result = TrainingPipeline::new(ClassifierConfig::default()).run(Corpus::default());
        assert!(matches!(result, Err(ClassifierError::EmptyCorpus)));
    }

    #[test]
    fn evaluate_without_documents_has_no_accuracy() {
        let vocabulary = Vocabulary::default();
        let samples = vec![(DocumentVector::new(), "a".to_string())];
        let model = NaiveBayesTrainer::new(1.0).fit(&samples, 0).unwrap();
        let evaluation = evaluate(&vocabulary, &model, &[]);
        assert_eq!(evaluation.accuracy, None);
        assert!(evaluation.per_category.is_empty());
    }
}
