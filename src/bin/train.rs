use anyhow::Result;
use clap::Parser;
use classifier_core::corpus::CorpusLoader;
use classifier_core::persistence::save_to_disk;
use classifier_core::training::{TrainingPipeline, TrainingReport};
use classifier_core::{ClassifierConfig, ClassifierError};
use crossterm::style::Stylize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "train")]
#[command(about = "Train the newsgroup classifier and save the model", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Corpus root with one subdirectory per category
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Where to write the trained model
    #[arg(short, long, value_name = "FILE")]
    model: Option<PathBuf>,

    /// Maximum vocabulary size
    #[arg(long)]
    max_features: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = if let Some(config_path) = cli.config {
        log::info!("Loading config from: {}", config_path.display());
        ClassifierConfig::from_toml_file(&config_path)?
    } else {
        ClassifierConfig::default()
    };

    // Override with CLI options
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(model) = cli.model {
        config.model_path = model;
    }
    if let Some(max_features) = cli.max_features {
        config.vocabulary.max_features = max_features;
    }
    config.validate()?;

    println!("Training Newsgroup Classifier...");

    let loader = CorpusLoader::new(config.max_files_per_category);
    let corpus = match loader.load(&config.data_dir) {
        Ok(corpus) => corpus,
        Err(e @ (ClassifierError::CorpusNotFound(_) | ClassifierError::EmptyCorpus)) => {
            println!("{}", format!("{}. No data found! Using keyword fallback classifier.", e).yellow());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let outcome = TrainingPipeline::new(config.clone()).run(corpus)?;
    print_report(&outcome.report);

    save_to_disk(&outcome.artifact, &config.model_path)?;
    println!("Model saved as '{}'", config.model_path.display());
    Ok(())
}

fn print_report(report: &TrainingReport) {
    println!(
        "Trained on {} documents, held out {}, vocabulary of {} tokens",
        report.n_train, report.n_test, report.vocabulary_size
    );

    for score in &report.evaluation.per_category {
        let recall = score
            .recall()
            .map(|r| format!("{:.2}%", r * 100.0))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "  {:<28} {:>3}/{:<3} {}",
            score.category, score.correct, score.support, recall
        );
    }

    match report.evaluation.accuracy {
        Some(accuracy) => println!(
            "Model accuracy: {}",
            format!("{:.4} ({:.2}%)", accuracy, accuracy * 100.0).green().bold()
        ),
        None => println!("{}", "Model accuracy: n/a (no held-out documents)".yellow()),
    }
}
