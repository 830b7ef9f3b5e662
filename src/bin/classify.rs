// Classifies one piece of text and prints a single JSON object on stdout.
// Usage: classify [--model FILE] [--config FILE] "<text>"
use clap::error::ErrorKind;
use clap::Parser;
use classifier_core::{ClassificationResult, ClassifierConfig, ClassifierEngine, ClassifierError};
use serde_json::json;
use std::path::PathBuf;
use std::process;

const USAGE_ERROR: &str = "Text argument required";

#[derive(Parser)]
#[command(name = "classify")]
#[command(about = "Classify a piece of text into a newsgroup category", long_about = None)]
struct Cli {
    /// Path to the trained model artifact
    #[arg(short, long, value_name = "FILE")]
    model: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// The text to classify (exactly one argument)
    #[arg(num_args = 0.., allow_hyphen_values = true)]
    text: Vec<String>,
}

fn main() {
    // Logs go to stderr; stdout carries only the JSON result.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            log::debug!("Argument parsing failed: {}", e);
            fail(USAGE_ERROR)
        }
    };

    let text = match cli.text.as_slice() {
        [text] => text.clone(),
        _ => fail(USAGE_ERROR),
    };

    match run(cli.model, cli.config, &text) {
        Ok(result) => match serde_json::to_string(&result) {
            Ok(line) => println!("{}", line),
            Err(e) => fail(&e.to_string()),
        },
        Err(e) => fail(&e.to_string()),
    }
}

fn run(
    model: Option<PathBuf>,
    config: Option<PathBuf>,
    text: &str,
) -> Result<ClassificationResult, ClassifierError> {
    let config = match config {
        Some(path) => ClassifierConfig::from_toml_file(&path)?,
        None => ClassifierConfig::default(),
    };
    let model_path = model.unwrap_or(config.model_path);
    let engine = ClassifierEngine::from_file_or_fallback(&model_path)?;
    log::debug!("Classifying with the {} backend", engine.backend_name());
    Ok(engine.classify(text))
}

fn fail(message: &str) -> ! {
    println!("{}", json!({ "error": message }));
    process::exit(1)
}
