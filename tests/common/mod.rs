#![allow(dead_code)]

use classifier_core::corpus::CorpusLoader;
use classifier_core::persistence::{save_to_disk, ModelArtifact};
use classifier_core::training::TrainingPipeline;
use classifier_core::ClassifierConfig;
use std::fs;
use std::path::Path;

const BASEBALL: &[&str] = &["homerun", "dugout", "umpire", "batting"];
const HOCKEY: &[&str] = &["goalie", "rink", "skates", "faceoff"];
const SPACE: &[&str] = &["orbit", "rocket", "shuttle", "satellite"];

fn write_category(root: &Path, category: &str, count: usize, body: impl Fn(usize) -> String) {
    let dir = root.join(category);
    fs::create_dir_all(&dir).unwrap();
    for i in 0..count {
        let text = format!(
            "From: poster{i}@example.com\nSubject: {category} thread {i}\n\n{}\n",
            body(i)
        );
        fs::write(dir.join(format!("{:05}", 50_000 + i)), text).unwrap();
    }
}

/// Three categories; sci.space has the most documents and therefore the
/// highest prior. "forum" appears in every document.
pub fn write_newsgroups(root: &Path) {
    write_category(root, "rec.sport.baseball", 12, |i| {
        format!(
            "Forum post: the baseball pitcher threw {} innings this weekend. Playing {} again!",
            i + 3,
            BASEBALL[i % BASEBALL.len()]
        )
    });
    write_category(root, "rec.sport.hockey", 12, |i| {
        format!(
            "forum: hockey puck and {} talk, the goalie's night. Period {}.",
            HOCKEY[i % HOCKEY.len()],
            i
        )
    });
    write_category(root, "sci.space", 16, |i| {
        format!(
            "FORUM - NASA launch window for the {} mission; telemetry {}.",
            SPACE[i % SPACE.len()],
            SPACE[(i + 1) % SPACE.len()]
        )
    });
}

pub fn write_single_category(root: &Path) {
    write_category(root, "sci.space", 8, |i| {
        format!("orbit rocket {} telemetry", SPACE[i % SPACE.len()])
    });
}

pub fn train(data_dir: &Path, config: ClassifierConfig) -> ModelArtifact {
    let corpus = CorpusLoader::new(config.max_files_per_category)
        .load(data_dir)
        .unwrap();
    TrainingPipeline::new(config).run(corpus).unwrap().artifact
}

pub fn train_to(data_dir: &Path, model_path: &Path) -> ModelArtifact {
    let artifact = train(data_dir, ClassifierConfig::default());
    save_to_disk(&artifact, model_path).unwrap();
    artifact
}
