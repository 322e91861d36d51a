//! Train command - build one model per corpus file

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use langdet::{FamilyConfig, Model, NgramConfig, TrainConfig};
use rayon::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// `--ngram-size` when not given
pub const DEFAULT_NGRAM_SIZE: i64 = 3;

/// Load a TOML training config
pub fn load_config(path: &Path) -> Result<TrainConfig> {
    TrainConfig::load(path).with_context(|| format!("Failed to load config {}", path.display()))
}

/// Build a config from command-line flags. An n-gram size of 0 leaves the
/// n-gram family out of the model altogether.
pub fn config_from_flags(
    ngram_size: i64,
    max_ngrams: Option<i64>,
    thresh_ngrams: i64,
    percent_ngrams: f64,
    chars: bool,
    planes: bool,
) -> TrainConfig {
    let ngrams = (ngram_size != 0).then(|| NgramConfig {
        ngram_size,
        max_values: max_ngrams,
        freq_thresh: thresh_ngrams,
        percent_thresh: percent_ngrams,
    });

    TrainConfig {
        ngrams,
        characters: chars.then(FamilyConfig::default),
        codeplanes: planes.then(FamilyConfig::default),
    }
}

/// Names of the flags in `flags` that differ from their defaults. A config
/// file replaces all of them.
pub fn overridden_flags(flags: &TrainConfig) -> Vec<&'static str> {
    let defaults = config_from_flags(DEFAULT_NGRAM_SIZE, None, 0, 0.0, false, false);
    let given = flags.ngrams.clone().unwrap_or_default();
    let default = defaults.ngrams.unwrap_or_default();

    let mut changed = Vec::new();
    if given.ngram_size != default.ngram_size {
        changed.push("--ngram-size");
    }
    if given.max_values != default.max_values {
        changed.push("--max-ngrams");
    }
    if given.freq_thresh != default.freq_thresh {
        changed.push("--thresh-ngrams");
    }
    if given.percent_thresh != default.percent_thresh {
        changed.push("--percent-ngrams");
    }
    if flags.characters.is_some() {
        changed.push("--chars");
    }
    if flags.codeplanes.is_some() {
        changed.push("--planes");
    }
    changed
}

/// Run the train command
pub fn run(corpora: &[PathBuf], config: &TrainConfig, output: Option<&Path>) -> Result<()> {
    if output.is_some() && corpora.len() > 1 {
        anyhow::bail!("--output can only be used when training a single corpus");
    }
    config.validate().context("Invalid training configuration")?;

    let bar = if corpora.len() > 1 {
        let bar = ProgressBar::new(corpora.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("█▓▒░  "),
        );
        bar.set_message("training");
        Some(bar)
    } else {
        None
    };

    let results: Vec<(&PathBuf, Result<(PathBuf, Model)>)> = corpora
        .par_iter()
        .map(|corpus| {
            let result = train_one(corpus, config, output);
            if let Some(bar) = &bar {
                bar.inc(1);
            }
            (corpus, result)
        })
        .collect();

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    let mut failed = 0;
    for (corpus, result) in results {
        match result {
            Ok((model_path, model)) => {
                println!(
                    "{} {} → {} ({})",
                    style("✓").green(),
                    corpus.display(),
                    style(model_path.display()).cyan(),
                    describe(&model)
                );
            }
            Err(e) => {
                failed += 1;
                eprintln!("{} {}: {:#}", style("✗").red(), corpus.display(), e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} corpora failed to train", failed, corpora.len());
    }
    Ok(())
}

fn train_one(corpus: &Path, config: &TrainConfig, output: Option<&Path>) -> Result<(PathBuf, Model)> {
    let file =
        File::open(corpus).with_context(|| format!("Failed to open {}", corpus.display()))?;
    let model = langdet::train_reader(BufReader::new(file), config)
        .with_context(|| format!("Failed to train on {}", corpus.display()))?;

    let model_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_model_path(corpus));
    model
        .save(&model_path)
        .with_context(|| format!("Failed to write model {}", model_path.display()))?;

    tracing::info!("Model saved to {}", model_path.display());
    Ok((model_path, model))
}

/// `<corpus>-model.json` next to the corpus
pub fn default_model_path(corpus: &Path) -> PathBuf {
    let mut path = corpus.as_os_str().to_owned();
    path.push("-model.json");
    PathBuf::from(path)
}

fn describe(model: &Model) -> String {
    let families: Vec<String> = model
        .families()
        .into_iter()
        .filter_map(|family| {
            model
                .family(family)
                .map(|vector| format!("{} {}", vector.len(), family.name()))
        })
        .collect();
    if families.is_empty() {
        "empty model".to_string()
    } else {
        families.join(", ")
    }
}
