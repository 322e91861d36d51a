//! CLI command definitions and handlers

mod classify;
mod init;
mod planes;
mod train;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Langdet - identify the language of a text
#[derive(Parser, Debug)]
#[command(name = "langdet")]
#[command(
    version,
    about = "Language identification from character n-gram profiles",
    after_help = "\
Examples:
  langdet train en.txt de.txt                 Train en.txt-model.json and de.txt-model.json
  langdet train en.txt --ngram-size 4 --max-ngrams 2000
  langdet train en.txt --config langdet.toml  Use thresholds from a config file
  langdet classify en.txt-model.json de.txt-model.json --test unknown.txt
  echo 'Guten Morgen' | langdet classify de=de.json en=en.json --all"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an example training config file
    Init {
        /// Where to write the config
        #[arg(default_value = "langdet.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Build a model from each corpus file (written to <FILE>-model.json)
    Train {
        /// Corpus files, one sentence or paragraph per line
        #[arg(required = true)]
        corpora: Vec<PathBuf>,

        /// TOML training config; replaces the n-gram and family flags below
        #[arg(long, short = 'c', env = "LANGDET_CONFIG")]
        config: Option<PathBuf>,

        /// Character n-gram size (0 = no n-gram features)
        #[arg(long, default_value_t = train::DEFAULT_NGRAM_SIZE, allow_negative_numbers = true)]
        ngram_size: i64,

        /// Maximum number of n-grams in the model (default: unlimited)
        #[arg(long, allow_negative_numbers = true)]
        max_ngrams: Option<i64>,

        /// Keep n-grams occurring more than this many times
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        thresh_ngrams: i64,

        /// Keep n-grams whose share of all n-grams exceeds this fraction
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        percent_ngrams: f64,

        /// Also store single-character frequencies
        #[arg(long)]
        chars: bool,

        /// Also store Unicode block frequencies
        #[arg(long)]
        planes: bool,

        /// Output path (only with a single corpus)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Identify the language of a document
    Classify {
        /// Model files, as PATH (language taken from the file name) or CODE=PATH
        #[arg(required = true)]
        models: Vec<String>,

        /// Document to classify (default: stdin)
        #[arg(long, short = 't')]
        test: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Print the score of every language, best first
        #[arg(long)]
        all: bool,
    },

    /// Show the Unicode block of each distinct character in TEXT
    Planes {
        text: String,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { path, force } => init::run(&path, force),

        Commands::Train {
            corpora,
            config,
            ngram_size,
            max_ngrams,
            thresh_ngrams,
            percent_ngrams,
            chars,
            planes,
            output,
        } => {
            let flags = train::config_from_flags(
                ngram_size,
                max_ngrams,
                thresh_ngrams,
                percent_ngrams,
                chars,
                planes,
            );
            let config = match config {
                Some(path) => {
                    for flag in train::overridden_flags(&flags) {
                        tracing::warn!("{} is ignored, using {}", flag, path.display());
                    }
                    train::load_config(&path)?
                }
                None => flags,
            };
            train::run(&corpora, &config, output.as_deref())
        }

        Commands::Classify {
            models,
            test,
            format,
            all,
        } => classify::run(&models, test.as_deref(), &format, all),

        Commands::Planes { text } => planes::run(&text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use langdet::TrainConfig;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_train_defaults() {
        let cli = Cli::try_parse_from(["langdet", "train", "en.txt"]).unwrap();
        match cli.command {
            Commands::Train {
                corpora,
                ngram_size,
                max_ngrams,
                thresh_ngrams,
                chars,
                ..
            } => {
                assert_eq!(corpora, vec![PathBuf::from("en.txt")]);
                assert_eq!(ngram_size, 3);
                assert_eq!(max_ngrams, None);
                assert_eq!(thresh_ngrams, 0);
                assert!(!chars);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_negative_ngram_size_parses() {
        let cli = Cli::try_parse_from(["langdet", "train", "en.txt", "--ngram-size", "-1"]).unwrap();
        assert!(matches!(cli.command, Commands::Train { ngram_size: -1, .. }));
    }

    #[test]
    fn test_classify_requires_models() {
        assert!(Cli::try_parse_from(["langdet", "classify"]).is_err());
    }

    #[test]
    fn test_flags_enable_only_ngrams_by_default() {
        let config: TrainConfig = train::config_from_flags(3, None, 0, 0.0, false, false);
        assert!(config.ngrams.is_some());
        assert!(config.characters.is_none());
        assert!(config.codeplanes.is_none());
    }
}
