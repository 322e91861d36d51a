//! Langdet - language identification from character n-gram profiles
//!
//! Each language is fingerprinted by a [`Model`]: unit-length vectors of its
//! most frequent character n-grams (optionally also single characters and
//! Unicode blocks). An unknown document is identified by the model whose
//! n-gram vector has the highest cosine similarity with the document's own.
//!
//! ```rust,ignore
//! use langdet::{classify, train, ModelSet, TrainConfig};
//!
//! let config = TrainConfig::ngrams_only(3);
//! let mut models = ModelSet::new();
//! models.insert("en", train(english_lines, &config)?);
//! models.insert("de", train(german_lines, &config)?);
//! let result = classify(["Wo ist der Bahnhof?"], &models)?;
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod train;

pub use classify::{classify, classify_reader, score_all, ClassificationResult, LanguageScore};
pub use config::{FamilyConfig, NgramConfig, TrainConfig};
pub use error::{LangdetError, Result};
pub use model::{FeatureVector, Model, ModelSet};
pub use train::{train, train_reader};
