//! Error types shared by training and classification

use thiserror::Error;

/// Errors that can occur while building or applying language models
#[derive(Error, Debug)]
pub enum LangdetError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Cannot classify against an empty model set")]
    EmptyModelSet,

    #[error(
        "Inconsistent model set: model '{language}' has ngram size {found}, expected {expected}"
    )]
    InconsistentModelSet {
        language: String,
        expected: usize,
        found: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, LangdetError>;
