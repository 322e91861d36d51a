//! Training configuration
//!
//! A `TrainConfig` names which feature families go into a model and how
//! aggressively each one is pruned. It is usually loaded from a TOML file:
//!
//! ```toml
//! [ngrams]
//! ngram_size = 3
//! max_values = 1000
//!
//! [characters]
//! freq_thresh = 2
//! ```
//!
//! Sections that are absent disable their family. Keys may also be written
//! in camelCase (`ngramSize`, `maxValues`, ...). Unknown sections and keys
//! are rejected.

use crate::error::{LangdetError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Thresholds for a single feature family
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FamilyConfig {
    /// Keep at most this many of the most frequent keys (None = unbounded)
    #[serde(alias = "maxValues", skip_serializing_if = "Option::is_none")]
    pub max_values: Option<i64>,

    /// Keep only keys that occur more than this many times
    #[serde(alias = "freqThresh")]
    pub freq_thresh: i64,

    /// Keep only keys whose share of all occurrences exceeds this fraction
    #[serde(alias = "percentThresh")]
    pub percent_thresh: f64,
}

impl Default for FamilyConfig {
    fn default() -> Self {
        Self {
            max_values: None,
            freq_thresh: 0,
            percent_thresh: 0.0,
        }
    }
}

impl FamilyConfig {
    /// Convert to selection limits, rejecting negative or non-finite values.
    pub fn limits(&self, family: &str) -> Result<SelectionLimits> {
        let top_n = match self.max_values {
            Some(n) => Some(usize::try_from(n).map_err(|_| {
                LangdetError::Configuration(format!(
                    "{family}.max_values must not be negative (got {n})"
                ))
            })?),
            None => None,
        };

        let count_threshold = u64::try_from(self.freq_thresh).map_err(|_| {
            LangdetError::Configuration(format!(
                "{family}.freq_thresh must not be negative (got {})",
                self.freq_thresh
            ))
        })?;

        if !self.percent_thresh.is_finite() || self.percent_thresh < 0.0 {
            return Err(LangdetError::Configuration(format!(
                "{family}.percent_thresh must be a non-negative number (got {})",
                self.percent_thresh
            )));
        }

        Ok(SelectionLimits {
            top_n,
            count_threshold,
            share_threshold: self.percent_thresh,
        })
    }
}

/// N-gram family settings: the window width plus the usual thresholds
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct NgramConfig {
    /// Window width in characters (0 disables extraction)
    #[serde(alias = "ngramSize")]
    pub ngram_size: i64,

    #[serde(alias = "maxValues", skip_serializing_if = "Option::is_none")]
    pub max_values: Option<i64>,

    #[serde(alias = "freqThresh")]
    pub freq_thresh: i64,

    #[serde(alias = "percentThresh")]
    pub percent_thresh: f64,
}

impl NgramConfig {
    pub fn new(ngram_size: i64) -> Self {
        Self {
            ngram_size,
            ..Default::default()
        }
    }

    pub fn with_max_values(mut self, max_values: i64) -> Self {
        self.max_values = Some(max_values);
        self
    }

    /// The selection thresholds, without the window width
    pub fn family(&self) -> FamilyConfig {
        FamilyConfig {
            max_values: self.max_values,
            freq_thresh: self.freq_thresh,
            percent_thresh: self.percent_thresh,
        }
    }
}

/// Which feature families to train, and their thresholds
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ngrams: Option<NgramConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub characters: Option<FamilyConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub codeplanes: Option<FamilyConfig>,
}

/// Validated limits handed to the feature selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionLimits {
    pub top_n: Option<usize>,
    pub count_threshold: u64,
    pub share_threshold: f64,
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self {
            top_n: None,
            count_threshold: 0,
            share_threshold: 0.0,
        }
    }
}

/// A `TrainConfig` after validation: all values are in range and typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainSettings {
    pub ngram_size: usize,
    pub ngrams: Option<SelectionLimits>,
    pub characters: Option<SelectionLimits>,
    pub codeplanes: Option<SelectionLimits>,
}

impl TrainSettings {
    pub fn has_any_family(&self) -> bool {
        self.ngrams.is_some() || self.characters.is_some() || self.codeplanes.is_some()
    }
}

impl TrainConfig {
    /// Config with only the n-gram family enabled
    pub fn ngrams_only(ngram_size: i64) -> Self {
        Self {
            ngrams: Some(NgramConfig::new(ngram_size)),
            ..Default::default()
        }
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Check every value and produce typed settings.
    pub fn validate(&self) -> Result<TrainSettings> {
        let mut settings = TrainSettings::default();

        if let Some(ngrams) = &self.ngrams {
            settings.ngram_size = usize::try_from(ngrams.ngram_size).map_err(|_| {
                LangdetError::Configuration(format!(
                    "ngrams.ngram_size must not be negative (got {})",
                    ngrams.ngram_size
                ))
            })?;
            settings.ngrams = Some(ngrams.family().limits("ngrams")?);
        }
        if let Some(characters) = &self.characters {
            settings.characters = Some(characters.limits("characters")?);
        }
        if let Some(codeplanes) = &self.codeplanes {
            settings.codeplanes = Some(codeplanes.limits("codeplanes")?);
        }

        Ok(settings)
    }

    /// Annotated example config, written by `langdet init`
    pub fn example_toml() -> &'static str {
        r#"# langdet training configuration
# Remove a section to leave that feature family out of the model.

[ngrams]
# Window width in characters (0 = no n-grams)
ngram_size = 3
# Keep at most this many n-grams (omit for no limit)
max_values = 1000
# Keep n-grams seen more than this many times
freq_thresh = 0
# Keep n-grams whose share of all n-grams exceeds this fraction
percent_thresh = 0.0

# [characters]
# max_values = 200
# freq_thresh = 0
# percent_thresh = 0.0

# [codeplanes]
# freq_thresh = 0
"#
    }
}
