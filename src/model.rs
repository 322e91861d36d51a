//! Language models and model sets
//!
//! A [`Model`] is one language's fingerprint: the n-gram width it was built
//! with plus up to three unit-length feature vectors. Models are persisted as
//! JSON:
//!
//! ```json
//! { "ngramSize": 3, "ngrams": { "the": 0.41, "he ": 0.37 } }
//! ```

use crate::error::{LangdetError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Feature key → weight, ordered by key so serialized models are stable
pub type FeatureVector = BTreeMap<String, f64>;

/// Feature families a model can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Ngrams,
    SingleChars,
    UnicodePlanes,
}

impl Family {
    pub fn all() -> &'static [Family] {
        &[Family::Ngrams, Family::SingleChars, Family::UnicodePlanes]
    }

    /// Key used in persisted models
    pub fn name(&self) -> &'static str {
        match self {
            Family::Ngrams => "ngrams",
            Family::SingleChars => "singleChars",
            Family::UnicodePlanes => "unicodePlanes",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// N-gram window width used at training time (0 = n-grams disabled)
    #[serde(default)]
    pub ngram_size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ngrams: Option<FeatureVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_chars: Option<FeatureVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unicode_planes: Option<FeatureVector>,
}

impl Model {
    pub fn family(&self, family: Family) -> Option<&FeatureVector> {
        match family {
            Family::Ngrams => self.ngrams.as_ref(),
            Family::SingleChars => self.single_chars.as_ref(),
            Family::UnicodePlanes => self.unicode_planes.as_ref(),
        }
    }

    /// Families present in this model
    pub fn families(&self) -> Vec<Family> {
        Family::all()
            .iter()
            .copied()
            .filter(|f| self.family(*f).is_some())
            .collect()
    }

    /// Load a model from JSON
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save model to JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Language code → model, iterated in language order
#[derive(Debug, Clone, Default)]
pub struct ModelSet {
    models: BTreeMap<String, Model>,
}

impl ModelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model, returning the one it replaced
    pub fn insert(&mut self, language: impl Into<String>, model: Model) -> Option<Model> {
        self.models.insert(language.into(), model)
    }

    pub fn get(&self, language: &str) -> Option<&Model> {
        self.models.get(language)
    }

    pub fn contains(&self, language: &str) -> bool {
        self.models.contains_key(language)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Model)> {
        self.models.iter().map(|(lang, model)| (lang.as_str(), model))
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// The n-gram width shared by every model in the set.
    pub fn ngram_size(&self) -> Result<usize> {
        let mut models = self.models.iter();
        let (_, first) = models.next().ok_or(LangdetError::EmptyModelSet)?;
        let expected = first.ngram_size;

        for (language, model) in models {
            if model.ngram_size != expected {
                return Err(LangdetError::InconsistentModelSet {
                    language: language.clone(),
                    expected,
                    found: model.ngram_size,
                });
            }
        }
        Ok(expected)
    }
}

impl<S: Into<String>> FromIterator<(S, Model)> for ModelSet {
    fn from_iter<I: IntoIterator<Item = (S, Model)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (language, model) in iter {
            set.insert(language, model);
        }
        set
    }
}
