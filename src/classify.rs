//! Classification against a set of language models
//!
//! The query document's full n-gram table is normalized (no top-K pruning)
//! and dotted with each model's n-gram vector. Both sides have unit length,
//! so the dot product is the cosine similarity. Only the n-gram family takes
//! part in scoring.

use crate::error::Result;
use crate::features::{extract, extract_reader, normalize, RawFeatures};
use crate::model::{FeatureVector, Model, ModelSet};
use rayon::prelude::*;
use serde::Serialize;
use std::io::BufRead;

/// Best language for a document, or no match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// `None` when no model scored above zero
    pub language: Option<String>,
    pub similarity: f64,
}

impl ClassificationResult {
    pub fn no_match() -> Self {
        Self {
            language: None,
            similarity: 0.0,
        }
    }

    pub fn is_match(&self) -> bool {
        self.language.is_some()
    }
}

/// Similarity of a document to one language
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageScore {
    pub language: String,
    pub similarity: f64,
}

/// Classify an in-memory sequence of lines.
pub fn classify<I, S>(lines: I, models: &ModelSet) -> Result<ClassificationResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(best_match(&score_all(lines, models)?))
}

/// Classify the lines of a reader.
pub fn classify_reader<R: BufRead>(reader: R, models: &ModelSet) -> Result<ClassificationResult> {
    Ok(best_match(&score_all_reader(reader, models)?))
}

/// Score a document against every model, best first.
pub fn score_all<I, S>(lines: I, models: &ModelSet) -> Result<Vec<LanguageScore>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ngram_size = models.ngram_size()?;
    Ok(rank(&extract(lines, ngram_size), models))
}

pub fn score_all_reader<R: BufRead>(reader: R, models: &ModelSet) -> Result<Vec<LanguageScore>> {
    let ngram_size = models.ngram_size()?;
    Ok(rank(&extract_reader(reader, ngram_size)?, models))
}

/// Rank every model by similarity to already extracted features.
///
/// Ordering is similarity descending, then language ascending, so equal
/// scores always resolve the same way.
pub fn rank(features: &RawFeatures, models: &ModelSet) -> Vec<LanguageScore> {
    let query = normalize(
        features
            .ngrams
            .iter()
            .map(|(ngram, count)| (ngram.clone(), count)),
    );

    let entries: Vec<(&str, &Model)> = models.iter().collect();
    let mut scores: Vec<LanguageScore> = entries
        .into_par_iter()
        .map(|(language, model)| LanguageScore {
            language: language.to_string(),
            similarity: similarity(&query, model),
        })
        .collect();

    scores.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then_with(|| a.language.cmp(&b.language))
    });

    for score in &scores {
        tracing::debug!("{}: {:.6}", score.language, score.similarity);
    }
    scores
}

/// Dot product of a normalized query n-gram vector with a model's n-grams.
/// Model keys missing from the query contribute nothing.
pub fn similarity(query: &FeatureVector, model: &Model) -> f64 {
    model
        .ngrams
        .as_ref()
        .map(|ngrams| {
            ngrams
                .iter()
                .filter_map(|(ngram, weight)| query.get(ngram).map(|q| q * weight))
                .sum::<f64>()
        })
        .unwrap_or(0.0)
}

/// Head of a ranking, if it scored strictly above zero.
pub fn best_match(ranking: &[LanguageScore]) -> ClassificationResult {
    let result = ranking
        .first()
        .filter(|best| best.similarity > 0.0)
        .map(|best| ClassificationResult {
            language: Some(best.language.clone()),
            similarity: best.similarity,
        })
        .unwrap_or_else(ClassificationResult::no_match);

    match &result.language {
        Some(language) => tracing::info!("Best match: {} ({:.4})", language, result.similarity),
        None => tracing::info!("No model matched"),
    }
    result
}
