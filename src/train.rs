//! Model training
//!
//! Extracts features once, then selects and normalizes each enabled family.

use crate::config::{SelectionLimits, TrainConfig, TrainSettings};
use crate::error::Result;
use crate::features::{extract, extract_reader, normalize, select, FrequencyTable, RawFeatures};
use crate::model::{FeatureVector, Model};
use std::hash::Hash;
use std::io::BufRead;

/// Train a model from an in-memory sequence of lines.
pub fn train<I, S>(lines: I, config: &TrainConfig) -> Result<Model>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let settings = config.validate()?;
    let features = extract(lines, settings.ngram_size);
    Ok(build_model(&features, &settings))
}

/// Train a model from a reader. The config is validated before anything is read.
pub fn train_reader<R: BufRead>(reader: R, config: &TrainConfig) -> Result<Model> {
    let settings = config.validate()?;
    let features = extract_reader(reader, settings.ngram_size)?;
    Ok(build_model(&features, &settings))
}

/// Assemble a model from already extracted features.
///
/// Families without settings are left out entirely; a family whose selection
/// comes back empty is still present, as an empty vector.
pub fn build_model(features: &RawFeatures, settings: &TrainSettings) -> Model {
    if !settings.has_any_family() {
        tracing::warn!("No feature family enabled, model will be empty");
    }

    let model = Model {
        ngram_size: settings.ngram_size,
        ngrams: settings
            .ngrams
            .map(|limits| family_vector(&features.ngrams, &limits)),
        single_chars: settings
            .characters
            .map(|limits| family_vector(&features.chars, &limits)),
        unicode_planes: settings
            .codeplanes
            .map(|limits| family_vector(&features.planes, &limits)),
    };

    tracing::info!(
        "Trained model from {} lines: ngrams={:?}, chars={:?}, planes={:?}",
        features.lines,
        model.ngrams.as_ref().map(|v| v.len()),
        model.single_chars.as_ref().map(|v| v.len()),
        model.unicode_planes.as_ref().map(|v| v.len()),
    );
    model
}

fn family_vector<K>(table: &FrequencyTable<K>, limits: &SelectionLimits) -> FeatureVector
where
    K: Eq + Hash + Ord + Clone + ToString,
{
    let selected = select(table, limits);
    tracing::debug!("Selected {} of {} keys", selected.len(), table.len());
    normalize(selected.into_iter().map(|(key, count)| (key.to_string(), count)))
}
