//! Streaming feature extraction
//!
//! One pass over a sequence of lines produces three frequency tables:
//! character n-grams, single characters and code planes. N-grams never
//! cross a line boundary.

use super::plane::{code_plane, CodePlane};
use rustc_hash::FxHashMap;
use std::hash::Hash;
use std::io::BufRead;

/// Occurrence counts keyed by feature. Keys with a zero count are never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<K: Eq + Hash> {
    counts: FxHashMap<K, u64>,
}

impl<K: Eq + Hash> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            counts: FxHashMap::default(),
        }
    }
}

impl<K: Eq + Hash> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Count for `key`, 0 when absent
    pub fn get(&self, key: &K) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.counts.iter().map(|(k, &v)| (k, v))
    }
}

impl<K: Eq + Hash> FromIterator<(K, u64)> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, count) in iter {
            if count > 0 {
                *table.counts.entry(key).or_insert(0) += count;
            }
        }
        table
    }
}

/// The three raw tables produced by one extraction pass
#[derive(Debug, Clone, Default)]
pub struct RawFeatures {
    pub ngrams: FrequencyTable<String>,
    pub chars: FrequencyTable<char>,
    pub planes: FrequencyTable<CodePlane>,
    /// Lines consumed, including empty ones
    pub lines: usize,
}

/// Incremental extractor: feed lines, then call [`FeatureExtractor::finish`].
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    ngram_size: usize,
    features: RawFeatures,
    buf: Vec<char>,
}

impl FeatureExtractor {
    /// `ngram_size` of 0 disables n-gram extraction.
    pub fn new(ngram_size: usize) -> Self {
        Self {
            ngram_size,
            features: RawFeatures::default(),
            buf: Vec::new(),
        }
    }

    pub fn ngram_size(&self) -> usize {
        self.ngram_size
    }

    /// Count one line. The last window of each line is not counted: a window
    /// starting at `i` is taken only when `i + ngram_size < len`.
    pub fn push_line(&mut self, line: &str) {
        self.count_line(line, false);
    }

    /// Count a line read from a stream, without its terminator. Only the
    /// window over the terminator is dropped, so every window inside the
    /// line is counted.
    pub fn push_terminated_line(&mut self, line: &str) {
        self.count_line(line, true);
    }

    fn count_line(&mut self, line: &str, terminated: bool) {
        self.features.lines += 1;
        if line.is_empty() {
            return;
        }

        self.buf.clear();
        self.buf.extend(line.chars());

        for &c in &self.buf {
            self.features.chars.increment(c);
            self.features.planes.increment(code_plane(c));
        }

        let w = self.ngram_size;
        let len = self.buf.len() + usize::from(terminated);
        if w > 0 && len > w {
            for window in self.buf.windows(w).take(len - w) {
                self.features.ngrams.increment(window.iter().collect());
            }
        }
    }

    pub fn finish(self) -> RawFeatures {
        let features = self.features;
        tracing::debug!(
            "Extracted {} lines: {} ngrams, {} chars, {} planes",
            features.lines,
            features.ngrams.len(),
            features.chars.len(),
            features.planes.len()
        );
        features
    }
}

/// Extract features from an in-memory sequence of lines.
pub fn extract<I, S>(lines: I, ngram_size: usize) -> RawFeatures
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut extractor = FeatureExtractor::new(ngram_size);
    for line in lines {
        extractor.push_line(line.as_ref());
    }
    extractor.finish()
}

/// Extract features from a reader, one line at a time.
///
/// `\n` and `\r\n` terminators are not counted as characters, but a
/// terminated line keeps its last n-gram. A final line without a terminator
/// is counted like an in-memory line.
pub fn extract_reader<R: BufRead>(
    mut reader: R,
    ngram_size: usize,
) -> std::io::Result<RawFeatures> {
    let mut extractor = FeatureExtractor::new(ngram_size);
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        match line.strip_suffix('\n') {
            Some(rest) => {
                extractor.push_terminated_line(rest.strip_suffix('\r').unwrap_or(rest))
            }
            None => extractor.push_line(&line),
        }
    }
    Ok(extractor.finish())
}
