//! L2 normalization of sparse count vectors

use std::collections::BTreeMap;

/// Rescale counts so the vector has unit Euclidean length.
///
/// An empty or all-zero input has no direction; every key is kept with a
/// weight of 0.0 instead of dividing by zero.
pub fn normalize<K, I>(counts: I) -> BTreeMap<K, f64>
where
    K: Ord,
    I: IntoIterator<Item = (K, u64)>,
{
    let counts: Vec<(K, u64)> = counts.into_iter().collect();
    let norm = counts
        .iter()
        .map(|&(_, c)| {
            let c = c as f64;
            c * c
        })
        .sum::<f64>()
        .sqrt();

    if norm == 0.0 {
        return counts.into_iter().map(|(k, _)| (k, 0.0)).collect();
    }

    counts
        .into_iter()
        .map(|(k, c)| (k, c as f64 / norm))
        .collect()
}

/// Sum of squared weights; 1.0 for a normalized non-zero vector.
pub fn squared_norm<'a, K: 'a>(vector: impl IntoIterator<Item = (&'a K, &'a f64)>) -> f64 {
    vector.into_iter().map(|(_, w)| w * w).sum()
}
