//! Top-K feature selection

use super::extract::FrequencyTable;
use crate::config::SelectionLimits;
use std::collections::BTreeMap;
use std::hash::Hash;

/// Reduce a frequency table to its most frequent keys.
///
/// Keys are ranked by count descending, ties broken by key ascending, and the
/// ranking is cut at `limits.top_n`. Of those, a key survives only when its
/// count is strictly above `count_threshold` and its share of the table total
/// is strictly above `share_threshold`.
pub fn select<K>(table: &FrequencyTable<K>, limits: &SelectionLimits) -> BTreeMap<K, u64>
where
    K: Eq + Hash + Ord + Clone,
{
    let total = table.total();
    if total == 0 {
        return BTreeMap::new();
    }

    let mut ranked: Vec<(&K, u64)> = table.iter().collect();
    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    if let Some(top_n) = limits.top_n {
        ranked.truncate(top_n);
    }

    let total = total as f64;
    ranked
        .into_iter()
        .filter(|&(_, count)| {
            count > limits.count_threshold && count as f64 / total > limits.share_threshold
        })
        .map(|(key, count)| (key.clone(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&'static str, u64)]) -> FrequencyTable<&'static str> {
        entries.iter().copied().collect()
    }

    fn limits(top_n: Option<usize>, count: u64, share: f64) -> SelectionLimits {
        SelectionLimits {
            top_n,
            count_threshold: count,
            share_threshold: share,
        }
    }

    #[test]
    fn test_unbounded_keeps_everything() {
        let t = table(&[("a", 5), ("b", 3), ("c", 1)]);
        let selected = select(&t, &SelectionLimits::default());
        assert_eq!(selected.len(), 3);
        assert_eq!(selected[&"a"], 5);
    }

    #[test]
    fn test_top_n_truncates_most_frequent() {
        let t = table(&[("a", 5), ("b", 3), ("c", 1), ("d", 4)]);
        let selected = select(&t, &limits(Some(2), 0, 0.0));
        assert_eq!(selected.keys().copied().collect::<Vec<_>>(), vec!["a", "d"]);
    }

    #[test]
    fn test_ties_break_on_key() {
        let t = table(&[("z", 2), ("m", 2), ("a", 2), ("q", 9)]);
        let selected = select(&t, &limits(Some(3), 0, 0.0));
        assert_eq!(
            selected.keys().copied().collect::<Vec<_>>(),
            vec!["a", "m", "q"]
        );
    }

    #[test]
    fn test_count_threshold_is_strict() {
        let t = table(&[("a", 3), ("b", 2), ("c", 1)]);
        let selected = select(&t, &limits(None, 2, 0.0));
        assert_eq!(selected.keys().copied().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_share_threshold_is_strict() {
        // total = 10: shares 0.5, 0.3, 0.2
        let t = table(&[("a", 5), ("b", 3), ("c", 2)]);
        let selected = select(&t, &limits(None, 0, 0.2));
        assert_eq!(selected.keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_thresholds_apply_after_truncation() {
        let t = table(&[("a", 5), ("b", 3), ("c", 2)]);
        let selected = select(&t, &limits(Some(1), 5, 0.0));
        assert!(selected.is_empty());
    }

    #[test]
    fn test_zero_top_n_is_empty() {
        let t = table(&[("a", 5)]);
        assert!(select(&t, &limits(Some(0), 0, 0.0)).is_empty());
    }

    #[test]
    fn test_empty_table_short_circuits() {
        let t: FrequencyTable<&str> = FrequencyTable::new();
        assert!(select(&t, &limits(None, 0, 0.5)).is_empty());
    }

    #[test]
    fn test_every_selected_key_satisfies_limits() {
        let entries: Vec<(String, u64)> = (0..50u64).map(|i| (format!("k{i}"), i % 7 + 1)).collect();
        let t: FrequencyTable<String> = entries.into_iter().collect();
        let total = t.total() as f64;
        let l = limits(Some(20), 3, 0.01);
        let selected = select(&t, &l);
        assert!(selected.len() <= 20);
        for (_, &count) in &selected {
            assert!(count > 3);
            assert!(count as f64 / total > 0.01);
        }
    }
}
