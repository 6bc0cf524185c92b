//! Word-set similarity between normalized keys.

use std::collections::BTreeSet;

/// Jaccard index of the whitespace-separated word sets of two keys.
///
/// Both empty scores `1.0`, exactly one empty scores `0.0`. Word order and
/// repetition are ignored, so `"a b"` and `"b a a"` score `1.0`.
pub fn similarity(left: &str, right: &str) -> f64 {
    let left_words: BTreeSet<&str> = left.split_whitespace().collect();
    let right_words: BTreeSet<&str> = right.split_whitespace().collect();

    match (left_words.is_empty(), right_words.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let intersection = left_words.intersection(&right_words).count();
    let union = left_words.union(&right_words).count();
    intersection as f64 / union as f64
}
