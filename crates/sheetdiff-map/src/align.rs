//! Row and column alignment.
//!
//! Rows are keyed by one column and columns by one row; both go through the
//! same [`AlignmentStrategy`]. The shipped strategy is [`GreedyAligner`]: an
//! exact-match pass followed by a greedy fuzzy pass. It is order-dependent and
//! does not maximize total similarity, so an earlier source-A index can take a
//! candidate that a later index needed. Each pass is O(|A| x |B|).

use sheetdiff_model::{AlignOptions, Alignment, DEFAULT_SIMILARITY_THRESHOLD, Grid, MatchBasis};
use tracing::{debug, info};

use crate::normalize::normalize_text;
use crate::similarity::similarity;

/// A source index with its normalized key.
pub type KeyedIndex = (usize, String);

/// Longest key prefix written to debug logs.
const LOG_KEY_PREVIEW: usize = 50;

/// Normalized keys of every row, read from `key_col`.
///
/// Rows whose key normalizes to the empty string are left out and can never
/// be matched.
pub fn keyed_rows<G: Grid + ?Sized>(grid: &G, key_col: usize) -> Vec<KeyedIndex> {
    (1..=grid.max_row())
        .filter_map(|row| keyed(row, grid.cell(row, key_col)))
        .collect()
}

/// Normalized keys of every column, read from `key_row`.
pub fn keyed_columns<G: Grid + ?Sized>(grid: &G, key_row: usize) -> Vec<KeyedIndex> {
    (1..=grid.max_col())
        .filter_map(|col| keyed(col, grid.cell(key_row, col)))
        .collect()
}

fn keyed(index: usize, value: &sheetdiff_model::CellValue) -> Option<KeyedIndex> {
    let key = normalize_text(value);
    (!key.is_empty()).then_some((index, key))
}

/// Produces an injective partial mapping between two keyed index lists.
pub trait AlignmentStrategy {
    fn name(&self) -> &'static str;

    fn align(&self, source_a: &[KeyedIndex], source_b: &[KeyedIndex]) -> Alignment;
}

/// Exact-first, then greedy fuzzy matching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreedyAligner {
    threshold: f64,
}

impl GreedyAligner {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn from_options(options: &AlignOptions) -> Self {
        Self::new(options.similarity_threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn exact_pass(
        &self,
        source_a: &[KeyedIndex],
        source_b: &[KeyedIndex],
        used: &mut [bool],
    ) -> Alignment {
        let mut alignment = Alignment::new();
        for (a_idx, a_key) in source_a {
            let hit = source_b
                .iter()
                .enumerate()
                .find(|(pos, (_, b_key))| !used[*pos] && b_key == a_key);
            let Some((pos, (b_idx, _))) = hit else {
                continue;
            };
            if alignment.insert(*a_idx, *b_idx, MatchBasis::Exact, 1.0) {
                used[pos] = true;
                debug!(
                    source_a = a_idx,
                    source_b = b_idx,
                    key = preview(a_key),
                    "exact match"
                );
            }
        }
        alignment
    }

    fn fuzzy_pass(
        &self,
        source_a: &[KeyedIndex],
        source_b: &[KeyedIndex],
        used: &mut [bool],
        alignment: &mut Alignment,
    ) {
        for (a_idx, a_key) in source_a {
            if alignment.contains_a(*a_idx) {
                continue;
            }

            // Only a strictly better score replaces the provisional best, so on
            // ties the earliest-scanned candidate is kept.
            let mut best: Option<(usize, usize)> = None;
            let mut best_similarity = 0.0;
            for (pos, (b_idx, b_key)) in source_b.iter().enumerate() {
                if used[pos] {
                    continue;
                }
                let score = similarity(a_key, b_key);
                if score > best_similarity && score >= self.threshold {
                    best_similarity = score;
                    best = Some((pos, *b_idx));
                }
            }

            let Some((pos, b_idx)) = best else {
                continue;
            };
            if alignment.insert(*a_idx, b_idx, MatchBasis::Fuzzy, best_similarity) {
                used[pos] = true;
                debug!(
                    source_a = a_idx,
                    source_b = b_idx,
                    similarity = best_similarity,
                    "fuzzy match"
                );
            }
        }
    }
}

impl Default for GreedyAligner {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl AlignmentStrategy for GreedyAligner {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn align(&self, source_a: &[KeyedIndex], source_b: &[KeyedIndex]) -> Alignment {
        let mut used = vec![false; source_b.len()];
        let mut alignment = self.exact_pass(source_a, source_b, &mut used);
        self.fuzzy_pass(source_a, source_b, &mut used, &mut alignment);
        info!(
            keyed_a = source_a.len(),
            keyed_b = source_b.len(),
            exact = alignment.count_by_basis(MatchBasis::Exact),
            fuzzy = alignment.count_by_basis(MatchBasis::Fuzzy),
            "alignment complete"
        );
        alignment
    }
}

/// Aligns with a [`GreedyAligner`] at the given threshold.
pub fn align(source_a: &[KeyedIndex], source_b: &[KeyedIndex], threshold: f64) -> Alignment {
    GreedyAligner::new(threshold).align(source_a, source_b)
}

fn preview(key: &str) -> &str {
    match key.char_indices().nth(LOG_KEY_PREVIEW) {
        Some((end, _)) => &key[..end],
        None => key,
    }
}
