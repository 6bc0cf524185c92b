//! Index alignment between two sources.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// How a pair of indices was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchBasis {
    Exact,
    Fuzzy,
}

/// A single aligned pair with the score that justified it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedPair {
    pub source_b: usize,
    pub basis: MatchBasis,
    pub similarity: f64,
}

/// Partial injective mapping from source-A indices to source-B indices.
///
/// Each A index maps to at most one B index and each B index is used at most
/// once. Built once per comparison and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    pairs: BTreeMap<usize, AlignedPair>,
    used_b: BTreeSet<usize>,
}

impl Alignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `source_a -> source_b`.
    ///
    /// Returns `false` and leaves the alignment unchanged when either index is
    /// already taken.
    pub fn insert(
        &mut self,
        source_a: usize,
        source_b: usize,
        basis: MatchBasis,
        similarity: f64,
    ) -> bool {
        if self.pairs.contains_key(&source_a) || self.used_b.contains(&source_b) {
            return false;
        }
        self.used_b.insert(source_b);
        self.pairs.insert(
            source_a,
            AlignedPair {
                source_b,
                basis,
                similarity,
            },
        );
        true
    }

    pub fn get(&self, source_a: usize) -> Option<usize> {
        self.pairs.get(&source_a).map(|pair| pair.source_b)
    }

    pub fn pair(&self, source_a: usize) -> Option<&AlignedPair> {
        self.pairs.get(&source_a)
    }

    pub fn contains_a(&self, source_a: usize) -> bool {
        self.pairs.contains_key(&source_a)
    }

    pub fn contains_b(&self, source_b: usize) -> bool {
        self.used_b.contains(&source_b)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `(source_a, source_b)` pairs in ascending A order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs.iter().map(|(a, pair)| (*a, pair.source_b))
    }

    pub fn pairs(&self) -> impl Iterator<Item = (usize, &AlignedPair)> + '_ {
        self.pairs.iter().map(|(a, pair)| (*a, pair))
    }

    pub fn count_by_basis(&self, basis: MatchBasis) -> usize {
        self.pairs.values().filter(|pair| pair.basis == basis).count()
    }

    /// The bare mapping, without match bases.
    pub fn to_map(&self) -> BTreeMap<usize, usize> {
        self.iter().collect()
    }
}

/// One row of an audit table: which source indices were paired, and the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub source_a: usize,
    pub source_b: usize,
    pub key: CellValue,
}
