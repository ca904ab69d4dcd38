//! Per-kind counts and frequency tables.
//!
//! Counting happens in integers ([`KindCounts`]) so corpus totals are exact
//! and independent of the order files are folded in. Only when the code is
//! about to be built are counts turned into `f64` weights
//! ([`FrequencyTable`]), optionally with the synthetic bias added.

use crate::bias::Bias;
use crate::kind::Kind;
use std::ops::{Add, AddAssign, Index};

/// Integer field counts for each of the 14 kinds.
///
/// Starts at zero for every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindCounts {
    counts: [u64; Kind::COUNT],
}

impl KindCounts {
    /// Create an all-zero table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more field of `kind`.
    pub fn increment(&mut self, kind: Kind) {
        self.counts[kind.index()] += 1;
    }

    pub fn get(&self, kind: Kind) -> u64 {
        self.counts[kind.index()]
    }

    pub fn set(&mut self, kind: Kind, count: u64) {
        self.counts[kind.index()] = count;
    }

    /// Element-wise sum with another table.
    pub fn merge(&mut self, other: &KindCounts) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
    }

    /// Total number of fields.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_zero(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Iterate `(kind, count)` in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Kind, u64)> + '_ {
        Kind::ALL.iter().map(move |&kind| (kind, self.get(kind)))
    }
}

impl Index<Kind> for KindCounts {
    type Output = u64;

    fn index(&self, kind: Kind) -> &u64 {
        &self.counts[kind.index()]
    }
}

impl AddAssign<&KindCounts> for KindCounts {
    fn add_assign(&mut self, other: &KindCounts) {
        self.merge(other);
    }
}

impl Add for KindCounts {
    type Output = KindCounts;

    fn add(mut self, other: KindCounts) -> KindCounts {
        self.merge(&other);
        self
    }
}

impl FromIterator<(Kind, u64)> for KindCounts {
    fn from_iter<I: IntoIterator<Item = (Kind, u64)>>(iter: I) -> Self {
        let mut counts = KindCounts::new();
        for (kind, count) in iter {
            counts.counts[kind.index()] += count;
        }
        counts
    }
}

/// Kind weights fed to the Huffman builder.
///
/// Built once from aggregated counts. The bias, if any, is applied by the
/// constructor, so a table can never be biased twice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyTable {
    weights: [f64; Kind::COUNT],
}

impl FrequencyTable {
    /// Weights equal to the raw counts.
    pub fn unbiased(counts: &KindCounts) -> Self {
        let mut weights = [0.0; Kind::COUNT];
        for (kind, count) in counts.iter() {
            weights[kind.index()] = count as f64;
        }
        Self { weights }
    }

    /// Weights equal to the raw counts plus the bias increments.
    pub fn biased(counts: &KindCounts, bias: &Bias) -> Self {
        let mut table = Self::unbiased(counts);
        for &(kind, increment) in bias.increments() {
            table.weights[kind.index()] += increment;
        }
        table
    }

    pub fn get(&self, kind: Kind) -> f64 {
        self.weights[kind.index()]
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Iterate `(kind, weight)` in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Kind, f64)> + '_ {
        Kind::ALL.iter().map(move |&kind| (kind, self.get(kind)))
    }

    /// Entries as the Huffman builder expects them, in canonical order.
    pub fn entries(&self) -> Vec<(Kind, f64)> {
        self.iter().collect()
    }
}

impl Index<Kind> for FrequencyTable {
    type Output = f64;

    fn index(&self, kind: Kind) -> &f64 {
        &self.weights[kind.index()]
    }
}
