//! Huffman code construction.
//!
//! Classic greedy construction: every entry starts as a leaf weighted by its
//! frequency; the two lightest nodes are merged until one root remains; the
//! code of a leaf is its path from the root (`0` = first extracted child,
//! `1` = second).
//!
//! # Determinism
//!
//! Every node gets a sequence number when it is created: leaves `0..n` in
//! input order, merged nodes after both children. Ties on weight are broken
//! by the lower sequence number, so equal inputs always give equal codes.
//!
//! # Edge Cases
//!
//! - No entries: empty codebook
//! - One entry: that entry gets `"0"` (an empty code could not be delimited)
//! - Zero weights are valid and never dropped
//!
//! # Example
//! ```
//! use bagstat_core::huffman::Codebook;
//!
//! let book = Codebook::from_frequencies(&[('a', 1.0), ('b', 1.0), ('c', 2.0)]).unwrap();
//! assert_eq!(book.code(&'c'), Some("0"));
//! assert_eq!(book.code(&'a'), Some("10"));
//! assert_eq!(book.code(&'b'), Some("11"));
//! ```

use crate::error::{HuffmanError, Result};
use crate::kind::Kind;
use crate::stats::FrequencyTable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A node of the merge tree. Its index in the arena is its sequence number.
#[derive(Debug, Clone, Copy)]
enum Node {
    /// Index into the input entries
    Leaf(usize),
    /// Children: `zero` was extracted first
    Internal { zero: usize, one: usize },
}

/// Heap entry: a node with its total weight.
#[derive(Debug, Clone, Copy)]
struct Pending {
    weight: f64,
    seq: usize,
}

// Implement ordering for the heap (min-heap: lightest, then oldest, first)
impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Prefix code assigning a bit string to every input entry.
///
/// Entries keep their input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codebook<K> {
    codes: Vec<(K, String)>,
}

impl<K: Clone + PartialEq> Codebook<K> {
    /// Build an optimal prefix code over `(symbol, weight)` entries.
    ///
    /// # Errors
    /// `HuffmanError::InvalidWeight` if any weight is negative, NaN or
    /// infinite.
    pub fn from_frequencies(entries: &[(K, f64)]) -> Result<Self> {
        let mut nodes = Vec::with_capacity(entries.len() * 2);
        let mut heap = BinaryHeap::with_capacity(entries.len());

        for (index, (_, weight)) in entries.iter().enumerate() {
            let weight = *weight;
            if !weight.is_finite() || weight < 0.0 {
                return Err(HuffmanError::InvalidWeight { index, weight }.into());
            }

            // -0.0 would sort below 0.0 under total_cmp
            let weight = if weight == 0.0 { 0.0 } else { weight };

            heap.push(Pending {
                weight,
                seq: nodes.len(),
            });
            nodes.push(Node::Leaf(index));
        }

        if heap.len() == 1 {
            return Ok(Self {
                codes: vec![(entries[0].0.clone(), "0".to_string())],
            });
        }

        let root = match Self::merge(&mut nodes, heap) {
            Some(root) => root,
            None => return Ok(Self { codes: Vec::new() }),
        };

        let mut codes: Vec<Option<String>> = vec![None; entries.len()];
        let mut stack = vec![(root, String::new())];

        while let Some((node, prefix)) = stack.pop() {
            match nodes[node] {
                Node::Leaf(index) => codes[index] = Some(prefix),
                Node::Internal { zero, one } => {
                    stack.push((one, format!("{}1", prefix)));
                    stack.push((zero, format!("{}0", prefix)));
                }
            }
        }

        let codes = entries
            .iter()
            .zip(codes)
            .map(|((symbol, _), code)| (symbol.clone(), code.unwrap_or_default()))
            .collect();

        Ok(Self { codes })
    }

    /// Merge the two lightest nodes until one remains; returns the root.
    fn merge(nodes: &mut Vec<Node>, mut heap: BinaryHeap<Pending>) -> Option<usize> {
        while heap.len() > 1 {
            let (Some(zero), Some(one)) = (heap.pop(), heap.pop()) else {
                break;
            };

            heap.push(Pending {
                weight: zero.weight + one.weight,
                seq: nodes.len(),
            });
            nodes.push(Node::Internal {
                zero: zero.seq,
                one: one.seq,
            });
        }

        heap.pop().map(|root| root.seq)
    }

    /// Code assigned to `symbol`.
    pub fn code(&self, symbol: &K) -> Option<&str> {
        self.codes
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, code)| code.as_str())
    }

    /// Number of coded symbols.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate `(symbol, code)` in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &str)> {
        self.codes.iter().map(|(s, code)| (s, code.as_str()))
    }

    /// Length of the longest code (0 if empty).
    pub fn max_code_len(&self) -> usize {
        self.codes.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        self.codes.iter().enumerate().all(|(i, (_, a))| {
            self.codes
                .iter()
                .enumerate()
                .all(|(j, (_, b))| i == j || !b.starts_with(a.as_str()))
        })
    }

    /// Total encoded size in bits: sum of weight times code length.
    ///
    /// Symbols missing from the codebook contribute nothing.
    pub fn weighted_bits(&self, weights: &[(K, f64)]) -> f64 {
        weights
            .iter()
            .filter_map(|(symbol, weight)| self.code(symbol).map(|c| weight * c.len() as f64))
            .sum()
    }
}

impl Codebook<Kind> {
    /// Build the code for a kind frequency table, in canonical kind order.
    pub fn for_table(table: &FrequencyTable) -> Result<Self> {
        Self::from_frequencies(&table.entries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lengths<K: Clone + PartialEq>(book: &Codebook<K>) -> Vec<usize> {
        book.iter().map(|(_, c)| c.len()).collect()
    }

    #[test]
    fn test_empty_table() {
        let book = Codebook::<char>::from_frequencies(&[]).unwrap();
        assert!(book.is_empty());
        assert_eq!(book.max_code_len(), 0);
    }

    #[test]
    fn test_single_entry_gets_zero() {
        let book = Codebook::from_frequencies(&[(Kind::Int16, 42.0)]).unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(book.code(&Kind::Int16), Some("0"));

        // even with zero weight
        let book = Codebook::from_frequencies(&[("x", 0.0)]).unwrap();
        assert_eq!(book.code(&"x"), Some("0"));
    }

    #[test]
    fn test_two_entries() {
        let book = Codebook::from_frequencies(&[('a', 9.0), ('b', 1.0)]).unwrap();
        // 'b' is lighter, so it is extracted first
        assert_eq!(book.code(&'b'), Some("0"));
        assert_eq!(book.code(&'a'), Some("1"));
    }

    #[test]
    fn test_tie_break_by_sequence_number() {
        let book = Codebook::from_frequencies(&[('a', 1.0), ('b', 1.0), ('c', 2.0)]).unwrap();
        // c (leaf, seq 2) beats the merged (a, b) node (seq 3) at weight 2
        assert_eq!(book.code(&'c'), Some("0"));
        assert_eq!(book.code(&'a'), Some("10"));
        assert_eq!(book.code(&'b'), Some("11"));
    }

    #[test]
    fn test_deterministic() {
        let entries: Vec<(usize, f64)> = (0..14).map(|i| (i, (i % 3) as f64)).collect();
        let a = Codebook::from_frequencies(&entries).unwrap();
        let b = Codebook::from_frequencies(&entries).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_entries_are_kept() {
        let entries = [('a', 0.0), ('b', 0.0), ('c', 0.0)];
        let book = Codebook::from_frequencies(&entries).unwrap();
        assert_eq!(book.len(), 3);
        assert!(book.is_prefix_free());
        assert_eq!(book.code(&'a'), Some("10"));
        assert_eq!(book.code(&'b'), Some("11"));
        assert_eq!(book.code(&'c'), Some("0"));
    }

    #[test]
    fn test_uniform_fourteen() {
        let entries: Vec<(Kind, f64)> = Kind::ALL.iter().map(|&k| (k, 1.0)).collect();
        let book = Codebook::from_frequencies(&entries).unwrap();

        // ceil(log2(14)) = 4
        for len in lengths(&book) {
            assert!((3..=5).contains(&len), "length {}", len);
        }
        let mut sorted = lengths(&book);
        sorted.sort_unstable();
        assert_eq!(sorted.iter().filter(|&&l| l == 3).count(), 2);
        assert_eq!(sorted.iter().filter(|&&l| l == 4).count(), 12);
        assert!(book.is_prefix_free());
    }

    #[test]
    fn test_dominant_null_scenario() {
        let entries: Vec<(Kind, f64)> = Kind::ALL
            .iter()
            .map(|&k| {
                let w = match k {
                    Kind::Null => 5.0,
                    Kind::Boolean => 3.0,
                    Kind::Int4 => 1.0,
                    _ => 0.0,
                };
                (k, w)
            })
            .collect();
        let book = Codebook::from_frequencies(&entries).unwrap();

        let len = |k: Kind| book.code(&k).map(str::len).unwrap();
        for kind in Kind::ALL {
            if kind != Kind::Null {
                assert!(len(Kind::Null) < len(kind));
            }
        }
        for &(kind, weight) in &entries {
            if weight == 0.0 {
                assert!(len(kind) >= len(Kind::Int4), "{}", kind);
            }
        }
        assert_eq!(len(Kind::Null), 1);
        assert_eq!(len(Kind::Boolean), 2);
        assert_eq!(len(Kind::Int4), 3);
    }

    #[test]
    fn test_invalid_weights() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let result = Codebook::from_frequencies(&[('a', 1.0), ('b', bad)]);
            assert!(matches!(
                result,
                Err(crate::Error::Huffman(HuffmanError::InvalidWeight { index: 1, .. }))
            ));
        }
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let a = Codebook::from_frequencies(&[('a', 0.0), ('b', -0.0), ('c', 0.0)]).unwrap();
        let b = Codebook::from_frequencies(&[('a', 0.0), ('b', 0.0), ('c', 0.0)]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_weighted_bits() {
        let entries = [('a', 4.0), ('b', 2.0), ('c', 1.0), ('d', 1.0)];
        let book = Codebook::from_frequencies(&entries).unwrap();
        // lengths 1, 2, 3, 3
        assert_eq!(book.weighted_bits(&entries), 4.0 + 4.0 + 3.0 + 3.0);
        assert_eq!(book.max_code_len(), 3);
    }

    #[test]
    fn test_for_table() {
        let mut counts = crate::stats::KindCounts::new();
        counts.set(Kind::Null, 10);
        let table = FrequencyTable::unbiased(&counts);

        let book = Codebook::for_table(&table).unwrap();
        assert_eq!(book.len(), Kind::COUNT);
        assert_eq!(book.code(&Kind::Null).map(str::len), Some(1));
        assert_eq!(
            book.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
            Kind::ALL.to_vec()
        );
    }
}
