//! Property-based tests using proptest
//!
//! Random frequency tables check that the built code is optimal, prefix-free
//! and deterministic. Random inputs check that the decoder never panics.

use bagstat_core::decoder::decode_counts;
use bagstat_core::{Codebook, Dialect, Grammar, Kind, KindCounts};
use proptest::prelude::*;

/// Strategy for small tables of integer weights (so costs compare exactly)
fn small_table_strategy() -> impl Strategy<Value = Vec<(usize, f64)>> {
    prop::collection::vec(0u32..50, 2..=6).prop_map(|weights| {
        weights
            .into_iter()
            .enumerate()
            .map(|(i, w)| (i, f64::from(w)))
            .collect()
    })
}

/// Strategy for a full 14-kind table, often with zero counts
fn kind_table_strategy() -> impl Strategy<Value = Vec<(Kind, f64)>> {
    prop::collection::vec(prop_oneof![Just(0u32), 0u32..1000], Kind::COUNT).prop_map(|weights| {
        Kind::ALL
            .iter()
            .copied()
            .zip(weights.into_iter().map(f64::from))
            .collect()
    })
}

/// Strategy for per-kind counts
fn counts_strategy() -> impl Strategy<Value = KindCounts> {
    prop::collection::vec(0u64..10_000, Kind::COUNT)
        .prop_map(|counts| Kind::ALL.iter().copied().zip(counts).collect())
}

/// Cheapest total cost over every length assignment that satisfies Kraft.
fn brute_force_cost(weights: &[f64]) -> f64 {
    let n = weights.len();
    let max_len = (n - 1) as u32;
    let mut lengths = vec![1u32; n];
    let mut best = f64::INFINITY;

    loop {
        // sum of 2^-l <= 1, scaled by 2^max_len
        let kraft: u64 = lengths.iter().map(|&l| 1u64 << (max_len - l)).sum();
        if kraft <= 1u64 << max_len {
            let cost: f64 = weights
                .iter()
                .zip(&lengths)
                .map(|(w, &l)| w * f64::from(l))
                .sum();
            best = best.min(cost);
        }

        // odometer over 1..=max_len
        let mut i = 0;
        while i < n && lengths[i] == max_len {
            lengths[i] = 1;
            i += 1;
        }
        if i == n {
            return best;
        }
        lengths[i] += 1;
    }
}

proptest! {
    /// No prefix code over the same weights is cheaper.
    #[test]
    fn prop_code_is_optimal(entries in small_table_strategy()) {
        let book = Codebook::from_frequencies(&entries).unwrap();
        let weights: Vec<f64> = entries.iter().map(|(_, w)| *w).collect();

        prop_assert_eq!(book.weighted_bits(&entries), brute_force_cost(&weights));
    }

    /// Every kind gets a code and no code prefixes another.
    #[test]
    fn prop_code_is_complete_and_prefix_free(entries in kind_table_strategy()) {
        let book = Codebook::from_frequencies(&entries).unwrap();

        prop_assert_eq!(book.len(), Kind::COUNT);
        prop_assert!(book.is_prefix_free());
        for (_, code) in book.iter() {
            prop_assert!(!code.is_empty());
            prop_assert!(code.chars().all(|c| c == '0' || c == '1'));
        }

        // a full binary tree: Kraft sum is exactly 1
        let max = book.max_code_len() as u32;
        let kraft: u64 = book.iter().map(|(_, c)| 1u64 << (max - c.len() as u32)).sum();
        prop_assert_eq!(kraft, 1u64 << max);
    }

    /// Heavier entries never get longer codes than lighter ones.
    #[test]
    fn prop_heavier_means_not_longer(entries in kind_table_strategy()) {
        let book = Codebook::from_frequencies(&entries).unwrap();

        for (a, wa) in &entries {
            for (b, wb) in &entries {
                if wa > wb {
                    let la = book.code(a).unwrap().len();
                    let lb = book.code(b).unwrap().len();
                    prop_assert!(la <= lb, "{} ({}) longer than {} ({})", a, wa, b, wb);
                }
            }
        }
    }

    /// Same table, same codes.
    #[test]
    fn prop_code_is_deterministic(entries in kind_table_strategy()) {
        let a = Codebook::from_frequencies(&entries).unwrap();
        let b = Codebook::from_frequencies(&entries).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Summing per-file counts is order-independent.
    #[test]
    fn prop_count_merge_commutes(a in counts_strategy(), b in counts_strategy(), c in counts_strategy()) {
        prop_assert_eq!(a + b, b + a);
        prop_assert_eq!((a + b) + c, a + (b + c));
        for kind in Kind::ALL {
            prop_assert_eq!((a + b)[kind], a[kind] + b[kind]);
        }
    }

    /// Arbitrary text after the signature decodes or fails, never panics.
    #[test]
    fn prop_decoder_never_panics(body in "[_bBiInNsStTuUfFZ0-9a-fé ]{0,64}") {
        let input = format!("BAG1{}", body);
        for dialect in [Dialect::Corrected, Dialect::Legacy] {
            if let Ok(counts) = decode_counts(&input, &Grammar::bag1(dialect)) {
                prop_assert!(counts.total() <= body.chars().count() as u64);
            }
        }
    }
}
