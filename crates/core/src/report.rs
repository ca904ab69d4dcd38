//! Human-readable and `key=value` rendering of scan results.
//!
//! Two listings are produced:
//! - frequencies, ascending by weight; ties keep canonical kind order
//! - codes, ascending by code length; ties in the order a `0`-first walk of
//!   the code tree reaches them, i.e. by the code itself
//!
//! Rendering never modifies the tables it is given.

use crate::huffman::Codebook;
use crate::kind::Kind;
use crate::stats::{FrequencyTable, KindCounts};
use std::fmt::Write as _;

/// Bits per field in the current text encoding (one ASCII tag character).
pub const FIXED_TAG_BITS: u64 = 8;

/// Frequencies sorted ascending, ties in canonical order.
pub fn sorted_frequencies(table: &FrequencyTable) -> Vec<(Kind, f64)> {
    let mut entries = table.entries();
    entries.sort_by(|a, b| a.1.total_cmp(&b.1));
    entries
}

/// Codes sorted by length ascending, then by code.
pub fn sorted_codes(codebook: &Codebook<Kind>) -> Vec<(Kind, &str)> {
    let mut entries: Vec<(Kind, &str)> = codebook.iter().map(|(k, c)| (*k, c)).collect();
    entries.sort_by(|a, b| a.1.len().cmp(&b.1.len()).then_with(|| a.1.cmp(b.1)));
    entries
}

pub fn render_frequencies(table: &FrequencyTable) -> String {
    let mut out = String::from("Stats:\n");
    for (kind, weight) in sorted_frequencies(table) {
        let _ = writeln!(out, "* {}: {}", kind, weight);
    }
    out
}

pub fn render_codes(codebook: &Codebook<Kind>) -> String {
    let mut out = String::from("Huffman:\n");
    for (kind, code) in sorted_codes(codebook) {
        let _ = writeln!(out, "* {}: {}", kind, code);
    }
    out
}

/// Size of the kind-tag channel, today versus with the computed code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagChannelEstimate {
    /// Fields in the corpus
    pub fields: u64,

    /// Tag bits with one fixed-width character per field
    pub fixed_bits: u64,

    /// Tag bits with the Huffman code
    pub huffman_bits: u64,
}

impl TagChannelEstimate {
    /// Measure real (unbiased) counts against a codebook.
    pub fn new(counts: &KindCounts, codebook: &Codebook<Kind>) -> Self {
        let fields = counts.total();
        let huffman_bits = counts
            .iter()
            .map(|(kind, count)| count * codebook.code(&kind).map_or(0, |c| c.len() as u64))
            .sum();

        Self {
            fields,
            fixed_bits: fields * FIXED_TAG_BITS,
            huffman_bits,
        }
    }

    /// Huffman size relative to the fixed encoding (0.0 if no fields).
    pub fn ratio(&self) -> f64 {
        if self.fixed_bits == 0 {
            0.0
        } else {
            self.huffman_bits as f64 / self.fixed_bits as f64
        }
    }

    /// Average Huffman code length per field.
    pub fn bits_per_field(&self) -> f64 {
        if self.fields == 0 {
            0.0
        } else {
            self.huffman_bits as f64 / self.fields as f64
        }
    }

    pub fn render(&self) -> String {
        format!(
            "Tag channel:\n\
             * fields: {}\n\
             * fixed: {} bits ({} per field)\n\
             * huffman: {} bits ({:.3} per field)\n\
             * ratio: {:.1}%\n",
            self.fields,
            self.fixed_bits,
            FIXED_TAG_BITS,
            self.huffman_bits,
            self.bits_per_field(),
            self.ratio() * 100.0,
        )
    }
}

/// Everything a run reports.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub counts: &'a KindCounts,
    pub table: &'a FrequencyTable,
    pub codebook: &'a Codebook<Kind>,
}

impl<'a> Report<'a> {
    pub fn new(
        counts: &'a KindCounts,
        table: &'a FrequencyTable,
        codebook: &'a Codebook<Kind>,
    ) -> Self {
        Self {
            counts,
            table,
            codebook,
        }
    }

    pub fn estimate(&self) -> TagChannelEstimate {
        TagChannelEstimate::new(self.counts, self.codebook)
    }

    /// Both listings and the tag-channel estimate.
    pub fn render(&self) -> String {
        format!(
            "{}\n{}\n{}",
            render_frequencies(self.table),
            render_codes(self.codebook),
            self.estimate().render(),
        )
    }

    /// `key=value` lines, in canonical kind order.
    pub fn export_text(&self) -> String {
        let mut out = String::new();

        for (kind, count) in self.counts.iter() {
            let _ = writeln!(out, "count.{}={}", kind, count);
        }
        for (kind, weight) in self.table.iter() {
            let _ = writeln!(out, "weight.{}={}", kind, weight);
        }
        for (kind, code) in self.codebook.iter() {
            let _ = writeln!(out, "code.{}={}", kind, code);
        }

        let estimate = self.estimate();
        let _ = writeln!(out, "fields={}", estimate.fields);
        let _ = writeln!(out, "fixed_bits={}", estimate.fixed_bits);
        let _ = writeln!(out, "huffman_bits={}", estimate.huffman_bits);
        let _ = writeln!(out, "ratio={:.4}", estimate.ratio());
        out
    }
}
