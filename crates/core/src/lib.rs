//! bagstat-core: kind-tag statistics and Huffman estimates for container files
//!
//! This library measures a corpus of `BAG1` container files (the tagged text
//! format behind `.bpe` paintings) and answers one question: how small could
//! the kind-tag channel get with a prefix code fitted to real data?
//!
//! # Architecture
//!
//! The pipeline runs strictly in this order:
//! - `decoder`: walks one file's tag stream and counts fields per kind
//! - `corpus`: finds container files and folds their counts together
//! - `bias`: fixed fractional increments for rare kinds
//! - `huffman`: greedy Huffman construction with deterministic ties
//! - `report`: sorted listings and the tag-channel estimate
//!
//! Supporting modules:
//! - `kind`: the closed set of 14 field categories
//! - `grammar`: signature and tag tables (corrected and legacy)
//! - `stats`: integer counts and `f64` frequency tables
//! - `metrics`: scan counters and timing
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Fail fast**: The first bad file stops the run, naming the file
//! - **Deterministic**: Same corpus, same codes, regardless of file order
//! - **Read-only**: Files are measured, never written

pub mod bias;
pub mod corpus;
pub mod decoder;
pub mod error;
pub mod grammar;
pub mod huffman;
pub mod kind;
pub mod metrics;
pub mod report;
pub mod stats;

// Re-export commonly used types
pub use error::{Error, FormatError, HuffmanError, Result};
pub use grammar::{Dialect, Grammar};
pub use huffman::Codebook;
pub use kind::Kind;
pub use stats::{FrequencyTable, KindCounts};
