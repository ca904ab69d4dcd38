//! Error types for the bagstat system.
//!
//! All operations return structured errors rather than panicking.
//! Every error is fatal: a corpus run stops at the first failing file.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Format: a container file violates the tag-stream grammar
/// - Huffman: code construction was given unusable weights
/// - I/O: reading a container file or walking the corpus
/// - Config: invalid settings supplied by the caller
#[derive(Debug, Error)]
pub enum Error {
    /// A container file failed to decode
    #[error("{}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    /// Huffman code construction error
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Reading a container file failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking the corpus directory failed
    #[error("failed to walk corpus: {0}")]
    Walk(#[from] walkdir::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Path of the file that caused the error, if there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Error::Format { path, .. } | Error::Io { path, .. } => Some(path),
            Error::Walk(err) => err.path(),
            Error::Huffman(_) | Error::Config(_) => None,
        }
    }
}

/// Grammar violations found while decoding a single container file.
///
/// Offsets are byte offsets into the file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The file does not begin with the required signature
    #[error("unknown signature: expected {expected:?}, got {actual:?}")]
    UnknownSignature { expected: String, actual: String },

    /// A tag character outside the active tag table
    #[error("unknown tag {tag:?} at offset {offset}")]
    UnknownTag { tag: char, offset: usize },

    /// A hex prefix or declared payload runs past the end of input
    #[error("unexpected end of input at offset {offset}: need {needed} more characters, {available} left")]
    UnexpectedEof {
        offset: usize,
        needed: u64,
        available: usize,
    },

    /// Input left over where the tag stream stopped
    #[error("not all input consumed: {remaining} bytes left at offset {offset}")]
    TrailingData { offset: usize, remaining: usize },

    /// A non-hex character where a hex digit was expected
    #[error("invalid hex digit {found:?} at offset {offset}")]
    InvalidHexDigit { found: char, offset: usize },

    /// The file is not valid UTF-8 text
    #[error("file is not valid text (invalid UTF-8 after byte {valid_up_to})")]
    InvalidText { valid_up_to: usize },
}

/// Huffman codec errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HuffmanError {
    /// Weight is negative, NaN or infinite
    #[error("invalid weight {weight} for entry {index}")]
    InvalidWeight { index: usize, weight: f64 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
