//! Streaming decoder for the tag stream of a container file.
//!
//! The decoder walks the text once, front to back, and yields one [`Field`]
//! per tag. It never builds the field values: integers are only skipped, and
//! string/stuff payloads are only measured.
//!
//! # Cursor Rules
//!
//! - The cursor starts right after the signature.
//! - A tag consumes one character, a hex prefix its size class's digits, and
//!   a length-prefixed payload the declared number of characters.
//! - Running out of input in the middle of a field is `UnexpectedEof`; the
//!   field is never counted.
//! - [`TagStream::finish`] requires the cursor to sit exactly at the end.
//!
//! Lengths count characters, not bytes, matching how the writer measures
//! strings. Offsets in errors are byte offsets.
//!
//! # Example
//! ```
//! use bagstat_core::decoder::decode_counts;
//! use bagstat_core::grammar::Grammar;
//! use bagstat_core::kind::Kind;
//!
//! let counts = decode_counts("BAG1_Bi3s2hi", &Grammar::default()).unwrap();
//! assert_eq!(counts[Kind::Null], 1);
//! assert_eq!(counts[Kind::Boolean], 1);
//! assert_eq!(counts[Kind::Int4], 1);
//! assert_eq!(counts[Kind::String4], 1);
//! ```

use crate::error::FormatError;
use crate::grammar::{Grammar, Payload, TagTable};
use crate::kind::Kind;
use crate::stats::KindCounts;

/// One decoded field observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Category the tag maps to
    pub kind: Kind,

    /// The tag character itself
    pub tag: char,

    /// Byte offset of the tag
    pub offset: usize,

    /// Decoded hex prefix, if the kind has one
    pub number: Option<u32>,

    /// Raw characters skipped after the prefix (length-prefixed kinds only)
    pub payload_len: u64,
}

/// Iterator over the fields of one container file.
///
/// Yields `Err` at most once; after an error the stream is exhausted.
#[derive(Debug, Clone)]
pub struct TagStream<'a> {
    input: &'a str,
    pos: usize,
    tags: TagTable,
    failed: bool,
}

impl<'a> TagStream<'a> {
    /// Check the signature and position the cursor after it.
    ///
    /// # Errors
    /// `FormatError::UnknownSignature` if `input` does not start with the
    /// grammar's signature.
    pub fn new(input: &'a str, grammar: &Grammar) -> Result<Self, FormatError> {
        let signature = grammar.signature();

        if !input.starts_with(signature) {
            return Err(FormatError::UnknownSignature {
                expected: signature.to_string(),
                actual: input.chars().take(signature.chars().count()).collect(),
            });
        }

        Ok(Self {
            input,
            pos: signature.len(),
            tags: *grammar.tags(),
            failed: false,
        })
    }

    /// Current byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    /// Verify that the whole input has been consumed.
    ///
    /// # Errors
    /// `FormatError::TrailingData` if the cursor is short of the end.
    pub fn finish(self) -> Result<(), FormatError> {
        if self.pos == self.input.len() {
            Ok(())
        } else {
            Err(FormatError::TrailingData {
                offset: self.pos,
                remaining: self.remaining(),
            })
        }
    }

    fn read_field(&mut self) -> Result<Option<Field>, FormatError> {
        let offset = self.pos;
        let tag = match self.input[self.pos..].chars().next() {
            Some(tag) => tag,
            None => return Ok(None),
        };
        self.pos += tag.len_utf8();

        let entry = self
            .tags
            .lookup(tag)
            .ok_or(FormatError::UnknownTag { tag, offset })?;

        let (number, payload_len) = match entry.payload {
            Payload::None => (None, 0),
            Payload::Value(size) => (Some(self.read_hex(size.hex_digits())?), 0),
            Payload::Length(size) => {
                let len = self.read_hex(size.hex_digits())?;
                self.skip_chars(u64::from(len))?;
                (Some(len), u64::from(len))
            }
        };

        Ok(Some(Field {
            kind: entry.kind,
            tag,
            offset,
            number,
            payload_len,
        }))
    }

    /// Read a fixed-width unsigned hex numeral.
    fn read_hex(&mut self, digits: usize) -> Result<u32, FormatError> {
        let mut value: u32 = 0;

        for read in 0..digits {
            let offset = self.pos;
            let ch = match self.input[self.pos..].chars().next() {
                Some(ch) => ch,
                None => {
                    return Err(FormatError::UnexpectedEof {
                        offset,
                        needed: (digits - read) as u64,
                        available: 0,
                    })
                }
            };

            let digit = ch
                .to_digit(16)
                .ok_or(FormatError::InvalidHexDigit { found: ch, offset })?;

            // at most 8 digits, so this never overflows
            value = (value << 4) | digit;
            self.pos += ch.len_utf8();
        }

        Ok(value)
    }

    /// Advance the cursor by `count` characters.
    fn skip_chars(&mut self, count: u64) -> Result<(), FormatError> {
        let rest = &self.input[self.pos..];

        // start offset of every char, then the end of input
        let mut boundaries = rest
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(rest.len()));

        let end = usize::try_from(count)
            .ok()
            .and_then(|n| boundaries.nth(n));

        match end {
            Some(end) => {
                self.pos += end;
                Ok(())
            }
            None => Err(FormatError::UnexpectedEof {
                offset: self.pos,
                needed: count,
                available: rest.chars().count(),
            }),
        }
    }
}

impl Iterator for TagStream<'_> {
    type Item = Result<Field, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.read_field() {
            Ok(field) => field.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Decode a whole file and count its fields by kind.
///
/// # Errors
/// Any [`FormatError`]; no partial counts are ever returned.
pub fn decode_counts(input: &str, grammar: &Grammar) -> Result<KindCounts, FormatError> {
    let mut stream = TagStream::new(input, grammar)?;
    let mut counts = KindCounts::new();

    for field in stream.by_ref() {
        counts.increment(field?.kind);
    }

    stream.finish()?;
    Ok(counts)
}

/// Like [`decode_counts`], for raw file contents.
///
/// # Errors
/// `FormatError::InvalidText` if `bytes` is not UTF-8, otherwise as
/// [`decode_counts`].
pub fn decode_bytes(bytes: &[u8], grammar: &Grammar) -> Result<KindCounts, FormatError> {
    let input = std::str::from_utf8(bytes).map_err(|e| FormatError::InvalidText {
        valid_up_to: e.valid_up_to(),
    })?;
    decode_counts(input, grammar)
}
