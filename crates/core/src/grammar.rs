//! Container grammar: signature and tag tables.
//!
//! A container file is a 4-character signature followed by tagged fields.
//! Each tag character selects a [`Kind`] and a payload layout:
//!
//! ```text
//! BAG1 _ B i7 IFF s3abc u2xy N0000ABCD ...
//!      |  |  |   |     |     |
//!      |  |  |   |     |     +-- int32: 8 hex digits
//!      |  |  |   |     +-------- stuff4: 1 hex digit length + 2 chars
//!      |  |  |   +-------------- string4: 1 hex digit length + 3 chars
//!      |  |  +------------------ int8: 2 hex digits
//!      |  +--------------------- int4: 1 hex digit
//!      +------------------------ null, boolean: tag only
//! ```
//! (spaces added for readability; the real stream has none)
//!
//! # Tag tables
//!
//! Two tables are provided. [`TagTable::corrected`] gives every category its
//! own tag. [`TagTable::legacy`] reproduces the dispatch of the historical
//! stats tool, which checked `I` where string8 should use `S` and `n` where
//! stuff16 should use `f`. With first-match-wins dispatch, `S` and `f` then
//! have no category at all and string8/stuff16 never receive counts. The
//! legacy tool also read only the version number of a stuff field, since the
//! writer emits the stuff's own fields right after it. Use the legacy table
//! to reproduce statistics gathered with the old tool. See [`Dialect`] for
//! the files neither table can read.

use crate::kind::{Kind, SizeClass};
use std::fmt;

/// Default container signature.
pub const SIGNATURE: &str = "BAG1";

/// Signature length in characters.
pub const SIGNATURE_LEN: usize = 4;

/// Default container file extension (without the dot).
pub const EXTENSION: &str = "bpe";

/// What follows a tag character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// Nothing (null, booleans)
    None,
    /// A hex numeral of the size class's width; the value is ignored
    Value(SizeClass),
    /// A hex length prefix followed by that many raw characters
    Length(SizeClass),
}

impl Payload {
    /// Number of hex digits read after the tag.
    pub const fn hex_digits(self) -> usize {
        match self {
            Payload::None => 0,
            Payload::Value(size) | Payload::Length(size) => size.hex_digits(),
        }
    }
}

/// A single tag character and what it decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagEntry {
    pub tag: char,
    pub kind: Kind,
    pub payload: Payload,
}

const fn entry(tag: char, kind: Kind, payload: Payload) -> TagEntry {
    TagEntry { tag, kind, payload }
}

use Payload::{Length, Value};
use SizeClass::{Bits16, Bits32, Bits4, Bits8};

static CORRECTED: [TagEntry; 15] = [
    entry('_', Kind::Null, Payload::None),
    entry('b', Kind::Boolean, Payload::None),
    entry('B', Kind::Boolean, Payload::None),
    entry('i', Kind::Int4, Value(Bits4)),
    entry('I', Kind::Int8, Value(Bits8)),
    entry('n', Kind::Int16, Value(Bits16)),
    entry('N', Kind::Int32, Value(Bits32)),
    entry('s', Kind::String4, Length(Bits4)),
    entry('S', Kind::String8, Length(Bits8)),
    entry('t', Kind::String16, Length(Bits16)),
    entry('T', Kind::String32, Length(Bits32)),
    entry('u', Kind::Stuff4, Length(Bits4)),
    entry('U', Kind::Stuff8, Length(Bits8)),
    entry('f', Kind::Stuff16, Length(Bits16)),
    entry('F', Kind::Stuff32, Length(Bits32)),
];

// Checked in order; the second 'I' and 'n' rows can never match.
static LEGACY: [TagEntry; 15] = [
    entry('_', Kind::Null, Payload::None),
    entry('b', Kind::Boolean, Payload::None),
    entry('B', Kind::Boolean, Payload::None),
    entry('i', Kind::Int4, Value(Bits4)),
    entry('I', Kind::Int8, Value(Bits8)),
    entry('n', Kind::Int16, Value(Bits16)),
    entry('N', Kind::Int32, Value(Bits32)),
    entry('s', Kind::String4, Length(Bits4)),
    entry('I', Kind::String8, Length(Bits8)),
    entry('t', Kind::String16, Length(Bits16)),
    entry('T', Kind::String32, Length(Bits32)),
    entry('u', Kind::Stuff4, Value(Bits4)),
    entry('U', Kind::Stuff8, Value(Bits8)),
    entry('n', Kind::Stuff16, Value(Bits16)),
    entry('F', Kind::Stuff32, Value(Bits32)),
];

/// Which tag table to decode with.
///
/// # Limitations
///
/// Neither table reads every file the writer can produce. `Corrected`
/// expects a length prefix and that many raw characters after a stuff tag,
/// while the writer emits the stuff's nested fields after its version
/// number; such files fail or miscount. `Legacy` follows the nested layout
/// but rejects `S` (string8) and `f` (stuff16) as unknown tags. A file that
/// holds both 8-bit strings and stuff fields decodes with neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// One tag per category, stuff payloads length-prefixed
    #[default]
    Corrected,
    /// Bit-compatible with statistics from the historical tool
    Legacy,
}

impl Dialect {
    pub fn tag_table(self) -> TagTable {
        match self {
            Dialect::Corrected => TagTable::corrected(),
            Dialect::Legacy => TagTable::legacy(),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Dialect::Corrected => "corrected",
            Dialect::Legacy => "legacy",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered tag dispatch table. The first entry matching a tag wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagTable {
    entries: &'static [TagEntry],
}

impl TagTable {
    pub fn corrected() -> Self {
        Self {
            entries: &CORRECTED,
        }
    }

    pub fn legacy() -> Self {
        Self { entries: &LEGACY }
    }

    /// Resolve a tag character.
    pub fn lookup(&self, tag: char) -> Option<TagEntry> {
        self.entries.iter().copied().find(|e| e.tag == tag)
    }

    /// Tags that actually reach each kind (shadowed rows excluded).
    pub fn reachable_tags(&self, kind: Kind) -> Vec<char> {
        self.entries
            .iter()
            .filter(|e| e.kind == kind && self.lookup(e.tag) == Some(**e))
            .map(|e| e.tag)
            .collect()
    }

    pub fn entries(&self) -> &'static [TagEntry] {
        self.entries
    }
}

/// Signature plus tag table: everything needed to decode a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    signature: String,
    tags: TagTable,
}

impl Grammar {
    /// Create a grammar with a custom signature.
    ///
    /// # Errors
    /// Returns `Error::Config` unless the signature is exactly
    /// [`SIGNATURE_LEN`] ASCII characters.
    pub fn new(signature: &str, dialect: Dialect) -> crate::Result<Self> {
        if signature.len() != SIGNATURE_LEN || !signature.is_ascii() {
            return Err(crate::Error::Config(format!(
                "signature must be {} ASCII characters, got {:?}",
                SIGNATURE_LEN, signature
            )));
        }

        Ok(Self {
            signature: signature.to_string(),
            tags: dialect.tag_table(),
        })
    }

    /// The `BAG1` grammar with the given tag table.
    pub fn bag1(dialect: Dialect) -> Self {
        Self {
            signature: SIGNATURE.to_string(),
            tags: dialect.tag_table(),
        }
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn tags(&self) -> &TagTable {
        &self.tags
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::bag1(Dialect::Corrected)
    }
}
