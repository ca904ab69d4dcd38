//! Kind categories and size classes of container fields.
//!
//! Every field in a container file falls into exactly one of 14 statistical
//! buckets. The set is closed: adding a category means adding an enum
//! variant, and every `match` over [`Kind`] must be updated with it.

use std::fmt;

/// Nominal bit width of a field's value or length prefix.
///
/// The prefix is written as a fixed number of hex digits, one digit per
/// four bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SizeClass {
    Bits4,
    Bits8,
    Bits16,
    Bits32,
}

impl SizeClass {
    /// Number of hex digits in the prefix (1, 2, 4 or 8).
    pub const fn hex_digits(self) -> usize {
        match self {
            SizeClass::Bits4 => 1,
            SizeClass::Bits8 => 2,
            SizeClass::Bits16 => 4,
            SizeClass::Bits32 => 8,
        }
    }

    pub const fn bits(self) -> u32 {
        self.hex_digits() as u32 * 4
    }
}

/// One of the 14 statistical field categories.
///
/// Declaration order is the canonical table order: frequency tables iterate
/// in it, and the Huffman builder numbers its leaves in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Null,
    Boolean,
    Int4,
    Int8,
    Int16,
    Int32,
    String4,
    String8,
    String16,
    String32,
    Stuff4,
    Stuff8,
    Stuff16,
    Stuff32,
}

impl Kind {
    /// Number of categories.
    pub const COUNT: usize = 14;

    /// All categories in canonical order.
    pub const ALL: [Kind; Kind::COUNT] = [
        Kind::Null,
        Kind::Boolean,
        Kind::Int4,
        Kind::Int8,
        Kind::Int16,
        Kind::Int32,
        Kind::String4,
        Kind::String8,
        Kind::String16,
        Kind::String32,
        Kind::Stuff4,
        Kind::Stuff8,
        Kind::Stuff16,
        Kind::Stuff32,
    ];

    /// Position in [`Kind::ALL`], used to index per-kind arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short name used in reports.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Boolean => "bool",
            Kind::Int4 => "int4",
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::String4 => "string4",
            Kind::String8 => "string8",
            Kind::String16 => "string16",
            Kind::String32 => "string32",
            Kind::Stuff4 => "stuff4",
            Kind::Stuff8 => "stuff8",
            Kind::Stuff16 => "stuff16",
            Kind::Stuff32 => "stuff32",
        }
    }

    /// Size class of the hex prefix, or `None` for kinds without one.
    pub const fn size_class(self) -> Option<SizeClass> {
        match self {
            Kind::Null | Kind::Boolean => None,
            Kind::Int4 | Kind::String4 | Kind::Stuff4 => Some(SizeClass::Bits4),
            Kind::Int8 | Kind::String8 | Kind::Stuff8 => Some(SizeClass::Bits8),
            Kind::Int16 | Kind::String16 | Kind::Stuff16 => Some(SizeClass::Bits16),
            Kind::Int32 | Kind::String32 | Kind::Stuff32 => Some(SizeClass::Bits32),
        }
    }

    /// Look a category up by its report name.
    pub fn from_name(name: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
