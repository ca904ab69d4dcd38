//! Synthetic frequency increments applied before code construction.
//!
//! Some kinds are rare or absent in real corpora. Adding a small fractional
//! weight to them keeps them off exact zero and fixes their relative order,
//! so their (long) codes come out the same run after run.

use crate::kind::Kind;

/// Increments used by [`Bias::standard`].
pub const STANDARD_INCREMENTS: &[(Kind, f64)] = &[
    (Kind::Stuff8, 0.9),
    (Kind::String8, 0.8),
    (Kind::Stuff16, 0.7),
    (Kind::Int32, 0.6),
    (Kind::Stuff32, 0.5),
    (Kind::String16, 0.4),
];

/// A fixed set of per-kind weight increments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bias {
    increments: &'static [(Kind, f64)],
}

impl Bias {
    pub const fn new(increments: &'static [(Kind, f64)]) -> Self {
        Self { increments }
    }

    pub const fn standard() -> Self {
        Self::new(STANDARD_INCREMENTS)
    }

    /// No increments at all.
    pub const fn none() -> Self {
        Self::new(&[])
    }

    pub fn increments(&self) -> &'static [(Kind, f64)] {
        self.increments
    }

    pub fn is_empty(&self) -> bool {
        self.increments.is_empty()
    }
}

impl Default for Bias {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_increments_are_fractional_and_distinct() {
        let bias = Bias::standard();
        assert_eq!(bias.increments().len(), 6);

        for (i, &(kind, inc)) in bias.increments().iter().enumerate() {
            assert!(inc > 0.0 && inc < 1.0, "{} increment {}", kind, inc);
            for &(other, _) in &bias.increments()[i + 1..] {
                assert_ne!(kind, other);
            }
        }
    }

    #[test]
    fn test_none_is_empty() {
        assert!(Bias::none().is_empty());
        assert!(!Bias::default().is_empty());
    }
}
