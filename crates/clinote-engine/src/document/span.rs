use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A half-open character range `[from, to)` in document-offset space.
///
/// Offsets count Unicode scalar values in the linearized document, starting
/// at 0. Spans are plain values: after an edit they are redefined through a
/// [`PositionMap`](crate::editing::PositionMap), never patched in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start offset.
    pub from: usize,
    /// Exclusive end offset.
    pub to: usize,
}

impl Span {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Length in characters; zero for an inverted span.
    #[must_use]
    pub fn len(self) -> usize {
        self.to.saturating_sub(self.from)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Whether `pos` lies inside the span.
    pub fn contains(self, pos: usize) -> bool {
        self.from <= pos && pos < self.to
    }

    /// Whether the two spans share at least one character.
    pub fn overlaps(self, other: Span) -> bool {
        self.from < other.to && other.from < self.to
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// A malformed offset range. Never clamped: callers get the error back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("range {from}..{to} is inverted")]
    Inverted { from: usize, to: usize },

    #[error("range {from}..{to} is outside the document (length {len})")]
    OutOfBounds { from: usize, to: usize, len: usize },
}

/// Validate `from..to` against a document of length `len`.
pub fn check_range(from: usize, to: usize, len: usize) -> Result<(), RangeError> {
    if from > to {
        return Err(RangeError::Inverted { from, to });
    }
    if to > len {
        return Err(RangeError::OutOfBounds { from, to, len });
    }
    Ok(())
}
