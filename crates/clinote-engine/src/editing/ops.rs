use thiserror::Error;

use crate::document::{RangeError, check_range};

/// An edit arriving from the presentation layer, in document offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    Insert {
        at: usize,
        text: String,
    },
    Delete {
        range: std::ops::Range<usize>,
    },
    Replace {
        range: std::ops::Range<usize>,
        text: String,
    },
    /// Cursor or selection movement; leaves content untouched.
    Select {
        range: std::ops::Range<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("invalid edit range: {0}")]
    Range(#[from] RangeError),
}

impl EditOp {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        EditOp::Insert {
            at,
            text: text.into(),
        }
    }

    pub fn delete(range: std::ops::Range<usize>) -> Self {
        EditOp::Delete { range }
    }

    pub fn replace(range: std::ops::Range<usize>, text: impl Into<String>) -> Self {
        EditOp::Replace {
            range,
            text: text.into(),
        }
    }

    pub fn select(range: std::ops::Range<usize>) -> Self {
        EditOp::Select { range }
    }

    /// The `[from, to)` range the edit touches.
    pub fn range(&self) -> std::ops::Range<usize> {
        match self {
            EditOp::Insert { at, .. } => *at..*at,
            EditOp::Delete { range } | EditOp::Replace { range, .. } | EditOp::Select { range } => {
                range.clone()
            }
        }
    }

    /// Whether applying the edit alters document content.
    pub fn changes_content(&self) -> bool {
        match self {
            EditOp::Insert { text, .. } => !text.is_empty(),
            EditOp::Delete { range } => !range.is_empty(),
            EditOp::Replace { range, text } => !range.is_empty() || !text.is_empty(),
            EditOp::Select { .. } => false,
        }
    }

    /// Reject inverted or out-of-bounds ranges against a document of length `len`.
    pub fn validate(&self, len: usize) -> Result<(), EditError> {
        let range = self.range();
        check_range(range.start, range.end, len)?;
        Ok(())
    }
}
