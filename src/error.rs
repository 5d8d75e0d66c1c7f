//! Crate-wide error taxonomy.
//!
//! Every fallible operation returns [FlatnestError]. Pattern syntax errors
//! carry the byte position of the offending token so callers can point at
//! the exact spot in the input string.

use crate::pattern::cursor::PatternCursor;
use thiserror::Error;

/// Errors reported by pattern parsing, flattening, and index mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlatnestError {
    /// The pattern string violates the grammar of the requested order.
    #[error("invalid pattern at position {position}: {message}")]
    PatternSyntax {
        /// Byte offset of the offending token in the pattern string
        position: usize,
        /// What was wrong at that position
        message: String,
    },

    /// The flat value sequence does not match the pattern's leaf count.
    #[error("flat sequence has {actual} value(s), pattern describes {expected} leaf/leaves")]
    LengthMismatch {
        /// Leaf count described by the pattern or shape
        expected: usize,
        /// Length of the supplied flat sequence
        actual: usize,
    },

    /// A flat index or nested index path does not address a leaf.
    #[error("index out of range: {message}")]
    IndexOutOfRange {
        /// Which index was invalid, and why
        message: String,
    },

    /// The input value cannot be flattened or traversed.
    #[error("invalid structure: {message}")]
    InvalidStructure {
        /// What was wrong with the structure
        message: String,
    },
}

impl FlatnestError {
    /// Syntax error at the cursor's current position.
    pub(crate) fn syntax(cursor: &PatternCursor<'_>, message: impl Into<String>) -> Self {
        Self::syntax_at(cursor.position(), message)
    }

    /// Syntax error at an explicit byte position.
    pub(crate) fn syntax_at(position: usize, message: impl Into<String>) -> Self {
        FlatnestError::PatternSyntax { position, message: message.into() }
    }

    pub(crate) fn flat_index_out_of_range(index: usize, total: usize) -> Self {
        FlatnestError::IndexOutOfRange {
            message: format!("flat index {index} not in [0, {total})"),
        }
    }

    pub(crate) fn path_out_of_range(path: &[usize], message: impl Into<String>) -> Self {
        FlatnestError::IndexOutOfRange {
            message: format!("nested index path {path:?}: {}", message.into()),
        }
    }

    pub(crate) fn invalid_structure(message: impl Into<String>) -> Self {
        FlatnestError::InvalidStructure { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_displays_position_and_message() {
        let error = FlatnestError::syntax_at(4, "unmatched ']'");
        assert_eq!(error.to_string(), "invalid pattern at position 4: unmatched ']'");
    }

    #[test]
    fn length_mismatch_displays_both_counts() {
        let error = FlatnestError::LengthMismatch { expected: 10, actual: 9 };
        assert_eq!(
            error.to_string(),
            "flat sequence has 9 value(s), pattern describes 10 leaf/leaves"
        );
    }
}
