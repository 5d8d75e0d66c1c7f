//! Byte cursor over an in-memory pattern string.
//!
//! Pattern strings are pure ASCII (digits plus a handful of directive
//! tokens), so the decoder works on raw bytes with a simple peek/consume
//! cursor rather than a char iterator.

use crate::error::FlatnestError;

// =#========================================================================#=
// PATTERN CURSOR
// =#========================================================================#=
/// Peek/consume cursor over the bytes of a pattern string.
pub(crate) struct PatternCursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> PatternCursor<'a> {
    /// Creates a cursor over the given pattern string.
    pub fn new(pattern: &'a str) -> Self {
        PatternCursor { bytes: pattern.as_bytes(), position: 0 }
    }

    /// Peeks at the current byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    /// Consumes and returns the current byte.
    pub fn next(&mut self) -> Option<u8> {
        let byte = self.peek();
        if byte.is_some() {
            self.position += 1;
        }
        byte
    }

    /// Returns the current byte offset, for error reporting.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Parses a decimal integer (a maximal run of ASCII digits).
    ///
    /// # Returns
    /// * `Ok(usize)` - The parsed value
    /// * `Err(FlatnestError)` - If the cursor is not at a digit, or the
    ///   value does not fit in a `usize`
    pub fn parse_integer(&mut self) -> Result<usize, FlatnestError> {
        let start = self.position;
        let mut value: usize = 0;
        while let Some(byte) = self.peek() {
            if !byte.is_ascii_digit() {
                break;
            }
            self.position += 1;
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add((byte - b'0') as usize))
                .ok_or_else(|| FlatnestError::syntax_at(start, "leaf count too large"))?;
        }
        if self.position == start {
            return Err(FlatnestError::syntax(self, "expected an integer"));
        }
        Ok(value)
    }
}
