//! Byte cursor over the mangled input (§4.1).
//!
//! The cursor never panics: every failure mode is a [`DemangleError`]
//! carrying the byte position. `save`/`restore` only cover the cursor's own
//! position — the parser composes this with substitution/pending/type-stack
//! lengths to build the full speculative-parse snapshot described in §3.2.

use crate::error::{DemangleError, Result};

/// An immutable-like view over the mangled bytes with a movable read position.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Byte at the current position, or `0` at EOF (spec §4.1: "peek() →
    /// byte or 0 at EOF"). `0` never occurs in valid mangled input, so this
    /// doubles as a sentinel callers can match against directly.
    pub fn peek(&self) -> u8 {
        self.input.get(self.pos).copied().unwrap_or(0)
    }

    pub fn peek_at(&self, offset: usize) -> u8 {
        self.input.get(self.pos + offset).copied().unwrap_or(0)
    }

    pub fn consume(&mut self) -> Result<u8> {
        if self.eof() {
            return Err(DemangleError::UnexpectedEnd {
                expected: "any byte",
            });
        }
        let b = self.input[self.pos];
        self.pos += 1;
        Ok(b)
    }

    /// Consumes `b` if it is the current byte, else fails without advancing.
    pub fn expect(&mut self, b: u8) -> Result<()> {
        if self.peek() == b {
            self.pos += 1;
            Ok(())
        } else {
            Err(DemangleError::UnexpectedByte {
                pos: self.pos,
                found: self.peek(),
                expected: "a specific byte",
            })
        }
    }

    /// Lookahead-only string match: `true` and no advance on mismatch,
    /// `true` and advance past it on match.
    pub fn match_string(&mut self, s: &str) -> bool {
        let bytes = s.as_bytes();
        if self.input[self.pos..].starts_with(bytes) {
            self.pos += bytes.len();
            true
        } else {
            false
        }
    }

    /// Reads a maximal run of ASCII decimal digits as an unsigned integer.
    /// Fails if there are no digits at the current position.
    pub fn read_number(&mut self) -> Result<u64> {
        let start = self.pos;
        let mut value: u64 = 0;
        while self.peek().is_ascii_digit() {
            let digit = (self.peek() - b'0') as u64;
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .ok_or(DemangleError::BadNumber { pos: start })?;
            self.pos += 1;
        }
        if self.pos == start {
            return Err(DemangleError::BadNumber { pos: start });
        }
        Ok(value)
    }

    /// Reads a length-prefixed identifier: `<digits><that-many-bytes>`.
    /// The length must be positive and must not run past the end of input.
    pub fn read_identifier_bytes(&mut self) -> Result<&'a [u8]> {
        let start = self.pos;
        let len = self.read_number().map_err(|_| DemangleError::BadIdentifierLength { pos: start })?;
        let len = usize::try_from(len).map_err(|_| DemangleError::BadIdentifierLength { pos: start })?;
        if len == 0 {
            return Err(DemangleError::BadIdentifierLength { pos: start });
        }
        if self.pos + len > self.input.len() {
            return Err(DemangleError::BadIdentifierLength { pos: start });
        }
        let bytes = &self.input[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// As [`Cursor::read_identifier_bytes`], decoded as UTF-8 (lossily —
    /// spec treats identifier bytes opaquely).
    pub fn read_identifier(&mut self) -> Result<String> {
        let bytes = self.read_identifier_bytes()?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Captures enough state to undo any number of reads via [`Cursor::restore`].
    pub fn save(&self) -> usize {
        self.pos
    }

    pub fn restore(&mut self, snapshot: usize) {
        self.pos = snapshot;
    }
}
