//! The demangler's closed error type (§7).
//!
//! Every variant below corresponds 1:1 to an error kind spec §7 names. The
//! policy spec §7 describes is enforced by the callers, not by this type:
//! speculative parses (every `try_*`) catch an `Err` here, restore the
//! cursor via [`crate::cursor::Cursor::restore`], and report "not matched"
//! to *their* caller rather than propagating. Only a failure inside a
//! committed production reaches the public entry points.

/// Errors produced while demangling a Swift symbol or type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DemangleError {
    #[error("empty input")]
    EmptyInput,

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("unexpected byte at {pos}: found {found:?}, expected {expected}")]
    UnexpectedByte {
        pos: usize,
        found: u8,
        expected: &'static str,
    },

    #[error("bad number at {pos}")]
    BadNumber { pos: usize },

    #[error("bad identifier length at {pos}")]
    BadIdentifierLength { pos: usize },

    #[error("truncated symbolic reference at {pos}")]
    TruncatedSymbolicReference { pos: usize },

    #[error("symbolic reference without resolver at {pos}")]
    MissingResolver { pos: usize },

    #[error("bad substitution index {index} (have {size})")]
    BadSubstitutionIndex { index: usize, size: usize },

    #[error("unterminated {construct}")]
    UnterminatedConstruct { construct: &'static str },

    #[error("unsupported sequence at {pos}")]
    UnsupportedSequence { pos: usize },

    #[error("trailing input at {pos}")]
    TrailingInput { pos: usize },

    #[error("no progress at {pos}")]
    NoProgress { pos: usize },
}

pub type Result<T> = std::result::Result<T, DemangleError>;
