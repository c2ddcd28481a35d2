//! Recursive-descent grammar parser (§4.4).
//!
//! One [`Parser`] is constructed per call to a public entry point and never
//! reused — there is no cross-call state. Every speculative attempt (named
//! `try_*` below) saves a [`Snapshot`] first and restores it on failure, so a
//! failed alternative leaves no trace in the cursor, the substitution
//! stores, or the pending queue.

mod entity;
mod function;
mod impl_function;
mod types;

#[cfg(test)]
mod entity_tests;
#[cfg(test)]
mod function_tests;

use std::cell::Cell;
use std::rc::Rc;

use crate::ast::Ast;
use crate::cursor::Cursor;
use crate::error::{DemangleError, Result};
use crate::resolver::SymbolicReferenceResolver;
use crate::subst::{PendingQueue, SubstitutionStore, WordStore};

const DEFAULT_MAX_DEPTH: u32 = 512;

/// Everything a parse of one mangled name needs, held on the stack of a
/// single call (§3.2, §5).
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    subst: SubstitutionStore,
    words: WordStore,
    pending: PendingQueue,
    type_stack: Vec<Ast>,
    resolver: Option<&'a dyn SymbolicReferenceResolver>,
    context: Option<Ast>,
    max_depth: u32,
    /// Shared, not borrowed, so [`DepthGuard`] can outlive the `&mut self`
    /// call that creates it without aliasing the parser it's tracking.
    depth: Rc<Cell<u32>>,
}

/// A speculative-parse checkpoint: cursor position plus the trailing
/// lengths of every append-only store (§3.2, §4.1 save/restore).
struct Snapshot {
    pos: usize,
    subst_len: usize,
    words_len: usize,
    pending_len: usize,
    type_stack_len: usize,
}

/// RAII recursion-depth guard. Not part of the source this crate is
/// otherwise grounded on — a stack-machine interpreter guards depth with an
/// explicit counter reset on scope exit, and the natural Rust expression of
/// that is a guard that decrements on drop rather than a manual counter at
/// every return site. Holds a cloned `Rc<Cell<u32>>` rather than `&mut
/// Parser`: the parser is still in active use (cursor, substitution stores)
/// for the whole lifetime of the guard, so the guard must not borrow it.
struct DepthGuard {
    depth: Rc<Cell<u32>>,
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        self.depth.set(self.depth.get() - 1);
    }
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8], resolver: Option<&'a dyn SymbolicReferenceResolver>, max_depth: u32) -> Self {
        Self {
            cursor: Cursor::new(input),
            subst: SubstitutionStore::new(),
            words: WordStore::new(),
            pending: PendingQueue::new(),
            type_stack: Vec::new(),
            resolver,
            context: None,
            max_depth: if max_depth == 0 { DEFAULT_MAX_DEPTH } else { max_depth },
            depth: Rc::new(Cell::new(0)),
        }
    }

    fn save(&self) -> Snapshot {
        Snapshot {
            pos: self.cursor.save(),
            subst_len: self.subst.len(),
            words_len: self.words.len(),
            pending_len: self.pending.len(),
            type_stack_len: self.type_stack.len(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.cursor.restore(snapshot.pos);
        self.subst.truncate(snapshot.subst_len);
        self.words.truncate(snapshot.words_len);
        self.pending.truncate(snapshot.pending_len);
        self.type_stack.truncate(snapshot.type_stack_len);
    }

    fn enter_depth(&self) -> Result<DepthGuard> {
        let depth = self.depth.get() + 1;
        self.depth.set(depth);
        if depth > self.max_depth {
            self.depth.set(depth - 1);
            return Err(DemangleError::UnterminatedConstruct {
                construct: "recursion depth",
            });
        }
        Ok(DepthGuard { depth: Rc::clone(&self.depth) })
    }

    fn push_substitution(&mut self, node: Ast) {
        self.subst.push(node);
    }

    fn record_identifier_words(&mut self, identifier: &str) {
        self.words.record_identifier(identifier);
    }

    /// Reads one identifier (§4.1), recording its words either way. A
    /// length prefix of `0` — otherwise meaningless, since every real
    /// identifier has length ≥ 1 — signals the word-substituted form
    /// (§4.2 item 2) instead of a plain literal body.
    fn read_identifier(&mut self) -> Result<String> {
        if self.cursor.peek() == b'0' {
            self.cursor.consume()?;
            return self.read_word_substituted_identifier();
        }
        let name = self.cursor.read_identifier()?;
        self.record_identifier_words(&name);
        Ok(name)
    }

    /// Decodes a word-substituted identifier body: each uppercase `A..Z`
    /// byte that resolves against the word list expands to `words[byte -
    /// 'A']`; everything else (lowercase letters, digits, `_`) is literal.
    /// An uppercase byte that doesn't resolve (no such word recorded yet)
    /// is left unconsumed rather than erroring, so it can still serve as
    /// the *next* production's leading byte (e.g. a nominal-kind suffix) —
    /// the same kind of greedy, undelimited-run heuristic as
    /// `parse_label_run` (see DESIGN.md). Literal runs are fed back into
    /// the word list as they're closed off, so later identifiers in the
    /// same parse can reference them too.
    fn read_word_substituted_identifier(&mut self) -> Result<String> {
        let mut out = String::new();
        let mut literal_run = String::new();
        loop {
            let byte = self.cursor.peek();
            if byte.is_ascii_uppercase() {
                match self.words.resolve(byte).map(str::to_string) {
                    Some(word) => {
                        self.cursor.consume()?;
                        if !literal_run.is_empty() {
                            self.words.record_identifier(&literal_run);
                            literal_run.clear();
                        }
                        out.push_str(&word);
                    }
                    None => break,
                }
            } else if byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'_' {
                self.cursor.consume()?;
                out.push(byte as char);
                literal_run.push(byte as char);
            } else {
                break;
            }
        }
        if !literal_run.is_empty() {
            self.words.record_identifier(&literal_run);
        }
        if out.is_empty() {
            return Err(DemangleError::BadIdentifierLength { pos: self.cursor.pos() });
        }
        Ok(out)
    }

    /// Runs `f` speculatively: on `Err`, the cursor and every store are
    /// restored to their pre-call state before the error is returned.
    fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let snapshot = self.save();
        match f(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.restore(snapshot);
                Err(err)
            }
        }
    }

    /// §4.4.2 `parseType`: primary type, contextual suffix, bound-generic
    /// suffix, tuple extension, optional function wrapping, optional sugar.
    pub(crate) fn parse_type(&mut self) -> Result<Ast> {
        let _guard = self.enter_depth()?;
        let start = self.cursor.pos();

        let mut current = self.parse_primary_type()?;
        current = self.parse_contextual_suffix(current)?;
        current = self.parse_bound_generic_suffix(current)?;
        current = self.try_parse_tuple_extension(current)?;
        if !self.peek_matches("Sg") {
            current = self.try_parse_function_after_tuple(current)?;
        }
        current = self.apply_optional_suffix(current)?;

        if self.cursor.pos() == start {
            return Err(DemangleError::NoProgress { pos: start });
        }
        Ok(current)
    }
}

pub use entity::{demangle_entity_chain, demangle_symbol_suffixes};

/// `DemangleType(bytes)`: trims an optional leading `_`, parses one type,
/// requires EOF.
pub fn demangle_type(
    input: &[u8],
    resolver: Option<&dyn SymbolicReferenceResolver>,
    max_depth: u32,
) -> Result<Ast> {
    if input.is_empty() {
        return Err(DemangleError::EmptyInput);
    }
    let input = input.strip_prefix(b"_").unwrap_or(input);
    let mut parser = Parser::new(input, resolver, max_depth);
    let node = parser.parse_type()?;
    if !parser.cursor.eof() {
        return Err(DemangleError::TrailingInput { pos: parser.cursor.pos() });
    }
    Ok(node)
}

/// `DemangleSymbol(bytes)`: trims an optional leading `_`, requires
/// `$s`/`$S`, parses an entity, then zero or more entity suffixes.
pub fn demangle_symbol(
    input: &[u8],
    resolver: Option<&dyn SymbolicReferenceResolver>,
    max_depth: u32,
) -> Result<Ast> {
    if input.is_empty() {
        return Err(DemangleError::EmptyInput);
    }
    let input = input.strip_prefix(b"_").unwrap_or(input);
    let mut parser = Parser::new(input, resolver, max_depth);
    parser.cursor.expect(b'$')?;
    match parser.cursor.consume()? {
        b's' | b'S' => {}
        found => {
            return Err(DemangleError::UnexpectedByte {
                pos: parser.cursor.pos() - 1,
                found,
                expected: "'s' or 'S'",
            })
        }
    }
    let entity = demangle_entity_chain(&mut parser)?;
    let wrapped = demangle_symbol_suffixes(&mut parser, entity)?;
    if !parser.cursor.eof() {
        return Err(DemangleError::TrailingInput { pos: parser.cursor.pos() });
    }
    Ok(wrapped)
}

/// `DemangleString(bytes)`: tries the symbol grammar when the (optionally
/// `_`-stripped) input starts with `$`, falling back to the type grammar on
/// any error from the former.
pub fn demangle_string(
    input: &[u8],
    resolver: Option<&dyn SymbolicReferenceResolver>,
    max_depth: u32,
) -> Result<Ast> {
    if input.is_empty() {
        return Err(DemangleError::EmptyInput);
    }
    let stripped = input.strip_prefix(b"_").unwrap_or(input);
    if stripped.starts_with(b"$") {
        if let Ok(node) = demangle_symbol(input, resolver, max_depth) {
            return Ok(node);
        }
    }
    demangle_type(input, resolver, max_depth)
}
