//! The two back-reference caches and the multi-substitution pending queue
//! (§3.2, §4.2). All three are append-only during a parse and are restored
//! to an earlier length on backtrack — they never need to support arbitrary
//! removal, only truncation back to a saved length.

use std::collections::VecDeque;

use crate::ast::Ast;
use crate::error::{DemangleError, Result};

/// Numeric substitution list: `A<base36>_` / `A_` / `<digit>_` back-references.
/// Entries are pushed after parsing a known-short type, a standard-library
/// nominal, a nominal-or-identifier, a bound generic, a tuple, or a function
/// (§4.2 item 1). Retrieval clones the `Rc` — cheap, and safe because no
/// entry is ever mutated after being pushed.
#[derive(Debug, Default)]
pub struct SubstitutionStore {
    entries: Vec<Ast>,
}

impl SubstitutionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Ast) {
        self.entries.push(node);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<Ast> {
        self.entries
            .get(index)
            .cloned()
            .ok_or(DemangleError::BadSubstitutionIndex {
                index,
                size: self.entries.len(),
            })
    }

    /// Undoes every push since `len` was observed (speculative-parse rollback).
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }
}

/// Word-compression dictionary for identifier back-references (§4.2 item 2).
/// Words are the pieces of a camelCase identifier split at lowercase→
/// uppercase boundaries, with leading/trailing underscores staying attached
/// to whichever word they're adjacent to. Capped at 26 entries — one per
/// letter `A..Z`.
#[derive(Debug, Default)]
pub struct WordStore {
    words: Vec<String>,
}

const WORD_CAP: usize = 26;

impl WordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn truncate(&mut self, len: usize) {
        self.words.truncate(len);
    }

    /// Splits `identifier` into words and appends them (subject to the cap),
    /// per the recording rule in §4.2: only identifiers of length ≥ 2
    /// contribute words at all.
    pub fn record_identifier(&mut self, identifier: &str) {
        if identifier.chars().count() < 2 {
            return;
        }
        for word in split_into_words(identifier) {
            if self.words.len() >= WORD_CAP {
                return;
            }
            self.words.push(word);
        }
    }

    /// Resolves an uppercase back-reference letter (`A..Z`) to a previously
    /// recorded word.
    pub fn resolve(&self, letter: u8) -> Option<&str> {
        if !letter.is_ascii_uppercase() {
            return None;
        }
        let index = (letter - b'A') as usize;
        self.words.get(index).map(String::as_str)
    }
}

/// Splits an identifier at lowercase→uppercase boundaries. Underscores never
/// trigger a split themselves, so leading/trailing underscores stay attached
/// to their neighboring word.
fn split_into_words(identifier: &str) -> Vec<String> {
    let chars: Vec<char> = identifier.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && chars[i - 1].is_lowercase() && c.is_uppercase() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Queue of nodes produced by a multi-substitution (`A…`) escape, consumed
/// by subsequent primary-type parses before anything else is tried (§4.2
/// item 3, §4.4.3 rule 1). `pop_above_floor` enforces the per-scope floor
/// from §3.2: a nested parse may not drain pending entries that existed
/// before it started.
#[derive(Debug, Default)]
pub struct PendingQueue {
    items: VecDeque<Ast>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Ast) {
        self.items.push_back(node);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn pop_above_floor(&mut self, floor: usize) -> Option<Ast> {
        if self.items.len() > floor {
            self.items.pop_front()
        } else {
            None
        }
    }

    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }
}
