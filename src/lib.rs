//! Swift symbol and type demangler.
//!
//! Turns a mangled Swift symbol (`$s...`) or standalone mangled type into a
//! human-readable string and an [`Ast`] a caller can inspect further. See
//! [`demangle`], [`demangle_symbol_string`], and [`demangle_type_string`].
//!
//! ```
//! use swift_demangle::{demangle_type_string, DemangleOptions};
//!
//! let (text, _ast) = demangle_type_string(b"Si", &DemangleOptions::default()).unwrap();
//! assert_eq!(text, "Swift.Int");
//! ```

pub mod ast;
pub mod cursor;
pub mod error;
pub mod format;
pub mod parser;
pub mod resolver;
pub mod subst;
pub mod sugar;
pub mod tables;

#[cfg(test)]
mod cursor_tests;
#[cfg(test)]
mod format_tests;
#[cfg(test)]
mod resolver_tests;
#[cfg(test)]
mod tables_tests;

pub use ast::{Ast, Node, NodeFlags, NodeKind};
pub use error::{DemangleError, Result};
pub use resolver::SymbolicReferenceResolver;

/// Options shared by all three entry points (§6.1, §6.3).
///
/// `resolver` is consulted for every symbolic-reference escape encountered;
/// leaving it `None` turns a symbolic reference into a [`DemangleError::MissingResolver`].
/// `max_depth` bounds recursive-descent nesting (§5); `0` falls back to the
/// parser's built-in default.
pub struct DemangleOptions {
    pub resolver: Option<Box<dyn SymbolicReferenceResolver>>,
    pub max_depth: u32,
}

impl Default for DemangleOptions {
    fn default() -> Self {
        Self {
            resolver: None,
            max_depth: 512,
        }
    }
}

impl DemangleOptions {
    fn resolver(&self) -> Option<&dyn SymbolicReferenceResolver> {
        self.resolver.as_deref()
    }
}

/// `DemangleTypeString(bytes)`: parses `input` as a standalone mangled type,
/// applies the type-sugar pass, and renders it.
pub fn demangle_type_string(input: &[u8], options: &DemangleOptions) -> Result<(String, Ast)> {
    let parsed = parser::demangle_type(input, options.resolver(), options.max_depth)?;
    let ast = sugar::apply(&parsed);
    let text = format::render(&ast);
    Ok((text, ast))
}

/// `DemangleSymbolString(bytes)`: parses `input` as a mangled symbol
/// (`$s`/`$S` plus an entity chain and suffixes), applies the type-sugar
/// pass, and renders it.
pub fn demangle_symbol_string(input: &[u8], options: &DemangleOptions) -> Result<(String, Ast)> {
    let parsed = parser::demangle_symbol(input, options.resolver(), options.max_depth)?;
    let ast = sugar::apply(&parsed);
    let text = format::render(&ast);
    Ok((text, ast))
}

/// `Demangle(bytes)`: tries the symbol grammar, falling back to the type
/// grammar, and renders whichever succeeds.
pub fn demangle(input: &[u8], options: &DemangleOptions) -> Result<(String, Ast)> {
    let parsed = parser::demangle_string(input, options.resolver(), options.max_depth)?;
    let ast = sugar::apply(&parsed);
    let text = format::render(&ast);
    Ok((text, ast))
}
