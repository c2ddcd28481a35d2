//! Symbolic-reference resolution contract (§4.3).
//!
//! The core never decodes a symbolic reference's payload itself — that
//! requires knowledge of the surrounding binary (a Mach-O image, a relative
//! offset table) that lives entirely outside this crate. It only defines the
//! callback shape and the escape-sequence framing around it.

use crate::ast::Ast;
use crate::cursor::Cursor;
use crate::error::{DemangleError, Result};

/// Resolves a symbolic-reference escape to an AST subtree.
///
/// `control` is the escape's introducer byte (`0x01..=0x1F`). `payload` is
/// the fixed-width binary blob following it — 4 bytes for `0x01..=0x17`, a
/// machine-pointer-sized blob for `0x18..=0x1F`. `ref_index` is the absolute
/// buffer offset of the first payload byte, for callers that need to
/// compute an address relative to the mangled name's location in memory.
pub trait SymbolicReferenceResolver {
    fn resolve(&self, control: u8, payload: &[u8], ref_index: usize) -> Result<Ast>;
}

impl<F> SymbolicReferenceResolver for F
where
    F: Fn(u8, &[u8], usize) -> Result<Ast>,
{
    fn resolve(&self, control: u8, payload: &[u8], ref_index: usize) -> Result<Ast> {
        self(control, payload, ref_index)
    }
}

/// Length in bytes of a symbolic reference's payload for a given control byte.
fn payload_len(control: u8) -> usize {
    if control <= 0x17 {
        4
    } else {
        std::mem::size_of::<usize>()
    }
}

/// Parses one symbolic-reference escape starting at the cursor's current
/// position, which must be a byte in `0x01..=0x1F`. On success, returns the
/// resolver's subtree; the caller pushes it onto the substitution list as
/// any other primary-type result.
pub fn parse_symbolic_reference(
    cursor: &mut Cursor,
    resolver: Option<&dyn SymbolicReferenceResolver>,
) -> Result<Ast> {
    let start = cursor.pos();
    let control = cursor.peek();
    if !(0x01..=0x1F).contains(&control) {
        return Err(DemangleError::UnsupportedSequence { pos: start });
    }
    cursor.consume()?;

    let len = payload_len(control);
    let ref_index = cursor.pos();
    let mut payload = Vec::with_capacity(len);
    for _ in 0..len {
        let byte = cursor
            .consume()
            .map_err(|_| DemangleError::TruncatedSymbolicReference { pos: start })?;
        payload.push(byte);
    }

    let resolver = resolver.ok_or(DemangleError::MissingResolver { pos: start })?;
    resolver.resolve(control, &payload, ref_index)
}
