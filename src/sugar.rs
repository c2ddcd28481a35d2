//! Type-sugar pass (§4.4.7): a pure AST→AST rewrite applied after parsing,
//! before formatting. A `boundGeneric(base, genericArguments(args…))` whose
//! base is one of a handful of known standard-library identifiers is
//! replaced by the sugared node shape the formatter renders specially
//! (`?`, `!`, `[T]`, `[K : V]`, `Set<T>`).
//!
//! Applied bottom-up so a sugared argument (e.g. `Swift.Int?` inside
//! `Swift.Array<Swift.Int?>`) is itself sugared before its enclosing
//! `boundGeneric` is considered. Idempotent: a node already rewritten into
//! `optional`/`array`/… no longer has kind `boundGeneric`, so a second pass
//! leaves it untouched.

use crate::ast::{Ast, Node, NodeKind};

/// Applies the sugar pass to `node` and its descendants, returning a new tree.
pub fn apply(node: &Ast) -> Ast {
    let children: Vec<Ast> = node.children().iter().map(apply).collect();
    let node = Node::with_new_children(node, children);

    if node.kind() != NodeKind::BoundGeneric {
        return node;
    }
    let base = &node.children()[0];
    let args = node.children()[1].children();
    let sugared_kind = match (base.text(), args.len()) {
        (Some("Swift.Optional"), 1) => Some(NodeKind::Optional),
        (Some("Swift.ImplicitlyUnwrappedOptional"), 1) => Some(NodeKind::ImplicitlyUnwrappedOptional),
        (Some("Swift.Array"), 1) => Some(NodeKind::Array),
        (Some("Swift.Set"), 1) => Some(NodeKind::Set),
        (Some("Swift.Dictionary"), 2) => Some(NodeKind::Dictionary),
        _ => None,
    };
    match sugared_kind {
        Some(kind) => Node::with_children(kind, args.to_vec()),
        None => node,
    }
}
