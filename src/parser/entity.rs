//! Module/context chain, entity specialization, and symbol suffixes
//! (§4.4.8, §4.4.9) — the grammar `demangle_symbol` drives after the `$s`
//! introducer.

use crate::ast::{Ast, Node, NodeFlags, NodeKind};
use crate::error::{DemangleError, Result};
use crate::tables::{AccessorKind, DescriptorSuffix};

use super::Parser;

/// Parses the entity immediately after `$s`/`$S`. Tries the full
/// module-and-context-chain-plus-entity-spec grammar first; on failure,
/// falls back to a bare type (`$sSiMa`, `$sScAMp` wrap a plain type, not a
/// declaration, directly in a symbol-suffix descriptor).
pub fn demangle_entity_chain(parser: &mut Parser) -> Result<Ast> {
    if let Ok(node) = parser.try_parse(|p| p.parse_declaration_entity()) {
        return Ok(node);
    }
    parser.parse_type()
}

/// §4.4.9: zero or more `M<c>`/`T<c>` suffixes, each wrapping the previous
/// result in a descriptor node.
pub fn demangle_symbol_suffixes(parser: &mut Parser, entity: Ast) -> Result<Ast> {
    let mut node = entity;
    loop {
        if parser.cursor.peek() != b'M' && parser.cursor.peek() != b'T' {
            break;
        }
        let snapshot = parser.save();
        let first = parser.cursor.consume()?;
        let second = match parser.cursor.consume() {
            Ok(b) => b,
            Err(_) => {
                parser.restore(snapshot);
                break;
            }
        };
        match DescriptorSuffix::from_code(&[first, second]) {
            Some(suffix) => node = Node::with_children(suffix.node_kind(), vec![node]),
            None => {
                parser.restore(snapshot);
                break;
            }
        }
    }
    Ok(node)
}

impl<'a> Parser<'a> {
    fn parse_declaration_entity(&mut self) -> Result<Ast> {
        let context = self.parse_module_and_context_chain()?;
        self.context = Some(context.clone());
        self.parse_entity_spec(&context)
    }

    fn parse_module_and_context_chain(&mut self) -> Result<Ast> {
        let module_name = self.read_identifier()?;
        let mut current = Node::text_leaf(NodeKind::Module, module_name);
        loop {
            if !self.cursor.peek().is_ascii_digit() {
                break;
            }
            match self.try_parse(|p| p.try_parse_context_link(&current)) {
                Ok(next) => current = next,
                Err(_) => break,
            }
        }
        Ok(current)
    }

    fn try_parse_context_link(&mut self, parent: &Ast) -> Result<Ast> {
        let name = self.read_identifier()?;
        let pos = self.cursor.pos();
        let kind = match self.cursor.consume()? {
            b'V' => NodeKind::Struct,
            b'C' => NodeKind::Class,
            b'O' => NodeKind::Enum,
            b'P' => NodeKind::Protocol,
            b'N' => NodeKind::TypeAlias,
            found => {
                return Err(DemangleError::UnexpectedByte {
                    pos,
                    found,
                    expected: "nominal kind (V/C/O/P/N)",
                })
            }
        };
        let node = Node::with_text_and_children(kind, name, vec![parent.clone()]);
        self.push_substitution(node.clone());
        Ok(node)
    }

    fn parse_entity_spec(&mut self, context: &Ast) -> Result<Ast> {
        if let Ok(node) = self.try_parse(|p| p.try_parse_constructor_entity(context)) {
            return Ok(node);
        }
        if let Ok(node) = self.try_parse(|p| p.try_parse_function_entity(context)) {
            return Ok(node);
        }
        if let Ok(node) = self.try_parse(|p| p.try_parse_variable_entity(context)) {
            return Ok(node);
        }
        Err(DemangleError::UnsupportedSequence { pos: self.cursor.pos() })
    }

    /// `<name> <label>* <result-type> <param-tuple> [Ya] [K] F`. The
    /// signature parses result-first, matching the type-level function
    /// grammar in `function.rs` for the same reason (§8.2's worked
    /// examples); the owner chain is baked into `text` as a dotted string
    /// since `function` is invariant-bound to exactly two children.
    fn try_parse_function_entity(&mut self, context: &Ast) -> Result<Ast> {
        let name = self.read_identifier()?;
        let labels = self.parse_label_run();
        let result = self.parse_type()?;
        let params = self.parse_entity_parameter_tuple(&labels)?;
        let mut flags = NodeFlags::default();
        if self.cursor.match_string("Ya") {
            flags.is_async = true;
        }
        if self.cursor.peek() == b'K' {
            self.cursor.consume()?;
            flags.throws = true;
        }
        self.cursor.expect(b'F')?;
        let full_name = format!("{}.{}", Node::dotted_path(context), name);
        Ok(Node::with_text_flags_children(NodeKind::Function, full_name, flags, vec![params, result]))
    }

    /// `<name> <type> v <accessor-code>`. `p` (plain stored property) yields
    /// a bare `variable` node; any other code wraps it in `accessor`.
    fn try_parse_variable_entity(&mut self, context: &Ast) -> Result<Ast> {
        let name = self.read_identifier()?;
        let ty = self.parse_type()?;
        self.cursor.expect(b'v')?;
        let code = self.read_accessor_code()?;
        let variable = self.build_variable_node(context.clone(), name, Some(ty));
        if code.as_slice() == b"p" {
            return Ok(variable);
        }
        let kind = AccessorKind::from_code(&code)
            .ok_or(DemangleError::UnsupportedSequence { pos: self.cursor.pos() })?;
        Ok(Node::with_text_and_children(NodeKind::Accessor, kind.label(), vec![variable]))
    }

    /// No explicit name token in the mangling; the owner-chain suffix is
    /// synthesized instead, and differs by terminator: `f C` (the class
    /// allocating initializer) yields `__allocating_init`, `f c` yields
    /// plain `init`. An optional `C<digits><identifier>` private-decl-name
    /// prefix and an optional file discriminator may precede the
    /// signature; `_`/`t`/`c` terminators before the required `f` are
    /// consumed but not otherwise represented (no AST slot for them).
    fn try_parse_constructor_entity(&mut self, context: &Ast) -> Result<Ast> {
        if self.cursor.peek() == b'C' {
            let snapshot = self.save();
            self.cursor.consume()?;
            if self.read_identifier().is_err() {
                self.restore(snapshot);
            }
        }
        let labels = self.parse_label_run();
        let result = self.parse_type()?;
        let params = self.parse_entity_parameter_tuple(&labels)?;
        let mut flags = NodeFlags::default();
        if self.cursor.match_string("Ya") {
            flags.is_async = true;
        }
        if self.cursor.peek() == b'K' {
            self.cursor.consume()?;
            flags.throws = true;
        }
        if self.cursor.peek() == b'F' {
            let snapshot = self.save();
            self.cursor.consume()?;
            if self.cursor.read_number().is_err() {
                self.restore(snapshot);
            }
        }
        while matches!(self.cursor.peek(), b'_' | b't' | b'c') {
            self.cursor.consume()?;
        }
        self.cursor.expect(b'f')?;
        let pos = self.cursor.pos();
        let suffix = match self.cursor.consume()? {
            b'C' => "__allocating_init",
            b'c' => "init",
            found => {
                return Err(DemangleError::UnexpectedByte {
                    pos,
                    found,
                    expected: "'C' or 'c'",
                })
            }
        };
        let full_name = format!("{}.{}", Node::dotted_path(context), suffix);
        Ok(Node::with_text_flags_children(NodeKind::Function, full_name, flags, vec![params, result]))
    }

    /// Greedily consumes `_` / length-prefixed-identifier labels, stopping
    /// at the first byte that can't start either (typically the result
    /// type). See DESIGN.md for the known ambiguity with digit-leading
    /// result types.
    fn parse_label_run(&mut self) -> Vec<String> {
        let mut labels = Vec::new();
        loop {
            if self.cursor.peek() == b'_' {
                self.cursor.consume().expect("peek confirmed a byte");
                labels.push("_".to_string());
                continue;
            }
            if self.cursor.peek().is_ascii_digit() {
                let snapshot = self.save();
                match self.read_identifier() {
                    Ok(ident) => {
                        labels.push(ident);
                        continue;
                    }
                    Err(_) => {
                        self.restore(snapshot);
                        break;
                    }
                }
            }
            break;
        }
        labels
    }

    fn read_accessor_code(&mut self) -> Result<Vec<u8>> {
        let first = self.cursor.consume()?;
        if first == b'a' || first == b'l' {
            let second = self.cursor.consume()?;
            return Ok(vec![first, second]);
        }
        Ok(vec![first])
    }

    fn build_variable_node(&self, context: Ast, name: String, ty: Option<Ast>) -> Ast {
        let mut children = vec![context];
        children.extend(ty);
        Node::with_text_and_children(NodeKind::Variable, name, children)
    }
}
