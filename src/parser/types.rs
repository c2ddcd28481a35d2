//! `parsePrimaryType` (§4.4.3) and the type-level suffix chain that follows
//! it in `parse_type` (§4.4.2): contextual nesting, bound-generic argument
//! lists, and the `Sg`/`SgXw` optional-sugar loop.

use crate::ast::{Ast, Node, NodeKind};
use crate::error::{DemangleError, Result};
use crate::resolver::parse_symbolic_reference;
use crate::tables::{known_short_type, known_two_char_type};

use super::Parser;

impl<'a> Parser<'a> {
    /// §4.4.3: the fourteen-rule primary-type dispatch. Earlier rules win
    /// where a byte could start more than one of them.
    pub(crate) fn parse_primary_type(&mut self) -> Result<Ast> {
        let start = self.cursor.pos();

        // 1. pending queue left behind by a multi-substitution.
        if let Some(node) = self.pending.pop_above_floor(0) {
            return Ok(node);
        }

        // 2. dependent generic parameter, letter-triggered forms (`d`/`z`/`x`).
        if let Ok(node) = self.try_parse(Self::try_dependent_generic_param) {
            return Ok(node);
        }

        // 3. bare numeric substitution: `<digits>_`.
        if self.cursor.peek().is_ascii_digit() {
            let attempt = self.try_parse(|p| {
                let idx = usize::try_from(p.cursor.read_number()?)
                    .map_err(|_| DemangleError::BadNumber { pos: start })?;
                p.cursor.expect(b'_')?;
                p.subst.get(idx)
            });
            if let Ok(node) = attempt {
                return Ok(node);
            }
        }

        // 4. symbolic reference escape.
        if (0x01..=0x1F).contains(&self.cursor.peek()) {
            let node = parse_symbolic_reference(&mut self.cursor, self.resolver)?;
            self.push_substitution(node.clone());
            return Ok(node);
        }

        // 6. multi-substitution: enqueue into pending, then restart.
        if self.cursor.peek() == b'A' {
            self.parse_multi_substitution()?;
            return self.parse_primary_type();
        }

        // 11. bare `y`: parse-time emptyList placeholder.
        if self.cursor.peek() == b'y' {
            self.cursor.consume()?;
            return Ok(Node::leaf(NodeKind::EmptyList));
        }

        // 13. `I`: impl-function-type.
        if self.cursor.peek() == b'I' {
            return self.parse_impl_function_type();
        }

        // 5/7/8/10: the `S`/`s` prefixed family.
        if self.cursor.peek() == b'S' || self.cursor.peek() == b's' {
            return self.parse_s_prefixed_primary_type();
        }

        // 9: length-prefixed nominal or bare identifier chain. Tried
        // speculatively (unlike the other digit-led forms above, which all
        // fully own the leading digit) so rule 12's bare dependent-member
        // form still gets a turn when the identifier isn't followed by a
        // nominal-kind char.
        if self.cursor.peek().is_ascii_digit() {
            if let Ok(node) = self.try_parse(Self::parse_nominal_or_identifier) {
                return Ok(node);
            }
        }

        // 12: dependent member type without a pre-parsed base.
        if let Ok(node) = self.try_parse(Self::try_dependent_member_without_base) {
            return Ok(node);
        }

        // 14.
        Err(DemangleError::UnsupportedSequence { pos: start })
    }

    fn try_dependent_generic_param(&mut self) -> Result<Ast> {
        let (depth, index) = match self.cursor.peek() {
            b'd' => {
                self.cursor.consume()?;
                let depth = self.cursor.read_number()? + 1;
                let index = self.cursor.read_number()?;
                (depth, index)
            }
            b'z' => {
                self.cursor.consume()?;
                (0, 0)
            }
            b'x' => {
                self.cursor.consume()?;
                (0, 0)
            }
            _ => return Err(DemangleError::UnsupportedSequence { pos: self.cursor.pos() }),
        };
        let node = Node::with_children(
            NodeKind::DependentGenericParamType,
            vec![
                Node::text_leaf(NodeKind::Index, depth.to_string()),
                Node::text_leaf(NodeKind::Index, index.to_string()),
            ],
        );
        if let Ok(assoc_name) = self.try_parse(|p| {
            let ident = p.read_identifier()?;
            p.cursor.expect(b'Q')?;
            p.cursor.expect(b'z')?;
            Ok(ident)
        }) {
            let assoc = Node::text_leaf(NodeKind::DependentAssociatedTypeRef, assoc_name);
            return Ok(Node::with_children(NodeKind::DependentMemberType, vec![node, assoc]));
        }
        Ok(node)
    }

    /// 12: `<assoc-identifier> Q (z | y <generic-param>)` with no explicit
    /// pre-parsed base type — the degenerate `z` arm still needs *some* base,
    /// so it reuses the `(0, 0)` dependent-generic-param shape.
    fn try_dependent_member_without_base(&mut self) -> Result<Ast> {
        let ident = self.read_identifier()?;
        self.cursor.expect(b'Q')?;
        match self.cursor.peek() {
            b'z' => {
                self.cursor.consume()?;
                let base = Node::with_children(
                    NodeKind::DependentGenericParamType,
                    vec![
                        Node::text_leaf(NodeKind::Index, "0"),
                        Node::text_leaf(NodeKind::Index, "0"),
                    ],
                );
                let assoc = Node::text_leaf(NodeKind::DependentAssociatedTypeRef, ident);
                Ok(Node::with_children(NodeKind::DependentMemberType, vec![base, assoc]))
            }
            b'y' => {
                self.cursor.consume()?;
                let base = self.parse_type()?;
                let assoc = Node::text_leaf(NodeKind::DependentAssociatedTypeRef, ident);
                Ok(Node::with_children(NodeKind::DependentMemberType, vec![base, assoc]))
            }
            _ => Err(DemangleError::UnsupportedSequence { pos: self.cursor.pos() }),
        }
    }

    /// 6: `A[<count>](<lower>|<upper>)+[_]`. Lowercase letters are
    /// intermediate substitution references, an uppercase letter ends the
    /// run (and is itself a reference too); `count` (default 1) repeats the
    /// whole enqueue, and a trailing `_` is optional.
    fn parse_multi_substitution(&mut self) -> Result<()> {
        self.cursor.expect(b'A')?;
        let count = if self.cursor.peek().is_ascii_digit() {
            self.cursor.read_number()?
        } else {
            1
        };
        let mut indices = Vec::new();
        loop {
            let c = self.cursor.peek();
            if c.is_ascii_lowercase() {
                self.cursor.consume()?;
                indices.push((c - b'a') as usize);
                continue;
            }
            if c.is_ascii_uppercase() {
                self.cursor.consume()?;
                indices.push(26 + (c - b'A') as usize);
                break;
            }
            break;
        }
        if indices.is_empty() {
            return Err(DemangleError::UnsupportedSequence { pos: self.cursor.pos() });
        }
        if self.cursor.peek() == b'_' {
            self.cursor.consume()?;
        }
        for _ in 0..count.max(1) {
            for &idx in &indices {
                let node = self.subst.get(idx)?;
                self.pending.push(node);
            }
        }
        Ok(())
    }

    fn parse_s_prefixed_primary_type(&mut self) -> Result<Ast> {
        let start = self.cursor.pos();
        let prefix = self.cursor.consume()?;

        if prefix == b's' {
            // 8: standard-lib nominal, implicit `Swift` module.
            return self.parse_standard_lib_nominal();
        }

        // 10: explicit substitution `S<base36-digits>_`, tried first since it
        // fully consumes its own `_` terminator and nothing else does.
        if let Ok(node) = self.try_parse(|p| {
            let index = p.read_base36_substitution_index()?;
            p.subst.get(index)
        }) {
            return Ok(node);
        }

        // 7: `Sc<c>` — concurrency-library two-char codes.
        if self.cursor.peek() == b'c' {
            if let Ok(node) = self.try_parse(|p| {
                p.cursor.consume()?;
                let code = p.cursor.consume()? as char;
                known_two_char_type(&code.to_string())
                    .ok_or(DemangleError::UnsupportedSequence { pos: start })
            }) {
                self.push_substitution(node.clone());
                return Ok(node);
            }
        }

        // 7: `So<identifier>C` — an Objective-C class living in `__C`.
        if self.cursor.peek() == b'o' {
            if let Ok(node) = self.try_parse(|p| {
                p.cursor.consume()?;
                let name = p.read_identifier()?;
                p.cursor.expect(b'C')?;
                Ok(Node::with_text_and_children(
                    NodeKind::Class,
                    name,
                    vec![Node::text_leaf(NodeKind::Module, "__C")],
                ))
            }) {
                self.push_substitution(node.clone());
                return Ok(node);
            }
        }

        // 5: known short type, shortest code first.
        for len in 1..=4usize {
            let attempt = self.try_parse(|p| {
                let mut code = String::new();
                for _ in 0..len {
                    code.push(p.cursor.consume()? as char);
                }
                known_short_type(&code).ok_or(DemangleError::UnsupportedSequence { pos: start })
            });
            if let Ok(node) = attempt {
                self.push_substitution(node.clone());
                return Ok(node);
            }
        }

        Err(DemangleError::UnsupportedSequence { pos: start })
    }

    /// `S<base36-digits>_`: `S_` is index 0, otherwise the base-36 value
    /// plus one (mirroring the `A_`/`A<base36>_` numbering in §4.2).
    fn read_base36_substitution_index(&mut self) -> Result<usize> {
        let start = self.cursor.pos();
        if self.cursor.peek() == b'_' {
            self.cursor.consume()?;
            return Ok(0);
        }
        let mut value: usize = 0;
        let mut saw_digit = false;
        loop {
            let digit = match self.cursor.peek() {
                c @ b'0'..=b'9' => (c - b'0') as usize,
                c @ b'A'..=b'Z' => 10 + (c - b'A') as usize,
                _ => break,
            };
            value = value
                .checked_mul(36)
                .and_then(|v| v.checked_add(digit))
                .ok_or(DemangleError::BadNumber { pos: start })?;
            self.cursor.consume()?;
            saw_digit = true;
        }
        if !saw_digit {
            return Err(DemangleError::BadNumber { pos: start });
        }
        self.cursor.expect(b'_')?;
        Ok(value + 1)
    }

    /// 8: `s<length-prefixed-chain><kind-char or default-protocol>`, module
    /// implied to be `Swift` (never spelled out in the mangling).
    fn parse_standard_lib_nominal(&mut self) -> Result<Ast> {
        let idents = self.parse_identifier_chain()?;
        let kind = match self.cursor.peek() {
            b'V' => {
                self.cursor.consume()?;
                NodeKind::Struct
            }
            b'C' => {
                self.cursor.consume()?;
                NodeKind::Class
            }
            b'O' => {
                self.cursor.consume()?;
                NodeKind::Enum
            }
            b'P' => {
                self.cursor.consume()?;
                NodeKind::Protocol
            }
            b'N' => {
                self.cursor.consume()?;
                NodeKind::TypeAlias
            }
            _ => NodeKind::Protocol,
        };
        let mut children = vec![Node::text_leaf(NodeKind::Module, "Swift")];
        children.extend(idents[..idents.len() - 1].iter().map(|s| Node::text_leaf(NodeKind::Identifier, s.clone())));
        let node = Node::with_text_and_children(kind, idents[idents.len() - 1].clone(), children);
        self.push_substitution(node.clone());
        self.context = Some(node.clone());
        Ok(node)
    }

    /// 9: one or more length-prefixed identifiers followed by a kind char.
    fn parse_nominal_or_identifier(&mut self) -> Result<Ast> {
        let idents = self.parse_identifier_chain()?;
        let kind = match self.cursor.peek() {
            b'V' => NodeKind::Struct,
            b'C' => NodeKind::Class,
            b'O' => NodeKind::Enum,
            b'P' => NodeKind::Protocol,
            b'N' => NodeKind::TypeAlias,
            found => {
                return Err(DemangleError::UnexpectedByte {
                    pos: self.cursor.pos(),
                    found,
                    expected: "nominal kind (V/C/O/P/N)",
                })
            }
        };
        self.cursor.consume()?;
        let node = self.build_nominal_from_chain(idents, kind);
        self.push_substitution(node.clone());
        self.context = Some(node.clone());
        Ok(node)
    }

    fn parse_identifier_chain(&mut self) -> Result<Vec<String>> {
        let mut idents = Vec::new();
        while self.cursor.peek().is_ascii_digit() {
            let ident = self.read_identifier()?;
            idents.push(ident);
        }
        if idents.is_empty() {
            return Err(DemangleError::UnsupportedSequence { pos: self.cursor.pos() });
        }
        Ok(idents)
    }

    /// Builds a nominal node from an identifier chain: a single identifier
    /// is a naked nominal with no module child; two or more treat the first
    /// as the module and the last as the node's own name.
    fn build_nominal_from_chain(&mut self, idents: Vec<String>, kind: NodeKind) -> Ast {
        if idents.len() == 1 {
            return Node::with_text_and_children(kind, idents.into_iter().next().unwrap(), vec![]);
        }
        let mut idents = idents;
        let name = idents.pop().unwrap();
        let module = Node::text_leaf(NodeKind::Module, idents.remove(0));
        let mut children = vec![module];
        children.extend(idents.into_iter().map(|s| Node::text_leaf(NodeKind::Identifier, s)));
        Node::with_text_and_children(kind, name, children)
    }

    /// Contextual nesting: repeated `<len><ident><kind>` suffixes that
    /// re-parent a nominal type inside another (e.g. a nested type).
    pub(crate) fn parse_contextual_suffix(&mut self, current: Ast) -> Result<Ast> {
        let mut node = current;
        loop {
            if !matches!(
                node.kind(),
                NodeKind::Struct | NodeKind::Class | NodeKind::Enum | NodeKind::Protocol | NodeKind::TypeAlias
            ) {
                break;
            }
            if !self.cursor.peek().is_ascii_digit() {
                break;
            }
            let attempt = self.try_parse(|p| {
                let ident = p.read_identifier()?;
                let kind = match p.cursor.peek() {
                    b'V' => NodeKind::Struct,
                    b'C' => NodeKind::Class,
                    b'O' => NodeKind::Enum,
                    b'P' => NodeKind::Protocol,
                    b'N' => NodeKind::TypeAlias,
                    found => {
                        return Err(DemangleError::UnexpectedByte {
                            pos: p.cursor.pos(),
                            found,
                            expected: "nominal kind (V/C/O/P/N)",
                        })
                    }
                };
                p.cursor.consume()?;
                Ok((ident, kind))
            });
            match attempt {
                Ok((ident, kind)) => {
                    let mut children = node.children().to_vec();
                    children.push(Node::text_leaf(NodeKind::Identifier, node.text().unwrap_or("").to_string()));
                    node = Node::with_text_and_children(kind, ident, children);
                    self.push_substitution(node.clone());
                    self.context = Some(node.clone());
                }
                Err(_) => break,
            }
        }
        Ok(node)
    }

    /// Bound-generic argument list: `y <type>* [_] G`. Arguments are parsed
    /// via full recursive `parse_type` calls in a speculative loop — the
    /// byte-level mangling carries no inter-argument separator (`SaySiG`,
    /// `SDySSSiG`), and the one observed stray `_` right before `G`
    /// (`SqySi_G`) is consumed as an optional, not a delimiter.
    pub(crate) fn parse_bound_generic_suffix(&mut self, base: Ast) -> Result<Ast> {
        if self.cursor.peek() != b'y' {
            return Ok(base);
        }
        let snapshot = self.save();
        self.cursor.consume()?;
        let mut args = Vec::new();
        loop {
            match self.try_parse(|p| p.parse_type()) {
                Ok(arg) => args.push(arg),
                Err(_) => break,
            }
        }
        if self.cursor.peek() == b'_' {
            self.cursor.consume()?;
        }
        if args.is_empty() || self.cursor.expect(b'G').is_err() {
            self.restore(snapshot);
            return Ok(base);
        }
        let generic_args = Node::with_children(NodeKind::GenericArguments, args);
        let node = Node::with_children(NodeKind::BoundGeneric, vec![base, generic_args]);
        self.push_substitution(node.clone());
        Ok(node)
    }

    /// `Sg`/`SgXw` loop: wraps in `optional`/`implicitlyUnwrappedOptional`.
    pub(crate) fn apply_optional_suffix(&mut self, base: Ast) -> Result<Ast> {
        let mut node = base;
        loop {
            if self.peek_matches("SgXw") {
                self.cursor.expect(b'S')?;
                self.cursor.expect(b'g')?;
                self.cursor.expect(b'X')?;
                self.cursor.expect(b'w')?;
                node = Node::with_children(NodeKind::ImplicitlyUnwrappedOptional, vec![node]);
                continue;
            }
            if self.peek_matches("Sg") {
                self.cursor.expect(b'S')?;
                self.cursor.expect(b'g')?;
                node = Node::with_children(NodeKind::Optional, vec![node]);
                continue;
            }
            break;
        }
        Ok(node)
    }

    /// Non-consuming lookahead for a literal byte string.
    pub(crate) fn peek_matches(&self, s: &str) -> bool {
        s.bytes().enumerate().all(|(i, b)| self.cursor.peek_at(i) == b)
    }
}
