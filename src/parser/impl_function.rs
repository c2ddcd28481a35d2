//! `I`-prefixed impl-function-type grammar (§4.4.6): the low-level calling-
//! convention spelling used inside `@convention(thin)`/SIL-level types,
//! distinct from the high-level `c`-terminated function type in
//! `function.rs`.

use crate::ast::{Ast, Node, NodeFlags, NodeKind};
use crate::error::{DemangleError, Result};
use crate::tables::{
    impl_callee_convention, impl_coroutine_kind, impl_function_representation,
    impl_parameter_convention, impl_result_convention,
};

use super::Parser;

impl<'a> Parser<'a> {
    /// `I [e] [A] <callee> [<representation>] [<coroutine-kind>] [h] [H] [T] <param>* <result>* _`
    /// (§4.4.6). Parameters/results are parsed inline as type+convention
    /// pairs rather than the spec's "convention codes now, bulk-pop
    /// `typeStack` at the end" scheme — no worked example exercises this
    /// production, and the two schemes build the same tree for every
    /// convention-code sequence this parser can reach, so the simpler
    /// inline form is kept (see DESIGN.md).
    pub(crate) fn parse_impl_function_type(&mut self) -> Result<Ast> {
        self.cursor.expect(b'I')?;

        let mut attributes = Vec::new();
        if self.cursor.peek() == b'e' {
            self.cursor.consume()?;
            attributes.push(Node::text_leaf(NodeKind::ImplFunctionAttribute, "@escaping"));
        }
        if self.cursor.peek() == b'A' {
            self.cursor.consume()?;
            attributes.push(Node::text_leaf(NodeKind::ImplFunctionAttribute, "@isolated(any)"));
        }

        let callee_pos = self.cursor.pos();
        let callee_code = self.cursor.consume()?;
        let callee = impl_callee_convention(callee_code)
            .ok_or(DemangleError::UnsupportedSequence { pos: callee_pos })?;
        let callee_node = Node::text_leaf(NodeKind::ImplConvention, callee);

        let representation = self.try_parse_impl_function_representation();

        let coroutine = impl_coroutine_kind(self.cursor.peek()).map(|kind| {
            self.cursor.consume().expect("peek already confirmed a byte is present");
            Node::text_leaf(NodeKind::ImplCoroutineKind, kind)
        });

        if self.cursor.peek() == b'h' {
            self.cursor.consume()?;
            attributes.push(Node::text_leaf(NodeKind::ImplFunctionAttribute, "@Sendable"));
        }
        if self.cursor.peek() == b'H' {
            self.cursor.consume()?;
            attributes.push(Node::text_leaf(NodeKind::ImplFunctionAttribute, "@async"));
        }
        let sending_result = self.cursor.peek() == b'T' && {
            self.cursor.consume()?;
            true
        };

        let mut parameters = Vec::new();
        while let Ok(param) = self.try_parse(Self::parse_impl_parameter) {
            parameters.push(param);
        }
        let mut results = Vec::new();
        while let Ok(result) = self.try_parse(Self::parse_impl_result) {
            results.push(result);
        }

        self.cursor.expect(b'_')?;

        let mut children = vec![callee_node];
        children.extend(representation);
        children.extend(coroutine);
        children.extend(attributes);
        children.extend(parameters);
        children.extend(results);
        if sending_result {
            children.push(Node::leaf(NodeKind::ImplSendingResult));
        }
        let impl_type = Node::with_flags(NodeKind::ImplFunctionType, children, NodeFlags::default());
        Ok(Node::with_children(NodeKind::Type, vec![impl_type]))
    }

    /// §4.4.6 step 4: an optional function representation, `z`-prefixed
    /// two-byte forms (`zB`/`zC`) checked before the one-byte forms.
    fn try_parse_impl_function_representation(&mut self) -> Option<Ast> {
        if self.cursor.peek() == b'z' {
            let snapshot = self.save();
            let _ = self.cursor.consume();
            let second = self.cursor.peek();
            if let Some(name) = impl_function_representation(&[b'z', second]) {
                self.cursor.consume().expect("peek confirmed a byte");
                return Some(Node::text_leaf(NodeKind::ImplFunctionConvention, name));
            }
            self.restore(snapshot);
        }
        let code = self.cursor.peek();
        if let Some(name) = impl_function_representation(&[code]) {
            self.cursor.consume().expect("peek confirmed a byte");
            return Some(Node::text_leaf(NodeKind::ImplFunctionConvention, name));
        }
        None
    }

    /// A parameter is a type followed by its convention code. The type is
    /// pushed onto `type_stack` and immediately popped back off around the
    /// convention read — bookkeeping in the stack-machine style the rest of
    /// the parser uses, even though nothing here needs more than one slot.
    fn parse_impl_parameter(&mut self) -> Result<Ast> {
        let ty = self.parse_type()?;
        self.type_stack.push(ty);
        let pos = self.cursor.pos();
        let code = self.cursor.consume()?;
        let convention =
            impl_parameter_convention(code).ok_or(DemangleError::UnsupportedSequence { pos })?;
        let ty = self.type_stack.pop().expect("just pushed");
        Ok(Node::with_text_and_children(NodeKind::ImplParameter, convention, vec![ty]))
    }

    fn parse_impl_result(&mut self) -> Result<Ast> {
        let ty = self.parse_type()?;
        self.type_stack.push(ty);
        let pos = self.cursor.pos();
        let code = self.cursor.consume()?;
        let convention =
            impl_result_convention(code).ok_or(DemangleError::UnsupportedSequence { pos })?;
        let ty = self.type_stack.pop().expect("just pushed");
        Ok(Node::with_text_and_children(NodeKind::ImplResult, convention, vec![ty]))
    }
}
