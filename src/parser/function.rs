//! Tuple extension and function-type wrapping (§4.4.4), plus the entity-level
//! parameter tuple used by declaration signatures (§4.4.5).
//!
//! The worked examples in §8.2 mangle a function type *result first*: the
//! primary type already parsed by `parse_type` is the result, a fresh input
//! (tuple or singleton) follows, then optional `Ya`/`K`, then the required
//! `c`. `SbSi_SStc` → `(Swift.Int, Swift.String) -> Swift.Bool` and
//! `SbSi_SStYaKc` → `... async throws -> Swift.Bool` only parse under that
//! order — the alternative reading in the prose (input first, result last)
//! has no result bytes left to consume once `c` is reached.

use crate::ast::{Ast, Node, NodeFlags, NodeKind};
use crate::error::Result;

use super::Parser;

impl<'a> Parser<'a> {
    /// Extends an already-parsed type into a tuple via a trailing
    /// `(_ <type>)+ t`. Used for bare tuple types (`Si_Sit`) and as the
    /// first stage a function's result candidate passes through before
    /// function-wrapping is attempted.
    pub(crate) fn try_parse_tuple_extension(&mut self, base: Ast) -> Result<Ast> {
        if self.cursor.peek() != b'_' {
            return Ok(base);
        }
        let snapshot = self.save();
        match self.parse_tuple_tail(base.clone()) {
            Ok(tuple) => {
                self.push_substitution(tuple.clone());
                Ok(tuple)
            }
            Err(_) => {
                self.restore(snapshot);
                Ok(base)
            }
        }
    }

    /// `(_ <type>)+ t`, `first` already parsed. Shared by tuple extension and
    /// entity parameter tuples — later elements go through full `parse_type`
    /// since a tuple element can itself be a function type.
    pub(crate) fn parse_tuple_tail(&mut self, first: Ast) -> Result<Ast> {
        let mut elements = vec![first];
        while self.cursor.peek() == b'_' {
            self.cursor.consume()?;
            elements.push(self.parse_type()?);
        }
        self.cursor.expect(b't')?;
        Ok(Node::with_children(NodeKind::Tuple, elements))
    }

    /// Attempts to wrap `result_candidate` as a function's result by parsing
    /// a fresh input, optional `Ya`/`K`, and the required `c`. On any
    /// failure the attempt is fully backed out and `result_candidate` is
    /// returned unchanged — this is how a bare type (no function wrapper)
    /// survives when nothing after it completes the function grammar.
    pub(crate) fn try_parse_function_after_tuple(&mut self, result_candidate: Ast) -> Result<Ast> {
        let snapshot = self.save();
        match self.parse_function_tail(result_candidate.clone()) {
            Ok(func) => Ok(func),
            Err(_) => {
                self.restore(snapshot);
                Ok(result_candidate)
            }
        }
    }

    fn parse_function_tail(&mut self, result: Ast) -> Result<Ast> {
        let input = self.parse_function_input()?;
        let mut flags = NodeFlags::default();
        if self.cursor.match_string("Ya") {
            flags.is_async = true;
        }
        if self.cursor.peek() == b'K' {
            self.cursor.consume()?;
            flags.throws = true;
        }
        self.cursor.expect(b'c')?;
        Ok(Node::with_flags(NodeKind::Function, vec![input, result], flags))
    }

    /// A function's input: unit (`y`), a parenthesized tuple, or a single
    /// type wrapped in a singleton tuple. The first element is parsed via
    /// [`Parser::parse_input_element`] rather than `parse_type` directly —
    /// calling the latter would recursively attempt *its own* function
    /// wrapping on the same bytes, which is both wrong and, for a bare
    /// single-type input, would skip the singleton-tuple wrapping entirely.
    pub(crate) fn parse_function_input(&mut self) -> Result<Ast> {
        let first = self.parse_input_element()?;
        if self.cursor.peek() == b'_' {
            return self.parse_tuple_tail(first);
        }
        if first.kind() == NodeKind::EmptyList {
            return Ok(Node::retag(&first, NodeKind::Tuple));
        }
        Ok(Node::with_children(NodeKind::Tuple, vec![first]))
    }

    /// A single tuple/function-input element: primary type plus the
    /// contextual, bound-generic and optional-sugar suffixes, but
    /// deliberately not tuple-extension or function-wrapping (the caller
    /// handles those at the list level).
    pub(crate) fn parse_input_element(&mut self) -> Result<Ast> {
        let mut current = self.parse_primary_type()?;
        current = self.parse_contextual_suffix(current)?;
        current = self.parse_bound_generic_suffix(current)?;
        current = self.apply_optional_suffix(current)?;
        Ok(current)
    }

    /// §4.4.5: an entity declaration's parameter tuple. Structurally the
    /// same grammar as a type-level tuple (first element bare, then
    /// `_element`*, terminal `t`), zipped against `labels` to build
    /// `argument` nodes instead of bare elements. Each element may carry a
    /// trailing `z` marking it `inOut`.
    pub(crate) fn parse_entity_parameter_tuple(&mut self, labels: &[String]) -> Result<Ast> {
        let first = self.parse_inout_wrapped_element()?;
        let elements: Vec<Ast> = if self.cursor.peek() == b'_' {
            let mut elements = vec![first];
            while self.cursor.peek() == b'_' {
                self.cursor.consume()?;
                elements.push(self.parse_inout_wrapped_element()?);
            }
            self.cursor.expect(b't')?;
            elements
        } else if first.kind() == NodeKind::EmptyList {
            Vec::new()
        } else {
            vec![first]
        };
        Ok(self.zip_arguments(elements, labels))
    }

    /// A parameter element followed by an optional trailing `z`, which
    /// wraps it in `inOut`.
    fn parse_inout_wrapped_element(&mut self) -> Result<Ast> {
        let element = self.parse_input_element()?;
        if self.cursor.peek() == b'z' {
            self.cursor.consume()?;
            return Ok(Node::with_children(NodeKind::InOut, vec![element]));
        }
        Ok(element)
    }

    fn zip_arguments(&self, elements: Vec<Ast>, labels: &[String]) -> Ast {
        let labels = self.normalize_labels(elements.len(), labels);
        let args = elements
            .into_iter()
            .zip(labels)
            .map(|(ty, label)| Node::with_text_and_children(NodeKind::Argument, label, vec![ty]))
            .collect();
        Node::with_children(NodeKind::ArgumentTuple, args)
    }

    /// If there is exactly one fewer label than parameter, the first
    /// parameter is unlabeled (shifts the rest into place).
    fn normalize_labels(&self, param_count: usize, labels: &[String]) -> Vec<String> {
        if labels.len() + 1 == param_count {
            let mut shifted = vec!["_".to_string()];
            shifted.extend(labels.iter().cloned());
            return shifted;
        }
        let mut labels = labels.to_vec();
        labels.resize(param_count, "_".to_string());
        labels
    }
}
