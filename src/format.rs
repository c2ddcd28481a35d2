//! AST→string renderer (§4.5): a stateful-per-call formatter that assigns
//! stable names to dependent generic parameters as it walks, applies the
//! handful of node-kind-specific rendering rules, and otherwise falls
//! through to a generic child-list join.

use std::fmt::Write as _;

use crate::ast::{Ast, Node, NodeKind};
use crate::tables::DescriptorSuffix;

/// Renders `ast` to its human-readable text. Builds a fresh [`Formatter`]
/// per call — generic-parameter names never leak between renderings (see
/// the generic-name-stability property).
pub fn render(ast: &Ast) -> String {
    let mut formatter = Formatter::new();
    formatter.render_node(ast)
}

struct Formatter {
    /// `(depth, index) -> assigned name`, filled in on first sight.
    generic_names: std::collections::HashMap<(u32, u32), String>,
    /// Next ordinal to hand out per depth.
    next_ordinal: std::collections::HashMap<u32, u32>,
}

impl Formatter {
    fn new() -> Self {
        Self {
            generic_names: std::collections::HashMap::new(),
            next_ordinal: std::collections::HashMap::new(),
        }
    }

    /// Assigns (or recalls) the display name for generic parameter
    /// `(depth, index)`: `A`, `B`, `C`, … for depth 0, with the depth
    /// appended as a digit for depth ≥ 1 (`A1`, `B1`, …). Falls back to
    /// `τ_d_i` once a depth has handed out more than 26 names.
    fn generic_name(&mut self, depth: u32, index: u32) -> String {
        if let Some(name) = self.generic_names.get(&(depth, index)) {
            return name.clone();
        }
        let ordinal = *self.next_ordinal.entry(depth).or_insert(0);
        self.next_ordinal.insert(depth, ordinal + 1);
        let name = if ordinal < 26 {
            let letter = (b'A' + ordinal as u8) as char;
            if depth == 0 {
                letter.to_string()
            } else {
                format!("{letter}{depth}")
            }
        } else {
            format!("\u{3c4}_{depth}_{index}")
        };
        self.generic_names.insert((depth, index), name.clone());
        name
    }

    fn render_node(&mut self, node: &Ast) -> String {
        match node.kind() {
            NodeKind::Identifier | NodeKind::Module | NodeKind::Index => {
                node.text().unwrap_or_default().to_string()
            }

            NodeKind::Struct | NodeKind::Class | NodeKind::Enum | NodeKind::Protocol | NodeKind::TypeAlias => {
                Node::dotted_path(node)
            }

            NodeKind::Tuple | NodeKind::ArgumentTuple => self.render_tuple(node),
            NodeKind::EmptyList => "()".to_string(),

            NodeKind::Function => self.render_function(node),
            NodeKind::Argument => self.render_argument(node),
            NodeKind::ReturnType => self.render_node(&node.children()[0]),

            NodeKind::Metatype => format!("{}.Type", self.render_node(&node.children()[0])),
            NodeKind::Existential => format!("any {}", self.render_node(&node.children()[0])),

            NodeKind::BoundGeneric => self.render_bound_generic(node),
            NodeKind::GenericArguments => self.render_tuple(node),
            NodeKind::InOut => format!("inout {}", self.render_node(&node.children()[0])),

            NodeKind::Optional => format!("{}?", self.render_node(&node.children()[0])),
            NodeKind::ImplicitlyUnwrappedOptional => format!("{}!", self.render_node(&node.children()[0])),
            NodeKind::Array => format!("[{}]", self.render_node(&node.children()[0])),
            NodeKind::Dictionary => {
                format!(
                    "[{} : {}]",
                    self.render_node(&node.children()[0]),
                    self.render_node(&node.children()[1])
                )
            }
            NodeKind::Set => format!("Set<{}>", self.render_node(&node.children()[0])),

            NodeKind::Variable => self.render_variable(node),
            NodeKind::Accessor => self.render_accessor(node),
            NodeKind::Static => format!("static {}", self.render_node(&node.children()[0])),

            NodeKind::PropertyDescriptor
            | NodeKind::ProtocolDescriptor
            | NodeKind::NominalTypeDescriptor
            | NodeKind::MethodDescriptor
            | NodeKind::TypeMetadataAccessor
            | NodeKind::CanonicalSpecializedGenericTypeMetadataAccessor
            | NodeKind::FullTypeMetadata
            | NodeKind::TypeMetadataInstantiationFunction
            | NodeKind::TypeMetadataInstantiationCache
            | NodeKind::SingletonInitializationCache
            | NodeKind::CompletionFunction
            | NodeKind::ClassMetadataBaseOffset
            | NodeKind::ObjCResilientClassStub
            | NodeKind::FullObjCResilientClassStub
            | NodeKind::MethodLookupFunction
            | NodeKind::ObjCMetadataUpdateFunction
            | NodeKind::CanonicalPrespecializedCachingToken => self.render_descriptor(node),

            NodeKind::DependentGenericParamType => self.render_generic_param(node),
            NodeKind::DependentMemberType => self.render_dependent_member(node),
            NodeKind::DependentAssociatedTypeRef => rename_objc(node.text().unwrap_or_default()),

            NodeKind::ImplFunctionType
            | NodeKind::ImplEscaping
            | NodeKind::ImplConvention
            | NodeKind::ImplFunctionConvention
            | NodeKind::ImplFunctionConventionName
            | NodeKind::ImplCoroutineKind
            | NodeKind::ImplFunctionAttribute
            | NodeKind::ImplParameter
            | NodeKind::ImplResult
            | NodeKind::ImplSendingResult => self.render_impl_function_type(node),

            NodeKind::Type => self.render_node(&node.children()[0]),
        }
    }

    fn render_tuple(&mut self, node: &Ast) -> String {
        let mut out = String::from("(");
        for (i, child) in node.children().iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&self.render_node(child));
        }
        out.push(')');
        out
    }

    fn render_function(&mut self, node: &Ast) -> String {
        let params = self.render_node(&node.children()[0]);
        let result = self.render_node(&node.children()[1]);
        let mut out = String::new();
        if let Some(text) = node.text() {
            out.push_str(text);
        }
        out.push_str(&params);
        let flags = node.flags();
        if flags.is_async {
            out.push_str(" async");
        }
        if flags.throws {
            out.push_str(" throws");
        }
        out.push_str(" -> ");
        out.push_str(&result);
        out
    }

    fn render_argument(&mut self, node: &Ast) -> String {
        let label = node.text().unwrap_or("_");
        let ty = self.render_node(&node.children()[0]);
        format!("{label}: {ty}")
    }

    fn render_bound_generic(&mut self, node: &Ast) -> String {
        let base = self.render_node(&node.children()[0]);
        let args = &node.children()[1];
        let mut out = format!("{base}<");
        for (i, arg) in args.children().iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&self.render_node(arg));
        }
        out.push('>');
        out
    }

    /// `owner.name`, without the optional `: type` suffix — the building
    /// block both a bare `variable` and its `accessor` wrapper render from.
    fn variable_owner_and_name(&self, variable: &Ast) -> String {
        let owner = Node::dotted_path(&variable.children()[0]);
        let name = variable.text().unwrap_or_default();
        format!("{owner}.{name}")
    }

    fn render_variable(&mut self, node: &Ast) -> String {
        let base = self.variable_owner_and_name(node);
        match node.children().get(1) {
            Some(ty) => format!("{base} : {}", self.render_node(ty)),
            None => base,
        }
    }

    fn render_accessor(&mut self, node: &Ast) -> String {
        let variable = &node.children()[0];
        let owner = self.variable_owner_and_name(variable);
        let label = node.text().unwrap_or_default();
        let mut out = format!("{owner}.{label}");
        if let Some(ty) = variable.children().get(1) {
            write!(out, " : {}", self.render_node(ty)).expect("String write never fails");
        }
        out
    }

    fn render_descriptor(&mut self, node: &Ast) -> String {
        let code = descriptor_code_for(node.kind());
        let phrase = DescriptorSuffix::from_code(code)
            .map(DescriptorSuffix::phrase)
            .unwrap_or("");
        format!("{phrase}{}", self.render_node(&node.children()[0]))
    }

    fn render_generic_param(&mut self, node: &Ast) -> String {
        let depth: u32 = node.children()[0].text().unwrap_or("0").parse().unwrap_or(0);
        let index: u32 = node.children()[1].text().unwrap_or("0").parse().unwrap_or(0);
        self.generic_name(depth, index)
    }

    /// `base.member`, special-casing `_ObjectiveCType` to resolve against
    /// generic parameter `(depth, 0)` rather than the literal base — Swift
    /// renders the ObjC bridging associated type against the owning
    /// generic parameter's depth, not its own index.
    fn render_dependent_member(&mut self, node: &Ast) -> String {
        let base = &node.children()[0];
        let assoc = node.children()[1].text().unwrap_or_default();
        let member = rename_objc(assoc);
        if member == "_ObjectiveCType" && base.kind() == NodeKind::DependentGenericParamType {
            let depth: u32 = base.children()[0].text().unwrap_or("0").parse().unwrap_or(0);
            let name = self.generic_name(depth, 0);
            return format!("{name}.{member}");
        }
        format!("{}.{member}", self.render_node(base))
    }

    fn render_impl_function_type(&mut self, node: &Ast) -> String {
        match node.kind() {
            NodeKind::ImplConvention
            | NodeKind::ImplFunctionConvention
            | NodeKind::ImplFunctionConventionName
            | NodeKind::ImplCoroutineKind
            | NodeKind::ImplFunctionAttribute => node.text().unwrap_or_default().to_string(),
            NodeKind::ImplParameter | NodeKind::ImplResult => {
                let convention = node.text().unwrap_or_default();
                let ty = self.render_node(&node.children()[0]);
                format!("{convention} {ty}")
            }
            NodeKind::ImplEscaping => "@escaping".to_string(),
            NodeKind::ImplSendingResult => "@sending".to_string(),
            NodeKind::ImplFunctionType => {
                let parts: Vec<String> = node.children().iter().map(|c| self.render_node(c)).collect();
                format!("@convention({})", parts.join(", "))
            }
            _ => unreachable!("render_impl_function_type only called for impl-function node kinds"),
        }
    }
}

fn rename_objc(text: &str) -> String {
    if text == "ObjectiveCType" {
        "_ObjectiveCType".to_string()
    } else {
        text.to_string()
    }
}

fn descriptor_code_for(kind: NodeKind) -> &'static [u8] {
    match kind {
        NodeKind::ProtocolDescriptor => b"Mp",
        NodeKind::PropertyDescriptor => b"MV",
        NodeKind::NominalTypeDescriptor => b"Mn",
        NodeKind::TypeMetadataAccessor => b"Ma",
        NodeKind::CanonicalSpecializedGenericTypeMetadataAccessor => b"Mb",
        NodeKind::FullTypeMetadata => b"Mf",
        NodeKind::TypeMetadataInstantiationFunction => b"Mi",
        NodeKind::TypeMetadataInstantiationCache => b"MI",
        NodeKind::SingletonInitializationCache => b"Ml",
        NodeKind::CompletionFunction => b"Mr",
        NodeKind::ClassMetadataBaseOffset => b"Mo",
        NodeKind::ObjCResilientClassStub => b"Ms",
        NodeKind::FullObjCResilientClassStub => b"Mt",
        NodeKind::MethodLookupFunction => b"Mu",
        NodeKind::ObjCMetadataUpdateFunction => b"MU",
        NodeKind::CanonicalPrespecializedCachingToken => b"Mz",
        NodeKind::MethodDescriptor => b"Tq",
        _ => b"",
    }
}
