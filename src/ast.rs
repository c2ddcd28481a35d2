//! The demangler's abstract syntax tree.
//!
//! A [`Node`] is a tagged union: a [`NodeKind`], optional [`text`](Node::text),
//! a small [`NodeFlags`] record, and a flat ordered list of children. Nodes
//! are immutable once built and shared through [`Rc`] — the parser never
//! mutates a node after it has been placed into a substitution list, so
//! structural sharing between substituted subtrees is always safe (see the
//! substitution-clone-safety property the crate is tested against).

use std::rc::Rc;

/// A node in the demangled AST. Always held behind [`Rc`] — see the module docs.
pub type Ast = Rc<Node>;

/// Closed set of AST node kinds, grouped the way the mangling grammar groups
/// its productions (leaf, nominal, composition, sugar, entity, generics,
/// impl-function-type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Leaf
    Identifier,
    Module,
    Index,

    // Nominal
    Struct,
    Class,
    Enum,
    Protocol,
    TypeAlias,

    // Composition
    Tuple,
    EmptyList,
    Function,
    ArgumentTuple,
    Argument,
    ReturnType,
    Metatype,
    Existential,
    BoundGeneric,
    GenericArguments,
    InOut,

    // Sugar
    Optional,
    ImplicitlyUnwrappedOptional,
    Array,
    Dictionary,
    Set,

    // Entity
    Variable,
    Accessor,
    PropertyDescriptor,
    ProtocolDescriptor,
    NominalTypeDescriptor,
    MethodDescriptor,
    Static,
    TypeMetadataAccessor,
    CanonicalSpecializedGenericTypeMetadataAccessor,
    FullTypeMetadata,
    TypeMetadataInstantiationFunction,
    TypeMetadataInstantiationCache,
    SingletonInitializationCache,
    CompletionFunction,
    ClassMetadataBaseOffset,
    ObjCResilientClassStub,
    FullObjCResilientClassStub,
    MethodLookupFunction,
    ObjCMetadataUpdateFunction,
    CanonicalPrespecializedCachingToken,

    // Generics
    DependentGenericParamType,
    DependentAssociatedTypeRef,
    DependentMemberType,

    // Impl function type
    ImplFunctionType,
    ImplEscaping,
    ImplConvention,
    ImplFunctionConvention,
    ImplFunctionConventionName,
    ImplCoroutineKind,
    ImplFunctionAttribute,
    ImplParameter,
    ImplResult,
    ImplSendingResult,
    Type,
}

/// The three boolean flags a node may carry (function async/throws, argument escaping).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct NodeFlags {
    pub is_async: bool,
    pub throws: bool,
    pub escaping: bool,
}

/// A node in the AST: kind, optional text, flags, and ordered children.
///
/// Construction helpers return [`Ast`] (`Rc<Node>`) directly since every node
/// is shared the moment it becomes a child or a substitution-list entry.
#[derive(Debug, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    text: Option<String>,
    flags: NodeFlags,
    children: Vec<Ast>,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn children(&self) -> &[Ast] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Ast> {
        self.children.get(index)
    }

    /// Depth-first pre-order walk over this node and its descendants.
    pub fn walk<'a>(self: &'a Ast, mut f: impl FnMut(&'a Node)) {
        fn go<'a>(node: &'a Node, f: &mut impl FnMut(&'a Node)) {
            f(node);
            for child in &node.children {
                go(child, f);
            }
        }
        go(self, &mut f)
    }

    /// A node with no text and no children, e.g. `emptyList`.
    pub fn leaf(kind: NodeKind) -> Ast {
        Rc::new(Node {
            kind,
            text: None,
            flags: NodeFlags::default(),
            children: Vec::new(),
        })
    }

    /// A text-only leaf: `identifier`, `module`, `index`.
    pub fn text_leaf(kind: NodeKind, text: impl Into<String>) -> Ast {
        Rc::new(Node {
            kind,
            text: Some(text.into()),
            flags: NodeFlags::default(),
            children: Vec::new(),
        })
    }

    /// A node built from children alone, e.g. `tuple`, `genericArguments`.
    pub fn with_children(kind: NodeKind, children: Vec<Ast>) -> Ast {
        Rc::new(Node {
            kind,
            text: None,
            flags: NodeFlags::default(),
            children,
        })
    }

    /// A node with both text and children, e.g. a nominal type or a variable entity.
    pub fn with_text_and_children(
        kind: NodeKind,
        text: impl Into<String>,
        children: Vec<Ast>,
    ) -> Ast {
        Rc::new(Node {
            kind,
            text: Some(text.into()),
            flags: NodeFlags::default(),
            children,
        })
    }

    /// A node with flags set, e.g. `function` with async/throws.
    pub fn with_flags(kind: NodeKind, children: Vec<Ast>, flags: NodeFlags) -> Ast {
        Rc::new(Node {
            kind,
            text: None,
            flags,
            children,
        })
    }

    /// A node with text, flags, and children all set, e.g. a named entity
    /// `function` with async/throws.
    pub fn with_text_flags_children(
        kind: NodeKind,
        text: impl Into<String>,
        flags: NodeFlags,
        children: Vec<Ast>,
    ) -> Ast {
        Rc::new(Node {
            kind,
            text: Some(text.into()),
            flags,
            children,
        })
    }

    /// Rebuilds a node with `kind` replaced, keeping text/flags/children.
    /// Used for the `emptyList` → `tuple` promotion (§3.1): since `emptyList`
    /// always has zero children, this just relabels rather than mutating a
    /// shared node.
    pub fn retag(node: &Ast, kind: NodeKind) -> Ast {
        Rc::new(Node {
            kind,
            text: node.text.clone(),
            flags: node.flags,
            children: node.children.clone(),
        })
    }

    /// Rebuilds a node with `children` replaced, keeping kind/text/flags.
    /// Used by the type-sugar pass to rewrite a subtree bottom-up without
    /// disturbing the node it's rewriting children under.
    pub fn with_new_children(node: &Ast, children: Vec<Ast>) -> Ast {
        Rc::new(Node {
            kind: node.kind,
            text: node.text.clone(),
            flags: node.flags,
            children,
        })
    }

    /// An empty tuple, used both for parsed `()` and for the `emptyList` promotion.
    pub fn empty_tuple() -> Ast {
        Node::with_children(NodeKind::Tuple, Vec::new())
    }

    /// Joins a nominal-shaped chain (module/context children, own name as
    /// text) into a dotted display path, e.g. `MyModule.Outer.Inner`. Used
    /// both by the formatter for standalone nominal nodes and by the entity
    /// parser to bake an owner prefix into a `function` node's text, since
    /// `function` is invariant-bound to exactly two children and has nowhere
    /// else to carry it.
    pub fn dotted_path(node: &Ast) -> String {
        let mut parts: Vec<String> = node.children.iter().map(Node::dotted_path).collect();
        if let Some(text) = &node.text {
            parts.push(text.clone());
        }
        parts.join(".")
    }
}
