//! Static lookup tables driven by the grammar: short standard-type codes,
//! accessor codes, descriptor-suffix phrasings, and impl-function-type
//! convention names.
//!
//! None of these are exhaustive reproductions of the full Swift ABI manual —
//! spec §9 notes bit-for-bit parity with the reference implementation is
//! explicitly out of scope for corner cases. They cover what the grammar in
//! §4.4 names plus the handful of standard-library types common enough to
//! show up in almost every real symbol.

use crate::ast::{Ast, Node, NodeKind};

/// Short `S<code>` types recognized by `parsePrimaryType` rule 5/7 (§4.4.3).
/// Looked up by the code *following* the leading `S`.
const KNOWN_SHORT_TYPES: &[(&str, &str)] = &[
    ("i", "Swift.Int"),
    ("S", "Swift.String"),
    ("b", "Swift.Bool"),
    ("d", "Swift.Double"),
    ("f", "Swift.Float"),
    ("u", "Swift.UInt"),
    ("a", "Swift.Array"),
    ("q", "Swift.Optional"),
    ("D", "Swift.Dictionary"),
    ("e", "Swift.Set"),
    ("p", "Swift.UnsafePointer"),
    ("P", "Swift.UnsafeMutablePointer"),
    ("V", "Swift.UnsafeBufferPointer"),
    ("c", "Swift.UnsafeRawPointer"),
    ("y", "Swift.Any"),
    ("o", "Swift.AnyObject"),
    ("g", "Swift.Character"),
    ("Q", "Swift.ImplicitlyUnwrappedOptional"),
    ("v", "Swift.Void"),
    ("z", "Swift.Never"),
    ("E", "Swift.Error"),
    ("A", "Swift.Actor"),
];

/// Looks up a known short type by the code following the leading `S`.
/// Returns the node ready to use as-is (a struct/protocol-shaped leaf — the
/// grammar never needs to distinguish them further for known types).
pub fn known_short_type(code: &str) -> Option<Ast> {
    KNOWN_SHORT_TYPES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, text)| Node::text_leaf(NodeKind::Struct, *text))
}

/// Two-char `Sc<c>` standard types (§4.4.3 rule 7) — the concurrency-library
/// codes, looked up by the single char following `Sc`.
const KNOWN_TWO_CHAR_TYPES: &[(&str, &str)] = &[
    ("A", "Swift.Actor"),
    ("T", "Swift.Task"),
    ("G", "Swift.TaskGroup"),
];

/// Looks up a known `Sc<c>` type by the char following `Sc`.
pub fn known_two_char_type(code: &str) -> Option<Ast> {
    KNOWN_TWO_CHAR_TYPES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, text)| Node::text_leaf(NodeKind::Struct, *text))
}

/// Property/variable accessor codes (§4.4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Getter,
    Setter,
    Modify,
    Modify2,
    Read,
    Read2,
    Init,
    Borrow,
    Mutate,
    GlobalGetter,
    WillSet,
    DidSet,
    UnsafeAddressor,
    OwningAddressor,
    NativePinningAddressor,
    NativeOwningAddressor,
    UnsafeMutableAddressor,
    MutableAddressor,
    NativePinningMutableAddressor,
    NativeMutableAddressor,
}

impl AccessorKind {
    /// The label used after `.` in formatted output, e.g. `value.getter`.
    pub fn label(self) -> &'static str {
        match self {
            AccessorKind::Getter => "getter",
            AccessorKind::Setter => "setter",
            AccessorKind::Modify => "modify",
            AccessorKind::Modify2 => "modify2",
            AccessorKind::Read => "read",
            AccessorKind::Read2 => "read2",
            AccessorKind::Init => "init",
            AccessorKind::Borrow => "borrow",
            AccessorKind::Mutate => "mutate",
            AccessorKind::GlobalGetter => "globalGetter",
            AccessorKind::WillSet => "willSet",
            AccessorKind::DidSet => "didSet",
            AccessorKind::UnsafeAddressor => "unsafeAddressor",
            AccessorKind::OwningAddressor => "owningAddressor",
            AccessorKind::NativePinningAddressor => "nativePinningAddressor",
            AccessorKind::NativeOwningAddressor => "nativeOwningAddressor",
            AccessorKind::UnsafeMutableAddressor => "unsafeMutableAddressor",
            AccessorKind::MutableAddressor => "mutableAddressor",
            AccessorKind::NativePinningMutableAddressor => "nativePinningMutableAddressor",
            AccessorKind::NativeMutableAddressor => "nativeMutableAddressor",
        }
    }

    /// Matches a one- or two-byte accessor code, per §4.4.8's accessor table.
    /// `p` (plain property, no wrapping accessor) is handled by the caller,
    /// not here, since it produces no `accessor` node at all.
    pub fn from_code(code: &[u8]) -> Option<Self> {
        use AccessorKind::*;
        match code {
            b"g" => Some(Getter),
            b"s" => Some(Setter),
            b"M" => Some(Modify),
            b"x" => Some(Modify2),
            b"r" => Some(Read),
            b"y" => Some(Read2),
            b"i" => Some(Init),
            b"b" => Some(Borrow),
            b"z" => Some(Mutate),
            b"G" => Some(GlobalGetter),
            b"w" => Some(WillSet),
            b"W" => Some(DidSet),
            b"aO" => Some(UnsafeAddressor),
            b"ao" => Some(OwningAddressor),
            b"aP" => Some(NativePinningAddressor),
            b"au" => Some(NativeOwningAddressor),
            b"lO" => Some(UnsafeMutableAddressor),
            b"lo" => Some(MutableAddressor),
            b"lp" => Some(NativePinningMutableAddressor),
            b"lu" => Some(NativeMutableAddressor),
            _ => None,
        }
    }
}

/// Descriptor / metadata-accessor suffix wrappers (§4.4.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorSuffix {
    ProtocolDescriptor,
    PropertyDescriptor,
    NominalTypeDescriptor,
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
    MethodDescriptor,
}

impl DescriptorSuffix {
    /// Matches the two-byte suffix code (`M<c>` or `T<c>`) that follows an
    /// entity (§4.4.9). Returns `None` if `code` isn't a recognized suffix.
    pub fn from_code(code: &[u8]) -> Option<Self> {
        use DescriptorSuffix::*;
        match code {
            b"Mp" => Some(ProtocolDescriptor),
            b"MV" => Some(PropertyDescriptor),
            b"Mn" => Some(NominalTypeDescriptor),
            b"Ma" => Some(TypeMetadataAccessor),
            b"Mb" => Some(CanonicalSpecializedGenericTypeMetadataAccessor),
            b"Mf" => Some(FullTypeMetadata),
            b"Mi" => Some(TypeMetadataInstantiationFunction),
            b"MI" => Some(TypeMetadataInstantiationCache),
            b"Ml" => Some(SingletonInitializationCache),
            b"Mr" => Some(CompletionFunction),
            b"Mo" => Some(ClassMetadataBaseOffset),
            b"Ms" => Some(ObjCResilientClassStub),
            b"Mt" => Some(FullObjCResilientClassStub),
            b"Mu" => Some(MethodLookupFunction),
            b"MU" => Some(ObjCMetadataUpdateFunction),
            b"Mz" => Some(CanonicalPrespecializedCachingToken),
            b"Tq" => Some(MethodDescriptor),
            _ => None,
        }
    }

    pub fn node_kind(self) -> NodeKind {
        use DescriptorSuffix::*;
        match self {
            ProtocolDescriptor => NodeKind::ProtocolDescriptor,
            PropertyDescriptor => NodeKind::PropertyDescriptor,
            NominalTypeDescriptor => NodeKind::NominalTypeDescriptor,
            TypeMetadataAccessor => NodeKind::TypeMetadataAccessor,
            CanonicalSpecializedGenericTypeMetadataAccessor => {
                NodeKind::CanonicalSpecializedGenericTypeMetadataAccessor
            }
            FullTypeMetadata => NodeKind::FullTypeMetadata,
            TypeMetadataInstantiationFunction => NodeKind::TypeMetadataInstantiationFunction,
            TypeMetadataInstantiationCache => NodeKind::TypeMetadataInstantiationCache,
            SingletonInitializationCache => NodeKind::SingletonInitializationCache,
            CompletionFunction => NodeKind::CompletionFunction,
            ClassMetadataBaseOffset => NodeKind::ClassMetadataBaseOffset,
            ObjCResilientClassStub => NodeKind::ObjCResilientClassStub,
            FullObjCResilientClassStub => NodeKind::FullObjCResilientClassStub,
            MethodLookupFunction => NodeKind::MethodLookupFunction,
            ObjCMetadataUpdateFunction => NodeKind::ObjCMetadataUpdateFunction,
            CanonicalPrespecializedCachingToken => NodeKind::CanonicalPrespecializedCachingToken,
            MethodDescriptor => NodeKind::MethodDescriptor,
        }
    }

    /// The English phrase rendered before the wrapped child, e.g.
    /// `"type metadata accessor for "`.
    pub fn phrase(self) -> &'static str {
        use DescriptorSuffix::*;
        match self {
            ProtocolDescriptor => "protocol descriptor for ",
            PropertyDescriptor => "property descriptor for ",
            NominalTypeDescriptor => "nominal type descriptor for ",
            TypeMetadataAccessor => "type metadata accessor for ",
            CanonicalSpecializedGenericTypeMetadataAccessor => {
                "canonical specialized generic type metadata accessor for "
            }
            FullTypeMetadata => "full type metadata for ",
            TypeMetadataInstantiationFunction => "type metadata instantiation function for ",
            TypeMetadataInstantiationCache => "type metadata instantiation cache for ",
            SingletonInitializationCache => "singleton initialization cache for ",
            CompletionFunction => "completion function for ",
            ClassMetadataBaseOffset => "class metadata base offset for ",
            ObjCResilientClassStub => "ObjC resilient class stub for ",
            FullObjCResilientClassStub => "full ObjC resilient class stub for ",
            MethodLookupFunction => "method lookup function for ",
            ObjCMetadataUpdateFunction => "ObjC metadata update function for ",
            CanonicalPrespecializedCachingToken => "canonical prespecialized caching token for ",
            MethodDescriptor => "method descriptor for ",
        }
    }
}

/// Impl-function-type parameter conventions (§4.4.6 step 7), in code order.
pub fn impl_parameter_convention(code: u8) -> Option<&'static str> {
    match code {
        b'i' => Some("@in"),
        b'c' => Some("@in_constant"),
        b'l' => Some("@inout"),
        b'b' => Some("@inout_aliasable"),
        b'n' => Some("@in_guaranteed"),
        b'X' => Some("@in_cxx"),
        b'x' => Some("@owned"),
        b'g' => Some("@guaranteed"),
        b'e' => Some("@deallocating"),
        b'y' => Some("@unowned"),
        b'v' => Some("@pack_owned"),
        b'p' => Some("@pack_guaranteed"),
        b'm' => Some("@pack_inout"),
        _ => None,
    }
}

/// Impl-function-type result conventions (§4.4.6 step 8), in code order.
pub fn impl_result_convention(code: u8) -> Option<&'static str> {
    match code {
        b'r' => Some("@out"),
        b'o' => Some("@owned"),
        b'd' => Some("@unowned"),
        b'u' => Some("@unowned_inner_pointer"),
        b'a' => Some("@autoreleased"),
        b'k' => Some("@pack_out"),
        _ => None,
    }
}

/// Impl-function-type callee convention (§4.4.6 step 3, required).
pub fn impl_callee_convention(code: u8) -> Option<&'static str> {
    match code {
        b'y' => Some("@callee_unowned"),
        b'g' => Some("@callee_guaranteed"),
        b'x' => Some("@callee_owned"),
        b't' => Some("@convention(thin)"),
        _ => None,
    }
}

/// Impl-function-type coroutine kind (§4.4.6 step 5).
pub fn impl_coroutine_kind(code: u8) -> Option<&'static str> {
    match code {
        b'A' => Some("yield_once"),
        b'I' => Some("yield_once_2"),
        b'G' => Some("yield_many"),
        _ => None,
    }
}

/// Impl-function-type function representation (§4.4.6 step 4). `zB`/`zC`
/// are two-byte forms (block/c with a clang-type skip-placeholder); the
/// rest are single-byte. Looked up by the full 1- or 2-byte code.
pub fn impl_function_representation(code: &[u8]) -> Option<&'static str> {
    match code {
        b"B" => Some("block"),
        b"C" => Some("c"),
        b"zB" => Some("block"),
        b"zC" => Some("c"),
        b"M" => Some("method"),
        b"J" => Some("objc_method"),
        b"K" => Some("closure"),
        b"W" => Some("witness_method"),
        _ => None,
    }
}
