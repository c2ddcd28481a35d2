use super::*;
use crate::ast::{Node, NodeFlags, NodeKind};

fn int_type() -> Ast {
    Node::text_leaf(NodeKind::Struct, "Swift.Int")
}

fn string_type() -> Ast {
    Node::text_leaf(NodeKind::Struct, "Swift.String")
}

#[test]
fn nominal_joins_module_and_nested_context_with_dots() {
    let module = Node::text_leaf(NodeKind::Module, "MyModule");
    let ty = Node::with_text_and_children(NodeKind::Struct, "MyType", vec![module]);
    assert_eq!(render(&ty), "MyModule.MyType");
}

#[test]
fn tuple_renders_parenthesized_even_for_a_single_element() {
    let tuple = Node::with_children(NodeKind::Tuple, vec![int_type()]);
    assert_eq!(render(&tuple), "(Swift.Int)");
}

#[test]
fn empty_tuple_renders_as_empty_parens() {
    assert_eq!(render(&Node::empty_tuple()), "()");
}

#[test]
fn bare_function_renders_without_leading_text_and_with_flags() {
    let input = Node::with_children(NodeKind::Tuple, vec![int_type(), string_type()]);
    let mut flags = NodeFlags::default();
    flags.is_async = true;
    flags.throws = true;
    let func = Node::with_flags(NodeKind::Function, vec![input, Node::text_leaf(NodeKind::Struct, "Swift.Bool")], flags);
    assert_eq!(render(&func), "(Swift.Int, Swift.String) async throws -> Swift.Bool");
}

#[test]
fn entity_function_runs_text_directly_into_its_parameter_list() {
    let arg = Node::with_text_and_children(NodeKind::Argument, "_", vec![int_type()]);
    let params = Node::with_children(NodeKind::ArgumentTuple, vec![arg]);
    let func = Node::with_text_flags_children(
        NodeKind::Function,
        "M.Foo.foo",
        NodeFlags::default(),
        vec![params, Node::text_leaf(NodeKind::Struct, "Swift.Bool")],
    );
    assert_eq!(render(&func), "M.Foo.foo(_: Swift.Int) -> Swift.Bool");
}

#[test]
fn optional_array_dictionary_set_wrap_their_children() {
    assert_eq!(render(&Node::with_children(NodeKind::Optional, vec![int_type()])), "Swift.Int?");
    assert_eq!(
        render(&Node::with_children(NodeKind::ImplicitlyUnwrappedOptional, vec![int_type()])),
        "Swift.Int!"
    );
    assert_eq!(render(&Node::with_children(NodeKind::Array, vec![int_type()])), "[Swift.Int]");
    assert_eq!(
        render(&Node::with_children(NodeKind::Dictionary, vec![string_type(), int_type()])),
        "[Swift.String : Swift.Int]"
    );
    assert_eq!(render(&Node::with_children(NodeKind::Set, vec![int_type()])), "Set<Swift.Int>");
}

#[test]
fn variable_joins_owner_path_name_and_type() {
    let module = Node::text_leaf(NodeKind::Module, "DemangleFixtures");
    let owner = Node::with_text_and_children(NodeKind::Class, "Counter", vec![module]);
    let variable = Node::with_text_and_children(NodeKind::Variable, "value", vec![owner, int_type()]);
    assert_eq!(render(&variable), "DemangleFixtures.Counter.value : Swift.Int");
}

#[test]
fn accessor_appends_label_after_owner_path_and_type_after_label() {
    let module = Node::text_leaf(NodeKind::Module, "DemangleFixtures");
    let owner = Node::with_text_and_children(NodeKind::Class, "Counter", vec![module]);
    let variable = Node::with_text_and_children(NodeKind::Variable, "value", vec![owner, int_type()]);
    let accessor = Node::with_text_and_children(NodeKind::Accessor, "getter", vec![variable]);
    assert_eq!(render(&accessor), "DemangleFixtures.Counter.value.getter : Swift.Int");
}

#[test]
fn property_descriptor_prefixes_the_english_phrase() {
    let module = Node::text_leaf(NodeKind::Module, "DemangleFixtures");
    let owner = Node::with_text_and_children(NodeKind::Class, "Counter", vec![module]);
    let variable = Node::with_text_and_children(NodeKind::Variable, "value", vec![owner, int_type()]);
    let descriptor = Node::with_children(NodeKind::PropertyDescriptor, vec![variable]);
    assert_eq!(render(&descriptor), "property descriptor for DemangleFixtures.Counter.value : Swift.Int");
}

#[test]
fn type_metadata_accessor_wraps_a_bare_type() {
    let descriptor = Node::with_children(NodeKind::TypeMetadataAccessor, vec![int_type()]);
    assert_eq!(render(&descriptor), "type metadata accessor for Swift.Int");
}

fn generic_param(depth: &str, index: &str) -> Ast {
    Node::with_children(
        NodeKind::DependentGenericParamType,
        vec![Node::text_leaf(NodeKind::Index, depth), Node::text_leaf(NodeKind::Index, index)],
    )
}

#[test]
fn generic_params_get_sequential_letters_per_depth_and_are_stable_within_a_rendering() {
    let tuple = Node::with_children(
        NodeKind::Tuple,
        vec![generic_param("0", "0"), generic_param("0", "1"), generic_param("0", "0")],
    );
    assert_eq!(render(&tuple), "(A, B, A)");
}

#[test]
fn generic_param_names_restart_from_a_across_separate_renderings() {
    let param = generic_param("0", "3");
    assert_eq!(render(&param), "A");
    assert_eq!(render(&param), "A");
}

#[test]
fn dependent_member_joins_base_and_renamed_associated_type() {
    let assoc = Node::text_leaf(NodeKind::DependentAssociatedTypeRef, "Element");
    let member = Node::with_children(NodeKind::DependentMemberType, vec![generic_param("0", "0"), assoc]);
    assert_eq!(render(&member), "A.Element");
}

#[test]
fn objective_c_type_associated_type_resolves_against_depth_zero_index() {
    let assoc = Node::text_leaf(NodeKind::DependentAssociatedTypeRef, "ObjectiveCType");
    let member = Node::with_children(NodeKind::DependentMemberType, vec![generic_param("0", "2"), assoc]);
    assert_eq!(render(&member), "A._ObjectiveCType");
}

#[test]
fn in_out_and_static_prefix_their_child() {
    assert_eq!(render(&Node::with_children(NodeKind::InOut, vec![int_type()])), "inout Swift.Int");
    assert_eq!(render(&Node::with_children(NodeKind::Static, vec![int_type()])), "static Swift.Int");
}
