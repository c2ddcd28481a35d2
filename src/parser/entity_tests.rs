use super::*;
use crate::ast::NodeKind;

fn parse_symbol_str(input: &str) -> Ast {
    super::super::demangle_symbol(input.as_bytes(), None, 0).unwrap()
}

#[test]
fn plain_stored_property_yields_bare_variable_node() {
    let node = parse_symbol_str("$s1M3FooV5valueSivp");
    assert_eq!(node.kind(), NodeKind::Variable);
    assert_eq!(node.text(), Some("value"));
    let owner = &node.children()[0];
    assert_eq!(owner.kind(), NodeKind::Struct);
    assert_eq!(owner.text(), Some("Foo"));
    assert_eq!(owner.children()[0].text(), Some("M"));
    assert_eq!(node.children()[1].text(), Some("Swift.Int"));
}

#[test]
fn getter_accessor_wraps_the_variable_node() {
    let node = parse_symbol_str("$s1M3FooV5valueSivg");
    assert_eq!(node.kind(), NodeKind::Accessor);
    assert_eq!(node.text(), Some("getter"));
    let variable = &node.children()[0];
    assert_eq!(variable.kind(), NodeKind::Variable);
    assert_eq!(variable.text(), Some("value"));
}

#[test]
fn property_descriptor_suffix_wraps_the_variable_node() {
    let node = parse_symbol_str("$s1M3FooV5valueSivpMV");
    assert_eq!(node.kind(), NodeKind::PropertyDescriptor);
    assert_eq!(node.children()[0].kind(), NodeKind::Variable);
}

#[test]
fn bare_type_symbol_gets_wrapped_by_type_metadata_accessor_suffix() {
    let node = parse_symbol_str("$sSiMa");
    assert_eq!(node.kind(), NodeKind::TypeMetadataAccessor);
    assert_eq!(node.children()[0].text(), Some("Swift.Int"));
}

#[test]
fn bare_type_symbol_gets_wrapped_by_protocol_descriptor_suffix() {
    let node = parse_symbol_str("$sScAMp");
    assert_eq!(node.kind(), NodeKind::ProtocolDescriptor);
    assert_eq!(node.children()[0].text(), Some("Swift.Actor"));
}

#[test]
fn function_entity_bakes_owner_path_into_text_and_zips_labels() {
    let node = parse_symbol_str("$s1M3FooV3foo1xSbSiF");
    assert_eq!(node.kind(), NodeKind::Function);
    assert_eq!(node.text(), Some("M.Foo.foo"));
    assert!(!node.flags().is_async);
    assert!(!node.flags().throws);
    let params = &node.children()[0];
    assert_eq!(params.kind(), NodeKind::ArgumentTuple);
    assert_eq!(params.children()[0].kind(), NodeKind::Argument);
    assert_eq!(params.children()[0].text(), Some("x"));
    assert_eq!(params.children()[0].children()[0].text(), Some("Swift.Int"));
    assert_eq!(node.children()[1].text(), Some("Swift.Bool"));
}

#[test]
fn unrecognized_entity_spec_is_rejected() {
    assert!(super::super::demangle_symbol(b"$s1MZ", None, 0).is_err());
}

#[test]
fn context_link_name_is_decoded_from_a_word_substitution() {
    // Module "FooBar" records words "Foo" (A) and "Bar" (B); the context
    // link's own name is then spelled as the word-substituted form `0A`
    // instead of literally as `3Foo`.
    let node = parse_symbol_str("$s6FooBar0AV5valueSivp");
    assert_eq!(node.kind(), NodeKind::Variable);
    assert_eq!(node.text(), Some("value"));
    let owner = &node.children()[0];
    assert_eq!(owner.kind(), NodeKind::Struct);
    assert_eq!(owner.text(), Some("Foo"));
    assert_eq!(owner.children()[0].text(), Some("FooBar"));
}
