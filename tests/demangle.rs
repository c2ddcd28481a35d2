//! End-to-end scenarios (§8.2, §8.3): feed raw mangled bytes in through the
//! public API and check the rendered text (and, for the error cases, the
//! error kind) match exactly.

use swift_demangle::{
    demangle, demangle_symbol_string, demangle_type_string, DemangleError, DemangleOptions, Node,
    NodeKind,
};

fn render_type(input: &str) -> String {
    demangle_type_string(input.as_bytes(), &DemangleOptions::default())
        .unwrap_or_else(|e| panic!("failed to demangle {input:?}: {e}"))
        .0
}

fn render_symbol(input: &str) -> String {
    demangle_symbol_string(input.as_bytes(), &DemangleOptions::default())
        .unwrap_or_else(|e| panic!("failed to demangle {input:?}: {e}"))
        .0
}

#[test]
fn bare_standard_library_types() {
    assert_eq!(render_type("Si"), "Swift.Int");
    assert_eq!(render_type("Si_Sit"), "(Swift.Int, Swift.Int)");
}

#[test]
fn nominal_type_from_length_prefixed_path() {
    let (text, ast) = demangle_type_string(b"8MyModule6MyTypeV", &DemangleOptions::default()).unwrap();
    assert_eq!(text, "MyModule.MyType");
    assert_eq!(ast.kind(), NodeKind::Struct);
}

#[test]
fn sugared_collection_and_optional_types() {
    assert_eq!(render_type("SaySiG"), "[Swift.Int]");
    assert_eq!(render_type("SqySi_G"), "Swift.Int?");
    assert_eq!(render_type("SDySSSiG"), "[Swift.String : Swift.Int]");
}

#[test]
fn function_types_with_async_and_throws() {
    assert_eq!(render_type("SbSi_SStc"), "(Swift.Int, Swift.String) -> Swift.Bool");
    assert_eq!(render_type("SSSiKc"), "(Swift.Int) throws -> Swift.String");
    assert_eq!(
        render_type("SbSi_SStYaKc"),
        "(Swift.Int, Swift.String) async throws -> Swift.Bool"
    );
}

#[test]
fn optional_wrapping_a_tuple() {
    assert_eq!(render_type("Si_SStSg"), "(Swift.Int, Swift.String)?");
}

#[test]
fn function_entity_with_labeled_parameters() {
    let input = "$s13lockdownmoded18LockdownModeServerC8listener_25shouldAcceptNewConnectionSbSo13NSXPCListenerC_So15NSXPCConnectionCtF";
    assert_eq!(
        render_symbol(input),
        "lockdownmoded.LockdownModeServer.listener(_: __C.NSXPCListener, shouldAcceptNewConnection: __C.NSXPCConnection) -> Swift.Bool"
    );
}

#[test]
fn variable_getter_accessor() {
    assert_eq!(
        render_symbol("_$s16DemangleFixtures7CounterC5valueSivg"),
        "DemangleFixtures.Counter.value.getter : Swift.Int"
    );
}

#[test]
fn property_descriptor_wrapping_a_variable() {
    assert_eq!(
        render_symbol("_$s16DemangleFixtures7CounterC5valueSivpMV"),
        "property descriptor for DemangleFixtures.Counter.value : Swift.Int"
    );
}

#[test]
fn type_metadata_accessor_for_a_bare_type() {
    assert_eq!(render_symbol("$sSiMa"), "type metadata accessor for Swift.Int");
}

#[test]
fn protocol_descriptor_for_a_two_char_concurrency_type() {
    assert_eq!(render_symbol("_$sScAMp"), "protocol descriptor for Swift.Actor");
}

#[test]
fn symbolic_reference_resolved_through_the_caller_supplied_callback() {
    let resolver = |control: u8,
                    payload: &[u8],
                    _ref_index: usize|
     -> swift_demangle::Result<swift_demangle::Ast> {
        assert_eq!(control, 0x01);
        assert_eq!(payload, &[0x34, 0x12, 0x00, 0x00]);
        let module = Node::text_leaf(NodeKind::Module, "MyModule");
        Ok(Node::with_text_and_children(NodeKind::Struct, "ResolvedType", vec![module]))
    };
    let options = DemangleOptions {
        resolver: Some(Box::new(resolver)),
        max_depth: 0,
    };
    let input: &[u8] = &[0x01, 0x34, 0x12, 0x00, 0x00];
    let (text, _ast) = demangle_type_string(input, &options).unwrap();
    assert_eq!(text, "MyModule.ResolvedType");
}

#[test]
fn empty_input_is_rejected() {
    let err = demangle(b"", &DemangleOptions::default()).unwrap_err();
    assert_eq!(err, DemangleError::EmptyInput);
}

#[test]
fn symbolic_reference_without_a_resolver_is_rejected() {
    let input: &[u8] = &[0x01, 0x34, 0x12, 0x00, 0x00];
    let err = demangle_type_string(input, &DemangleOptions::default()).unwrap_err();
    assert_eq!(err, DemangleError::MissingResolver { pos: 0 });
}

#[test]
fn truncated_symbolic_reference_payload_is_rejected() {
    let input: &[u8] = &[0x01, 0x34, 0x12];
    let err = demangle_type_string(input, &DemangleOptions::default()).unwrap_err();
    assert_eq!(err, DemangleError::TruncatedSymbolicReference { pos: 0 });
}

#[test]
fn unknown_prefix_is_rejected() {
    let err = demangle_type_string(b"ZZZZZZ", &DemangleOptions::default()).unwrap_err();
    assert!(matches!(err, DemangleError::UnsupportedSequence { .. }));
}
