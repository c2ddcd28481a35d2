use super::*;
use crate::ast::NodeKind;

fn parse_type_str(input: &str) -> Ast {
    super::super::demangle_type(input.as_bytes(), None, 0).unwrap()
}

#[test]
fn bare_tuple_without_function_wrapper() {
    let node = parse_type_str("Si_Sit");
    assert_eq!(node.kind(), NodeKind::Tuple);
    assert_eq!(node.children().len(), 2);
    assert_eq!(node.children()[0].text(), Some("Swift.Int"));
    assert_eq!(node.children()[1].text(), Some("Swift.Int"));
}

#[test]
fn function_type_parses_result_first_with_tuple_input() {
    let node = parse_type_str("SbSi_SStc");
    assert_eq!(node.kind(), NodeKind::Function);
    assert!(!node.flags().is_async);
    assert!(!node.flags().throws);
    let input = &node.children()[0];
    assert_eq!(input.kind(), NodeKind::Tuple);
    assert_eq!(input.children()[0].text(), Some("Swift.Int"));
    assert_eq!(input.children()[1].text(), Some("Swift.String"));
    assert_eq!(node.children()[1].text(), Some("Swift.Bool"));
}

#[test]
fn function_type_with_singleton_input_and_throws() {
    let node = parse_type_str("SSSiKc");
    assert_eq!(node.kind(), NodeKind::Function);
    assert!(node.flags().throws);
    assert!(!node.flags().is_async);
    let input = &node.children()[0];
    assert_eq!(input.kind(), NodeKind::Tuple);
    assert_eq!(input.children().len(), 1);
    assert_eq!(input.children()[0].text(), Some("Swift.Int"));
    assert_eq!(node.children()[1].text(), Some("Swift.String"));
}

#[test]
fn function_type_with_async_and_throws() {
    let node = parse_type_str("SbSi_SStYaKc");
    assert_eq!(node.kind(), NodeKind::Function);
    assert!(node.flags().is_async);
    assert!(node.flags().throws);
    assert_eq!(node.children()[1].text(), Some("Swift.Bool"));
}

#[test]
fn function_type_with_unit_input() {
    let node = parse_type_str("Siyc");
    assert_eq!(node.kind(), NodeKind::Function);
    assert_eq!(node.children()[0].kind(), NodeKind::Tuple);
    assert_eq!(node.children()[0].children().len(), 0);
    assert_eq!(node.children()[1].text(), Some("Swift.Int"));
}
