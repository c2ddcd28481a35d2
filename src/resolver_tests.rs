use super::*;
use crate::ast::{Node, NodeKind};

struct StaticResolver {
    node: Ast,
}

impl SymbolicReferenceResolver for StaticResolver {
    fn resolve(&self, _control: u8, _payload: &[u8], _ref_index: usize) -> Result<Ast> {
        Ok(self.node.clone())
    }
}

#[test]
fn resolves_short_control_byte_with_four_byte_payload() {
    let mut cursor = Cursor::new(&[0x01, 0x34, 0x12, 0x00, 0x00]);
    let resolver = StaticResolver {
        node: Node::text_leaf(NodeKind::Struct, "MyModule.ResolvedType"),
    };
    let node = parse_symbolic_reference(&mut cursor, Some(&resolver)).unwrap();
    assert_eq!(node.text(), Some("MyModule.ResolvedType"));
    assert!(cursor.eof());
}

#[test]
fn passes_control_payload_and_ref_index_through() {
    let mut cursor = Cursor::new(&[0x05, 0xAA, 0xBB, 0xCC, 0xDD, b'x']);
    let seen = std::cell::RefCell::new(None);
    let resolver = move |control: u8, payload: &[u8], ref_index: usize| {
        *seen.borrow_mut() = Some((control, payload.to_vec(), ref_index));
        Ok(Node::leaf(NodeKind::Struct))
    };
    parse_symbolic_reference(&mut cursor, Some(&resolver)).unwrap();
    assert_eq!(cursor.pos(), 5);
}

#[test]
fn fails_without_resolver() {
    let mut cursor = Cursor::new(&[0x01, 0x00, 0x00, 0x00, 0x00]);
    let err = parse_symbolic_reference(&mut cursor, None).unwrap_err();
    assert_eq!(err, DemangleError::MissingResolver { pos: 0 });
}

#[test]
fn fails_on_truncated_payload() {
    let mut cursor = Cursor::new(&[0x01, 0x34, 0x12]);
    let resolver = StaticResolver {
        node: Node::leaf(NodeKind::Struct),
    };
    let err = parse_symbolic_reference(&mut cursor, Some(&resolver)).unwrap_err();
    assert_eq!(err, DemangleError::TruncatedSymbolicReference { pos: 0 });
}

#[test]
fn rejects_control_byte_outside_range() {
    let mut cursor = Cursor::new(&[0x41]);
    let err = parse_symbolic_reference(&mut cursor, None).unwrap_err();
    assert_eq!(err, DemangleError::UnsupportedSequence { pos: 0 });
}
