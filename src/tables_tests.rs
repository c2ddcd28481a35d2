use super::*;

#[test]
fn known_short_type_resolves_int() {
    let node = known_short_type("i").unwrap();
    assert_eq!(node.text(), Some("Swift.Int"));
    assert_eq!(node.kind(), NodeKind::Struct);
}

#[test]
fn known_short_type_rejects_unknown_code() {
    assert!(known_short_type("zz").is_none());
}

#[test]
fn accessor_kind_matches_single_byte_codes() {
    assert_eq!(AccessorKind::from_code(b"g"), Some(AccessorKind::Getter));
    assert_eq!(AccessorKind::from_code(b"s"), Some(AccessorKind::Setter));
    assert_eq!(AccessorKind::from_code(b"W"), Some(AccessorKind::DidSet));
}

#[test]
fn accessor_kind_matches_two_byte_addressor_codes() {
    assert_eq!(AccessorKind::from_code(b"aO"), Some(AccessorKind::UnsafeAddressor));
    assert_eq!(AccessorKind::from_code(b"lu"), Some(AccessorKind::NativeMutableAddressor));
}

#[test]
fn accessor_kind_rejects_unknown_code() {
    assert!(AccessorKind::from_code(b"zz").is_none());
}

#[test]
fn accessor_kind_label_matches_code() {
    assert_eq!(AccessorKind::Getter.label(), "getter");
    assert_eq!(AccessorKind::NativeMutableAddressor.label(), "nativeMutableAddressor");
}

#[test]
fn descriptor_suffix_resolves_property_descriptor() {
    let suffix = DescriptorSuffix::from_code(b"MV").unwrap();
    assert_eq!(suffix.node_kind(), NodeKind::PropertyDescriptor);
    assert_eq!(suffix.phrase(), "property descriptor for ");
}

#[test]
fn descriptor_suffix_rejects_unknown_code() {
    assert!(DescriptorSuffix::from_code(b"Zz").is_none());
}

#[test]
fn impl_conventions_cover_documented_codes() {
    assert_eq!(impl_parameter_convention(b'i'), Some("@in"));
    assert_eq!(impl_result_convention(b'o'), Some("@owned"));
    assert_eq!(impl_callee_convention(b't'), Some("@convention(thin)"));
    assert_eq!(impl_coroutine_kind(b'A'), Some("yield_once"));
}

#[test]
fn impl_conventions_reject_unknown_codes() {
    assert_eq!(impl_parameter_convention(b'Z'), None);
    assert_eq!(impl_result_convention(b'Z'), None);
    assert_eq!(impl_callee_convention(b'Z'), None);
    assert_eq!(impl_coroutine_kind(b'Z'), None);
}
