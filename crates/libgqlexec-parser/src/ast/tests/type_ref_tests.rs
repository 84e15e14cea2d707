//! Tests for `TypeRef` construction helpers.

use crate::ast::TypeRef;

#[test]
fn builders_compose_like_source_syntax() {
    let t = TypeRef::named("Person").non_null().list();
    assert_eq!(t.to_string(), "[Person!]");
    assert_eq!(t.depth, 1);
    assert_eq!(t.non_null, 0b10);

    let t = TypeRef::named("Int").list().non_null().list();
    assert_eq!(t.to_string(), "[[Int]!]");
    assert!(t.is_non_null_at(1));
    assert!(!t.is_non_null_at(0));
}

#[test]
fn levels_beyond_depth_are_never_non_null() {
    let t = TypeRef::named("Int").non_null();
    assert!(t.is_non_null_at(0));
    assert!(!t.is_non_null_at(1));
}
