//! Tests for type references: list depth, the non-null bitmask and bracket
//! matching.

use crate::ast::TypeRef;
use crate::tests::utils::first_operation;
use crate::tests::utils::parse_errors;
use crate::tests::utils::parse_valid;
use crate::GraphQLParseErrorKind;

/// Parses `type_text` as the type of a variable and returns it.
fn variable_type(type_text: &str) -> TypeRef {
    let doc = parse_valid(&format!("query Q($v: {type_text}) {{ f(x: $v) }}"));
    first_operation(&doc).variables[0].type_ref.clone()
}

#[test]
fn named_type() {
    let t = variable_type("String");
    assert_eq!(t.name, "String");
    assert_eq!(t.depth, 0);
    assert_eq!(t.non_null, 0);
    assert!(!t.is_list());
    assert!(!t.is_non_null());
    assert_eq!(t.resolved, None);
}

#[test]
fn non_null_named_type() {
    let t = variable_type("String!");
    assert_eq!(t.depth, 0);
    assert_eq!(t.non_null, 0b1);
    assert!(t.is_non_null());
}

#[test]
fn list_of_non_null_items() {
    let t = variable_type("[Person!]");
    assert_eq!(t.name, "Person");
    assert_eq!(t.depth, 1);
    assert_eq!(t.non_null, 0b10);
    assert!(!t.is_non_null_at(0));
    assert!(t.is_non_null_at(1));
}

#[test]
fn non_null_list_of_nullable_items() {
    let t = variable_type("[Person]!");
    assert_eq!(t.depth, 1);
    assert_eq!(t.non_null, 0b01);
}

#[test]
fn nested_lists_with_mixed_nullability() {
    let t = variable_type("[[Int!]]!");
    assert_eq!(t.depth, 2);
    assert!(t.is_non_null_at(0));
    assert!(!t.is_non_null_at(1));
    assert!(t.is_non_null_at(2));
    assert_eq!(t.to_string(), "[[Int!]]!");
}

#[test]
fn depth_equals_bracket_pairs_up_to_the_maximum() {
    for depth in 0..=TypeRef::MAX_DEPTH as usize {
        let text = format!("{}Int{}", "[".repeat(depth), "]".repeat(depth));
        let t = variable_type(&text);
        assert_eq!(t.depth as usize, depth, "for {text}");
        assert_eq!(t.to_string(), text);
    }
}

#[test]
fn depth_beyond_the_maximum_is_an_error() {
    let errors = parse_errors("query Q($v: [[[[[[[[Int]]]]]]]]) { f }");
    assert_eq!(
        errors[0].kind(),
        &GraphQLParseErrorKind::ListDepthExceeded { depth: 8 },
    );
}

#[test]
fn missing_close_bracket_is_an_error() {
    let errors = parse_errors("query Q($v: [[Int]) { f }");
    assert!(matches!(
        errors[0].kind(),
        GraphQLParseErrorKind::MismatchedDelimiter { .. },
    ));
    assert_eq!(errors[0].notes()[0].message, "opening `[` here");
}

#[test]
fn extra_close_bracket_is_an_error() {
    let errors = parse_errors("query Q($v: [Int]]) { f }");
    assert_eq!(
        errors[0].kind(),
        &GraphQLParseErrorKind::MismatchedDelimiter {
            expected: "end of type".to_string(),
            found: "]".to_string(),
        },
    );
}

#[test]
fn item_type_strips_one_level() {
    let t = variable_type("[[Int!]!]");
    let item = t.item_type().unwrap();
    assert_eq!(item.to_string(), "[Int!]!");
    let leaf = item.item_type().unwrap();
    assert_eq!(leaf.to_string(), "Int!");
    assert!(leaf.item_type().is_none());
}
