//! Tests for value literals in arguments and for standalone value text.

use crate::ast::InputValue;
use crate::parse_value_text;
use crate::tests::utils::field_at;
use crate::tests::utils::first_operation;
use crate::tests::utils::parse_errors;
use crate::tests::utils::parse_valid;
use crate::GraphQLParseErrorKind;
use indexmap::IndexMap;

fn argument_value(value_text: &str) -> InputValue {
    let doc = parse_valid(&format!("{{ f(x: {value_text}) }}"));
    let op = first_operation(&doc);
    field_at(&doc, &op.selection_set, 0).arguments[0].value.clone()
}

fn value(text: &str) -> InputValue {
    let result = parse_value_text(text);
    assert!(!result.has_errors(), "errors parsing `{text}`: {:?}", result.errors);
    result.into_valid_ast().unwrap()
}

#[test]
fn scalar_literals() {
    assert_eq!(argument_value("42"), InputValue::Int(42));
    assert_eq!(argument_value("-7"), InputValue::Int(-7));
    assert_eq!(argument_value("1.5"), InputValue::Float(1.5));
    assert_eq!(argument_value("2e3"), InputValue::Float(2000.0));
    assert_eq!(argument_value("\"hi\\n\""), InputValue::String("hi\n".to_string()));
    assert_eq!(argument_value("true"), InputValue::Boolean(true));
    assert_eq!(argument_value("false"), InputValue::Boolean(false));
    assert_eq!(argument_value("null"), InputValue::Null);
    assert_eq!(argument_value("RED"), InputValue::Enum("RED".to_string()));
}

#[test]
fn block_string_is_a_raw_string() {
    assert_eq!(
        argument_value("\"\"\"\n    line one\n      line two\n\"\"\""),
        InputValue::RawString("line one\n  line two".to_string()),
    );
}

#[test]
fn empty_list_is_distinct_from_null() {
    let v = argument_value("[]");
    assert_eq!(v, InputValue::List(vec![]));
    assert!(!v.is_null());
    assert_eq!(v.list_depth(), 1);
}

#[test]
fn nested_lists_and_objects() {
    let v = argument_value("[[1, 2], [3]]");
    assert_eq!(v.list_depth(), 2);
    assert_eq!(v.as_list().unwrap().len(), 2);

    let v = argument_value("{ name: \"Jack\", tags: [A, B], nested: { ok: true } }");
    let fields = v.as_object().unwrap();
    let keys: Vec<_> = fields.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["name", "tags", "nested"]);
    assert_eq!(fields["nested"].as_object().unwrap()["ok"], InputValue::Boolean(true));
}

#[test]
fn variables_inside_nested_values() {
    let doc = parse_valid("query Q($a: Int) { f(x: [{ y: $a }]) }");
    let op = first_operation(&doc);
    let v = &field_at(&doc, &op.selection_set, 0).arguments[0].value;
    assert!(v.contains_variables());
    assert_eq!(
        v.as_list().unwrap()[0].as_object().unwrap()["y"],
        InputValue::Variable("a".to_string()),
    );
}

#[test]
fn int_out_of_range_is_an_error() {
    let errors = parse_errors("{ f(x: 99999999999999999999) }");
    assert_eq!(
        errors[0].kind(),
        &GraphQLParseErrorKind::InvalidValue {
            raw: "99999999999999999999".to_string(),
        },
    );
}

#[test]
fn duplicate_object_key_is_an_error() {
    let errors = parse_errors("{ f(x: { a: 1, a: 2 }) }");
    assert_eq!(
        errors[0].kind(),
        &GraphQLParseErrorKind::DuplicateDefinition {
            name: "a".to_string(),
        },
    );
}

#[test]
fn unclosed_list_is_an_error() {
    let errors = parse_errors("{ f(x: [1, 2 }");
    assert!(errors.iter().any(|e| matches!(
        e.kind(),
        GraphQLParseErrorKind::MismatchedDelimiter { .. }
            | GraphQLParseErrorKind::UnclosedDelimiter { .. }
            | GraphQLParseErrorKind::UnexpectedToken { .. }
    )));
}

#[test]
fn value_text_for_resolver_output() {
    let v = value("[{ name: \"Jack Smith\", age: 53 }]");
    let mut person = IndexMap::new();
    person.insert("name".to_string(), InputValue::String("Jack Smith".to_string()));
    person.insert("age".to_string(), InputValue::Int(53));
    assert_eq!(v, InputValue::List(vec![InputValue::Object(person)]));
}

#[test]
fn value_text_accepts_quoted_keys() {
    let v = value("{ \"name\": \"R2-D2\", __typename: \"Droid\" }");
    let fields = v.as_object().unwrap();
    assert_eq!(fields["name"].as_str(), Some("R2-D2"));
    assert_eq!(fields["__typename"].as_str(), Some("Droid"));
}

#[test]
fn value_text_scalars() {
    assert_eq!(value("53"), InputValue::Int(53));
    assert_eq!(value("null"), InputValue::Null);
    assert_eq!(value("  \"x\"  "), InputValue::String("x".to_string()));
    assert_eq!(value("JEDI"), InputValue::Enum("JEDI".to_string()));
}

#[test]
fn value_text_rejects_empty_input() {
    let result = parse_value_text("   ");
    assert!(result.ast().is_none());
    assert!(matches!(
        result.errors[0].kind(),
        GraphQLParseErrorKind::UnexpectedEof { .. },
    ));
}

#[test]
fn value_text_rejects_trailing_tokens() {
    let result = parse_value_text("1 2");
    assert!(result.has_errors());
    assert_eq!(
        result.errors[0].kind(),
        &GraphQLParseErrorKind::UnexpectedToken {
            expected: vec!["end of input".to_string()],
            found: "2".to_string(),
        },
    );
}

#[test]
fn value_text_rejects_variables() {
    let result = parse_value_text("$x");
    assert!(result.ast().is_none());
    assert!(result.errors[0].message().contains("not allowed in resolver output"));
}
