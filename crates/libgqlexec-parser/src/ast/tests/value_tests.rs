//! Tests for `InputValue` helpers and JSON deserialization.

use crate::ast::InputValue;

#[test]
fn deserializes_from_json() {
    let value: InputValue = serde_json::from_str(
        r#"{ "last": 1, "ratio": 0.5, "name": "x", "ok": true, "none": null, "tags": ["a"] }"#,
    )
    .unwrap();
    let fields = value.as_object().unwrap();
    assert_eq!(fields["last"], InputValue::Int(1));
    assert_eq!(fields["ratio"], InputValue::Float(0.5));
    assert_eq!(fields["name"].as_str(), Some("x"));
    assert_eq!(fields["ok"].as_bool(), Some(true));
    assert!(fields["none"].is_null());
    assert_eq!(fields["tags"].list_depth(), 1);
    let keys: Vec<_> = fields.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["last", "ratio", "name", "ok", "none", "tags"]);
}

#[test]
fn kind_names_and_depth() {
    assert_eq!(InputValue::Enum("A".to_string()).kind_name(), "enum value");
    assert_eq!(InputValue::RawString(String::new()).kind_name(), "block string");
    let nested = InputValue::List(vec![InputValue::List(vec![InputValue::Int(1)])]);
    assert_eq!(nested.list_depth(), 2);
    assert_eq!(InputValue::Int(1).list_depth(), 0);
    assert!(!nested.contains_variables());
}
