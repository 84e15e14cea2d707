//! Tests for the canonical printer.

use crate::ast::InputValue;
use crate::GraphQLParser;
use indexmap::IndexMap;

fn reprint(source: &str) -> String {
    GraphQLParser::new(source)
        .parse_executable_document()
        .into_valid_ast()
        .unwrap()
        .to_string()
}

#[test]
fn prints_operations_with_two_space_indent() {
    let printed = reprint(
        "query Persons($last: Int = 1, $f: [String!]!) @cached {
           allPersons(last: $last) { name, age }
         }",
    );
    assert_eq!(
        printed,
        "query Persons($last: Int = 1, $f: [String!]!) @cached {\n  allPersons(last: $last) {\n    name\n    age\n  }\n}\n",
    );
}

#[test]
fn prints_fragments_and_inline_fragments() {
    let printed = reprint(
        "{ hero { ...F @include(if: true) ... on Droid { id } } }
         fragment F on Character { name }",
    );
    assert_eq!(
        printed,
        "query {\n  hero {\n    ...F @include(if: true)\n    ... on Droid {\n      id\n    }\n  }\n}\n\nfragment F on Character {\n  name\n}\n",
    );
}

#[test]
fn printed_output_reparses_to_the_same_text() {
    let source = "query Q($a: Int) { x: f(a: $a, b: [1.5, \"s\", { k: ENUM }], c: null) { ... { g } } }";
    let once = reprint(source);
    assert_eq!(reprint(&once), once);
}

#[test]
fn value_display() {
    let mut fields = IndexMap::new();
    fields.insert("name".to_string(), InputValue::String("Jack \"J\" Smith".to_string()));
    fields.insert("age".to_string(), InputValue::Int(53));
    let value = InputValue::List(vec![InputValue::Object(fields)]);
    assert_eq!(value.to_string(), r#"[{ name: "Jack \"J\" Smith", age: 53 }]"#);

    assert_eq!(InputValue::Float(2.0).to_string(), "2.0");
    assert_eq!(InputValue::Float(0.25).to_string(), "0.25");
    assert_eq!(InputValue::Object(IndexMap::new()).to_string(), "{}");
    assert_eq!(InputValue::List(vec![]).to_string(), "[]");
    assert_eq!(InputValue::Variable("v".to_string()).to_string(), "$v");
    assert_eq!(InputValue::RawString("a\nb".to_string()).to_string(), "\"\"\"a\nb\"\"\"");
    assert_eq!(InputValue::String("tab\there".to_string()).to_string(), "\"tab\\there\"");
}
