use crate::validation::apply_bindings;
use crate::validation::bind_variables;
use crate::validation::tests::utils::cache;
use crate::validation::tests::utils::first_operation;
use crate::validation::tests::utils::parse;
use crate::validation::tests::utils::vars;
use crate::validation::ValidationError;
use indexmap::IndexMap;
use libgqlexec_parser::ast::InputValue;

fn bind(
    query: &str,
    supplied: IndexMap<String, InputValue>,
) -> Result<IndexMap<String, InputValue>, Vec<ValidationError>> {
    let cache = cache();
    let document = parse(query);
    let op = document.statement(first_operation(&document)).as_operation().unwrap();
    bind_variables(&cache, op, &supplied)
}

#[test]
fn supplied_values_win_over_defaults() {
    let bound = bind(
        "query($last: Int = 2) { allPersons(last: $last) { name } }",
        vars(&[("last", InputValue::Int(9))]),
    )
    .unwrap();
    assert_eq!(bound["last"], InputValue::Int(9));
}

#[test]
fn defaults_fill_omitted_values() {
    let bound = bind("query($last: Int = 2) { allPersons(last: $last) { name } }", vars(&[])).unwrap();
    assert_eq!(bound["last"], InputValue::Int(2));
}

#[test]
fn omitted_nullable_variable_is_null() {
    let bound = bind("query($last: Int) { allPersons(last: $last) { name } }", vars(&[])).unwrap();
    assert_eq!(bound["last"], InputValue::Null);
}

#[test]
fn omitted_non_null_variable_must_be_defined() {
    let errors = bind("query($id: ID!) { person(id: $id) { name } }", vars(&[])).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "variable `$id` of non-null type `ID!` must be defined",
    );
}

#[test]
fn supplied_values_are_coerced() {
    let bound = bind(
        "query($ep: Episode, $ids: [ID!]!) { hero(episode: $ep) { name } byIds(ids: $ids) { name } }",
        vars(&[
            ("ep", InputValue::String("JEDI".to_string())),
            ("ids", InputValue::List(vec![InputValue::Int(1), InputValue::String("2".to_string())])),
        ]),
    )
    .unwrap();
    assert_eq!(bound["ep"], InputValue::Enum("JEDI".to_string()));
    assert_eq!(bound["ids"].to_string(), r#"["1", "2"]"#);

    let errors = bind(
        "query($last: Int) { allPersons(last: $last) { name } }",
        vars(&[("last", InputValue::String("many".to_string()))]),
    )
    .unwrap_err();
    assert!(matches!(&errors[0], ValidationError::TypeMismatch { .. }));
}

#[test]
fn variable_types_must_be_input_types() {
    let errors = bind("query($p: Person, $x: Nope) { hero { name } }", vars(&[])).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(matches!(&errors[0], ValidationError::NotInputType { type_name, .. } if type_name == "Person"));
    assert!(matches!(&errors[1], ValidationError::UnknownType { name, .. } if name == "Nope"));
}

#[test]
fn undeclared_values_are_ignored() {
    let bound = bind("{ hero { name } }", vars(&[("extra", InputValue::Int(1))])).unwrap();
    assert!(bound.is_empty());
}

#[test]
fn bindings_are_written_into_the_document() {
    let cache = cache();
    let mut document = parse("query($last: Int = 3, $ep: Episode) { allPersons(last: $last) { name } }");
    let id = first_operation(&document);
    let op = document.statement(id).as_operation().unwrap();
    let bound = bind_variables(&cache, op, &IndexMap::new()).unwrap();

    apply_bindings(&mut document, id, &bound);

    let op = document.statement(id).as_operation().unwrap();
    assert_eq!(op.variable("last").unwrap().value, Some(InputValue::Int(3)));
    assert_eq!(op.variable("ep").unwrap().value, Some(InputValue::Null));
}
