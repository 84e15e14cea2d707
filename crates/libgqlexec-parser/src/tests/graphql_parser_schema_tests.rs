//! Tests for schema definition parsing.

use crate::ast::DirectiveLocation;
use crate::ast::InputValue;
use crate::ast::TypeDefinition;
use crate::tests::utils::parse_schema;
use crate::GraphQLParseErrorKind;

fn parse_valid_schema(source: &str) -> crate::ast::SchemaDocument {
    let result = parse_schema(source);
    assert!(!result.has_errors(), "unexpected errors: {:?}", result.errors);
    result.into_valid_ast().unwrap()
}

#[test]
fn object_type_with_arguments_and_defaults() {
    let doc = parse_valid_schema(
        "\"\"\"The root\"\"\"
         type Query {
           \"recent people\"
           allPersons(last: Int = 10, filter: PersonFilter): [Person!]
           person(id: ID!): Person
         }",
    );
    let TypeDefinition::Object(query) = &doc.type_definitions[0] else {
        panic!("expected an object type");
    };
    assert_eq!(query.name, "Query");
    let all = &query.fields["allPersons"];
    assert_eq!(all.type_ref.to_string(), "[Person!]");
    assert_eq!(all.arguments["last"].default_value, Some(InputValue::Int(10)));
    assert_eq!(all.arguments["filter"].default_value, None);
    assert!(query.fields["person"].arguments["id"].type_ref.is_non_null());
}

#[test]
fn interfaces_unions_enums_scalars_and_inputs() {
    let doc = parse_valid_schema(
        "interface Character { name: String! }
         type Droid implements Character & Node @key(fields: \"id\") { name: String! primaryFunction: String }
         union SearchResult = | Droid | Human
         enum Episode { NEWHOPE EMPIRE JEDI }
         scalar DateTime
         input PersonFilter { minAge: Int = 0, name: String! }",
    );
    let kinds: Vec<_> = doc.type_definitions.iter().map(|d| d.kind_name()).collect();
    assert_eq!(kinds, vec!["interface", "type", "union", "enum", "scalar", "input"]);

    let TypeDefinition::Object(droid) = &doc.type_definitions[1] else {
        panic!("expected an object type");
    };
    assert!(droid.implements_interface("Character"));
    assert!(droid.implements_interface("Node"));

    let TypeDefinition::Union(search) = &doc.type_definitions[2] else {
        panic!("expected a union");
    };
    assert!(search.has_member("Droid"));
    assert!(search.has_member("Human"));

    let TypeDefinition::Enum(episode) = &doc.type_definitions[3] else {
        panic!("expected an enum");
    };
    assert_eq!(episode.values, vec!["NEWHOPE", "EMPIRE", "JEDI"]);

    assert!(doc.type_definitions[4].is_leaf());
    assert!(doc.type_definitions[5].is_input_type());
    assert!(doc.type_definitions[0].is_composite());
}

#[test]
fn directive_definitions() {
    let doc = parse_valid_schema(
        "directive @cached(ttl: Int = 60) repeatable on | FIELD | QUERY
         directive @live on FRAGMENT_SPREAD",
    );
    assert_eq!(doc.directive_definitions.len(), 2);
    let cached = &doc.directive_definitions[0];
    assert_eq!(cached.name, "cached");
    assert!(cached.repeatable);
    assert_eq!(cached.locations, vec![DirectiveLocation::Field, DirectiveLocation::Query]);
    assert_eq!(cached.arguments["ttl"].default_value, Some(InputValue::Int(60)));
    assert!(!doc.directive_definitions[1].repeatable);
}

#[test]
fn unknown_directive_location_suggests_a_fix() {
    let result = parse_schema("directive @d on FEILD");
    assert!(result.has_errors());
    let help = &result.errors[0].notes()[0].message;
    assert_eq!(help, "did you mean `FIELD`?");
}

#[test]
fn referenced_type_names_cover_fields_arguments_and_interfaces() {
    let doc = parse_valid_schema("type Q implements I { a(x: In): Out b: [Other!] }");
    let names: Vec<_> = doc.type_definitions[0]
        .referenced_type_names()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["I", "Out", "In", "Other"]);
}

#[test]
fn duplicate_fields_are_reported() {
    let result = parse_schema("type Q { a: Int a: String }");
    assert_eq!(
        result.errors[0].kind(),
        &GraphQLParseErrorKind::DuplicateDefinition {
            name: "a".to_string(),
        },
    );
}

#[test]
fn reserved_enum_values_are_reported() {
    let result = parse_schema("enum E { A true }");
    assert_eq!(
        result.errors[0].kind(),
        &GraphQLParseErrorKind::ReservedName {
            name: "true".to_string(),
        },
    );
}

#[test]
fn schema_blocks_and_extensions_are_unsupported() {
    let result = parse_schema("schema { query: Q } type Q { a: Int } extend type Q { b: Int }");
    let keywords: Vec<_> = result
        .errors
        .iter()
        .filter_map(|e| match e.kind() {
            GraphQLParseErrorKind::UnsupportedDefinition { keyword } => Some(keyword.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(keywords, vec!["schema", "extend"]);
    let doc = result.ast().unwrap();
    assert_eq!(doc.type_definitions.len(), 1);
}

#[test]
fn operations_in_schema_document() {
    let result = parse_schema("query { a } type Q { a: Int }");
    assert_eq!(
        result.errors[0].kind(),
        &GraphQLParseErrorKind::WrongDocumentKind {
            found: "operation".to_string(),
        },
    );
    assert_eq!(result.ast().unwrap().type_definitions.len(), 1);
}

#[test]
fn field_named_type_is_not_a_definition_start() {
    let doc = parse_valid_schema("type Q { type: String input: Int }");
    assert_eq!(doc.type_definitions.len(), 1);
    assert_eq!(doc.type_definitions[0].field("type").unwrap().type_ref.name, "String");
}
