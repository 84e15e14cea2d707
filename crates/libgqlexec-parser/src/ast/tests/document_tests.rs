//! Tests for `Document` lookups.

use crate::ast::Statement;
use crate::GraphQLParser;

#[test]
fn lookups_by_name_and_id() {
    let doc = GraphQLParser::new("query A { a } fragment F on T { t } { anonymous }")
        .parse_executable_document()
        .into_valid_ast()
        .unwrap();

    let ids: Vec<_> = doc.statement_ids().collect();
    assert_eq!(ids.len(), 3);
    assert_eq!(doc.operations().count(), 2);

    let a = doc.operation_by_name("A").unwrap();
    assert_eq!(doc.statement(a).name(), Some("A"));
    assert!(doc.statement(a).as_fragment().is_none());

    let f = doc.fragment_by_name("F").unwrap();
    assert!(matches!(doc.statement(f), Statement::Fragment(_)));
    assert_eq!(doc.fragment("F").unwrap().type_condition.name, "T");
    assert!(doc.fragment("A").is_none());
}

#[test]
fn statement_mut_allows_patching_resolved_slots() {
    let mut doc = GraphQLParser::new("query A($v: Int) { a(x: $v) }")
        .parse_executable_document()
        .into_valid_ast()
        .unwrap();
    let id = doc.operation_by_name("A").unwrap();
    if let Statement::Operation(op) = doc.statement_mut(id) {
        op.variables[0].type_ref.resolved = Some(crate::ast::TypeId::new(3));
    }
    let op = doc.statement(id).as_operation().unwrap();
    assert_eq!(op.variables[0].type_ref.resolved.map(|t| t.index()), Some(3));
}
