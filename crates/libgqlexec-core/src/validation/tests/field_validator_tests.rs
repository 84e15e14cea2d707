use crate::validation::tests::utils::cache;
use crate::validation::tests::utils::leaf_paths;
use crate::validation::tests::utils::parse;
use crate::validation::tests::utils::validate;
use crate::validation::tests::utils::validate_errors;
use crate::validation::tests::utils::validate_with;
use crate::validation::tests::utils::vars;
use crate::validation::FieldValidator;
use crate::validation::ValidatedSelection;
use crate::validation::ValidationError;
use crate::ErrorCategory;
use libgqlexec_parser::ast::DirectiveLocation;
use libgqlexec_parser::ast::InputValue;

#[test]
fn all_persons_query_validates() {
    let op = validate("{ allPersons(last: 1) { name age } }").unwrap();

    assert_eq!(op.root_type, "Query");
    assert_eq!(leaf_paths(&op), vec!["Query/allPersons/name", "Query/allPersons/age"]);
    let all_persons = op.find_field("Query/allPersons").unwrap();
    assert_eq!(all_persons.arguments["last"], InputValue::Int(1));
    assert_eq!(all_persons.field_type.to_string(), "[Person!]");
    assert_eq!(op.field_count(), 3);
}

#[test]
fn unknown_field_is_not_a_member() {
    let errors = validate_errors("{ allPersons(last: 1) { name email } }");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "`email` is not a member of type `Person`");
    assert_eq!(errors[0].category(), ErrorCategory::UndefinedReference);
}

#[test]
fn omitted_argument_takes_its_default() {
    let op = validate("{ hero { name } }").unwrap();
    let hero = op.find_field("Query/hero").unwrap();
    assert_eq!(hero.arguments["episode"], InputValue::Enum("NEWHOPE".to_string()));
}

#[test]
fn omitted_argument_without_default_must_be_defined() {
    let errors = validate_errors("{ allPersons { name } }");
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "argument `last` of `Query.allPersons` must be defined",
    );
}

#[test]
fn duplicate_leaf_is_reported_once_at_the_second_occurrence() {
    let query = "{ allPersons(last: 1) { name age name } }";
    let errors = validate_errors(query);
    assert_eq!(errors.len(), 1);
    let ValidationError::DuplicateField { path, span, first } = &errors[0] else {
        panic!("expected a duplicate field error, got {:?}", errors[0]);
    };
    assert_eq!(path, "Query/allPersons/name");
    assert!(first.start_inclusive.byte_offset() < span.start_inclusive.byte_offset());
    assert_eq!(errors[0].category(), ErrorCategory::DuplicateField);
}

#[test]
fn aliasing_a_field_twice_is_still_a_duplicate() {
    let errors = validate_errors("{ allPersons(last: 1) { name other: name } }");
    assert_eq!(errors.len(), 1);
    let ValidationError::DuplicateField { path, span, first } = &errors[0] else {
        panic!("expected a duplicate field error, got {:?}", errors[0]);
    };
    assert_eq!(path, "Query/allPersons/name");
    assert!(first.start_inclusive.byte_offset() < span.start_inclusive.byte_offset());
}

#[test]
fn alias_reusing_a_sibling_name_is_not_a_duplicate() {
    let op = validate("{ allPersons(last: 1) { name name: age } }").unwrap();
    assert_eq!(leaf_paths(&op), vec!["Query/allPersons/name", "Query/allPersons/age"]);
    let fields = op.find_field("Query/allPersons").unwrap().selection_set.fields();
    assert_eq!(fields[1].name, "age");
    assert_eq!(fields[1].response_key, "name");
}

#[test]
fn condition_outside_interface_is_rejected() {
    let errors = validate_errors("{ hero { name ... on Droid { primaryFunction } } }");
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "on condition type `Droid` does not implement interface `Character`",
    );
}

#[test]
fn inline_condition_is_spliced_into_the_path() {
    let op = validate("{ hero { name ... on Human { height } } }").unwrap();
    assert_eq!(leaf_paths(&op), vec!["Query/hero/name", "Query/hero/Human/height"]);

    let hero = op.find_field("Query/hero").unwrap();
    let ValidatedSelection::Fragment(frag) = &hero.selection_set.items[1] else {
        panic!("expected an inline fragment");
    };
    assert_eq!(frag.type_condition.as_deref(), Some("Human"));
}

#[test]
fn narrowed_field_does_not_collide_with_the_interface_field() {
    let op = validate("{ hero { name ... on Human { name } } }").unwrap();
    assert_eq!(leaf_paths(&op), vec!["Query/hero/name", "Query/hero/Human/name"]);
}

#[test]
fn union_conditions_must_be_members() {
    let errors = validate_errors(r#"{ search(text: "x") { ... on Droid { name } } }"#);
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        ValidationError::ConditionNotMember { condition, union_name, .. }
            if condition == "Droid" && union_name == "SearchResult"
    ));

    let op = validate(r#"{ search(text: "x") { ... on Person { name } ... on Human { height } } }"#).unwrap();
    assert_eq!(
        leaf_paths(&op),
        vec!["Query/search/Person/name", "Query/search/Human/height"],
    );
}

#[test]
fn union_has_no_fields_of_its_own() {
    let errors = validate_errors(r#"{ search(text: "x") { name } }"#);
    assert!(matches!(
        &errors[0],
        ValidationError::UnknownField { type_name, .. } if type_name == "SearchResult"
    ));
}

#[test]
fn fragment_reused_under_different_aliases_is_a_duplicate() {
    let errors = validate_errors(
        "{ a: hero { ...HeroName } b: hero { ...HeroName } }
         fragment HeroName on Character { name }",
    );
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        ValidationError::DuplicateField { path, .. } if path == "Query/hero/name"
    ));
}

#[test]
fn fragment_field_duplicating_a_sibling_is_reported() {
    let errors = validate_errors(
        "{ hero { name ...HeroName } }
         fragment HeroName on Character { name }",
    );
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        ValidationError::DuplicateField { path, .. } if path == "Query/hero/name"
    ));
}

#[test]
fn spread_of_unknown_fragment() {
    let errors = validate_errors("{ hero { ...Missing } }");
    assert_eq!(errors[0].to_string(), "unknown fragment `Missing`");
}

#[test]
fn fragment_cycle_is_reported_once() {
    let errors = validate_errors(
        "{ hero { ...A } }
         fragment A on Character { ...B }
         fragment B on Character { name ...A }",
    );
    assert_eq!(errors.len(), 1);
    let ValidationError::FragmentCycle { cycle, .. } = &errors[0] else {
        panic!("expected a fragment cycle, got {:?}", errors[0]);
    };
    assert_eq!(cycle, &vec!["A".to_string(), "B".to_string(), "A".to_string()]);
    assert_eq!(errors[0].to_string(), "fragment cycle: A -> B -> A");
}

#[test]
fn include_and_skip_exclude_selections() {
    let op = validate_with(
        "query($show: Boolean = false) {
            allPersons(last: 1) { name age @include(if: $show) friends @skip(if: true) { name } }
        }",
        vars(&[]),
    )
    .unwrap();
    assert_eq!(leaf_paths(&op), vec!["Query/allPersons/name"]);

    let op = validate_with(
        "query($show: Boolean = false) { allPersons(last: 1) { name age @include(if: $show) } }",
        vars(&[("show", InputValue::Boolean(true))]),
    )
    .unwrap();
    assert_eq!(leaf_paths(&op), vec!["Query/allPersons/name", "Query/allPersons/age"]);
}

#[test]
fn excluded_inline_fragment_is_not_visited() {
    let op = validate("{ hero { name ... @include(if: false) { bogus } } }").unwrap();
    assert_eq!(leaf_paths(&op), vec!["Query/hero/name"]);
}

#[test]
fn directive_on_unsupported_location() {
    let errors = validate_errors("query @include(if: true) { hero { name } }");
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        ValidationError::MisplacedDirective { name, location: DirectiveLocation::Query, .. }
            if name == "include"
    ));
    assert_eq!(errors[0].category(), ErrorCategory::DirectiveLocation);
}

#[test]
fn unknown_directive() {
    let errors = validate_errors("{ hero { name @deprecated } }");
    assert_eq!(errors[0].to_string(), "unknown directive `@deprecated`");
}

#[test]
fn directive_argument_is_type_checked() {
    let errors = validate_errors("{ hero { name @skip(if: 1) } }");
    assert!(matches!(&errors[0], ValidationError::TypeMismatch { expected, .. } if expected == "Boolean"));
}

#[test]
fn argument_of_the_wrong_kind() {
    let errors = validate_errors(r#"{ allPersons(last: "one") { name } }"#);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), r#"expected `Int`, found string `"one"`"#);
    assert_eq!(errors[0].category(), ErrorCategory::TypeMismatch);
}

#[test]
fn unknown_argument() {
    let errors = validate_errors("{ allPersons(last: 1, first: 2) { name } }");
    assert_eq!(errors[0].to_string(), "unknown argument `first` on `Query.allPersons`");
}

#[test]
fn int_argument_must_fit_in_32_bits() {
    let errors = validate_errors("{ allPersons(last: 3000000000) { name } }");
    assert!(matches!(&errors[0], ValidationError::IntOutOfRange { value: 3000000000, .. }));
}

#[test]
fn list_depth_must_match_exactly() {
    let errors = validate_errors(r#"{ byIds(ids: "1") { name } }"#);
    assert!(matches!(
        &errors[0],
        ValidationError::ListDepthMismatch { expected: 1, found: 0, .. }
    ));

    let errors = validate_errors(r#"{ person(id: ["1"]) { name } }"#);
    assert!(matches!(
        &errors[0],
        ValidationError::ListDepthMismatch { expected: 0, found: 1, .. }
    ));
}

#[test]
fn null_for_non_null_argument() {
    let errors = validate_errors("{ person(id: null) { name } }");
    assert_eq!(errors[0].to_string(), "null is not allowed for non-null type `ID!`");

    let errors = validate_errors(r#"{ byIds(ids: ["1", null]) { name } }"#);
    assert!(matches!(
        &errors[0],
        ValidationError::NonNullViolation { expected, .. } if expected == "ID!"
    ));
}

#[test]
fn id_argument_accepts_ints() {
    let op = validate("{ person(id: 7) { name } }").unwrap();
    let person = op.find_field("Query/person").unwrap();
    assert_eq!(person.arguments["id"], InputValue::String("7".to_string()));
}

#[test]
fn enum_arguments() {
    let op = validate("{ hero(episode: JEDI) { name } }").unwrap();
    assert_eq!(
        op.find_field("Query/hero").unwrap().arguments["episode"],
        InputValue::Enum("JEDI".to_string()),
    );

    let errors = validate_errors("{ hero(episode: CLONES) { name } }");
    assert_eq!(errors[0].to_string(), "`CLONES` is not a value of enum `Episode`");

    let errors = validate_errors(r#"{ hero(episode: "JEDI") { name } }"#);
    assert!(matches!(&errors[0], ValidationError::TypeMismatch { .. }));
}

#[test]
fn input_object_arguments() {
    let op = validate(r#"{ filtered(filter: { nameLike: "J" }) { name } }"#).unwrap();
    let filtered = op.find_field("Query/filtered").unwrap();
    assert_eq!(filtered.arguments["filter"].to_string(), r#"{ minAge: 0, nameLike: "J" }"#);

    let errors = validate_errors("{ filtered(filter: { minAge: 3 }) { name } }");
    assert_eq!(
        errors[0].to_string(),
        "field `nameLike` of input type `PersonFilter` must be defined",
    );

    let errors = validate_errors(r#"{ filtered(filter: { nameLike: "J", nickname: "x" }) { name } }"#);
    assert!(matches!(
        &errors[0],
        ValidationError::UnknownInputField { field, .. } if field == "nickname"
    ));
}

#[test]
fn composite_fields_need_a_selection_set() {
    let errors = validate_errors("{ allPersons(last: 1) }");
    assert!(matches!(
        &errors[0],
        ValidationError::MissingSelectionSet { field, .. } if field == "allPersons"
    ));

    let errors = validate_errors("{ allPersons(last: 1) { name { first } } }");
    assert!(matches!(
        &errors[0],
        ValidationError::UnexpectedSelectionSet { field, .. } if field == "name"
    ));
}

#[test]
fn typename_is_always_selectable() {
    let op = validate("{ hero { __typename name } }").unwrap();
    assert_eq!(leaf_paths(&op), vec!["Query/hero/__typename", "Query/hero/name"]);
    let typename = op.find_field("Query/hero/__typename").unwrap();
    assert!(typename.is_typename());
    assert_eq!(typename.parent_type, "Character");
}

#[test]
fn variables_are_substituted_into_arguments() {
    let op = validate_with(
        "query($last: Int) { allPersons(last: $last) { name } }",
        vars(&[("last", InputValue::Int(5))]),
    )
    .unwrap();
    assert_eq!(
        op.find_field("Query/allPersons").unwrap().arguments["last"],
        InputValue::Int(5),
    );
    assert_eq!(op.variables["last"], InputValue::Int(5));
}

#[test]
fn undeclared_variable_in_a_fragment() {
    let errors = validate_errors(
        "{ hero { ...HeroName } }
         fragment HeroName on Character { name @include(if: $show) }",
    );
    assert_eq!(errors[0].to_string(), "undefined variable `$show`");
}

#[test]
fn error_ceiling_aborts_validation() {
    let cache = cache();
    let document = parse("{ a b c d e }");
    let id = document.statement_ids().next().unwrap();

    let errors = FieldValidator::new(&cache, &document)
        .with_max_errors(3)
        .validate(id)
        .unwrap_err();
    assert_eq!(errors.len(), 5);
    assert!(errors[..4]
        .iter()
        .all(|err| matches!(err, ValidationError::UnknownField { .. })));
    assert_eq!(errors[4], ValidationError::TooManyErrors { limit: 3 });
    assert_eq!(errors[4].category(), ErrorCategory::Aborted);
    assert!(errors[4].span().is_none());
}

#[test]
fn reaching_the_error_ceiling_does_not_abort() {
    let cache = cache();
    let document = parse("{ a b c }");
    let id = document.statement_ids().next().unwrap();

    let errors = FieldValidator::new(&cache, &document)
        .with_max_errors(3)
        .validate(id)
        .unwrap_err();
    assert_eq!(errors.len(), 3);
    assert!(errors.iter().all(|err| err.category() != ErrorCategory::Aborted));
}

#[test]
fn fragment_statement_is_not_an_operation() {
    let cache = cache();
    let document = parse("fragment HeroName on Character { name }");
    let id = document.statement_ids().next().unwrap();

    let errors = FieldValidator::new(&cache, &document).validate(id).unwrap_err();
    assert!(matches!(&errors[0], ValidationError::NotAnOperation { .. }));
}

#[test]
fn operation_root_must_exist() {
    let errors = validate_errors("mutation { addPerson { name } }");
    assert!(matches!(
        &errors[0],
        ValidationError::UnknownType { name, .. } if name == "Mutation"
    ));
}
