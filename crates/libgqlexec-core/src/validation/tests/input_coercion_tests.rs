use crate::schema::TypeCache;
use crate::validation::input_coercion::type_at_level;
use crate::validation::tests::utils::cache;
use crate::validation::InputCoercer;
use crate::validation::ValidationError;
use indexmap::IndexMap;
use libgqlexec_parser::ast::InputValue;
use libgqlexec_parser::ast::TypeRef;
use libgqlexec_parser::parse_value_text;
use libgqlexec_parser::GraphQLSourceSpan;

fn coerce(cache: &TypeCache, text: &str, type_ref: &TypeRef) -> Result<InputValue, Vec<ValidationError>> {
    let value = parse_value_text(text).into_result().unwrap();
    InputCoercer::new(cache).coerce(&value, type_ref, &GraphQLSourceSpan::builtin())
}

#[test]
fn type_at_level_peels_list_wrappers() {
    // [[Int!]]!
    let type_ref = TypeRef::named("Int").non_null().list().list().non_null();
    assert_eq!(type_ref.to_string(), "[[Int!]]!");
    assert_eq!(type_at_level(&type_ref, 1).to_string(), "[Int!]");
    assert_eq!(type_at_level(&type_ref, 2).to_string(), "Int!");
}

#[test]
fn builtin_scalar_widening() {
    let cache = TypeCache::new();
    assert_eq!(
        coerce(&cache, "3", &TypeRef::named("Float")).unwrap(),
        InputValue::Float(3.0),
    );
    assert_eq!(
        coerce(&cache, r#""""block""""#, &TypeRef::named("String")).unwrap(),
        InputValue::String("block".to_string()),
    );
    assert_eq!(
        coerce(&cache, "42", &TypeRef::named("ID")).unwrap(),
        InputValue::String("42".to_string()),
    );
    assert!(coerce(&cache, "1.5", &TypeRef::named("Int")).is_err());
    assert!(coerce(&cache, "true", &TypeRef::named("String")).is_err());
}

#[test]
fn custom_scalars_accept_any_value() {
    let cache = cache();
    let value = coerce(&cache, r#"{ at: "2024-01-01" }"#, &TypeRef::named("DateTime")).unwrap();
    assert!(value.as_object().is_some());
}

#[test]
fn nested_lists_are_checked_per_level() {
    let cache = TypeCache::new();
    let matrix = TypeRef::named("Int").list().list();

    let value = coerce(&cache, "[[1, 2], null, [3]]", &matrix).unwrap();
    assert_eq!(value.to_string(), "[[1, 2], null, [3]]");

    let errors = coerce(&cache, "[1, 2]", &matrix).unwrap_err();
    assert!(matches!(
        &errors[0],
        ValidationError::ListDepthMismatch { expected: 2, found: 1, .. }
    ));

    let errors = coerce(&cache, "[[[1]]]", &matrix).unwrap_err();
    assert!(matches!(
        &errors[0],
        ValidationError::ListDepthMismatch { expected: 2, found: 3, .. }
    ));
}

#[test]
fn every_bad_item_is_reported() {
    let cache = TypeCache::new();
    let errors = coerce(&cache, r#"[1, "two", 3, "four"]"#, &TypeRef::named("Int").list()).unwrap_err();
    assert_eq!(errors.len(), 2);
}

#[test]
fn empty_list_is_not_null() {
    let cache = TypeCache::new();
    let ids = TypeRef::named("ID").non_null().list().non_null();
    assert_eq!(coerce(&cache, "[]", &ids).unwrap(), InputValue::List(vec![]));
    assert!(coerce(&cache, "null", &ids).is_err());
}

#[test]
fn output_types_are_not_input_types() {
    let cache = cache();
    let errors = coerce(&cache, "{ name: \"x\" }", &TypeRef::named("Person")).unwrap_err();
    assert_eq!(errors[0].to_string(), "`Person` cannot be used as an input type");
}

#[test]
fn variables_need_bindings() {
    let cache = TypeCache::new();
    let value = InputValue::Variable("last".to_string());
    let span = GraphQLSourceSpan::builtin();

    let errors = InputCoercer::new(&cache)
        .coerce(&value, &TypeRef::named("Int"), &span)
        .unwrap_err();
    assert!(matches!(&errors[0], ValidationError::UndefinedVariable { name, .. } if name == "last"));

    let mut bound = IndexMap::new();
    bound.insert("last".to_string(), InputValue::Int(2));
    let coerced = InputCoercer::new(&cache)
        .with_variables(&bound)
        .coerce(&value, &TypeRef::named("Int"), &span)
        .unwrap();
    assert_eq!(coerced, InputValue::Int(2));
}

#[test]
fn variable_values_may_spell_enums_as_strings() {
    let cache = cache();
    let value = InputValue::String("EMPIRE".to_string());
    let span = GraphQLSourceSpan::builtin();

    assert!(InputCoercer::new(&cache).coerce(&value, &TypeRef::named("Episode"), &span).is_err());
    assert_eq!(
        InputCoercer::for_variable_values(&cache)
            .coerce(&value, &TypeRef::named("Episode"), &span)
            .unwrap(),
        InputValue::Enum("EMPIRE".to_string()),
    );
}
