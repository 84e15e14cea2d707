use crate::schema::BuiltinScalar;
use crate::schema::TypeCache;
use libgqlexec_parser::ast::SchemaDocument;
use libgqlexec_parser::ast::TypeDefinition;
use libgqlexec_parser::GraphQLParser;

fn schema(sdl: &str) -> SchemaDocument {
    GraphQLParser::new(sdl)
        .parse_schema_document()
        .into_result()
        .unwrap()
}

fn characters_cache() -> TypeCache {
    let mut cache = TypeCache::new();
    cache.insert_definitions(schema(
        r#"
        type Query { hero: Character search: SearchResult }
        interface Character { name: String! }
        type Human implements Character { name: String! height: Float }
        type Droid { name: String! primaryFunction: String }
        type Starship { name: String! }
        union SearchResult = Human | Starship
        "#,
    ));
    cache
}

#[test]
fn new_cache_holds_builtins() {
    let cache = TypeCache::new();
    for scalar in BuiltinScalar::ALL {
        assert!(
            matches!(cache.get_by_name(scalar.name()), Some(TypeDefinition::Scalar(_))),
            "missing builtin {}",
            scalar.name(),
        );
    }
    assert_eq!(cache.len(), 5);
    assert!(cache.directive("include").is_some());
    assert!(cache.directive("skip").is_some());
}

#[test]
fn insert_keeps_first_definition() {
    let mut cache = TypeCache::new();
    let first = cache.insert_definitions(schema("type User { id: ID }"));
    assert_eq!(first.len(), 1);

    let second = cache.insert_definitions(schema("type User { name: String }"));
    assert!(second.is_empty());
    let user = cache.get_by_name("User").unwrap();
    assert!(user.field("id").is_some());
    assert!(user.field("name").is_none());
}

#[test]
fn builtin_directives_cannot_be_replaced() {
    let mut cache = TypeCache::new();
    cache.insert_definitions(schema("directive @include(if: String) on FIELD"));
    let include = cache.directive("include").unwrap();
    assert_eq!(include.arguments["if"].type_ref.to_string(), "Boolean!");
}

#[test]
fn insert_definitions_links_type_refs() {
    let cache = characters_cache();
    let hero = cache.get_by_name("Query").unwrap().field("hero").unwrap();
    assert_eq!(hero.type_ref.resolved, cache.id_of("Character"));

    let name = cache.get_by_name("Human").unwrap().field("name").unwrap();
    assert_eq!(name.type_ref.resolved, cache.id_of("String"));
}

#[test]
fn lookup_prefers_resolved_slot() {
    let cache = characters_cache();
    let hero = cache.get_by_name("Query").unwrap().field("hero").unwrap();
    assert_eq!(cache.lookup(&hero.type_ref).unwrap().name(), "Character");
}

#[test]
fn possible_types_of_each_kind() {
    let cache = characters_cache();
    assert_eq!(cache.possible_types("Human"), vec!["Human"]);
    assert_eq!(cache.possible_types("Character"), vec!["Human"]);
    assert_eq!(cache.possible_types("SearchResult"), vec!["Human", "Starship"]);
    assert!(cache.possible_types("String").is_empty());
    assert!(cache.possible_types("Nope").is_empty());
}

#[test]
fn compatibility_between_types() {
    let cache = characters_cache();
    assert!(cache.is_compatible("Character", "Human"));
    assert!(cache.is_compatible("Human", "Character"));
    assert!(cache.is_compatible("SearchResult", "Starship"));
    assert!(cache.is_compatible("SearchResult", "Character"));
    assert!(!cache.is_compatible("Character", "Droid"));
    assert!(!cache.is_compatible("SearchResult", "Droid"));
    assert!(!cache.is_compatible("Human", "Starship"));
}

#[test]
fn possible_type_membership() {
    let cache = characters_cache();
    assert!(cache.is_possible_type("Character", "Human"));
    assert!(!cache.is_possible_type("Character", "Droid"));
    assert!(cache.is_possible_type("Droid", "Droid"));
}
