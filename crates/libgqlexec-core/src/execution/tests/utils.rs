use crate::execution::Executor;
use crate::execution::ResolverRegistry;
use crate::execution::Response;
use crate::schema::TypeCache;
use crate::validation::bind_variables;
use crate::validation::FieldValidator;
use crate::validation::ValidatedOperation;
use indexmap::IndexMap;
use libgqlexec_parser::GraphQLParser;
use tokio_util::sync::CancellationToken;

pub(super) const SCHEMA: &str = r#"
    type Query {
        allPersons(last: Int): [Person!]
        person(id: ID!): Person
        hero: Character
        episode: Episode
        matrix: [[Int]]
        tags: [String!]!
    }
    type Person { name: String! age: Int friends: [Person!] }
    interface Character { name: String! }
    type Human implements Character { name: String! height: Float }
    type Droid implements Character { name: String! primaryFunction: String }
    enum Episode { NEWHOPE EMPIRE JEDI }
"#;

pub(super) fn cache() -> TypeCache {
    let mut cache = TypeCache::new();
    cache.insert_definitions(
        GraphQLParser::new(SCHEMA)
            .parse_schema_document()
            .into_result()
            .unwrap(),
    );
    cache
}

pub(super) fn validated(cache: &TypeCache, query: &str) -> ValidatedOperation {
    let document = GraphQLParser::new(query)
        .parse_executable_document()
        .into_result()
        .unwrap();
    let (id, op) = document.operations().next().unwrap();
    let variables = bind_variables(cache, op, &IndexMap::new()).unwrap();
    FieldValidator::new(cache, &document)
        .with_variables(&variables)
        .validate(id)
        .unwrap()
}

pub(super) async fn execute(query: &str, registry: &ResolverRegistry) -> Response {
    execute_with(query, registry, Executor::DEFAULT_MAX_ERRORS, CancellationToken::new()).await
}

pub(super) async fn execute_with(
    query: &str,
    registry: &ResolverRegistry,
    max_errors: usize,
    cancellation: CancellationToken,
) -> Response {
    let cache = cache();
    let operation = validated(&cache, query);
    Executor::new(&cache, registry)
        .with_max_errors(max_errors)
        .with_cancellation(cancellation)
        .execute(&operation)
        .await
}

pub(super) fn registry(entries: &[(&str, &str)]) -> ResolverRegistry {
    let mut registry = ResolverRegistry::new();
    for (path, text) in entries {
        registry.register(*path, crate::execution::StaticResolver::new(*text));
    }
    registry
}
