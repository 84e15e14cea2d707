use crate::schema::TypeCache;
use crate::validation::bind_variables;
use crate::validation::FieldValidator;
use crate::validation::ValidatedOperation;
use crate::validation::ValidationError;
use indexmap::IndexMap;
use libgqlexec_parser::ast::Document;
use libgqlexec_parser::ast::InputValue;
use libgqlexec_parser::ast::StatementId;
use libgqlexec_parser::GraphQLParser;

pub(super) const SCHEMA: &str = r#"
    type Query {
        allPersons(last: Int): [Person!]
        person(id: ID!): Person
        byIds(ids: [ID!]!): [Person]
        hero(episode: Episode = NEWHOPE): Character
        search(text: String!): [SearchResult]
        filtered(filter: PersonFilter!): [Person!]!
    }
    type Person { name: String! age: Int friends: [Person!] }
    interface Character { name: String! friends: [Character] }
    type Human implements Character { name: String! friends: [Character] height: Float }
    type Droid { name: String! primaryFunction: String }
    union SearchResult = Human | Person
    enum Episode { NEWHOPE EMPIRE JEDI }
    input PersonFilter { minAge: Int = 0 nameLike: String! tags: [String!] }
    scalar DateTime
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

pub(super) fn parse(query: &str) -> Document {
    GraphQLParser::new(query)
        .parse_executable_document()
        .into_result()
        .unwrap()
}

pub(super) fn first_operation(document: &Document) -> StatementId {
    document.operations().next().unwrap().0
}

pub(super) fn validate(query: &str) -> Result<ValidatedOperation, Vec<ValidationError>> {
    validate_with(query, IndexMap::new())
}

pub(super) fn validate_with(
    query: &str,
    supplied: IndexMap<String, InputValue>,
) -> Result<ValidatedOperation, Vec<ValidationError>> {
    let cache = cache();
    let document = parse(query);
    let id = first_operation(&document);
    let op = document.statement(id).as_operation().unwrap();
    let variables = bind_variables(&cache, op, &supplied)?;
    FieldValidator::new(&cache, &document)
        .with_variables(&variables)
        .validate(id)
}

pub(super) fn validate_errors(query: &str) -> Vec<ValidationError> {
    match validate(query) {
        Ok(op) => panic!("expected validation errors, got {op:#?}"),
        Err(errors) => errors,
    }
}

pub(super) fn vars(pairs: &[(&str, InputValue)]) -> IndexMap<String, InputValue> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

pub(super) fn leaf_paths(op: &ValidatedOperation) -> Vec<&str> {
    op.leaf_paths.iter().map(|path| path.as_str()).collect()
}
