use crate::execution::ResolverContext;
use crate::execution::ResolverRegistry;
use crate::execution::StaticResolver;
use crate::validation::ResponsePath;
use indexmap::IndexMap;
use tokio_util::sync::CancellationToken;

fn context(path: &str) -> ResolverContext {
    ResolverContext {
        path: ResponsePath::from(path),
        arguments: IndexMap::new(),
        parent: None,
        cancellation: CancellationToken::new(),
    }
}

#[tokio::test]
async fn registered_resolvers_are_found_by_path() {
    let mut registry = ResolverRegistry::new();
    assert!(registry.is_empty());

    registry.register("Query/allPersons", StaticResolver::new("[]"));
    let previous = registry.register("Query/allPersons", StaticResolver::new("null"));

    assert!(previous.is_some());
    assert_eq!(registry.len(), 1);
    let resolver = registry.get("Query/allPersons").unwrap();
    assert_eq!(resolver.resolve(context("Query/allPersons")).await.unwrap(), "null");
    assert!(registry.get("Query/allPersons/name").is_none());
}

#[test]
fn paths_keep_registration_order() {
    let mut registry = ResolverRegistry::new();
    registry.register("Query/b", StaticResolver::new("1"));
    registry.register("Query/a", StaticResolver::new("2"));
    let paths: Vec<&str> = registry.paths().map(|path| path.as_str()).collect();
    assert_eq!(paths, vec!["Query/b", "Query/a"]);

    assert!(registry.remove("Query/b").is_some());
    assert!(!registry.contains("Query/b"));
    assert_eq!(format!("{registry:?}"), r#"ResolverRegistry { paths: [ResponsePath("Query/a")] }"#);
}
