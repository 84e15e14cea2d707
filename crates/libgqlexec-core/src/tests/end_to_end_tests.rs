use crate::execution::ResolverContext;
use crate::execution::ResolverError;
use crate::execution::StaticResolver;
use crate::schema::DirSchemaStore;
use crate::schema::InMemorySchemaStore;
use crate::ErrorCategory;
use crate::Session;
use crate::SessionConfig;
use libgqlexec_parser::ast::InputValue;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "libgqlexec-core-e2e-{name}-{}",
        std::process::id(),
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[tokio::test]
async fn schema_directory_backed_session() {
    let dir = scratch_dir("people");
    std::fs::write(
        dir.join("query.graphql"),
        "type Query { allPersons(last: Int): [Person!] }",
    )
    .unwrap();
    std::fs::write(
        dir.join("person.graphql"),
        "type Person { name: String! age: Int posts: [Post!]! }\ntype Post { title: String! }",
    )
    .unwrap();

    let mut session = Session::new(DirSchemaStore::load(&dir).unwrap(), SessionConfig::default());
    session.register_resolver(
        "Query/allPersons",
        StaticResolver::new(r#"[{ name: "Jack Smith", age: 53 }]"#),
    );
    session.register_resolver("Query/allPersons/posts", |ctx: ResolverContext| async move {
        let author = ctx
            .parent
            .as_ref()
            .and_then(InputValue::as_object)
            .and_then(|person| person.get("name"))
            .map(|name| name.to_string())
            .unwrap_or_default();
        Ok::<_, ResolverError>(format!("[{{ title: {author} }}]"))
    });

    let response = session
        .run(
            "query Recent {
                allPersons(last: 1) { ...PersonSummary posts { title } }
            }
            fragment PersonSummary on Person { name age }",
        )
        .await;
    assert!(response.is_ok(), "{response}");
    assert_eq!(
        response.to_string(),
        r#"{ data: { allPersons: [{ name: "Jack Smith", age: 53, posts: [{ title: "Jack Smith" }] }] } }"#,
    );
}

#[tokio::test]
async fn schema_defined_directives_are_validated() {
    let store = InMemorySchemaStore::from_sdl(
        "type Query { allPersons(last: Int): [Person!] }
         type Person { name: String! }
         directive @cached(seconds: Int!) on FIELD",
    )
    .unwrap();
    let mut session = Session::new(store, SessionConfig::default());
    session.register_resolver("Query/allPersons", StaticResolver::new(r#"[{ name: "Jack Smith" }]"#));

    let response = session
        .run("{ allPersons(last: 1) @cached(seconds: 30) { name } }")
        .await;
    assert!(response.is_ok(), "{response}");

    let response = session.run("{ allPersons(last: 1) @cached { name } }").await;
    assert_eq!(
        response.errors[0].to_string(),
        "argument `seconds` of `@cached` must be defined",
    );

    let response = session.run("query @cached(seconds: 1) { allPersons(last: 1) { name } }").await;
    assert_eq!(response.errors[0].category(), ErrorCategory::DirectiveLocation);
}

#[tokio::test]
async fn errors_from_every_stage_render_one_line_each() {
    let mut session = Session::new(
        InMemorySchemaStore::from_sdl("type Query { allPersons(last: Int): [Person!] } type Person { name: String! }")
            .unwrap(),
        SessionConfig::default(),
    );

    let response = session.run("{ allPersons(last: 1) { name }").await;
    assert_eq!(response.errors[0].category(), ErrorCategory::Syntax);
    assert!(response.errors[0].format_oneline().starts_with("<input>:1:"));

    let response = session.run("{ allPersons(last: 1) { name } }").await;
    assert_eq!(response.errors[0].category(), ErrorCategory::Resolver);
    assert_eq!(
        response.errors[0].format_oneline(),
        "<input>:1:3: resolver error: no data for `Query/allPersons`: no resolver is registered and there is no enclosing value",
    );
}
