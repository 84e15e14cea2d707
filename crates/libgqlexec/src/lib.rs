//! Parse, resolve, validate and execute GraphQL operations against resolver
//! callbacks.
//!
//! ```
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! use libgqlexec::execution::ResolverContext;
//! use libgqlexec::execution::ResolverError;
//! use libgqlexec::schema::InMemorySchemaStore;
//! use libgqlexec::Session;
//! use libgqlexec::SessionConfig;
//!
//! let store = InMemorySchemaStore::from_sdl(
//!     "type Query { greeting(name: String = \"world\"): String! }",
//! ).unwrap();
//! let mut session = Session::new(store, SessionConfig::default());
//! session.register_resolver("Query/greeting", |ctx: ResolverContext| async move {
//!     let name = ctx.argument("name").and_then(|v| v.as_str()).unwrap_or("?");
//!     Ok::<_, ResolverError>(format!("\"hello {name}\""))
//! });
//!
//! let response = session.run("{ greeting }").await;
//! assert_eq!(response.to_string(), r#"{ data: { greeting: "hello world" } }"#);
//!
//! let document = libgqlexec::parser::GraphQLParser::new("{greeting}")
//!     .parse_executable_document()
//!     .into_result()
//!     .unwrap();
//! assert_eq!(document.operations().count(), 1);
//! # });
//! ```

pub use libgqlexec_core::*;

/// Tokenizer, parser and AST for GraphQL executable documents, schema
/// definitions and value text.
pub mod parser {
    pub use libgqlexec_parser::*;
}
