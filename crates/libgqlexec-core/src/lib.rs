//! Type resolution, validation and execution of parsed GraphQL operations.
//!
//! A [`Session`] ties the stages together: it parses a request with
//! [`libgqlexec_parser`], closes every referenced type against a
//! [`SchemaStore`](schema::SchemaStore) into a [`TypeCache`](schema::TypeCache),
//! validates the selected operation into a
//! [`ValidatedOperation`](validation::ValidatedOperation) and finally executes
//! it against the [`Resolver`](execution::Resolver)s registered per response
//! path.
//!
//! ```
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! use libgqlexec_core::execution::StaticResolver;
//! use libgqlexec_core::schema::InMemorySchemaStore;
//! use libgqlexec_core::Session;
//! use libgqlexec_core::SessionConfig;
//!
//! let store = InMemorySchemaStore::from_sdl(
//!     "type Query { allPersons(last: Int): [Person!] }
//!      type Person { name: String! age: Int }",
//! ).unwrap();
//! let mut session = Session::new(store, SessionConfig::default());
//! session.register_resolver(
//!     "Query/allPersons",
//!     StaticResolver::new(r#"[{ name: "Jack Smith", age: 53 }]"#),
//! );
//!
//! let response = session.run("{ allPersons(last: 1) { name age } }").await;
//! assert_eq!(
//!     response.to_string(),
//!     r#"{ data: { allPersons: [{ name: "Jack Smith", age: 53 }] } }"#,
//! );
//! # });
//! ```

mod error;
pub mod execution;
mod file_reader;
pub mod resolution;
pub mod schema;
pub mod session;
pub mod validation;

pub use error::ErrorCategory;
pub use error::GraphQLError;
pub use file_reader::read_content;
pub use file_reader::ReadContentError;
pub use session::PreparedOperation;
pub use session::Session;
pub use session::SessionConfig;
pub use session::SessionConfigBuilder;
pub use session::SessionError;

#[cfg(test)]
mod tests;
