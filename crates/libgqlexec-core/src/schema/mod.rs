//! The type graph an operation is checked and executed against.
//!
//! Definitions live in a [`TypeCache`], which starts out holding only the
//! built-in scalars and directives and is filled lazily from a
//! [`SchemaStore`] as operations reference new types.

pub mod builtins;
mod dir_schema_store;
mod in_memory_schema_store;
mod schema_store;
mod schema_store_error;
mod type_cache;

pub use builtins::BuiltinScalar;
pub use dir_schema_store::DirSchemaStore;
pub use in_memory_schema_store::InMemorySchemaStore;
pub use schema_store::SchemaStore;
pub use schema_store_error::SchemaStoreError;
pub use type_cache::TypeCache;

#[cfg(test)]
mod tests;
