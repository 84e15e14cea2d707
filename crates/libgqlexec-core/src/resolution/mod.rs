//! Closes the types an executable document refers to against a schema
//! store, filling the type cache and the resolved slots of the document.

mod type_resolution_error;
mod type_resolver;

pub use type_resolution_error::TypeResolutionError;
pub use type_resolver::TypeResolution;
pub use type_resolver::TypeResolver;
