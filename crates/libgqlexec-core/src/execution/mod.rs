//! Drives a [`ValidatedOperation`](crate::validation::ValidatedOperation)
//! against live data supplied by resolver callbacks.

mod execution_error;
mod executor;
mod resolver;
mod resolver_registry;
mod response;

pub use execution_error::ExecutionError;
pub use executor::Executor;
pub use resolver::Resolver;
pub use resolver::ResolverContext;
pub use resolver::ResolverError;
pub use resolver::StaticResolver;
pub use resolver_registry::ResolverRegistry;
pub use response::Response;

#[cfg(test)]
mod tests;
