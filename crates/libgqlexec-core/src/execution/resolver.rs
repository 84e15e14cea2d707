use crate::validation::ResponsePath;
use async_trait::async_trait;
use indexmap::IndexMap;
use libgqlexec_parser::ast::InputValue;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Everything a resolver is handed for one field invocation.
#[derive(Clone, Debug)]
pub struct ResolverContext {
    /// Response path the resolver was registered under.
    pub path: ResponsePath,

    /// The field's coerced arguments. When the enclosing value already holds
    /// data under this field's name, it is passed along as `resp`.
    pub arguments: IndexMap<String, InputValue>,

    /// The enclosing value fetched by an outer resolver, if any. Root fields
    /// have none.
    pub parent: Option<InputValue>,

    pub cancellation: CancellationToken,
}

impl ResolverContext {
    pub const RESP_ARGUMENT: &'static str = "resp";

    pub fn argument(&self, name: &str) -> Option<&InputValue> {
        self.arguments.get(name)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ResolverError {
    message: String,
}

impl ResolverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Supplies the data for one field.
///
/// The returned text is parsed with the value grammar (`[{ name: "Jack" }]`,
/// `42`, `null`, ...) and then checked against the field's schema type.
/// Long-running resolvers should watch [`ResolverContext::cancellation`].
///
/// Async closures taking a [`ResolverContext`] are resolvers:
///
/// ```
/// use libgqlexec_core::execution::ResolverContext;
/// use libgqlexec_core::execution::ResolverError;
/// use libgqlexec_core::execution::ResolverRegistry;
///
/// let mut registry = ResolverRegistry::new();
/// registry.register("Query/greeting", |ctx: ResolverContext| async move {
///     let name = ctx.argument("name").and_then(|v| v.as_str()).unwrap_or("world");
///     Ok::<_, ResolverError>(format!("\"hello {name}\""))
/// });
/// assert!(registry.get("Query/greeting").is_some());
/// ```
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, ctx: ResolverContext) -> Result<String, ResolverError>;
}

#[async_trait]
impl<F, Fut> Resolver for F
where
    F: Fn(ResolverContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, ResolverError>> + Send,
{
    async fn resolve(&self, ctx: ResolverContext) -> Result<String, ResolverError> {
        (self)(ctx).await
    }
}

/// Always answers with the same value text.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticResolver {
    text: String,
}

impl StaticResolver {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[async_trait]
impl Resolver for StaticResolver {
    async fn resolve(&self, _ctx: ResolverContext) -> Result<String, ResolverError> {
        Ok(self.text.clone())
    }
}
