use crate::execution::Resolver;
use crate::validation::ResponsePath;
use indexmap::IndexMap;
use std::sync::Arc;

/// Resolvers keyed by the response path of the field they supply, e.g.
/// `Query/allPersons` or `Query/hero/Droid/primaryFunction`.
#[derive(Clone, Default)]
pub struct ResolverRegistry {
    resolvers: IndexMap<ResponsePath, Arc<dyn Resolver>>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `resolver` at `path`, returning whatever was registered
    /// there before.
    pub fn register(
        &mut self,
        path: impl Into<ResponsePath>,
        resolver: impl Resolver + 'static,
    ) -> Option<Arc<dyn Resolver>> {
        self.register_arc(path, Arc::new(resolver))
    }

    pub fn register_arc(
        &mut self,
        path: impl Into<ResponsePath>,
        resolver: Arc<dyn Resolver>,
    ) -> Option<Arc<dyn Resolver>> {
        let path = path.into();
        tracing::trace!(path = path.as_str(), "registering resolver");
        self.resolvers.insert(path, resolver)
    }

    pub fn get(&self, path: &str) -> Option<&Arc<dyn Resolver>> {
        self.resolvers.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.resolvers.contains_key(path)
    }

    pub fn remove(&mut self, path: &str) -> Option<Arc<dyn Resolver>> {
        self.resolvers.shift_remove(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &ResponsePath> {
        self.resolvers.keys()
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl std::fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("paths", &self.resolvers.keys().collect::<Vec<_>>())
            .finish()
    }
}
