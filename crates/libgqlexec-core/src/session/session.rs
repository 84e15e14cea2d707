use crate::execution::Executor;
use crate::execution::Resolver;
use crate::execution::ResolverRegistry;
use crate::execution::Response;
use crate::resolution::TypeResolution;
use crate::resolution::TypeResolver;
use crate::schema::SchemaStore;
use crate::schema::TypeCache;
use crate::validation::apply_bindings;
use crate::validation::bind_variables;
use crate::validation::FieldValidator;
use crate::GraphQLError;
use crate::PreparedOperation;
use crate::SessionConfig;
use crate::SessionError;
use indexmap::IndexMap;
use libgqlexec_parser::ast::Document;
use libgqlexec_parser::ast::InputValue;
use libgqlexec_parser::ast::StatementId;
use libgqlexec_parser::GraphQLParser;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

type Result<T> = std::result::Result<T, Vec<GraphQLError>>;

/// Runs GraphQL requests against one schema store.
///
/// A session owns the [`TypeCache`] that types fetched from its store are
/// kept in, so later requests only fetch what earlier ones did not need. It
/// also owns the resolvers registered for it and the settings that pick the
/// namespace and the operation to run.
///
/// [`prepare`](Self::prepare) parses, resolves, binds and validates an
/// operation; [`execute`](Self::execute) runs a prepared operation. Both
/// stages report every problem they find rather than stopping at the first.
/// Execution only borrows the session, so once the cache is warm, prepared
/// operations can run concurrently (see
/// [`prepare_shared`](Self::prepare_shared)).
pub struct Session<S: SchemaStore> {
    store: S,
    config: SessionConfig,
    cache: TypeCache,
    resolvers: ResolverRegistry,
}

impl<S: SchemaStore> Session<S> {
    pub fn new(store: S, config: SessionConfig) -> Self {
        Self {
            store,
            config,
            cache: TypeCache::new(),
            resolvers: ResolverRegistry::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn type_cache(&self) -> &TypeCache {
        &self.cache
    }

    pub fn resolvers(&self) -> &ResolverRegistry {
        &self.resolvers
    }

    pub fn namespace(&self) -> Option<&str> {
        self.config.namespace.as_deref()
    }

    /// Switches the schema namespace types are fetched from. Types cached
    /// for the previous namespace are dropped.
    pub fn set_namespace(&mut self, namespace: Option<&str>) {
        if self.config.namespace.as_deref() == namespace {
            return;
        }
        tracing::debug!(
            from = self.config.namespace.as_deref().unwrap_or("<global>"),
            to = namespace.unwrap_or("<global>"),
            "switching schema namespace",
        );
        self.config.namespace = namespace.map(str::to_string);
        self.cache = TypeCache::new();
    }

    /// Picks the operation [`prepare`](Self::prepare) selects from documents
    /// with more than one. `None` requires documents to define exactly one.
    pub fn select_operation(&mut self, name: Option<&str>) {
        self.config.operation_name = name.map(str::to_string);
    }

    pub fn register_resolver(
        &mut self,
        path: &str,
        resolver: impl Resolver + 'static,
    ) -> Option<Arc<dyn Resolver>> {
        self.resolvers.register(path, resolver)
    }

    pub fn register_resolver_arc(
        &mut self,
        path: &str,
        resolver: Arc<dyn Resolver>,
    ) -> Option<Arc<dyn Resolver>> {
        self.resolvers.register_arc(path, resolver)
    }

    /// Parses `query`, selects its operation, resolves every type it needs
    /// (fetching from the store on cache misses), binds `variables` and
    /// validates the result.
    pub fn prepare(
        &mut self,
        query: &str,
        variables: &IndexMap<String, InputValue>,
    ) -> Result<PreparedOperation> {
        let document = parse(query)?;
        let id = self.select(&document)?;
        self.prepare_statement(document, id, variables)
    }

    /// Like [`prepare`](Self::prepare), but never touches the schema store:
    /// every type must already be cached. Only reads the session, so any
    /// number of threads can prepare against one warmed-up session.
    pub fn prepare_shared(
        &self,
        query: &str,
        variables: &IndexMap<String, InputValue>,
    ) -> Result<PreparedOperation> {
        let mut document = parse(query)?;
        let id = self.select(&document)?;

        let mut resolution = TypeResolver::resolve_cached(&self.cache, &mut document, id);
        for fragment in document.fragment_ids().collect::<Vec<_>>() {
            let fragment_resolution = TypeResolver::resolve_cached(&self.cache, &mut document, fragment);
            resolution.errors.extend(fragment_resolution.errors);
            resolution.aborted |= fragment_resolution.aborted;
        }
        check_resolution(resolution)?;

        bind_and_validate(&self.cache, &self.config, document, id, variables)
    }

    pub async fn execute(
        &self,
        prepared: &PreparedOperation,
        cancellation: CancellationToken,
    ) -> Response {
        Executor::new(&self.cache, &self.resolvers)
            .with_cancellation(cancellation)
            .with_max_errors(self.config.max_errors)
            .execute(prepared.operation())
            .await
    }

    /// Prepares and executes `query` without variables.
    pub async fn run(&mut self, query: &str) -> Response {
        self.run_with_variables(query, &IndexMap::new()).await
    }

    pub async fn run_with_variables(
        &mut self,
        query: &str,
        variables: &IndexMap<String, InputValue>,
    ) -> Response {
        match self.prepare(query, variables) {
            Ok(prepared) => self.execute(&prepared, CancellationToken::new()).await,
            Err(errors) => Response::from_errors(errors),
        }
    }

    /// Runs every operation in `query` one after the other, in document
    /// order, ignoring the selected operation name.
    pub async fn run_all(
        &mut self,
        query: &str,
        variables: &IndexMap<String, InputValue>,
    ) -> Vec<(Option<String>, Response)> {
        let document = match parse(query) {
            Ok(document) => document,
            Err(errors) => return vec![(None, Response::from_errors(errors))],
        };
        let operations: Vec<(StatementId, Option<String>)> = document
            .operations()
            .map(|(id, op)| (id, op.name.clone()))
            .collect();
        if operations.is_empty() {
            return vec![(None, Response::from_errors(vec![SessionError::NoOperations.into()]))];
        }

        let mut responses = Vec::with_capacity(operations.len());
        for (id, name) in operations {
            let response = match self.prepare_statement(document.clone(), id, variables) {
                Ok(prepared) => self.execute(&prepared, CancellationToken::new()).await,
                Err(errors) => Response::from_errors(errors),
            };
            responses.push((name, response));
        }
        responses
    }

    fn select(&self, document: &Document) -> Result<StatementId> {
        select_operation(document, self.config.operation_name.as_deref())
            .map_err(|err| vec![GraphQLError::from(err)])
    }

    fn prepare_statement(
        &mut self,
        mut document: Document,
        id: StatementId,
        variables: &IndexMap<String, InputValue>,
    ) -> Result<PreparedOperation> {
        let namespace = self.config.namespace.as_deref();
        let mut resolver = TypeResolver::new(&mut self.cache, &self.store).with_namespace(namespace);
        let mut resolution = resolver.resolve_statement(&mut document, id);
        for fragment in document.fragment_ids().collect::<Vec<_>>() {
            let fragment_resolution = resolver.resolve_statement(&mut document, fragment);
            resolution.errors.extend(fragment_resolution.errors);
            resolution.aborted |= fragment_resolution.aborted;
            resolution.fetched += fragment_resolution.fetched;
        }
        tracing::debug!(
            fetched = resolution.fetched,
            cached_types = self.cache.len(),
            "resolved operation types",
        );
        check_resolution(resolution)?;

        bind_and_validate(&self.cache, &self.config, document, id, variables)
    }
}

impl<S: SchemaStore + std::fmt::Debug> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("store", &self.store)
            .field("config", &self.config)
            .field("cached_types", &self.cache.len())
            .field("resolvers", &self.resolvers)
            .finish()
    }
}

fn parse(query: &str) -> Result<Document> {
    GraphQLParser::new(query)
        .parse_executable_document()
        .into_result()
        .map_err(|errors| errors.into_iter().map(GraphQLError::from).collect())
}

fn select_operation(
    document: &Document,
    name: Option<&str>,
) -> std::result::Result<StatementId, SessionError> {
    if let Some(name) = name {
        return document
            .operation_by_name(name)
            .ok_or_else(|| SessionError::OperationNotFound {
                name: name.to_string(),
            });
    }
    let mut operations = document.operations();
    match (operations.next(), operations.next()) {
        (None, _) => Err(SessionError::NoOperations),
        (Some((id, _)), None) => Ok(id),
        (Some(_), Some(_)) => Err(SessionError::AmbiguousOperation {
            names: document
                .operations()
                .map(|(_, op)| op.name.clone().unwrap_or_else(|| "<anonymous>".to_string()))
                .collect(),
        }),
    }
}

fn check_resolution(resolution: TypeResolution) -> Result<()> {
    if resolution.errors.is_empty() && !resolution.aborted {
        return Ok(());
    }
    Err(resolution.errors.into_iter().map(GraphQLError::from).collect())
}

fn bind_and_validate(
    cache: &TypeCache,
    config: &SessionConfig,
    mut document: Document,
    id: StatementId,
    variables: &IndexMap<String, InputValue>,
) -> Result<PreparedOperation> {
    let to_errors = |errors: Vec<_>| errors.into_iter().map(GraphQLError::from).collect::<Vec<_>>();

    let Some(op) = document.statement(id).as_operation() else {
        return Err(vec![SessionError::NoOperations.into()]);
    };
    let bound = bind_variables(cache, op, variables).map_err(to_errors)?;
    apply_bindings(&mut document, id, &bound);

    let operation = FieldValidator::new(cache, &document)
        .with_variables(&bound)
        .with_max_errors(config.max_errors)
        .validate(id)
        .map_err(to_errors)?;
    Ok(PreparedOperation::new(document, operation))
}
