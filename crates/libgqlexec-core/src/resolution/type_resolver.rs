use crate::resolution::TypeResolutionError;
use crate::schema::SchemaStore;
use crate::schema::TypeCache;
use libgqlexec_parser::ast::Document;
use libgqlexec_parser::ast::SchemaDocument;
use libgqlexec_parser::ast::Selection;
use libgqlexec_parser::ast::Statement;
use libgqlexec_parser::ast::StatementId;
use libgqlexec_parser::ast::TypeDefinition;
use libgqlexec_parser::ast::TypeId;
use libgqlexec_parser::GraphQLParser;
use libgqlexec_parser::GraphQLSourceSpan;
use std::collections::HashSet;

/// Outcome of resolving one statement (or a whole document).
#[derive(Debug, Default)]
pub struct TypeResolution {
    pub errors: Vec<TypeResolutionError>,

    /// Set when a name could not be found anywhere. Later stages must not
    /// run for a statement whose resolution aborted.
    pub aborted: bool,

    /// How many definitions were fetched from the schema store.
    pub fetched: usize,
}

impl TypeResolution {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty() && !self.aborted
    }

    fn absorb(&mut self, other: TypeResolution) {
        self.errors.extend(other.errors);
        self.aborted |= other.aborted;
        self.fetched += other.fetched;
    }
}

/// Resolves the types a statement refers to.
///
/// Every name is looked up in the [`TypeCache`] first and fetched from the
/// [`SchemaStore`] on a miss. A fetched definition is inserted into the cache
/// before the types *it* refers to are resolved, so mutually referencing
/// types resolve to the same cache entry instead of being fetched again.
/// A fetched interface also pulls in the object types the store lists as
/// its implementors, so the cache knows every runtime type an interface
/// value can have.
///
/// ```
/// use libgqlexec_core::resolution::TypeResolver;
/// use libgqlexec_core::schema::InMemorySchemaStore;
/// use libgqlexec_core::schema::TypeCache;
/// use libgqlexec_parser::GraphQLParser;
///
/// let store = InMemorySchemaStore::from_sdl(
///     "type Query { me: User } type User { friends: [User!]! }",
/// ).unwrap();
/// let mut cache = TypeCache::new();
/// let mut document = GraphQLParser::new("{ me { friends { friends { __typename } } } }")
///     .parse_executable_document()
///     .into_result()
///     .unwrap();
///
/// let resolution = TypeResolver::new(&mut cache, &store).resolve_document(&mut document);
/// assert!(resolution.is_ok());
/// assert!(cache.contains("User"));
/// ```
pub struct TypeResolver<'a> {
    cache: &'a mut TypeCache,
    store: &'a dyn SchemaStore,
    namespace: Option<&'a str>,
    resolution: TypeResolution,
    missing: HashSet<String>,
    pending: Vec<TypeId>,
    unlinked: Vec<TypeId>,
}

impl<'a> TypeResolver<'a> {
    pub fn new(cache: &'a mut TypeCache, store: &'a dyn SchemaStore) -> Self {
        Self {
            cache,
            store,
            namespace: None,
            resolution: TypeResolution::default(),
            missing: HashSet::new(),
            pending: vec![],
            unlinked: vec![],
        }
    }

    /// Scopes schema store lookups to `namespace`.
    pub fn with_namespace(mut self, namespace: Option<&'a str>) -> Self {
        self.namespace = namespace;
        self
    }

    /// Resolves every statement of `document`.
    pub fn resolve_document(&mut self, document: &mut Document) -> TypeResolution {
        let mut resolution = TypeResolution::default();
        for id in document.statement_ids() {
            resolution.absorb(self.resolve_statement(document, id));
        }
        resolution
    }

    /// Resolves the root type, variable types, type conditions and
    /// directives of one statement, plus everything those types reach.
    pub fn resolve_statement(
        &mut self,
        document: &mut Document,
        id: StatementId,
    ) -> TypeResolution {
        let refs = StatementRefs::collect(document, id);
        tracing::trace!(
            statement = document.statement(id).name().unwrap_or("<anonymous>"),
            types = refs.type_names.len(),
            directives = refs.directive_names.len(),
            "resolving statement types",
        );

        if let Statement::Operation(op) = document.statement(id) {
            let root = op.kind.root_type_name();
            if self.resolve_type_name(root, op.span(), None).is_none() {
                self.resolution.errors.retain(|err| {
                    !matches!(err, TypeResolutionError::UnknownType { name, .. } if name == root)
                });
                self.resolution.errors.push(TypeResolutionError::MissingRootType {
                    kind: op.kind,
                    root: root.to_string(),
                    span: op.span().clone(),
                });
                self.abort("missing root type");
            }
        }
        for (name, span) in &refs.type_names {
            self.resolve_type_name(name, span, None);
        }
        for (name, span) in &refs.directive_names {
            self.resolve_directive(name, span);
        }
        self.drain_pending();

        patch_statement(self.cache, document, id);
        std::mem::take(&mut self.resolution)
    }

    /// Looks up (fetching if needed) a single type by name. Dependencies of
    /// a freshly fetched type are queued and resolved by the statement
    /// entry points, or right away when called directly.
    pub fn resolve_type(&mut self, name: &str) -> Option<TypeId> {
        let id = self.resolve_type_name(name, &GraphQLSourceSpan::builtin(), None);
        self.drain_pending();
        id
    }

    /// Takes the errors and abort state accumulated by direct
    /// [`resolve_type`](Self::resolve_type) calls.
    pub fn finish(mut self) -> TypeResolution {
        std::mem::take(&mut self.resolution)
    }

    fn resolve_type_name(
        &mut self,
        name: &str,
        span: &GraphQLSourceSpan,
        referenced_by: Option<&str>,
    ) -> Option<TypeId> {
        if let Some(id) = self.cache.id_of(name) {
            tracing::trace!(name, "type cache hit");
            return Some(id);
        }
        if self.missing.contains(name) {
            return None;
        }

        tracing::debug!(name, namespace = self.namespace, "fetching type definition");
        let text = match self.store.fetch_type_definition(self.namespace, name) {
            Ok(Some(text)) => text,
            Ok(None) => {
                self.missing.insert(name.to_string());
                self.resolution.errors.push(TypeResolutionError::UnknownType {
                    name: name.to_string(),
                    span: span.clone(),
                    referenced_by: referenced_by.map(str::to_string),
                });
                self.abort("unknown type");
                return None;
            },
            Err(source) => {
                self.missing.insert(name.to_string());
                self.resolution.errors.push(TypeResolutionError::Store {
                    name: name.to_string(),
                    span: span.clone(),
                    source,
                });
                self.abort("schema store error");
                return None;
            },
        };
        self.resolution.fetched += 1;

        let document = self.parse_definition(name, span, &text)?;
        if !document.type_definitions.iter().any(|def| def.name() == name) {
            self.missing.insert(name.to_string());
            self.resolution.errors.push(TypeResolutionError::DefinitionMismatch {
                name: name.to_string(),
                span: span.clone(),
            });
            self.abort("definition mismatch");
            return None;
        }
        self.absorb_definitions(document);
        self.cache.id_of(name)
    }

    fn resolve_directive(&mut self, name: &str, span: &GraphQLSourceSpan) {
        if self.cache.directive(name).is_some() || self.missing.contains(&format!("@{name}")) {
            return;
        }

        tracing::debug!(name, namespace = self.namespace, "fetching directive definition");
        let text = match self.store.fetch_directive_definition(self.namespace, name) {
            Ok(Some(text)) => text,
            Ok(None) => {
                self.missing.insert(format!("@{name}"));
                self.resolution.errors.push(TypeResolutionError::UnknownDirective {
                    name: name.to_string(),
                    span: span.clone(),
                });
                self.abort("unknown directive");
                return;
            },
            Err(source) => {
                self.missing.insert(format!("@{name}"));
                self.resolution.errors.push(TypeResolutionError::Store {
                    name: format!("@{name}"),
                    span: span.clone(),
                    source,
                });
                self.abort("schema store error");
                return;
            },
        };
        self.resolution.fetched += 1;

        let Some(document) = self.parse_definition(&format!("@{name}"), span, &text) else {
            return;
        };
        if !document.directive_definitions.iter().any(|def| def.name == name) {
            self.missing.insert(format!("@{name}"));
            self.resolution.errors.push(TypeResolutionError::DefinitionMismatch {
                name: format!("@{name}"),
                span: span.clone(),
            });
            self.abort("definition mismatch");
            return;
        }
        self.absorb_definitions(document);
    }

    fn parse_definition(
        &mut self,
        name: &str,
        span: &GraphQLSourceSpan,
        text: &str,
    ) -> Option<SchemaDocument> {
        match GraphQLParser::new(text).parse_schema_document().into_result() {
            Ok(document) => Some(document),
            Err(errors) => {
                self.missing.insert(name.to_string());
                self.resolution.errors.push(TypeResolutionError::InvalidDefinition {
                    name: name.to_string(),
                    span: span.clone(),
                    errors,
                });
                self.abort("invalid definition text");
                None
            },
        }
    }

    /// Inserts fetched definitions and queues their dependencies. Argument
    /// types of fetched directives are resolved immediately.
    fn absorb_definitions(&mut self, document: SchemaDocument) {
        for def in document.type_definitions {
            let (id, inserted) = self.cache.insert(def);
            if inserted {
                self.pending.push(id);
                self.unlinked.push(id);
            }
        }
        for def in document.directive_definitions {
            let arg_types: Vec<(String, GraphQLSourceSpan)> = def
                .arguments
                .values()
                .map(|arg| (arg.type_ref.name.clone(), arg.type_ref.span.clone()))
                .collect();
            let owner = format!("@{}", def.name);
            self.cache.insert_directive(def);
            for (type_name, type_span) in arg_types {
                self.resolve_type_name(&type_name, &type_span, Some(&owner));
            }
        }
    }

    fn drain_pending(&mut self) {
        while let Some(id) = self.pending.pop() {
            let owner = self.cache.get(id).name().to_string();
            let referenced: Vec<(String, GraphQLSourceSpan)> = self
                .cache
                .get(id)
                .referenced_type_names()
                .into_iter()
                .map(|(name, span)| (name.to_string(), span.clone()))
                .collect();
            for (name, span) in referenced {
                self.resolve_type_name(&name, &span, Some(&owner));
            }
            if let TypeDefinition::Interface(_) = self.cache.get(id) {
                self.resolve_implementors(&owner);
            }
        }
        // Linking waits until the queue is empty so that types inserted late
        // are visible to the ones inserted early.
        for id in std::mem::take(&mut self.unlinked) {
            self.cache.link(id);
        }
    }

    fn resolve_implementors(&mut self, interface: &str) {
        let span = self.cache.get_by_name(interface).map(|def| def.span().clone());
        let span = span.unwrap_or_else(GraphQLSourceSpan::builtin);
        match self.store.fetch_implementors(self.namespace, interface) {
            Ok(names) => {
                tracing::trace!(interface, implementors = names.len(), "fetched implementors");
                for name in names {
                    self.resolve_type_name(&name, &span, Some(interface));
                }
            },
            Err(source) => {
                self.resolution.errors.push(TypeResolutionError::Store {
                    name: interface.to_string(),
                    span,
                    source,
                });
                self.abort("schema store error");
            },
        }
    }

    fn abort(&mut self, reason: &str) {
        if !self.resolution.aborted {
            tracing::debug!(reason, "type resolution aborted");
        }
        self.resolution.aborted = true;
    }

    /// Resolves a statement against an already populated cache without
    /// touching any schema store. Names the cache lacks are errors.
    ///
    /// This only reads the cache, so many documents can be resolved
    /// concurrently against one shared cache.
    pub fn resolve_cached(
        cache: &TypeCache,
        document: &mut Document,
        id: StatementId,
    ) -> TypeResolution {
        let mut resolution = TypeResolution::default();
        if let Statement::Operation(op) = document.statement(id) {
            let root = op.kind.root_type_name();
            if !cache.contains(root) {
                resolution.errors.push(TypeResolutionError::MissingRootType {
                    kind: op.kind,
                    root: root.to_string(),
                    span: op.span().clone(),
                });
                resolution.aborted = true;
            }
        }

        let refs = StatementRefs::collect(document, id);
        let mut reported = HashSet::new();
        for (name, span) in refs.type_names {
            if !cache.contains(&name) && reported.insert(name.clone()) {
                resolution.errors.push(TypeResolutionError::UnknownType {
                    name,
                    span,
                    referenced_by: None,
                });
                resolution.aborted = true;
            }
        }
        for (name, span) in refs.directive_names {
            if cache.directive(&name).is_none() && reported.insert(format!("@{name}")) {
                resolution.errors.push(TypeResolutionError::UnknownDirective { name, span });
                resolution.aborted = true;
            }
        }

        patch_statement(cache, document, id);
        resolution
    }
}

/// Type and directive names one statement mentions directly.
struct StatementRefs {
    type_names: Vec<(String, GraphQLSourceSpan)>,
    directive_names: Vec<(String, GraphQLSourceSpan)>,
}

impl StatementRefs {
    fn collect(document: &Document, id: StatementId) -> Self {
        let mut refs = Self {
            type_names: vec![],
            directive_names: vec![],
        };
        let statement = document.statement(id);
        match statement {
            Statement::Operation(op) => {
                for var in &op.variables {
                    refs.type_names.push((var.type_ref.name.clone(), var.type_ref.span.clone()));
                }
            },
            Statement::Fragment(frag) => {
                refs.type_names.push((
                    frag.type_condition.name.clone(),
                    frag.type_condition.span.clone(),
                ));
            },
        }
        for directive in statement.directives() {
            refs.directive_names.push((directive.name.clone(), directive.span.clone()));
        }

        for sid in document.descendants(statement.selection_set()) {
            let selection = document.selection(sid);
            if let Selection::InlineFragment(inline) = selection
                && let Some(cond) = &inline.type_condition
            {
                refs.type_names.push((cond.name.clone(), cond.span.clone()));
            }
            for directive in selection.directives() {
                refs.directive_names.push((directive.name.clone(), directive.span.clone()));
            }
        }
        refs
    }
}

/// Writes cache ids into the resolved slots of a statement's variable types
/// and type conditions.
fn patch_statement(cache: &TypeCache, document: &mut Document, id: StatementId) {
    match document.statement_mut(id) {
        Statement::Operation(op) => {
            for var in &mut op.variables {
                var.type_ref.resolved = cache.id_of(&var.type_ref.name);
            }
        },
        Statement::Fragment(frag) => {
            frag.type_condition.resolved = cache.id_of(&frag.type_condition.name);
        },
    }

    let selection_ids = document.descendants(document.statement(id).selection_set());
    for sid in selection_ids {
        if let Selection::InlineFragment(inline) = document.selection_mut(sid)
            && let Some(cond) = &mut inline.type_condition
        {
            cond.resolved = cache.id_of(&cond.name);
        }
    }
}
