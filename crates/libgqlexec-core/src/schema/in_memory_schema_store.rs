use crate::schema::schema_store::directive_key;
use crate::schema::SchemaStore;
use crate::schema::SchemaStoreError;
use indexmap::IndexMap;
use libgqlexec_parser::ast::TypeDefinition;
use libgqlexec_parser::token_source::StrGraphQLTokenSource;
use libgqlexec_parser::GraphQLParser;
use std::path::PathBuf;
use std::sync::Arc;

/// A [`SchemaStore`] holding definition text in memory.
///
/// Definitions added without a namespace are global. A lookup within a
/// namespace falls back to the global definitions when the namespace does
/// not define the name itself.
///
/// Object types added through SDL are also indexed by the interfaces they
/// implement. Text stored with [`insert`](Self::insert) is not indexed.
///
/// ```
/// use libgqlexec_core::schema::InMemorySchemaStore;
/// use libgqlexec_core::schema::SchemaStore;
///
/// let store = InMemorySchemaStore::from_sdl(
///     "type Query { me: User } type User { name: String }",
/// ).unwrap();
/// assert_eq!(
///     store.fetch_type_definition(None, "User").unwrap().as_deref(),
///     Some("type User { name: String }"),
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemorySchemaStore {
    namespaces: IndexMap<Option<String>, IndexMap<String, String>>,
    implementors: IndexMap<Option<String>, IndexMap<String, Vec<String>>>,
}

impl InMemorySchemaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits a whole SDL document into one global entry per definition.
    pub fn from_sdl(sdl: &str) -> Result<Self, SchemaStoreError> {
        let mut store = Self::new();
        store.add_sdl(None, sdl)?;
        Ok(store)
    }

    /// Adds every definition in `sdl` under `namespace`, storing each
    /// definition's own source text. Returns how many were added.
    pub fn add_sdl(
        &mut self,
        namespace: Option<&str>,
        sdl: &str,
    ) -> Result<usize, SchemaStoreError> {
        self.add_parsed_sdl(namespace, sdl, GraphQLParser::new(sdl), None)
    }

    pub(crate) fn add_sdl_file(
        &mut self,
        namespace: Option<&str>,
        sdl: &str,
        file_path: PathBuf,
    ) -> Result<usize, SchemaStoreError> {
        let parser = GraphQLParser::with_file_path(sdl, Arc::new(file_path.clone()));
        self.add_parsed_sdl(namespace, sdl, parser, Some(file_path))
    }

    fn add_parsed_sdl<'src>(
        &mut self,
        namespace: Option<&str>,
        sdl: &'src str,
        parser: GraphQLParser<'src, StrGraphQLTokenSource<'src>>,
        file_path: Option<PathBuf>,
    ) -> Result<usize, SchemaStoreError> {
        let document = parser
            .parse_schema_document()
            .into_result()
            .map_err(|errors| SchemaStoreError::InvalidSchemaText { file_path, errors })?;

        let mut entries = vec![];
        let mut implementations = vec![];
        for def in &document.type_definitions {
            entries.push((def.name().to_string(), def.span().clone()));
            if let TypeDefinition::Object(obj) = def {
                for (interface, _) in &obj.implements {
                    implementations.push((interface.clone(), obj.name.clone()));
                }
            }
        }
        for def in &document.directive_definitions {
            entries.push((directive_key(&def.name), def.span().clone()));
        }

        let mut added = 0;
        for (name, span) in entries {
            let Some(text) = span.source_slice(sdl) else {
                tracing::warn!(name, "definition span is out of bounds of its source");
                continue;
            };
            if self.contains(namespace, &name) {
                return Err(SchemaStoreError::DuplicateDefinition {
                    namespace: namespace.map(str::to_string),
                    name,
                });
            }
            self.insert(namespace, name, text.to_string());
            added += 1;
        }
        let index = self.implementors.entry(namespace.map(str::to_string)).or_default();
        for (interface, object) in implementations {
            index.entry(interface).or_default().push(object);
        }
        Ok(added)
    }

    /// Stores `text` as the definition of `name`, replacing (and returning)
    /// any previous definition in the same namespace.
    pub fn insert(
        &mut self,
        namespace: Option<&str>,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Option<String> {
        self.namespaces
            .entry(namespace.map(str::to_string))
            .or_default()
            .insert(name.into(), text.into())
    }

    /// Whether `namespace` itself (without fallback) defines `name`.
    pub fn contains(&self, namespace: Option<&str>, name: &str) -> bool {
        self.namespaces
            .get(&namespace.map(str::to_string))
            .is_some_and(|defs| defs.contains_key(name))
    }

    /// Named namespaces, in the order they were first populated.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().filter_map(|ns| ns.as_deref())
    }

    /// Total number of stored definitions across all namespaces.
    pub fn len(&self) -> usize {
        self.namespaces.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SchemaStore for InMemorySchemaStore {
    fn fetch_type_definition(
        &self,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Option<String>, SchemaStoreError> {
        let scoped = namespace.and_then(|ns| {
            self.namespaces
                .get(&Some(ns.to_string()))
                .and_then(|defs| defs.get(name))
        });
        let found = scoped.or_else(|| {
            self.namespaces
                .get(&None)
                .and_then(|defs| defs.get(name))
        });
        Ok(found.cloned())
    }

    fn fetch_implementors(
        &self,
        namespace: Option<&str>,
        interface: &str,
    ) -> Result<Vec<String>, SchemaStoreError> {
        let scoped = namespace.and_then(|ns| {
            self.implementors
                .get(&Some(ns.to_string()))
                .and_then(|index| index.get(interface))
        });
        let global = self.implementors.get(&None).and_then(|index| index.get(interface));

        let mut names: Vec<String> = vec![];
        for name in scoped.into_iter().chain(global).flatten() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        Ok(names)
    }
}
