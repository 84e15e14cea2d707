use crate::schema::builtins;
use indexmap::IndexMap;
use libgqlexec_parser::ast::DirectiveDefinition;
use libgqlexec_parser::ast::SchemaDocument;
use libgqlexec_parser::ast::TypeDefinition;
use libgqlexec_parser::ast::TypeId;
use libgqlexec_parser::ast::TypeRef;

/// Arena of resolved type definitions, indexed by name.
///
/// A cache is written while types are resolved and only read afterwards, so
/// a populated cache can be shared by reference between threads validating
/// and executing independent operations.
///
/// Definitions are never replaced: inserting a name that is already present
/// keeps the first definition and hands back its id. This is what lets the
/// type resolver insert a type before its dependencies are known without
/// looping on mutually referencing types.
#[derive(Clone, Debug)]
pub struct TypeCache {
    types: Vec<TypeDefinition>,
    type_index: IndexMap<String, TypeId>,
    directives: IndexMap<String, DirectiveDefinition>,
}

impl TypeCache {
    /// A cache holding only the built-in scalars and directives.
    pub fn new() -> Self {
        let mut cache = Self {
            types: vec![],
            type_index: IndexMap::new(),
            directives: IndexMap::new(),
        };
        for def in builtins::builtin_scalar_definitions() {
            cache.insert(def);
        }
        for def in builtins::builtin_directive_definitions() {
            cache.directives.insert(def.name.clone(), def);
        }
        cache
    }

    /// Number of cached types, built-in scalars included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.type_index.contains_key(name)
    }

    pub fn id_of(&self, name: &str) -> Option<TypeId> {
        self.type_index.get(name).copied()
    }

    /// The definition behind an id handed out by this cache.
    pub fn get(&self, id: TypeId) -> &TypeDefinition {
        &self.types[id.index()]
    }

    pub(crate) fn get_mut(&mut self, id: TypeId) -> &mut TypeDefinition {
        &mut self.types[id.index()]
    }

    pub fn get_by_name(&self, name: &str) -> Option<&TypeDefinition> {
        self.id_of(name).map(|id| self.get(id))
    }

    /// The definition a type reference points at: its resolved slot when
    /// that was filled in by this cache, its name otherwise.
    pub fn lookup(&self, type_ref: &TypeRef) -> Option<&TypeDefinition> {
        if let Some(id) = type_ref.resolved
            && let Some(def) = self.types.get(id.index())
            && def.name() == type_ref.name
        {
            return Some(def);
        }
        self.get_by_name(&type_ref.name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.type_index.keys().map(String::as_str)
    }

    /// Adds a definition unless one with the same name is already cached.
    ///
    /// Returns the id the name maps to and whether this call inserted it.
    pub fn insert(&mut self, def: TypeDefinition) -> (TypeId, bool) {
        if let Some(id) = self.id_of(def.name()) {
            return (id, false);
        }
        let id = TypeId::new(self.types.len());
        self.type_index.insert(def.name().to_string(), id);
        self.types.push(def);
        (id, true)
    }

    /// Adds a directive definition. Built-in directives cannot be replaced;
    /// returns `false` when the name was already taken.
    pub fn insert_directive(&mut self, def: DirectiveDefinition) -> bool {
        if self.directives.contains_key(&def.name) {
            return false;
        }
        self.directives.insert(def.name.clone(), def);
        true
    }

    /// Adds every definition of a schema document, then links the type
    /// references of the newly added types to whatever the cache now holds.
    ///
    /// Returns the ids of the types that were actually inserted.
    pub fn insert_definitions(&mut self, document: SchemaDocument) -> Vec<TypeId> {
        let mut inserted = vec![];
        for def in document.type_definitions {
            let (id, is_new) = self.insert(def);
            if is_new {
                inserted.push(id);
            }
        }
        for def in document.directive_definitions {
            self.insert_directive(def);
        }
        for id in &inserted {
            self.link(*id);
        }
        inserted
    }

    /// Fills the resolved slot of every type reference owned by `id` whose
    /// named type is cached. Returns the names that are still missing.
    pub(crate) fn link(&mut self, id: TypeId) -> Vec<String> {
        let names: Vec<String> = self
            .get_mut(id)
            .type_refs_mut()
            .into_iter()
            .map(|type_ref| type_ref.name.clone())
            .collect();
        let ids: Vec<Option<TypeId>> = names.iter().map(|name| self.id_of(name)).collect();
        let missing = names
            .iter()
            .zip(&ids)
            .filter(|(_, id)| id.is_none())
            .map(|(name, _)| name.clone())
            .collect();
        for (type_ref, resolved) in self.get_mut(id).type_refs_mut().into_iter().zip(ids) {
            type_ref.resolved = resolved;
        }
        missing
    }

    pub fn directive(&self, name: &str) -> Option<&DirectiveDefinition> {
        self.directives.get(name)
    }

    pub fn directive_names(&self) -> impl Iterator<Item = &str> {
        self.directives.keys().map(String::as_str)
    }

    /// Object types a value of the named type can be at runtime: the type
    /// itself for an object, the cached implementors of an interface, the
    /// members of a union. Empty for non-composite or unknown names.
    pub fn possible_types(&self, name: &str) -> Vec<&str> {
        match self.get_by_name(name) {
            Some(TypeDefinition::Object(def)) => vec![def.name.as_str()],
            Some(TypeDefinition::Interface(_)) => self
                .types
                .iter()
                .filter_map(|def| match def {
                    TypeDefinition::Object(obj) if obj.implements_interface(name) => {
                        Some(obj.name.as_str())
                    },
                    _ => None,
                })
                .collect(),
            Some(TypeDefinition::Union(def)) => {
                def.members.iter().map(|(member, _)| member.as_str()).collect()
            },
            _ => vec![],
        }
    }

    /// Whether `type_name` declares `implements interface_name`.
    pub fn implements(&self, type_name: &str, interface_name: &str) -> bool {
        match self.get_by_name(type_name) {
            Some(TypeDefinition::Object(def) | TypeDefinition::Interface(def)) => {
                def.implements_interface(interface_name)
            },
            _ => false,
        }
    }

    /// Whether a selection typed `condition` can ever apply to a value whose
    /// static type is `parent`: the two are the same type, one implements the
    /// other, or their possible runtime types overlap.
    pub fn is_compatible(&self, parent: &str, condition: &str) -> bool {
        if parent == condition
            || self.implements(parent, condition)
            || self.implements(condition, parent)
        {
            return true;
        }
        let parent_possible = self.possible_types(parent);
        self.possible_types(condition)
            .iter()
            .any(|name| parent_possible.contains(name))
    }

    /// Whether the object type `object_name` is one of the runtime types of
    /// the (possibly abstract) type `type_name`.
    pub fn is_possible_type(&self, type_name: &str, object_name: &str) -> bool {
        type_name == object_name || self.possible_types(type_name).contains(&object_name)
    }
}

impl Default for TypeCache {
    fn default() -> Self {
        Self::new()
    }
}
