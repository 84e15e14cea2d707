use crate::schema::SchemaStoreError;
use std::sync::Arc;

/// Source of schema definition text, looked up one name at a time.
///
/// Type definitions are keyed by type name, directive definitions by `@`
/// followed by the directive name. Stores are only ever read, so an
/// implementation shared between sessions must be `Sync`.
pub trait SchemaStore: Send + Sync {
    /// The SDL text defining `name`, or `None` if the store has no such
    /// definition. A namespace narrows the lookup; how a store treats names
    /// missing from a namespace is up to the store.
    fn fetch_type_definition(
        &self,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Option<String>, SchemaStoreError>;

    fn fetch_directive_definition(
        &self,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Option<String>, SchemaStoreError> {
        self.fetch_type_definition(namespace, &directive_key(name))
    }

    /// Names of the object types that declare `implements interface`.
    /// Without them a lazily filled cache cannot tell which object type an
    /// interface value is. Stores without such an index return none.
    fn fetch_implementors(
        &self,
        _namespace: Option<&str>,
        _interface: &str,
    ) -> Result<Vec<String>, SchemaStoreError> {
        Ok(vec![])
    }
}

/// The key a directive definition is stored under.
pub(crate) fn directive_key(name: &str) -> String {
    format!("@{name}")
}

impl<T: SchemaStore + ?Sized> SchemaStore for &T {
    fn fetch_type_definition(
        &self,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Option<String>, SchemaStoreError> {
        (**self).fetch_type_definition(namespace, name)
    }

    fn fetch_implementors(
        &self,
        namespace: Option<&str>,
        interface: &str,
    ) -> Result<Vec<String>, SchemaStoreError> {
        (**self).fetch_implementors(namespace, interface)
    }
}

impl<T: SchemaStore + ?Sized> SchemaStore for Box<T> {
    fn fetch_type_definition(
        &self,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Option<String>, SchemaStoreError> {
        (**self).fetch_type_definition(namespace, name)
    }

    fn fetch_implementors(
        &self,
        namespace: Option<&str>,
        interface: &str,
    ) -> Result<Vec<String>, SchemaStoreError> {
        (**self).fetch_implementors(namespace, interface)
    }
}

impl<T: SchemaStore + ?Sized> SchemaStore for Arc<T> {
    fn fetch_type_definition(
        &self,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Option<String>, SchemaStoreError> {
        (**self).fetch_type_definition(namespace, name)
    }

    fn fetch_implementors(
        &self,
        namespace: Option<&str>,
        interface: &str,
    ) -> Result<Vec<String>, SchemaStoreError> {
        (**self).fetch_implementors(namespace, interface)
    }
}
