/// `/`-joined chain of type and field names from an operation's root type
/// to one field, e.g. `Query/allPersons/posts`.
///
/// Selections under a type-conditioned inline fragment get the condition's
/// type name spliced in (`Query/hero/Droid/primaryFunction`), which keeps
/// fields selected per concrete type apart. Resolvers are registered under
/// these paths.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResponsePath(String);

impl ResponsePath {
    pub fn root(type_name: &str) -> Self {
        Self(type_name.to_string())
    }

    pub fn field(&self, name: &str) -> Self {
        Self(format!("{}/{name}", self.0))
    }

    pub fn type_condition(&self, type_name: &str) -> Self {
        Self(format!("{}/{type_name}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// The last segment: the field (or type) this path ends at.
    pub fn leaf(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for ResponsePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResponsePath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for ResponsePath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl AsRef<str> for ResponsePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for ResponsePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}
