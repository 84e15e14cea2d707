use serde::Deserialize;

/// Settings for a [`Session`](crate::Session).
///
/// Deserializable so hosts can keep it alongside the rest of their
/// configuration; every field is optional there.
///
/// ```
/// use libgqlexec_core::SessionConfig;
///
/// let config: SessionConfig = serde_json::from_str(r#"{ "max_errors": 3 }"#).unwrap();
/// assert_eq!(config, SessionConfig::builder().max_errors(3).build());
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Error ceiling for validation and for execution; reaching it aborts
    /// the stage.
    pub max_errors: usize,

    /// Schema store namespace types are fetched from.
    pub namespace: Option<String>,

    /// The operation to run when a document defines several.
    pub operation_name: Option<String>,
}

impl SessionConfig {
    pub const DEFAULT_MAX_ERRORS: usize = 10;

    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::new()
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_errors: Self::DEFAULT_MAX_ERRORS,
            namespace: None,
            operation_name: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_errors(mut self, max_errors: usize) -> Self {
        self.config.max_errors = max_errors.max(1);
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = Some(namespace.into());
        self
    }

    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.config.operation_name = Some(name.into());
        self
    }

    pub fn build(self) -> SessionConfig {
        self.config
    }
}
