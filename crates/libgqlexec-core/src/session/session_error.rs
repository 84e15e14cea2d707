use crate::ErrorCategory;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error(
        "document defines {} operations ({}); select one by name",
        .names.len(),
        .names.join(", "),
    )]
    AmbiguousOperation { names: Vec<String> },

    #[error("document defines no operations")]
    NoOperations,

    #[error("no operation named `{name}` in document")]
    OperationNotFound { name: String },
}

impl SessionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SessionError::NoOperations => ErrorCategory::Syntax,
            SessionError::AmbiguousOperation { .. } | SessionError::OperationNotFound { .. } => {
                ErrorCategory::UndefinedReference
            },
        }
    }
}
