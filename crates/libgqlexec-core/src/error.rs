use crate::execution::ExecutionError;
use crate::resolution::TypeResolutionError;
use crate::schema::SchemaStoreError;
use crate::session::SessionError;
use crate::validation::ValidationError;
use libgqlexec_parser::GraphQLParseError;
use libgqlexec_parser::GraphQLSourceSpan;

/// Coarse classification shared by every error a session can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Syntax,
    UndefinedReference,
    TypeMismatch,
    DuplicateField,
    DirectiveLocation,
    Resolver,
    Aborted,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Syntax => "syntax error",
            ErrorCategory::UndefinedReference => "undefined reference",
            ErrorCategory::TypeMismatch => "type mismatch",
            ErrorCategory::DuplicateField => "duplicate field",
            ErrorCategory::DirectiveLocation => "directive location error",
            ErrorCategory::Resolver => "resolver error",
            ErrorCategory::Aborted => "aborted",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any error produced while preparing or executing an operation.
#[derive(Debug, thiserror::Error)]
pub enum GraphQLError {
    #[error(transparent)]
    Parse(#[from] GraphQLParseError),

    #[error(transparent)]
    TypeResolution(#[from] TypeResolutionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    SchemaStore(#[from] SchemaStoreError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl GraphQLError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GraphQLError::Parse(_) => ErrorCategory::Syntax,
            GraphQLError::TypeResolution(err) => err.category(),
            GraphQLError::Validation(err) => err.category(),
            GraphQLError::Execution(err) => err.category(),
            GraphQLError::SchemaStore(_) => ErrorCategory::UndefinedReference,
            GraphQLError::Session(err) => err.category(),
        }
    }

    /// Where in the request (or schema text) the error was detected, if it
    /// is tied to source at all.
    pub fn span(&self) -> Option<&GraphQLSourceSpan> {
        match self {
            GraphQLError::Parse(err) => Some(err.span()),
            GraphQLError::TypeResolution(err) => err.span(),
            GraphQLError::Validation(err) => err.span(),
            GraphQLError::Execution(err) => err.span(),
            GraphQLError::SchemaStore(_) | GraphQLError::Session(_) => None,
        }
    }

    /// `file:line:col: category: message`, or `category: message` for
    /// errors without a position.
    pub fn format_oneline(&self) -> String {
        match self {
            GraphQLError::Parse(err) => err.format_oneline(),
            other => match other.span() {
                Some(span) if *span != GraphQLSourceSpan::builtin() => format!(
                    "{}: {}: {other}",
                    span.location_display(),
                    other.category(),
                ),
                _ => format!("{}: {other}", other.category()),
            },
        }
    }
}
