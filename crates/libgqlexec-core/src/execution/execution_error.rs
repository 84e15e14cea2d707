use crate::ErrorCategory;
use libgqlexec_parser::GraphQLParseError;
use libgqlexec_parser::GraphQLSourceSpan;

#[derive(Clone, Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("execution cancelled at `{path}`")]
    Cancelled {
        path: String,
        span: GraphQLSourceSpan,
    },

    #[error("resolver for `{path}` returned no data")]
    EmptyResolverOutput {
        path: String,
        span: GraphQLSourceSpan,
    },

    #[error("`{value}` at `{path}` is not a value of enum `{enum_name}`")]
    InvalidEnumValue {
        path: String,
        enum_name: String,
        value: String,
        span: GraphQLSourceSpan,
    },

    #[error(
        "list depth mismatch at `{path}`: `{type_name}` expects {expected} level(s), found {found}"
    )]
    ListDepthMismatch {
        path: String,
        type_name: String,
        expected: u8,
        found: u8,
        span: GraphQLSourceSpan,
    },

    #[error("no data for `{path}`: no resolver is registered and there is no enclosing value")]
    MissingData {
        path: String,
        span: GraphQLSourceSpan,
    },

    #[error("null at `{path}` for non-null type `{expected}`")]
    NonNullViolation {
        path: String,
        expected: String,
        span: GraphQLSourceSpan,
    },

    #[error("resolver for `{path}` failed: {message}")]
    ResolverFailed {
        path: String,
        message: String,
        span: GraphQLSourceSpan,
    },

    #[error("too many errors (limit {limit}); execution aborted")]
    TooManyErrors { limit: usize },

    #[error("expected `{expected}` at `{path}`, found {found}")]
    TypeMismatch {
        path: String,
        expected: String,
        found: String,
        span: GraphQLSourceSpan,
    },

    #[error("unknown type `{name}` at `{path}`")]
    UnknownType {
        path: String,
        name: String,
        span: GraphQLSourceSpan,
    },

    #[error(
        "cannot tell which `{type_name}` the value at `{path}` is: it has no `__typename` naming one of its object types"
    )]
    UnresolvedAbstractType {
        path: String,
        type_name: String,
        span: GraphQLSourceSpan,
    },

    #[error(
        "resolver for `{path}` returned unparseable data: {}",
        .errors.iter().map(|err| err.message()).collect::<Vec<_>>().join("; "),
    )]
    UnparseableResolverOutput {
        path: String,
        errors: Vec<GraphQLParseError>,
        span: GraphQLSourceSpan,
    },
}

impl ExecutionError {
    pub fn category(&self) -> ErrorCategory {
        use ExecutionError::*;
        match self {
            Cancelled { .. } | TooManyErrors { .. } => ErrorCategory::Aborted,
            EmptyResolverOutput { .. }
            | MissingData { .. }
            | ResolverFailed { .. }
            | UnparseableResolverOutput { .. } => ErrorCategory::Resolver,
            UnknownType { .. } => ErrorCategory::UndefinedReference,
            InvalidEnumValue { .. }
            | ListDepthMismatch { .. }
            | NonNullViolation { .. }
            | TypeMismatch { .. }
            | UnresolvedAbstractType { .. } => ErrorCategory::TypeMismatch,
        }
    }

    /// The selection the error was raised for.
    pub fn span(&self) -> Option<&GraphQLSourceSpan> {
        use ExecutionError::*;
        match self {
            TooManyErrors { .. } => None,
            Cancelled { span, .. }
            | EmptyResolverOutput { span, .. }
            | InvalidEnumValue { span, .. }
            | ListDepthMismatch { span, .. }
            | MissingData { span, .. }
            | NonNullViolation { span, .. }
            | ResolverFailed { span, .. }
            | TypeMismatch { span, .. }
            | UnknownType { span, .. }
            | UnresolvedAbstractType { span, .. }
            | UnparseableResolverOutput { span, .. } => Some(span),
        }
    }

    /// Response path of the field the error was raised for.
    pub fn path(&self) -> Option<&str> {
        use ExecutionError::*;
        match self {
            TooManyErrors { .. } => None,
            Cancelled { path, .. }
            | EmptyResolverOutput { path, .. }
            | InvalidEnumValue { path, .. }
            | ListDepthMismatch { path, .. }
            | MissingData { path, .. }
            | NonNullViolation { path, .. }
            | ResolverFailed { path, .. }
            | TypeMismatch { path, .. }
            | UnknownType { path, .. }
            | UnresolvedAbstractType { path, .. }
            | UnparseableResolverOutput { path, .. } => Some(path),
        }
    }
}
