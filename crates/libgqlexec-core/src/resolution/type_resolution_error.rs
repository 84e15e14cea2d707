use crate::schema::SchemaStoreError;
use crate::ErrorCategory;
use libgqlexec_parser::ast::OperationKind;
use libgqlexec_parser::GraphQLParseError;
use libgqlexec_parser::GraphQLSourceSpan;

#[derive(Debug, thiserror::Error)]
pub enum TypeResolutionError {
    #[error("definition of `{name}` could not be parsed: {}", first_message(.errors))]
    InvalidDefinition {
        name: String,
        span: GraphQLSourceSpan,
        errors: Vec<GraphQLParseError>,
    },

    #[error("schema store returned text for `{name}` that does not define it")]
    DefinitionMismatch {
        name: String,
        span: GraphQLSourceSpan,
    },

    #[error("schema has no `{root}` type to run a {kind} against")]
    MissingRootType {
        kind: OperationKind,
        root: String,
        span: GraphQLSourceSpan,
    },

    #[error("schema store failed while fetching `{name}`: {source}")]
    Store {
        name: String,
        span: GraphQLSourceSpan,
        #[source]
        source: SchemaStoreError,
    },

    #[error("unknown directive `@{name}`")]
    UnknownDirective {
        name: String,
        span: GraphQLSourceSpan,
    },

    #[error("unknown type `{name}`{}", referenced_by_suffix(.referenced_by))]
    UnknownType {
        name: String,
        span: GraphQLSourceSpan,
        referenced_by: Option<String>,
    },
}

impl TypeResolutionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TypeResolutionError::InvalidDefinition { .. } => ErrorCategory::Syntax,
            TypeResolutionError::DefinitionMismatch { .. }
            | TypeResolutionError::MissingRootType { .. }
            | TypeResolutionError::Store { .. }
            | TypeResolutionError::UnknownDirective { .. }
            | TypeResolutionError::UnknownType { .. } => ErrorCategory::UndefinedReference,
        }
    }

    pub fn span(&self) -> Option<&GraphQLSourceSpan> {
        match self {
            TypeResolutionError::InvalidDefinition { span, .. }
            | TypeResolutionError::DefinitionMismatch { span, .. }
            | TypeResolutionError::MissingRootType { span, .. }
            | TypeResolutionError::Store { span, .. }
            | TypeResolutionError::UnknownDirective { span, .. }
            | TypeResolutionError::UnknownType { span, .. } => Some(span),
        }
    }
}

fn first_message(errors: &[GraphQLParseError]) -> String {
    match errors.first() {
        Some(err) if errors.len() > 1 => {
            format!("{} (and {} more)", err.message(), errors.len() - 1)
        },
        Some(err) => err.message().to_string(),
        None => "no details".to_string(),
    }
}

fn referenced_by_suffix(referenced_by: &Option<String>) -> String {
    match referenced_by {
        Some(owner) => format!(" (referenced by `{owner}`)"),
        None => String::new(),
    }
}
