use crate::ReadContentError;
use libgqlexec_parser::GraphQLParseError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SchemaStoreError {
    #[error("`{name}` is defined more than once{}", namespace_suffix(.namespace))]
    DuplicateDefinition {
        namespace: Option<String>,
        name: String,
    },

    #[error("schema text could not be parsed:\n{}", format_parse_errors(.errors))]
    InvalidSchemaText {
        file_path: Option<PathBuf>,
        errors: Vec<GraphQLParseError>,
    },

    #[error(transparent)]
    Read(#[from] ReadContentError),

    #[error("schema store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to scan schema directory {}: {err}", .root.display())]
    Walk {
        root: PathBuf,
        err: walkdir::Error,
    },
}

fn namespace_suffix(namespace: &Option<String>) -> String {
    match namespace {
        Some(ns) => format!(" in namespace `{ns}`"),
        None => String::new(),
    }
}

fn format_parse_errors(errors: &[GraphQLParseError]) -> String {
    errors
        .iter()
        .map(|err| format!("  {}", err.format_oneline()))
        .collect::<Vec<_>>()
        .join("\n")
}
