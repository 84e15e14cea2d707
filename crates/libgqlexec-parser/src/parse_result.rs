//! Result type for parsing operations that may produce partial results.

use crate::GraphQLParseError;

/// The result of a parse.
///
/// Unlike `Result<T, E>`, a `ParseResult` can carry both a (recovered) AST
/// and the errors encountered while producing it, so that one pass reports
/// every syntax error in a document.
///
/// ```
/// # use libgqlexec_parser::GraphQLParser;
/// let result = GraphQLParser::new("{ hero { name } }").parse_executable_document();
/// assert!(result.valid_ast().is_some());
///
/// let result = GraphQLParser::new("{ hero { name }").parse_executable_document();
/// assert!(result.valid_ast().is_none());
/// assert!(result.has_errors());
/// ```
#[derive(Debug)]
pub struct ParseResult<TAst> {
    ast: Option<TAst>,
    pub errors: Vec<GraphQLParseError>,
}

impl<TAst> ParseResult<TAst> {
    pub(crate) fn ok(ast: TAst) -> Self {
        Self {
            ast: Some(ast),
            errors: Vec::new(),
        }
    }

    pub(crate) fn err(errors: Vec<GraphQLParseError>) -> Self {
        Self { ast: None, errors }
    }

    pub(crate) fn recovered(ast: TAst, errors: Vec<GraphQLParseError>) -> Self {
        Self {
            ast: Some(ast),
            errors,
        }
    }

    pub(crate) fn from_parts(ast: TAst, errors: Vec<GraphQLParseError>) -> Self {
        if errors.is_empty() {
            Self::ok(ast)
        } else {
            Self::recovered(ast, errors)
        }
    }

    /// Returns the AST only if parsing produced no errors.
    pub fn valid_ast(&self) -> Option<&TAst> {
        if self.errors.is_empty() {
            self.ast.as_ref()
        } else {
            None
        }
    }

    /// Returns the AST if present, whether or not errors occurred.
    pub fn ast(&self) -> Option<&TAst> {
        self.ast.as_ref()
    }

    pub fn into_valid_ast(self) -> Option<TAst> {
        if self.errors.is_empty() {
            self.ast
        } else {
            None
        }
    }

    pub fn into_ast(self) -> Option<TAst> {
        self.ast
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_ok(&self) -> bool {
        self.ast.is_some() && self.errors.is_empty()
    }

    /// Converts into a standard `Result`, keeping the AST only when no errors
    /// were recorded.
    pub fn into_result(self) -> Result<TAst, Vec<GraphQLParseError>> {
        match self.ast {
            Some(ast) if self.errors.is_empty() => Ok(ast),
            _ => Err(self.errors),
        }
    }
}
