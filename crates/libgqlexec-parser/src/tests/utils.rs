//! Helpers shared by the parser tests.

use crate::ast::Document;
use crate::ast::Field;
use crate::ast::OperationDefinition;
use crate::ast::SchemaDocument;
use crate::ast::Selection;
use crate::ast::SelectionSet;
use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;
use crate::GraphQLParseError;
use crate::GraphQLParser;
use crate::GraphQLSourceSpan;
use crate::ParseResult;
use crate::SourcePosition;

pub fn parse_executable(source: &str) -> ParseResult<Document> {
    GraphQLParser::new(source).parse_executable_document()
}

pub fn parse_schema(source: &str) -> ParseResult<SchemaDocument> {
    GraphQLParser::new(source).parse_schema_document()
}

/// Parses `source`, panicking with the rendered errors if there are any.
pub fn parse_valid(source: &str) -> Document {
    let result = parse_executable(source);
    if result.has_errors() {
        let rendered: Vec<String> = result
            .errors
            .iter()
            .map(|e| e.format_detailed(Some(source)))
            .collect();
        panic!("unexpected parse errors:\n{}", rendered.join("\n"));
    }
    result.into_valid_ast().unwrap()
}

pub fn parse_errors(source: &str) -> Vec<GraphQLParseError> {
    let result = parse_executable(source);
    assert!(result.has_errors(), "expected errors parsing `{source}`");
    result.errors
}

pub fn first_operation(doc: &Document) -> &OperationDefinition {
    doc.operations()
        .next()
        .map(|(_, op)| op)
        .expect("document has no operation")
}

/// The field at `index` of `set`, panicking if it is some other selection.
pub fn field_at<'a>(doc: &'a Document, set: &SelectionSet, index: usize) -> &'a Field {
    match doc.selection(set.items[index]) {
        Selection::Field(field) => field,
        other => panic!("expected a field, got {other:?}"),
    }
}

pub fn mock_token(kind: GraphQLTokenKind<'static>) -> GraphQLToken<'static> {
    let pos = SourcePosition::new(0, 0, 0, 0);
    GraphQLToken::new(kind, GraphQLSourceSpan::new(pos, pos))
}

pub fn mock_name_token(name: &str) -> GraphQLToken<'static> {
    mock_token(GraphQLTokenKind::name_owned(name.to_string()))
}

/// A token source that replays a fixed list of tokens.
pub struct MockTokenSource {
    tokens: std::vec::IntoIter<GraphQLToken<'static>>,
}

impl MockTokenSource {
    pub fn new(tokens: Vec<GraphQLToken<'static>>) -> Self {
        Self {
            tokens: tokens.into_iter(),
        }
    }
}

impl Iterator for MockTokenSource {
    type Item = GraphQLToken<'static>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.next()
    }
}
