//! Tokenizer and error-recovering parser for GraphQL executable documents,
//! schema definition fragments and standalone value text.
//!
//! The parser is generic over its [`token_source`], buffers lookahead in a
//! [`GraphQLTokenStream`] and reports every independent problem it finds in
//! one pass through [`ParseResult`].
//!
//! ```
//! use libgqlexec_parser::GraphQLParser;
//!
//! let result = GraphQLParser::new("query($last: Int) { allPersons(last: $last) { name } }")
//!     .parse_executable_document();
//! assert!(result.is_ok());
//! println!("{}", result.valid_ast().unwrap());
//! ```

pub mod ast;
mod graphql_error_note;
mod graphql_error_note_kind;
mod graphql_parse_error;
mod graphql_parse_error_kind;
mod graphql_parser;
mod graphql_source_span;
mod graphql_string_parsing_error;
mod graphql_token_stream;
mod parse_result;
mod source_position;
pub mod token;
pub mod token_source;

pub use graphql_error_note::GraphQLErrorNote;
pub use graphql_error_note::GraphQLErrorNotes;
pub use graphql_error_note_kind::GraphQLErrorNoteKind;
pub use graphql_parse_error::GraphQLParseError;
pub use graphql_parse_error_kind::GraphQLParseErrorKind;
pub use graphql_parser::GraphQLParser;
pub use graphql_source_span::GraphQLSourceSpan;
pub use graphql_string_parsing_error::GraphQLStringParsingError;
pub use graphql_token_stream::GraphQLTokenStream;
pub use parse_result::ParseResult;
pub use smallvec::smallvec;
pub use smallvec::SmallVec;
pub use source_position::SourcePosition;

/// Parses text returned by a resolver as a single value.
///
/// Shorthand for `GraphQLParser::new(text).parse_value_text()`.
pub fn parse_value_text(text: &str) -> ParseResult<ast::InputValue> {
    GraphQLParser::new(text).parse_value_text()
}

#[cfg(test)]
mod tests;
