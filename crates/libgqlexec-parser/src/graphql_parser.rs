//! Recursive descent parser for GraphQL executable documents, schema
//! definitions and standalone value text.
//!
//! # Architecture
//!
//! Most grammar rules have a `parse_*` method returning `Result<T, ()>`.
//! `Err(())` means an error has already been recorded and the caller should
//! attempt recovery. Errors accumulate in the parser so that one pass reports
//! every independent problem in a document.
//!
//! Lexer error tokens never reach the grammar rules: [`GraphQLParser::peek`]
//! turns them into parse errors as it encounters them. An error the lexer
//! marks as fatal (an unterminated string) aborts the parse outright, because
//! the token stream cannot be resynchronized after it.
//!
//! Selections are pushed into the [`Document`]'s arena as they are parsed. A
//! field is pushed before its children so that each child can record its
//! parent's id; the field's selection set is patched in afterwards.

use crate::ast::Argument;
use crate::ast::Directive;
use crate::ast::DirectiveDefinition;
use crate::ast::DirectiveLocation;
use crate::ast::Document;
use crate::ast::EnumTypeDefinition;
use crate::ast::Field;
use crate::ast::FieldDefinition;
use crate::ast::FragmentDefinition;
use crate::ast::FragmentSpread;
use crate::ast::InlineFragment;
use crate::ast::InputObjectTypeDefinition;
use crate::ast::InputValue;
use crate::ast::InputValueDefinition;
use crate::ast::ObjectOrInterfaceTypeDefinition;
use crate::ast::OperationDefinition;
use crate::ast::OperationKind;
use crate::ast::ScalarTypeDefinition;
use crate::ast::SchemaDocument;
use crate::ast::Selection;
use crate::ast::SelectionId;
use crate::ast::SelectionSet;
use crate::ast::Statement;
use crate::ast::TypeCondition;
use crate::ast::TypeDefinition;
use crate::ast::TypeRef;
use crate::ast::UnionTypeDefinition;
use crate::ast::VariableDefinition;
use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;
use crate::token_source::GraphQLTokenSource;
use crate::token_source::StrGraphQLTokenSource;
use crate::GraphQLParseError;
use crate::GraphQLParseErrorKind;
use crate::GraphQLSourceSpan;
use crate::GraphQLTokenStream;
use crate::ParseResult;
use crate::SourcePosition;
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;

// =============================================================================
// Delimiter tracking for error recovery
// =============================================================================

/// Context in which a delimiter was opened, for error messages.
#[derive(Debug, Clone, Copy)]
enum DelimiterContext {
    SelectionSet,
    FieldArguments,
    DirectiveArguments,
    VariableDefinitions,
    ListType,
    ListValue,
    ObjectValue,
    ObjectTypeDefinition,
    InterfaceDefinition,
    EnumDefinition,
    InputObjectDefinition,
    ArgumentDefinitions,
}

impl DelimiterContext {
    fn description(&self) -> &'static str {
        match self {
            DelimiterContext::SelectionSet => "selection set",
            DelimiterContext::FieldArguments => "field arguments",
            DelimiterContext::DirectiveArguments => "directive arguments",
            DelimiterContext::VariableDefinitions => "variable definitions",
            DelimiterContext::ListType => "list type",
            DelimiterContext::ListValue => "list value",
            DelimiterContext::ObjectValue => "object value",
            DelimiterContext::ObjectTypeDefinition => "object type definition",
            DelimiterContext::InterfaceDefinition => "interface definition",
            DelimiterContext::EnumDefinition => "enum definition",
            DelimiterContext::InputObjectDefinition => "input object definition",
            DelimiterContext::ArgumentDefinitions => "argument definitions",
        }
    }
}

#[derive(Debug, Clone)]
struct OpenDelimiter {
    span: GraphQLSourceSpan,
    context: DelimiterContext,
}

/// Decided while the next token is borrowed, acted on once it is released.
enum RecoveryAction {
    Stop,
    Skip,
    CheckKeyword(String),
    CheckDescription,
}

/// Where a value literal appears, which decides whether `$variables` are
/// allowed and how quoted object keys are treated.
#[derive(Clone, Copy, Debug, PartialEq)]
enum ConstContext {
    /// Field and directive arguments inside operations and fragments.
    AllowVariables,
    VariableDefaultValue,
    /// Directive arguments in schema definitions and variable definitions.
    DirectiveArgument,
    InputDefaultValue,
    /// Text returned by a resolver. Object keys may also be quoted strings.
    ResolverOutput,
}

impl ConstContext {
    fn allows_variables(&self) -> bool {
        matches!(self, ConstContext::AllowVariables)
    }

    fn description(&self) -> &'static str {
        match self {
            ConstContext::AllowVariables => "arguments",
            ConstContext::VariableDefaultValue => "variable default values",
            ConstContext::DirectiveArgument => "const directive arguments",
            ConstContext::InputDefaultValue => "input default values",
            ConstContext::ResolverOutput => "resolver output",
        }
    }
}

/// One top-level item of a schema document.
enum SchemaItem {
    Type(TypeDefinition),
    Directive(DirectiveDefinition),
}

// =============================================================================
// Main parser struct
// =============================================================================

/// A recursive descent parser for GraphQL documents.
///
/// Generic over the token source; [`GraphQLParser::new`] lexes from a string.
///
/// ```
/// use libgqlexec_parser::ast::Selection;
/// use libgqlexec_parser::GraphQLParser;
///
/// let result = GraphQLParser::new("query Q { hero { name } }").parse_executable_document();
/// let doc = result.valid_ast().unwrap();
/// let op = doc.statement(doc.operation_by_name("Q").unwrap()).as_operation().unwrap();
/// let Selection::Field(hero) = doc.selection(op.selection_set.items[0]) else {
///     panic!("expected a field");
/// };
/// assert_eq!(hero.name, "hero");
/// ```
pub struct GraphQLParser<'src, TTokenSource: GraphQLTokenSource<'src>> {
    token_stream: GraphQLTokenStream<'src, TTokenSource>,

    errors: Vec<GraphQLParseError>,

    delimiter_stack: SmallVec<[OpenDelimiter; 8]>,

    /// Shared by values, selection sets and type references.
    recursion_depth: usize,

    /// End of the most recently consumed token; anchors EOF errors.
    last_end_position: Option<SourcePosition>,

    /// Number of tokens consumed so far. Lets recovery loops detect that a
    /// failed rule made no progress.
    consumed_count: usize,

    /// Set by a fatal lexer error. Once set the token stream has been drained
    /// and no further errors are recorded.
    aborted: bool,

    /// Executable document under construction (owns the selection arena).
    document: Document,

    /// Variables declared by the operation being parsed. `None` inside
    /// fragments, whose variables are only known once spread.
    declared_variables: Option<Vec<String>>,
}

impl<'src> GraphQLParser<'src, StrGraphQLTokenSource<'src>> {
    pub fn new<S: AsRef<str> + ?Sized>(source: &'src S) -> Self {
        Self::from_token_source(StrGraphQLTokenSource::new(source.as_ref()))
    }

    /// Like [`new`](Self::new), but every span carries `path`.
    pub fn with_file_path<S: AsRef<str> + ?Sized>(source: &'src S, path: Arc<PathBuf>) -> Self {
        Self::from_token_source(StrGraphQLTokenSource::with_file_path(source.as_ref(), path))
    }
}

impl<'src, TTokenSource: GraphQLTokenSource<'src>> GraphQLParser<'src, TTokenSource> {
    /// Maximum nesting depth for values, selection sets and type references.
    pub const MAX_RECURSION_DEPTH: usize = 64;

    pub fn from_token_source(token_source: TTokenSource) -> Self {
        Self {
            token_stream: GraphQLTokenStream::new(token_source),
            errors: Vec::new(),
            delimiter_stack: SmallVec::new(),
            recursion_depth: 0,
            last_end_position: None,
            consumed_count: 0,
            aborted: false,
            document: Document::new(),
            declared_variables: None,
        }
    }

    // =========================================================================
    // Error recording and recovery
    // =========================================================================

    fn record_error(&mut self, error: GraphQLParseError) {
        if !self.aborted {
            self.errors.push(error);
        }
    }

    fn push_delimiter(&mut self, span: GraphQLSourceSpan, context: DelimiterContext) {
        self.delimiter_stack.push(OpenDelimiter { span, context });
    }

    fn pop_delimiter(&mut self) -> Option<OpenDelimiter> {
        self.delimiter_stack.pop()
    }

    /// Skips tokens until something that looks like the start of a new
    /// top-level definition. `{` counts as one only in executable documents,
    /// where it starts an anonymous query.
    fn recover_to_next_definition(&mut self, stop_at_brace: bool) {
        loop {
            let action = match self.peek() {
                None => RecoveryAction::Stop,
                Some(token) => match &token.kind {
                    GraphQLTokenKind::Eof => RecoveryAction::Stop,
                    GraphQLTokenKind::CurlyBraceOpen if stop_at_brace => RecoveryAction::Stop,
                    GraphQLTokenKind::Name(name) => RecoveryAction::CheckKeyword(name.to_string()),
                    GraphQLTokenKind::StringValue(_) | GraphQLTokenKind::BlockStringValue(_) => {
                        RecoveryAction::CheckDescription
                    },
                    _ => RecoveryAction::Skip,
                },
            };

            match action {
                RecoveryAction::Stop => break,
                RecoveryAction::Skip => {
                    self.consume_token();
                },
                RecoveryAction::CheckKeyword(keyword) => {
                    if self.looks_like_definition_start(&keyword) {
                        break;
                    }
                    self.consume_token();
                },
                RecoveryAction::CheckDescription => {
                    let is_description_for_def = if let Some(next) = self.token_stream.peek_nth(1)
                        && let GraphQLTokenKind::Name(name) = &next.kind
                    {
                        is_type_system_keyword(name)
                    } else {
                        false
                    };
                    if is_description_for_def {
                        break;
                    }
                    self.consume_token();
                },
            }
        }
        self.delimiter_stack.clear();
    }

    /// Peeks one token further to tell `type Foo` (a definition) from
    /// `type: String` (a field that happens to be called `type`).
    fn looks_like_definition_start(&mut self, keyword: &str) -> bool {
        let next = self.token_stream.peek_nth(1).map(|t| &t.kind);
        match keyword {
            "type" | "interface" | "union" | "enum" | "scalar" | "input" => matches!(
                next,
                Some(
                    GraphQLTokenKind::Name(_)
                    | GraphQLTokenKind::True
                    | GraphQLTokenKind::False
                    | GraphQLTokenKind::Null
                ),
            ),
            "directive" => matches!(next, Some(GraphQLTokenKind::At)),
            "schema" => matches!(
                next,
                Some(GraphQLTokenKind::CurlyBraceOpen | GraphQLTokenKind::At),
            ),
            "extend" => matches!(next, Some(GraphQLTokenKind::Name(n)) if is_type_system_keyword(n)),
            "query" | "mutation" | "subscription" => {
                next.is_none()
                    || matches!(
                        next,
                        Some(
                            GraphQLTokenKind::Name(_)
                            | GraphQLTokenKind::True
                            | GraphQLTokenKind::False
                            | GraphQLTokenKind::Null
                            | GraphQLTokenKind::CurlyBraceOpen
                            | GraphQLTokenKind::ParenOpen
                            | GraphQLTokenKind::At
                        ),
                    )
            },
            "fragment" => match next {
                Some(GraphQLTokenKind::Name(n)) => n.as_ref() != "on",
                Some(GraphQLTokenKind::True | GraphQLTokenKind::False | GraphQLTokenKind::Null) => {
                    true
                },
                _ => false,
            },
            _ => false,
        }
    }

    /// Skips to the next plausible selection, or to the `}` closing the set.
    ///
    /// The match is exhaustive so that a new token kind forces a decision
    /// about whether it starts a selection.
    fn skip_to_selection_recovery_point(&mut self) {
        loop {
            match self.peek() {
                None => break,
                Some(token) => match &token.kind {
                    GraphQLTokenKind::CurlyBraceClose | GraphQLTokenKind::Eof => break,
                    GraphQLTokenKind::Ellipsis
                    | GraphQLTokenKind::Name(_)
                    | GraphQLTokenKind::True
                    | GraphQLTokenKind::False
                    | GraphQLTokenKind::Null => break,
                    GraphQLTokenKind::Ampersand
                    | GraphQLTokenKind::At
                    | GraphQLTokenKind::Bang
                    | GraphQLTokenKind::Colon
                    | GraphQLTokenKind::CurlyBraceOpen
                    | GraphQLTokenKind::Dollar
                    | GraphQLTokenKind::Equals
                    | GraphQLTokenKind::ParenClose
                    | GraphQLTokenKind::ParenOpen
                    | GraphQLTokenKind::Pipe
                    | GraphQLTokenKind::SquareBracketClose
                    | GraphQLTokenKind::SquareBracketOpen
                    | GraphQLTokenKind::IntValue(_)
                    | GraphQLTokenKind::FloatValue(_)
                    | GraphQLTokenKind::StringValue(_)
                    | GraphQLTokenKind::BlockStringValue(_)
                    | GraphQLTokenKind::Error { .. } => {
                        self.consume_token();
                    },
                },
            }
        }
    }

    /// Skips to the next plausible list item, or to the closing `]`.
    fn skip_to_list_recovery_point(&mut self) {
        loop {
            match self.peek() {
                None => break,
                Some(token) => match &token.kind {
                    GraphQLTokenKind::SquareBracketClose | GraphQLTokenKind::Eof => break,
                    GraphQLTokenKind::Dollar
                    | GraphQLTokenKind::IntValue(_)
                    | GraphQLTokenKind::FloatValue(_)
                    | GraphQLTokenKind::StringValue(_)
                    | GraphQLTokenKind::BlockStringValue(_)
                    | GraphQLTokenKind::True
                    | GraphQLTokenKind::False
                    | GraphQLTokenKind::Null
                    | GraphQLTokenKind::SquareBracketOpen
                    | GraphQLTokenKind::CurlyBraceOpen
                    | GraphQLTokenKind::Name(_) => break,
                    GraphQLTokenKind::Ampersand
                    | GraphQLTokenKind::At
                    | GraphQLTokenKind::Bang
                    | GraphQLTokenKind::Colon
                    | GraphQLTokenKind::CurlyBraceClose
                    | GraphQLTokenKind::Ellipsis
                    | GraphQLTokenKind::Equals
                    | GraphQLTokenKind::ParenClose
                    | GraphQLTokenKind::ParenOpen
                    | GraphQLTokenKind::Pipe
                    | GraphQLTokenKind::Error { .. } => {
                        self.consume_token();
                    },
                },
            }
        }
    }

    fn handle_unclosed_brace(&mut self) {
        let span = self.eof_span();
        let open_delim = self.pop_delimiter();
        let mut error = GraphQLParseError::new(
            "unclosed `{`",
            span,
            GraphQLParseErrorKind::UnclosedDelimiter {
                delimiter: "{".to_string(),
            },
        );
        if let Some(delim) = open_delim {
            error.add_note_with_span(
                format!("opening `{{` in {} here", delim.context.description()),
                delim.span,
            );
        }
        self.record_error(error);
    }

    fn handle_unclosed_paren(&mut self) {
        let span = self.eof_span();
        let open_delim = self.pop_delimiter();
        let mut error = GraphQLParseError::new(
            "unclosed `(`",
            span,
            GraphQLParseErrorKind::UnclosedDelimiter {
                delimiter: "(".to_string(),
            },
        );
        if let Some(delim) = open_delim {
            error.add_note_with_span(
                format!("opening `(` in {} here", delim.context.description()),
                delim.span,
            );
        }
        self.record_error(error);
    }

    // =========================================================================
    // Token access
    // =========================================================================

    /// Peeks at the next token, first converting any lexer error tokens in
    /// the way into parse errors.
    fn peek(&mut self) -> Option<&GraphQLToken<'src>> {
        loop {
            let is_error = matches!(
                self.token_stream.peek().map(|t| &t.kind),
                Some(GraphQLTokenKind::Error { .. }),
            );
            if !is_error {
                break;
            }
            let Some(token) = self.consume_token() else {
                break;
            };
            if let GraphQLTokenKind::Error { message, error_notes, fatal } = token.kind {
                let kind = if fatal {
                    GraphQLParseErrorKind::UnterminatedString
                } else {
                    GraphQLParseErrorKind::LexerError
                };
                self.record_error(GraphQLParseError::with_notes(
                    message,
                    token.span,
                    kind,
                    error_notes,
                ));
                if fatal {
                    self.abort();
                }
            }
        }
        self.token_stream.peek()
    }

    /// Stops the parse: drains the token stream and silences later errors.
    fn abort(&mut self) {
        self.aborted = true;
        while self.token_stream.consume().is_some() {}
    }

    fn is_at_end(&mut self) -> bool {
        matches!(self.peek().map(|t| &t.kind), None | Some(GraphQLTokenKind::Eof))
    }

    fn peek_span(&mut self) -> GraphQLSourceSpan {
        self.peek()
            .map(|t| t.span.clone())
            .unwrap_or_else(|| self.eof_span())
    }

    fn peek_display(&mut self) -> String {
        self.peek()
            .map(|t| Self::token_kind_display(&t.kind))
            .unwrap_or_else(|| "end of input".to_string())
    }

    fn peek_is(&mut self, kind: &GraphQLTokenKind) -> bool {
        match self.peek() {
            Some(token) => Self::token_kinds_match(&token.kind, kind),
            None => false,
        }
    }

    /// `true` if the next token is the `Name` `keyword`. The `true`, `false`
    /// and `null` tokens never match.
    fn peek_is_keyword(&mut self, keyword: &str) -> bool {
        match self.peek() {
            Some(GraphQLToken { kind: GraphQLTokenKind::Name(name), .. }) => name.as_ref() == keyword,
            _ => false,
        }
    }

    fn peek_is_name(&mut self) -> bool {
        matches!(
            self.peek().map(|t| &t.kind),
            Some(
                GraphQLTokenKind::Name(_)
                | GraphQLTokenKind::True
                | GraphQLTokenKind::False
                | GraphQLTokenKind::Null
            ),
        )
    }

    fn peek_is_string(&mut self) -> bool {
        matches!(
            self.peek().map(|t| &t.kind),
            Some(GraphQLTokenKind::StringValue(_) | GraphQLTokenKind::BlockStringValue(_)),
        )
    }

    fn consume_token(&mut self) -> Option<GraphQLToken<'src>> {
        let token = self.token_stream.consume();
        if let Some(t) = &token {
            self.last_end_position = Some(t.span.end_exclusive);
            self.consumed_count += 1;
        }
        token
    }

    /// Consumes the next token if it is of kind `expected_kind`, recording an
    /// error (and leaving the token in place) otherwise.
    fn expect(&mut self, expected_kind: &GraphQLTokenKind) -> Result<GraphQLToken<'src>, ()> {
        let mismatch = match self.peek() {
            None | Some(GraphQLToken { kind: GraphQLTokenKind::Eof, .. }) => None,
            Some(token) if Self::token_kinds_match(&token.kind, expected_kind) => {
                return self.consume_token().ok_or(());
            },
            Some(token) => Some((token.span.clone(), Self::token_kind_display(&token.kind))),
        };
        let expected = Self::token_kind_display(expected_kind);
        match mismatch {
            None => {
                let span = self.eof_span();
                self.record_error(GraphQLParseError::new(
                    format!("expected `{expected}`"),
                    span,
                    GraphQLParseErrorKind::UnexpectedEof {
                        expected: vec![expected],
                    },
                ));
            },
            Some((span, found)) => {
                self.record_error(GraphQLParseError::new(
                    format!("expected `{expected}`, found `{found}`"),
                    span,
                    GraphQLParseErrorKind::UnexpectedToken {
                        expected: vec![expected],
                        found,
                    },
                ));
            },
        }
        Err(())
    }

    /// Expects a name and returns it with its span.
    ///
    /// `true`, `false` and `null` match the Name grammar and are accepted
    /// here even though the lexer gives them their own token kinds.
    fn expect_name(&mut self) -> Result<(Cow<'src, str>, GraphQLSourceSpan), ()> {
        let mismatch = match self.peek() {
            None | Some(GraphQLToken { kind: GraphQLTokenKind::Eof, .. }) => None,
            Some(token) => match &token.kind {
                GraphQLTokenKind::Name(_)
                | GraphQLTokenKind::True
                | GraphQLTokenKind::False
                | GraphQLTokenKind::Null => Some(None),
                _ => Some(Some((token.span.clone(), Self::token_kind_display(&token.kind)))),
            },
        };
        match mismatch {
            None => {
                let span = self.eof_span();
                self.record_error(GraphQLParseError::new(
                    "expected name",
                    span,
                    GraphQLParseErrorKind::UnexpectedEof {
                        expected: vec!["name".to_string()],
                    },
                ));
                return Err(());
            },
            Some(Some((span, found))) => {
                self.record_error(GraphQLParseError::new(
                    format!("expected name, found `{found}`"),
                    span,
                    GraphQLParseErrorKind::UnexpectedToken {
                        expected: vec!["name".to_string()],
                        found,
                    },
                ));
                return Err(());
            },
            Some(None) => {},
        }
        let Some(token) = self.consume_token() else {
            return Err(());
        };
        let name = match token.kind {
            GraphQLTokenKind::Name(name) => name,
            GraphQLTokenKind::True => Cow::Borrowed("true"),
            GraphQLTokenKind::False => Cow::Borrowed("false"),
            GraphQLTokenKind::Null => Cow::Borrowed("null"),
            _ => return Err(()),
        };
        Ok((name, token.span))
    }

    /// Expects the structural keyword `keyword` and returns its span.
    fn expect_keyword(&mut self, keyword: &str) -> Result<GraphQLSourceSpan, ()> {
        if self.peek_is_keyword(keyword) {
            return self.consume_token().map(|t| t.span).ok_or(());
        }
        if self.is_at_end() {
            let span = self.eof_span();
            self.record_error(GraphQLParseError::new(
                format!("expected `{keyword}`"),
                span,
                GraphQLParseErrorKind::UnexpectedEof {
                    expected: vec![keyword.to_string()],
                },
            ));
        } else {
            let span = self.peek_span();
            let found = self.peek_display();
            self.record_error(GraphQLParseError::new(
                format!("expected `{keyword}`, found `{found}`"),
                span,
                GraphQLParseErrorKind::UnexpectedToken {
                    expected: vec![keyword.to_string()],
                    found,
                },
            ));
        }
        Err(())
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    fn eof_span(&self) -> GraphQLSourceSpan {
        let pos = self.last_end_position.unwrap_or_default();
        GraphQLSourceSpan::new(pos, pos)
    }

    /// Span from the start of `start` to the end of the last consumed token.
    fn make_span(&self, start: GraphQLSourceSpan) -> GraphQLSourceSpan {
        let end = self.last_end_position.unwrap_or(start.end_exclusive);
        GraphQLSourceSpan {
            start_inclusive: start.start_inclusive,
            end_exclusive: end,
            file_path: start.file_path,
        }
    }

    fn token_kind_display(kind: &GraphQLTokenKind) -> String {
        if let Some(punctuator) = kind.as_punctuator_str() {
            return punctuator.to_string();
        }
        match kind {
            GraphQLTokenKind::Name(s)
            | GraphQLTokenKind::IntValue(s)
            | GraphQLTokenKind::FloatValue(s) => s.to_string(),
            GraphQLTokenKind::StringValue(_) => "string".to_string(),
            GraphQLTokenKind::BlockStringValue(_) => "block string".to_string(),
            GraphQLTokenKind::True => "true".to_string(),
            GraphQLTokenKind::False => "false".to_string(),
            GraphQLTokenKind::Null => "null".to_string(),
            GraphQLTokenKind::Eof => "end of input".to_string(),
            GraphQLTokenKind::Error { message, .. } => format!("tokenization error: {message}"),
            _ => "token".to_string(),
        }
    }

    /// Compares token kinds by variant, ignoring payloads.
    ///
    /// Exhaustive on `actual` so that adding a token kind is a compile error
    /// here until it is handled.
    fn token_kinds_match(actual: &GraphQLTokenKind, expected: &GraphQLTokenKind) -> bool {
        match actual {
            GraphQLTokenKind::Name(_) => matches!(expected, GraphQLTokenKind::Name(_)),
            GraphQLTokenKind::IntValue(_) => matches!(expected, GraphQLTokenKind::IntValue(_)),
            GraphQLTokenKind::FloatValue(_) => matches!(expected, GraphQLTokenKind::FloatValue(_)),
            GraphQLTokenKind::StringValue(_) => {
                matches!(expected, GraphQLTokenKind::StringValue(_))
            },
            GraphQLTokenKind::BlockStringValue(_) => {
                matches!(expected, GraphQLTokenKind::BlockStringValue(_))
            },
            GraphQLTokenKind::Error { .. } => matches!(expected, GraphQLTokenKind::Error { .. }),
            GraphQLTokenKind::Ampersand => actual == expected,
            GraphQLTokenKind::At => actual == expected,
            GraphQLTokenKind::Bang => actual == expected,
            GraphQLTokenKind::Colon => actual == expected,
            GraphQLTokenKind::CurlyBraceClose => actual == expected,
            GraphQLTokenKind::CurlyBraceOpen => actual == expected,
            GraphQLTokenKind::Dollar => actual == expected,
            GraphQLTokenKind::Ellipsis => actual == expected,
            GraphQLTokenKind::Equals => actual == expected,
            GraphQLTokenKind::ParenClose => actual == expected,
            GraphQLTokenKind::ParenOpen => actual == expected,
            GraphQLTokenKind::Pipe => actual == expected,
            GraphQLTokenKind::SquareBracketClose => actual == expected,
            GraphQLTokenKind::SquareBracketOpen => actual == expected,
            GraphQLTokenKind::True => actual == expected,
            GraphQLTokenKind::False => actual == expected,
            GraphQLTokenKind::Null => actual == expected,
            GraphQLTokenKind::Eof => actual == expected,
        }
    }

    fn enter_recursion(&mut self) -> Result<(), ()> {
        self.recursion_depth += 1;
        if self.recursion_depth > Self::MAX_RECURSION_DEPTH {
            let span = self.peek_span();
            self.consume_token();
            self.record_error(GraphQLParseError::new(
                "maximum nesting depth exceeded",
                span,
                GraphQLParseErrorKind::RecursionLimitExceeded,
            ));
            self.recursion_depth -= 1;
            return Err(());
        }
        Ok(())
    }

    fn exit_recursion(&mut self) {
        self.recursion_depth -= 1;
    }

    fn unexpected_token_error(&mut self, expected: &[&str], what: &str) {
        let span = self.peek_span();
        let expected = expected.iter().map(|e| e.to_string()).collect();
        if self.is_at_end() {
            self.record_error(GraphQLParseError::new(
                format!("expected {what}"),
                span,
                GraphQLParseErrorKind::UnexpectedEof { expected },
            ));
        } else {
            let found = self.peek_display();
            self.record_error(GraphQLParseError::new(
                format!("expected {what}, found `{found}`"),
                span,
                GraphQLParseErrorKind::UnexpectedToken { expected, found },
            ));
        }
    }

    // =========================================================================
    // Value parsing
    // =========================================================================

    fn parse_value(&mut self, context: ConstContext) -> Result<InputValue, ()> {
        self.enter_recursion()?;
        let result = self.parse_value_impl(context);
        self.exit_recursion();
        result
    }

    fn parse_value_impl(&mut self, context: ConstContext) -> Result<InputValue, ()> {
        let Some(token) = self.peek() else {
            self.unexpected_token_error(&["value"], "value");
            return Err(());
        };
        match &token.kind {
            GraphQLTokenKind::Dollar => self.parse_variable_reference(context),
            GraphQLTokenKind::SquareBracketOpen => self.parse_list_value(context),
            GraphQLTokenKind::CurlyBraceOpen => self.parse_object_value(context),
            GraphQLTokenKind::Eof => {
                self.unexpected_token_error(&["value"], "value");
                Err(())
            },
            GraphQLTokenKind::IntValue(_)
            | GraphQLTokenKind::FloatValue(_)
            | GraphQLTokenKind::StringValue(_)
            | GraphQLTokenKind::BlockStringValue(_)
            | GraphQLTokenKind::True
            | GraphQLTokenKind::False
            | GraphQLTokenKind::Null
            | GraphQLTokenKind::Name(_) => {
                let Some(token) = self.consume_token() else {
                    return Err(());
                };
                self.scalar_token_to_value(token)
            },
            _ => {
                self.unexpected_token_error(&["value"], "value");
                Err(())
            },
        }
    }

    /// Converts an already-consumed scalar token into a value.
    fn scalar_token_to_value(&mut self, token: GraphQLToken<'src>) -> Result<InputValue, ()> {
        match &token.kind {
            GraphQLTokenKind::IntValue(raw) => match token.kind.parse_int_value() {
                Some(Ok(value)) => Ok(InputValue::Int(value)),
                _ => {
                    let raw = raw.to_string();
                    self.record_error(GraphQLParseError::new(
                        format!("integer `{raw}` is out of range"),
                        token.span,
                        GraphQLParseErrorKind::InvalidValue { raw },
                    ));
                    Err(())
                },
            },
            GraphQLTokenKind::FloatValue(raw) => match token.kind.parse_float_value() {
                Some(Ok(value)) if value.is_finite() => Ok(InputValue::Float(value)),
                _ => {
                    let raw = raw.to_string();
                    self.record_error(GraphQLParseError::new(
                        format!("float `{raw}` is not a finite number"),
                        token.span,
                        GraphQLParseErrorKind::InvalidValue { raw },
                    ));
                    Err(())
                },
            },
            GraphQLTokenKind::StringValue(_) | GraphQLTokenKind::BlockStringValue(_) => {
                let is_block = matches!(token.kind, GraphQLTokenKind::BlockStringValue(_));
                match token.kind.parse_string_value() {
                    Some(Ok(parsed)) if is_block => Ok(InputValue::RawString(parsed)),
                    Some(Ok(parsed)) => Ok(InputValue::String(parsed)),
                    Some(Err(err)) => {
                        self.record_error(GraphQLParseError::new(
                            format!("invalid string: {err}"),
                            token.span,
                            GraphQLParseErrorKind::InvalidValue { raw: err.to_string() },
                        ));
                        Err(())
                    },
                    None => Err(()),
                }
            },
            GraphQLTokenKind::True => Ok(InputValue::Boolean(true)),
            GraphQLTokenKind::False => Ok(InputValue::Boolean(false)),
            GraphQLTokenKind::Null => Ok(InputValue::Null),
            GraphQLTokenKind::Name(name) => Ok(InputValue::Enum(name.to_string())),
            _ => Err(()),
        }
    }

    /// `$name`. Inside an operation the name must be one the operation
    /// declares; inside a fragment that check waits until validation.
    fn parse_variable_reference(&mut self, context: ConstContext) -> Result<InputValue, ()> {
        let dollar = self.expect(&GraphQLTokenKind::Dollar)?;
        if !context.allows_variables() {
            let mut error = GraphQLParseError::new(
                format!("variables are not allowed in {}", context.description()),
                dollar.span,
                GraphQLParseErrorKind::InvalidSyntax,
            );
            if self.peek_is_name() {
                self.consume_token();
            }
            error.add_help("use a literal value instead");
            self.record_error(error);
            return Err(());
        }
        let (name, name_span) = self.expect_name()?;
        if let Some(declared) = &self.declared_variables
            && !declared.iter().any(|d| d == name.as_ref())
        {
            let mut error = GraphQLParseError::new(
                format!("variable `${name}` is not defined by the operation"),
                dollar.span.to(&name_span),
                GraphQLParseErrorKind::UndefinedVariable {
                    name: name.to_string(),
                },
            );
            error.add_help(format!(
                "declare it in the operation's variable list, e.g. `(${name}: String)`",
            ));
            self.record_error(error);
        }
        Ok(InputValue::Variable(name.into_owned()))
    }

    /// `[value, ...]`. An empty list stays an empty list, distinct from
    /// `null`.
    fn parse_list_value(&mut self, context: ConstContext) -> Result<InputValue, ()> {
        let open_token = self.expect(&GraphQLTokenKind::SquareBracketOpen)?;
        self.push_delimiter(open_token.span.clone(), DelimiterContext::ListValue);

        let mut items = Vec::new();
        loop {
            if self.peek_is(&GraphQLTokenKind::SquareBracketClose) {
                break;
            }
            if self.is_at_end() {
                let span = self.eof_span();
                let open_delim = self.pop_delimiter();
                let mut error = GraphQLParseError::new(
                    "unclosed `[`",
                    span,
                    GraphQLParseErrorKind::UnclosedDelimiter {
                        delimiter: "[".to_string(),
                    },
                );
                if let Some(delim) = open_delim {
                    error.add_note_with_span("opening `[` here", delim.span);
                }
                self.record_error(error);
                return Err(());
            }

            let consumed_before = self.consumed_count;
            match self.parse_value(context) {
                Ok(value) => items.push(value),
                Err(()) => {
                    if self.consumed_count == consumed_before
                        && !self.peek_is(&GraphQLTokenKind::SquareBracketClose)
                    {
                        self.consume_token();
                    }
                    self.skip_to_list_recovery_point();
                },
            }
        }

        self.expect(&GraphQLTokenKind::SquareBracketClose)?;
        self.pop_delimiter();
        Ok(InputValue::List(items))
    }

    /// `{ name: value, ... }`. In resolver output, keys may also be quoted.
    fn parse_object_value(&mut self, context: ConstContext) -> Result<InputValue, ()> {
        let open_token = self.expect(&GraphQLTokenKind::CurlyBraceOpen)?;
        self.push_delimiter(open_token.span.clone(), DelimiterContext::ObjectValue);

        let mut fields = IndexMap::new();
        loop {
            if self.peek_is(&GraphQLTokenKind::CurlyBraceClose) {
                break;
            }
            if self.is_at_end() {
                self.handle_unclosed_brace();
                return Err(());
            }

            let (key, key_span) =
                if context == ConstContext::ResolverOutput && self.peek_is_string() {
                    let Some(token) = self.consume_token() else {
                        return Err(());
                    };
                    match token.kind.parse_string_value() {
                        Some(Ok(key)) => (key, token.span),
                        _ => {
                            self.record_error(GraphQLParseError::new(
                                "invalid object key",
                                token.span,
                                GraphQLParseErrorKind::InvalidSyntax,
                            ));
                            return Err(());
                        },
                    }
                } else {
                    let (name, span) = self.expect_name()?;
                    (name.into_owned(), span)
                };
            self.expect(&GraphQLTokenKind::Colon)?;
            let value = self.parse_value(context)?;
            if fields.contains_key(&key) {
                self.record_error(GraphQLParseError::new(
                    format!("duplicate object field `{key}`"),
                    key_span,
                    GraphQLParseErrorKind::DuplicateDefinition { name: key },
                ));
            } else {
                fields.insert(key, value);
            }
        }

        self.expect(&GraphQLTokenKind::CurlyBraceClose)?;
        self.pop_delimiter();
        Ok(InputValue::Object(fields))
    }

    // =========================================================================
    // Type references
    // =========================================================================

    /// Parses `Name`, `Name!`, `[Name]`, `[[Name!]!]` and so on into a
    /// flattened [`TypeRef`]. Each `[` adds a level; a `!` after the name or
    /// after a `]` marks the level it closes as non-null.
    fn parse_type_ref(&mut self) -> Result<TypeRef, ()> {
        let start_span = self.peek_span();
        let mut open_spans: SmallVec<[GraphQLSourceSpan; 8]> = SmallVec::new();
        while self.peek_is(&GraphQLTokenKind::SquareBracketOpen) {
            let Some(token) = self.consume_token() else {
                return Err(());
            };
            self.push_delimiter(token.span.clone(), DelimiterContext::ListType);
            open_spans.push(token.span);
        }
        let depth = open_spans.len();
        let too_deep = depth > TypeRef::MAX_DEPTH as usize;
        if too_deep {
            let span = open_spans[TypeRef::MAX_DEPTH as usize].clone();
            let mut error = GraphQLParseError::new(
                format!(
                    "list type is nested {depth} levels deep; at most {} are allowed",
                    TypeRef::MAX_DEPTH,
                ),
                span,
                GraphQLParseErrorKind::ListDepthExceeded { depth },
            );
            error.add_note_with_span("outermost `[` here", open_spans[0].clone());
            self.record_error(error);
        }

        let (name, _) = self.expect_name()?;
        let mut non_null: u32 = 0;
        if self.peek_is(&GraphQLTokenKind::Bang) {
            self.consume_token();
            non_null |= 1 << depth.min(31);
        }

        for level in (0..depth).rev() {
            if !self.peek_is(&GraphQLTokenKind::SquareBracketClose) {
                let span = self.peek_span();
                let found = self.peek_display();
                let mut error = GraphQLParseError::new(
                    format!("expected `]` to close list type, found `{found}`"),
                    span,
                    GraphQLParseErrorKind::MismatchedDelimiter {
                        expected: "]".to_string(),
                        found,
                    },
                );
                error.add_note_with_span("opening `[` here", open_spans[level].clone());
                self.record_error(error);
                self.delimiter_stack.truncate(self.delimiter_stack.len().saturating_sub(level + 1));
                return Err(());
            }
            self.consume_token();
            self.pop_delimiter();
            if self.peek_is(&GraphQLTokenKind::Bang) {
                self.consume_token();
                non_null |= 1 << level.min(31);
            }
        }

        if self.peek_is(&GraphQLTokenKind::SquareBracketClose) {
            let span = self.peek_span();
            self.consume_token();
            let mut error = GraphQLParseError::new(
                "unmatched `]` in type reference",
                span,
                GraphQLParseErrorKind::MismatchedDelimiter {
                    expected: "end of type".to_string(),
                    found: "]".to_string(),
                },
            );
            error.add_help("every `]` needs a matching `[` before the type name");
            self.record_error(error);
            return Err(());
        }

        if too_deep {
            return Err(());
        }
        Ok(TypeRef {
            name: name.into_owned(),
            depth: depth as u8,
            non_null: non_null as u8,
            span: self.make_span(start_span),
            resolved: None,
        })
    }

    // =========================================================================
    // Directives and arguments
    // =========================================================================

    fn parse_directives(&mut self, context: ConstContext) -> Result<Vec<Directive>, ()> {
        let mut directives = Vec::new();
        while self.peek_is(&GraphQLTokenKind::At) {
            let at = self.expect(&GraphQLTokenKind::At)?;
            let (name, _) = self.expect_name()?;
            let arguments = if self.peek_is(&GraphQLTokenKind::ParenOpen) {
                self.parse_arguments(DelimiterContext::DirectiveArguments, context)?
            } else {
                Vec::new()
            };
            directives.push(Directive {
                name: name.into_owned(),
                arguments,
                span: self.make_span(at.span),
            });
        }
        Ok(directives)
    }

    fn parse_arguments(
        &mut self,
        delimiter_context: DelimiterContext,
        context: ConstContext,
    ) -> Result<Vec<Argument>, ()> {
        let open_token = self.expect(&GraphQLTokenKind::ParenOpen)?;
        self.push_delimiter(open_token.span.clone(), delimiter_context);

        if self.peek_is(&GraphQLTokenKind::ParenClose) {
            self.record_error(GraphQLParseError::new(
                "argument list cannot be empty; omit the parentheses instead",
                open_token.span.clone(),
                GraphQLParseErrorKind::InvalidEmptyConstruct {
                    construct: "argument list".to_string(),
                },
            ));
        }

        let mut arguments: Vec<Argument> = Vec::new();
        loop {
            if self.peek_is(&GraphQLTokenKind::ParenClose) {
                break;
            }
            if self.is_at_end() {
                self.handle_unclosed_paren();
                return Err(());
            }

            let (name, name_span) = self.expect_name()?;
            self.expect(&GraphQLTokenKind::Colon)?;
            let value = self.parse_value(context)?;
            if arguments.iter().any(|arg| arg.name == name.as_ref()) {
                self.record_error(GraphQLParseError::new(
                    format!("argument `{name}` is given more than once"),
                    name_span.clone(),
                    GraphQLParseErrorKind::DuplicateDefinition {
                        name: name.to_string(),
                    },
                ));
            }
            arguments.push(Argument {
                name: name.into_owned(),
                value,
                span: self.make_span(name_span),
            });
        }

        self.expect(&GraphQLTokenKind::ParenClose)?;
        self.pop_delimiter();
        Ok(arguments)
    }

    // =========================================================================
    // Selection sets
    // =========================================================================

    fn parse_selection_set(&mut self, parent: Option<SelectionId>) -> Result<SelectionSet, ()> {
        self.enter_recursion()?;
        let result = self.parse_selection_set_impl(parent);
        self.exit_recursion();
        result
    }

    fn parse_selection_set_impl(&mut self, parent: Option<SelectionId>) -> Result<SelectionSet, ()> {
        let open_token = self.expect(&GraphQLTokenKind::CurlyBraceOpen)?;
        self.push_delimiter(open_token.span.clone(), DelimiterContext::SelectionSet);

        if self.peek_is(&GraphQLTokenKind::CurlyBraceClose) {
            self.record_error(GraphQLParseError::new(
                "selection set cannot be empty",
                open_token.span.clone(),
                GraphQLParseErrorKind::InvalidEmptyConstruct {
                    construct: "selection set".to_string(),
                },
            ));
        }

        let mut items = Vec::new();
        loop {
            if self.peek_is(&GraphQLTokenKind::CurlyBraceClose) {
                break;
            }
            if self.is_at_end() {
                self.handle_unclosed_brace();
                return Err(());
            }

            let consumed_before = self.consumed_count;
            match self.parse_selection(parent) {
                Ok(id) => items.push(id),
                Err(()) => {
                    if self.consumed_count == consumed_before
                        && !self.peek_is(&GraphQLTokenKind::CurlyBraceClose)
                    {
                        self.consume_token();
                    }
                    self.skip_to_selection_recovery_point();
                },
            }
        }

        self.expect(&GraphQLTokenKind::CurlyBraceClose)?;
        self.pop_delimiter();
        Ok(SelectionSet {
            items,
            span: self.make_span(open_token.span),
        })
    }

    fn parse_selection(&mut self, parent: Option<SelectionId>) -> Result<SelectionId, ()> {
        if self.peek_is(&GraphQLTokenKind::Ellipsis) {
            let ellipsis = self.expect(&GraphQLTokenKind::Ellipsis)?;
            if self.peek_is_keyword("on")
                || self.peek_is(&GraphQLTokenKind::At)
                || self.peek_is(&GraphQLTokenKind::CurlyBraceOpen)
            {
                self.parse_inline_fragment(parent, ellipsis.span)
            } else if self.peek_is_name() {
                self.parse_fragment_spread(parent, ellipsis.span)
            } else {
                self.unexpected_token_error(
                    &["on", "@", "{", "name"],
                    "fragment name or inline fragment after `...`",
                );
                Err(())
            }
        } else if self.peek_is_name() {
            self.parse_field(parent)
        } else {
            self.unexpected_token_error(&["name", "..."], "field or fragment");
            Err(())
        }
    }

    fn parse_field(&mut self, parent: Option<SelectionId>) -> Result<SelectionId, ()> {
        let (first_name, first_span) = self.expect_name()?;
        let (alias, name) = if self.peek_is(&GraphQLTokenKind::Colon) {
            self.consume_token();
            let (name, _) = self.expect_name()?;
            (Some(first_name.into_owned()), name.into_owned())
        } else {
            (None, first_name.into_owned())
        };

        let arguments = if self.peek_is(&GraphQLTokenKind::ParenOpen) {
            self.parse_arguments(DelimiterContext::FieldArguments, ConstContext::AllowVariables)?
        } else {
            Vec::new()
        };
        let directives = self.parse_directives(ConstContext::AllowVariables)?;

        let id = self.document.push_selection(
            parent,
            Selection::Field(Field {
                alias,
                name,
                arguments,
                directives,
                selection_set: SelectionSet {
                    items: Vec::new(),
                    span: first_span.clone(),
                },
                span: self.make_span(first_span.clone()),
            }),
        );

        if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
            let selection_set = self.parse_selection_set(Some(id))?;
            let span = self.make_span(first_span);
            if let Selection::Field(field) = self.document.selection_mut(id) {
                field.selection_set = selection_set;
                field.span = span;
            }
        }
        Ok(id)
    }

    /// `...Name @directives`, called after `...` has been consumed.
    fn parse_fragment_spread(
        &mut self,
        parent: Option<SelectionId>,
        start: GraphQLSourceSpan,
    ) -> Result<SelectionId, ()> {
        let (name, _) = self.expect_name()?;
        let directives = self.parse_directives(ConstContext::AllowVariables)?;
        Ok(self.document.push_selection(
            parent,
            Selection::FragmentSpread(FragmentSpread {
                fragment_name: name.into_owned(),
                directives,
                span: self.make_span(start),
            }),
        ))
    }

    /// `... on Type @directives { ... }`, called after `...` has been
    /// consumed. The type condition is optional.
    fn parse_inline_fragment(
        &mut self,
        parent: Option<SelectionId>,
        start: GraphQLSourceSpan,
    ) -> Result<SelectionId, ()> {
        let type_condition = if self.peek_is_keyword("on") {
            Some(self.parse_type_condition()?)
        } else {
            None
        };
        let directives = self.parse_directives(ConstContext::AllowVariables)?;

        let id = self.document.push_selection(
            parent,
            Selection::InlineFragment(InlineFragment {
                type_condition,
                directives,
                selection_set: SelectionSet::default(),
                span: start.clone(),
            }),
        );
        let selection_set = self.parse_selection_set(Some(id))?;
        let span = self.make_span(start);
        if let Selection::InlineFragment(inline) = self.document.selection_mut(id) {
            inline.selection_set = selection_set;
            inline.span = span;
        }
        Ok(id)
    }

    fn parse_type_condition(&mut self) -> Result<TypeCondition, ()> {
        let on_span = self.expect_keyword("on")?;
        let (name, _) = self.expect_name()?;
        Ok(TypeCondition {
            name: name.into_owned(),
            span: self.make_span(on_span),
            resolved: None,
        })
    }

    // =========================================================================
    // Operations and fragments
    // =========================================================================

    fn parse_operation_definition(&mut self) -> Result<OperationDefinition, ()> {
        if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
            let start = self.peek_span();
            self.declared_variables = Some(Vec::new());
            let selection_set = self.parse_selection_set(None)?;
            return Ok(OperationDefinition {
                kind: OperationKind::Query,
                name: None,
                variables: Vec::new(),
                directives: Vec::new(),
                selection_set,
                span: self.make_span(start),
            });
        }

        let kind = match self.peek().map(|t| &t.kind) {
            Some(GraphQLTokenKind::Name(keyword)) => OperationKind::from_keyword(keyword),
            _ => None,
        };
        let Some(kind) = kind else {
            self.unexpected_token_error(
                &["query", "mutation", "subscription"],
                "operation type (`query`, `mutation` or `subscription`)",
            );
            return Err(());
        };
        let start = self.expect_keyword(kind.keyword())?;

        let name = if self.peek_is_name() {
            Some(self.expect_name()?.0.into_owned())
        } else {
            None
        };

        let variables = if self.peek_is(&GraphQLTokenKind::ParenOpen) {
            self.parse_variable_definitions()?
        } else {
            Vec::new()
        };
        self.declared_variables = Some(variables.iter().map(|v| v.name.clone()).collect());

        let directives = self.parse_directives(ConstContext::AllowVariables)?;
        let selection_set = self.parse_selection_set(None)?;

        Ok(OperationDefinition {
            kind,
            name,
            variables,
            directives,
            selection_set,
            span: self.make_span(start),
        })
    }

    fn parse_variable_definitions(&mut self) -> Result<Vec<VariableDefinition>, ()> {
        let open_token = self.expect(&GraphQLTokenKind::ParenOpen)?;
        self.push_delimiter(open_token.span.clone(), DelimiterContext::VariableDefinitions);

        if self.peek_is(&GraphQLTokenKind::ParenClose) {
            self.record_error(GraphQLParseError::new(
                "variable definitions cannot be empty; omit the parentheses instead",
                open_token.span.clone(),
                GraphQLParseErrorKind::InvalidEmptyConstruct {
                    construct: "variable definitions".to_string(),
                },
            ));
        }

        let mut definitions: Vec<VariableDefinition> = Vec::new();
        loop {
            if self.peek_is(&GraphQLTokenKind::ParenClose) {
                break;
            }
            if self.is_at_end() {
                self.handle_unclosed_paren();
                return Err(());
            }

            let definition = self.parse_variable_definition()?;
            if let Some(previous) = definitions.iter().find(|d| d.name == definition.name) {
                let mut error = GraphQLParseError::new(
                    format!("variable `${}` is declared more than once", definition.name),
                    definition.span.clone(),
                    GraphQLParseErrorKind::DuplicateVariable {
                        name: definition.name.clone(),
                    },
                );
                error.add_note_with_span("first declared here", previous.span.clone());
                self.record_error(error);
                continue;
            }
            definitions.push(definition);
        }

        self.expect(&GraphQLTokenKind::ParenClose)?;
        self.pop_delimiter();
        Ok(definitions)
    }

    /// `$name: Type = default @directives`. Directives on variable
    /// definitions are accepted and dropped.
    fn parse_variable_definition(&mut self) -> Result<VariableDefinition, ()> {
        let dollar = self.expect(&GraphQLTokenKind::Dollar)?;
        let (name, _) = self.expect_name()?;
        self.expect(&GraphQLTokenKind::Colon)?;
        let type_ref = self.parse_type_ref()?;
        let default_value = if self.peek_is(&GraphQLTokenKind::Equals) {
            self.consume_token();
            Some(self.parse_value(ConstContext::VariableDefaultValue)?)
        } else {
            None
        };
        self.parse_directives(ConstContext::DirectiveArgument)?;
        Ok(VariableDefinition {
            name: name.into_owned(),
            type_ref,
            default_value,
            value: None,
            span: self.make_span(dollar.span),
        })
    }

    fn parse_fragment_definition(&mut self) -> Result<FragmentDefinition, ()> {
        let start = self.expect_keyword("fragment")?;
        let (name, name_span) = self.expect_name()?;
        if name == "on" {
            let mut error = GraphQLParseError::new(
                "fragment name cannot be `on`",
                name_span,
                GraphQLParseErrorKind::ReservedName {
                    name: "on".to_string(),
                },
            );
            error.add_spec("https://spec.graphql.org/October2021/#FragmentName");
            self.record_error(error);
        }
        let type_condition = self.parse_type_condition()?;
        let directives = self.parse_directives(ConstContext::AllowVariables)?;
        let selection_set = self.parse_selection_set(None)?;
        Ok(FragmentDefinition {
            name: name.into_owned(),
            type_condition,
            directives,
            selection_set,
            span: self.make_span(start),
        })
    }

    fn parse_executable_definition_item(&mut self) -> Result<Statement, ()> {
        self.declared_variables = None;

        if self.peek_is_keyword("query")
            || self.peek_is_keyword("mutation")
            || self.peek_is_keyword("subscription")
            || self.peek_is(&GraphQLTokenKind::CurlyBraceOpen)
        {
            return Ok(Statement::Operation(self.parse_operation_definition()?));
        }
        if self.peek_is_keyword("fragment") {
            return Ok(Statement::Fragment(self.parse_fragment_definition()?));
        }

        let keyword = match self.peek().map(|t| &t.kind) {
            Some(GraphQLTokenKind::Name(name)) if is_type_system_keyword(name) => {
                Some(name.to_string())
            },
            _ => None,
        };
        let description_then_keyword = self.peek_is_string()
            && matches!(
                self.token_stream.peek_nth(1).map(|t| &t.kind),
                Some(GraphQLTokenKind::Name(name)) if is_type_system_keyword(name),
            );
        if keyword.is_some() || description_then_keyword {
            let span = self.peek_span();
            let found = keyword.unwrap_or_else(|| "type".to_string());
            self.consume_token();
            self.record_error(GraphQLParseError::new(
                format!("`{found}` definitions are not allowed in an executable document"),
                span,
                GraphQLParseErrorKind::WrongDocumentKind { found },
            ));
            return Err(());
        }

        self.unexpected_token_error(
            &["query", "mutation", "subscription", "fragment", "{"],
            "operation or fragment definition",
        );
        self.consume_token();
        Err(())
    }

    // =========================================================================
    // Schema definitions
    // =========================================================================

    /// Skips an optional description string.
    fn skip_description(&mut self) {
        if self.peek_is_string() {
            self.consume_token();
        }
    }

    fn parse_schema_definition_item(&mut self) -> Result<SchemaItem, ()> {
        self.skip_description();

        if self.peek_is_keyword("scalar") {
            let start = self.expect_keyword("scalar")?;
            let (name, _) = self.expect_name()?;
            self.parse_directives(ConstContext::DirectiveArgument)?;
            return Ok(SchemaItem::Type(TypeDefinition::Scalar(ScalarTypeDefinition {
                name: name.into_owned(),
                span: self.make_span(start),
            })));
        }
        if self.peek_is_keyword("type") {
            let def = self.parse_object_or_interface("type", DelimiterContext::ObjectTypeDefinition)?;
            return Ok(SchemaItem::Type(TypeDefinition::Object(def)));
        }
        if self.peek_is_keyword("interface") {
            let def =
                self.parse_object_or_interface("interface", DelimiterContext::InterfaceDefinition)?;
            return Ok(SchemaItem::Type(TypeDefinition::Interface(def)));
        }
        if self.peek_is_keyword("union") {
            return Ok(SchemaItem::Type(self.parse_union_type_definition()?));
        }
        if self.peek_is_keyword("enum") {
            return Ok(SchemaItem::Type(self.parse_enum_type_definition()?));
        }
        if self.peek_is_keyword("input") {
            return Ok(SchemaItem::Type(self.parse_input_object_type_definition()?));
        }
        if self.peek_is_keyword("directive") {
            return Ok(SchemaItem::Directive(self.parse_directive_definition()?));
        }
        if self.peek_is_keyword("schema") || self.peek_is_keyword("extend") {
            let span = self.peek_span();
            let keyword = self.peek_display();
            self.consume_token();
            // `extend type Foo` must not leave `type Foo` behind as a
            // definition to recover into.
            if keyword == "extend" && self.peek_is_name() {
                self.consume_token();
            }
            let mut error = GraphQLParseError::new(
                format!("`{keyword}` definitions are not supported"),
                span,
                GraphQLParseErrorKind::UnsupportedDefinition { keyword },
            );
            error.add_note(
                "root operation types are always named `Query`, `Mutation` and `Subscription`",
            );
            self.record_error(error);
            return Err(());
        }
        if self.peek_is_keyword("query")
            || self.peek_is_keyword("mutation")
            || self.peek_is_keyword("subscription")
            || self.peek_is_keyword("fragment")
            || self.peek_is(&GraphQLTokenKind::CurlyBraceOpen)
        {
            let span = self.peek_span();
            let found = if self.peek_is_keyword("fragment") {
                "fragment".to_string()
            } else {
                "operation".to_string()
            };
            self.consume_token();
            self.record_error(GraphQLParseError::new(
                format!("{found} definitions are not allowed in a schema document"),
                span,
                GraphQLParseErrorKind::WrongDocumentKind { found },
            ));
            return Err(());
        }

        self.unexpected_token_error(
            &["type", "interface", "union", "enum", "scalar", "input", "directive"],
            "schema definition",
        );
        self.consume_token();
        Err(())
    }

    /// `type Name implements A & B @directives { fields }`, and the same
    /// shape for `interface`.
    fn parse_object_or_interface(
        &mut self,
        keyword: &str,
        context: DelimiterContext,
    ) -> Result<ObjectOrInterfaceTypeDefinition, ()> {
        let start = self.expect_keyword(keyword)?;
        let (name, _) = self.expect_name()?;

        let mut implements = Vec::new();
        if self.peek_is_keyword("implements") {
            self.consume_token();
            if self.peek_is(&GraphQLTokenKind::Ampersand) {
                self.consume_token();
            }
            let (iface, span) = self.expect_name()?;
            implements.push((iface.into_owned(), span));
            while self.peek_is(&GraphQLTokenKind::Ampersand) {
                self.consume_token();
                let (iface, span) = self.expect_name()?;
                implements.push((iface.into_owned(), span));
            }
        }
        self.parse_directives(ConstContext::DirectiveArgument)?;

        let mut fields = IndexMap::new();
        if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
            let open_token = self.expect(&GraphQLTokenKind::CurlyBraceOpen)?;
            self.push_delimiter(open_token.span, context);
            loop {
                if self.peek_is(&GraphQLTokenKind::CurlyBraceClose) {
                    break;
                }
                if self.is_at_end() {
                    self.handle_unclosed_brace();
                    return Err(());
                }
                let field = self.parse_field_definition()?;
                self.insert_unique(&mut fields, field.name.clone(), field.span.clone(), field);
            }
            self.expect(&GraphQLTokenKind::CurlyBraceClose)?;
            self.pop_delimiter();
        }

        Ok(ObjectOrInterfaceTypeDefinition {
            name: name.into_owned(),
            implements,
            fields,
            span: self.make_span(start),
        })
    }

    fn parse_field_definition(&mut self) -> Result<FieldDefinition, ()> {
        self.skip_description();
        let (name, name_span) = self.expect_name()?;
        let arguments = if self.peek_is(&GraphQLTokenKind::ParenOpen) {
            self.parse_arguments_definition()?
        } else {
            IndexMap::new()
        };
        self.expect(&GraphQLTokenKind::Colon)?;
        let type_ref = self.parse_type_ref()?;
        self.parse_directives(ConstContext::DirectiveArgument)?;
        Ok(FieldDefinition {
            name: name.into_owned(),
            arguments,
            type_ref,
            span: self.make_span(name_span),
        })
    }

    fn parse_arguments_definition(&mut self) -> Result<IndexMap<String, InputValueDefinition>, ()> {
        let open_token = self.expect(&GraphQLTokenKind::ParenOpen)?;
        self.push_delimiter(open_token.span, DelimiterContext::ArgumentDefinitions);
        let mut arguments = IndexMap::new();
        loop {
            if self.peek_is(&GraphQLTokenKind::ParenClose) {
                break;
            }
            if self.is_at_end() {
                self.handle_unclosed_paren();
                return Err(());
            }
            let argument = self.parse_input_value_definition()?;
            self.insert_unique(&mut arguments, argument.name.clone(), argument.span.clone(), argument);
        }
        self.expect(&GraphQLTokenKind::ParenClose)?;
        self.pop_delimiter();
        Ok(arguments)
    }

    /// `name: Type = default @directives`
    fn parse_input_value_definition(&mut self) -> Result<InputValueDefinition, ()> {
        self.skip_description();
        let (name, name_span) = self.expect_name()?;
        self.expect(&GraphQLTokenKind::Colon)?;
        let type_ref = self.parse_type_ref()?;
        let default_value = if self.peek_is(&GraphQLTokenKind::Equals) {
            self.consume_token();
            Some(self.parse_value(ConstContext::InputDefaultValue)?)
        } else {
            None
        };
        self.parse_directives(ConstContext::DirectiveArgument)?;
        Ok(InputValueDefinition {
            name: name.into_owned(),
            type_ref,
            default_value,
            span: self.make_span(name_span),
        })
    }

    /// `union Name @directives = | A | B`
    fn parse_union_type_definition(&mut self) -> Result<TypeDefinition, ()> {
        let start = self.expect_keyword("union")?;
        let (name, _) = self.expect_name()?;
        self.parse_directives(ConstContext::DirectiveArgument)?;
        let mut members = Vec::new();
        if self.peek_is(&GraphQLTokenKind::Equals) {
            self.consume_token();
            if self.peek_is(&GraphQLTokenKind::Pipe) {
                self.consume_token();
            }
            let (member, span) = self.expect_name()?;
            members.push((member.into_owned(), span));
            while self.peek_is(&GraphQLTokenKind::Pipe) {
                self.consume_token();
                let (member, span) = self.expect_name()?;
                members.push((member.into_owned(), span));
            }
        }
        Ok(TypeDefinition::Union(UnionTypeDefinition {
            name: name.into_owned(),
            members,
            span: self.make_span(start),
        }))
    }

    fn parse_enum_type_definition(&mut self) -> Result<TypeDefinition, ()> {
        let start = self.expect_keyword("enum")?;
        let (name, _) = self.expect_name()?;
        self.parse_directives(ConstContext::DirectiveArgument)?;
        let mut values: Vec<String> = Vec::new();
        if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
            let open_token = self.expect(&GraphQLTokenKind::CurlyBraceOpen)?;
            self.push_delimiter(open_token.span, DelimiterContext::EnumDefinition);
            loop {
                if self.peek_is(&GraphQLTokenKind::CurlyBraceClose) {
                    break;
                }
                if self.is_at_end() {
                    self.handle_unclosed_brace();
                    return Err(());
                }
                self.skip_description();
                let (value, value_span) = self.expect_name()?;
                if matches!(value.as_ref(), "true" | "false" | "null") {
                    let mut error = GraphQLParseError::new(
                        format!("enum value cannot be `{value}`"),
                        value_span,
                        GraphQLParseErrorKind::ReservedName {
                            name: value.to_string(),
                        },
                    );
                    error.add_spec("https://spec.graphql.org/October2021/#EnumValue");
                    self.record_error(error);
                } else if values.iter().any(|v| v == value.as_ref()) {
                    self.record_error(GraphQLParseError::new(
                        format!("enum value `{value}` is defined more than once"),
                        value_span,
                        GraphQLParseErrorKind::DuplicateDefinition {
                            name: value.to_string(),
                        },
                    ));
                } else {
                    values.push(value.into_owned());
                }
                self.parse_directives(ConstContext::DirectiveArgument)?;
            }
            self.expect(&GraphQLTokenKind::CurlyBraceClose)?;
            self.pop_delimiter();
        }
        Ok(TypeDefinition::Enum(EnumTypeDefinition {
            name: name.into_owned(),
            values,
            span: self.make_span(start),
        }))
    }

    fn parse_input_object_type_definition(&mut self) -> Result<TypeDefinition, ()> {
        let start = self.expect_keyword("input")?;
        let (name, _) = self.expect_name()?;
        self.parse_directives(ConstContext::DirectiveArgument)?;
        let mut fields = IndexMap::new();
        if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
            let open_token = self.expect(&GraphQLTokenKind::CurlyBraceOpen)?;
            self.push_delimiter(open_token.span, DelimiterContext::InputObjectDefinition);
            loop {
                if self.peek_is(&GraphQLTokenKind::CurlyBraceClose) {
                    break;
                }
                if self.is_at_end() {
                    self.handle_unclosed_brace();
                    return Err(());
                }
                let field = self.parse_input_value_definition()?;
                self.insert_unique(&mut fields, field.name.clone(), field.span.clone(), field);
            }
            self.expect(&GraphQLTokenKind::CurlyBraceClose)?;
            self.pop_delimiter();
        }
        Ok(TypeDefinition::InputObject(InputObjectTypeDefinition {
            name: name.into_owned(),
            fields,
            span: self.make_span(start),
        }))
    }

    /// `directive @name(arguments) repeatable on LOCATION | ...`
    fn parse_directive_definition(&mut self) -> Result<DirectiveDefinition, ()> {
        let start = self.expect_keyword("directive")?;
        self.expect(&GraphQLTokenKind::At)?;
        let (name, _) = self.expect_name()?;
        let arguments = if self.peek_is(&GraphQLTokenKind::ParenOpen) {
            self.parse_arguments_definition()?
        } else {
            IndexMap::new()
        };
        let repeatable = if self.peek_is_keyword("repeatable") {
            self.consume_token();
            true
        } else {
            false
        };
        self.expect_keyword("on")?;
        if self.peek_is(&GraphQLTokenKind::Pipe) {
            self.consume_token();
        }
        let mut locations = vec![self.parse_directive_location()?];
        while self.peek_is(&GraphQLTokenKind::Pipe) {
            self.consume_token();
            locations.push(self.parse_directive_location()?);
        }
        Ok(DirectiveDefinition {
            name: name.into_owned(),
            arguments,
            repeatable,
            locations,
            span: self.make_span(start),
        })
    }

    fn parse_directive_location(&mut self) -> Result<DirectiveLocation, ()> {
        let (name, span) = self.expect_name()?;
        if let Some(location) = DirectiveLocation::parse(&name) {
            return Ok(location);
        }
        let mut error = GraphQLParseError::new(
            format!("unknown directive location `{name}`"),
            span,
            GraphQLParseErrorKind::InvalidSyntax,
        );
        if let Some(suggestion) = suggest_directive_location(&name) {
            error.add_help(format!("did you mean `{suggestion}`?"));
        }
        self.record_error(error);
        Err(())
    }

    /// Inserts `value` under `name`, reporting a duplicate instead of
    /// overwriting an earlier definition.
    fn insert_unique<T>(
        &mut self,
        map: &mut IndexMap<String, T>,
        name: String,
        span: GraphQLSourceSpan,
        value: T,
    ) {
        if map.contains_key(&name) {
            self.record_error(GraphQLParseError::new(
                format!("`{name}` is defined more than once"),
                span,
                GraphQLParseErrorKind::DuplicateDefinition { name },
            ));
        } else {
            map.insert(name, value);
        }
    }

    // =========================================================================
    // Document parsing (public API)
    // =========================================================================

    /// Parses an executable document: operations and fragments.
    ///
    /// Statements that needed error recovery are kept in the document but
    /// are not indexed by name. A fatal lexer error discards the document.
    pub fn parse_executable_document(mut self) -> ParseResult<Document> {
        while !self.is_at_end() {
            let errors_before = self.errors.len();
            let consumed_before = self.consumed_count;
            match self.parse_executable_definition_item() {
                Ok(statement) => self.add_statement(statement, errors_before),
                Err(()) => {
                    if self.consumed_count == consumed_before {
                        self.consume_token();
                    }
                    self.recover_to_next_definition(true);
                },
            }
        }

        if self.aborted {
            return ParseResult::err(self.errors);
        }
        let document = std::mem::take(&mut self.document);
        ParseResult::from_parts(document, self.errors)
    }

    fn add_statement(&mut self, statement: Statement, errors_before: usize) {
        let duplicate = match &statement {
            Statement::Operation(op) => {
                op.name.as_deref().filter(|name| self.document.is_operation_name_taken(name))
            },
            Statement::Fragment(frag) => {
                Some(frag.name.as_str()).filter(|name| self.document.is_fragment_name_taken(name))
            },
        };
        if let Some(name) = duplicate {
            let name = name.to_string();
            let what = match statement {
                Statement::Operation(_) => "operation",
                Statement::Fragment(_) => "fragment",
            };
            let mut error = GraphQLParseError::new(
                format!("{what} `{name}` is defined more than once"),
                statement.span().clone(),
                GraphQLParseErrorKind::DuplicateDefinition { name },
            );
            error.add_help(format!("{what} names must be unique within a document"));
            self.record_error(error);
        }
        let register = self.errors.len() == errors_before;
        self.document.push_statement(statement, register);
    }

    /// Parses schema definition text: `type`, `interface`, `union`, `enum`,
    /// `scalar`, `input` and `directive` definitions.
    pub fn parse_schema_document(mut self) -> ParseResult<SchemaDocument> {
        let mut document = SchemaDocument::default();
        while !self.is_at_end() {
            let consumed_before = self.consumed_count;
            match self.parse_schema_definition_item() {
                Ok(SchemaItem::Type(def)) => document.type_definitions.push(def),
                Ok(SchemaItem::Directive(def)) => document.directive_definitions.push(def),
                Err(()) => {
                    if self.consumed_count == consumed_before {
                        self.consume_token();
                    }
                    self.recover_to_next_definition(false);
                },
            }
        }

        if self.aborted {
            return ParseResult::err(self.errors);
        }
        ParseResult::from_parts(document, self.errors)
    }

    /// Parses a single standalone value, as returned by a resolver. Bare
    /// names are enum values, object keys may be names or quoted strings and
    /// variables are not allowed. Anything after the value is an error.
    pub fn parse_value_text(mut self) -> ParseResult<InputValue> {
        if self.is_at_end() {
            self.unexpected_token_error(&["value"], "value");
            return ParseResult::err(self.errors);
        }
        let value = self.parse_value(ConstContext::ResolverOutput);
        if !self.is_at_end() {
            let span = self.peek_span();
            let found = self.peek_display();
            self.record_error(GraphQLParseError::new(
                format!("unexpected `{found}` after value"),
                span,
                GraphQLParseErrorKind::UnexpectedToken {
                    expected: vec!["end of input".to_string()],
                    found,
                },
            ));
        }
        match value {
            Ok(value) if !self.aborted => ParseResult::from_parts(value, self.errors),
            _ => ParseResult::err(self.errors),
        }
    }
}

fn is_type_system_keyword(name: &str) -> bool {
    matches!(
        name,
        "type" | "interface" | "union" | "enum" | "scalar" | "input" | "directive" | "schema"
            | "extend",
    )
}

/// The closest known directive location to `input`, if one is close enough
/// to be a plausible typo.
fn suggest_directive_location(input: &str) -> Option<&'static str> {
    let input_upper = input.to_uppercase();
    DirectiveLocation::ALL
        .iter()
        .map(|loc| (loc.as_str(), edit_distance(&input_upper, loc.as_str())))
        .filter(|(_, distance)| *distance <= 3)
        .min_by_key(|(_, distance)| *distance)
        .map(|(name, _)| name)
}

/// Levenshtein distance.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];
    for i in 1..=a_chars.len() {
        curr[0] = i;
        for j in 1..=b_chars.len() {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b_chars.len()]
}
