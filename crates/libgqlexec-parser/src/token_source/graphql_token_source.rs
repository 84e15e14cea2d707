use crate::token::GraphQLToken;

/// Marker trait for lexers: iterators that produce [`GraphQLToken`]s.
///
/// Lexers skip ignored tokens (whitespace, commas, comments), emit
/// [`GraphQLTokenKind::Error`](crate::token::GraphQLTokenKind::Error) tokens
/// instead of failing, and finish with a single
/// [`GraphQLTokenKind::Eof`](crate::token::GraphQLTokenKind::Eof) token. All
/// buffering and lookahead is left to
/// [`GraphQLTokenStream`](crate::GraphQLTokenStream).
pub trait GraphQLTokenSource<'src>: Iterator<Item = GraphQLToken<'src>> {}

impl<'src, T> GraphQLTokenSource<'src> for T where T: Iterator<Item = GraphQLToken<'src>> {}
