use crate::token::GraphQLTokenKind;
use crate::GraphQLSourceSpan;

/// A token together with the span of source text it was lexed from.
///
/// Whitespace, commas and comments never become tokens; the lexer skips
/// them.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphQLToken<'src> {
    pub kind: GraphQLTokenKind<'src>,
    pub span: GraphQLSourceSpan,
}

impl<'src> GraphQLToken<'src> {
    pub fn new(kind: GraphQLTokenKind<'src>, span: GraphQLSourceSpan) -> Self {
        Self { kind, span }
    }
}
