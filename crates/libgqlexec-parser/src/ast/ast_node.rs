use crate::GraphQLSourceSpan;

/// Implemented by every AST node that can be pointed at in a diagnostic.
pub trait AstNode {
    fn span(&self) -> &GraphQLSourceSpan;

    /// The source text this node was parsed from, if `source` is the text
    /// the node came from.
    fn source_text<'a>(&self, source: &'a str) -> Option<&'a str> {
        self.span().source_slice(source)
    }
}
