//! Bounded-lookahead buffer over a [`GraphQLTokenSource`].

use std::collections::VecDeque;

use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;
use crate::token_source::GraphQLTokenSource;

/// Wraps any [`GraphQLTokenSource`] and gives the parser `peek()`,
/// `peek_nth()` and `consume()`.
///
/// Tokens are pulled from the source lazily and kept in a ring buffer until
/// consumed, so lookahead never costs more than the tokens actually peeked.
pub struct GraphQLTokenStream<
    'src,
    TTokenSource: GraphQLTokenSource<'src>,
> {
    token_source: TTokenSource,
    buffer: VecDeque<GraphQLToken<'src>>,
}

impl<'src, TTokenSource: GraphQLTokenSource<'src>>
    GraphQLTokenStream<'src, TTokenSource>
{
    pub fn new(token_source: TTokenSource) -> Self {
        Self {
            token_source,
            buffer: VecDeque::new(),
        }
    }

    /// Advances past the next token and returns it. `None` once the source
    /// is exhausted (after `Eof` has been consumed).
    pub fn consume(&mut self) -> Option<GraphQLToken<'src>> {
        self.ensure_buffer_has(1);
        self.buffer.pop_front()
    }

    pub fn current_buffer_len(&self) -> usize {
        self.buffer.len()
    }

    fn ensure_buffer_has(&mut self, count: usize) {
        while self.buffer.len() < count {
            match self.token_source.next() {
                Some(token) => self.buffer.push_back(token),
                None => break,
            }
        }
    }

    /// `true` when no tokens remain or the next token is `Eof`.
    pub fn is_at_end(&mut self) -> bool {
        match self.peek() {
            None => true,
            Some(token) => matches!(token.kind, GraphQLTokenKind::Eof),
        }
    }

    #[inline]
    pub fn peek(&mut self) -> Option<&GraphQLToken<'src>> {
        self.peek_nth(0)
    }

    /// Peeks `n` tokens ahead of the next unconsumed token (`peek_nth(0)` is
    /// `peek()`).
    pub fn peek_nth(&mut self, n: usize) -> Option<&GraphQLToken<'src>> {
        self.ensure_buffer_has(n + 1);
        self.buffer.get(n)
    }
}
