//! A [`GraphQLTokenSource`](crate::token_source::GraphQLTokenSource) that
//! lexes from a `&str`.
//!
//! Token payloads borrow directly from the source string, and positions are
//! tracked with both UTF-8 character columns and UTF-16 code unit columns.
//! Invalid input produces `Error` tokens so that the parser can report
//! several problems in one pass.
//!
//! ```rust
//! use libgqlexec_parser::token::GraphQLTokenKind;
//! use libgqlexec_parser::token_source::StrGraphQLTokenSource;
//!
//! let kinds: Vec<_> = StrGraphQLTokenSource::new("{ name }")
//!     .map(|token| token.kind)
//!     .collect();
//! assert_eq!(kinds, vec![
//!     GraphQLTokenKind::CurlyBraceOpen,
//!     GraphQLTokenKind::name_borrowed("name"),
//!     GraphQLTokenKind::CurlyBraceClose,
//!     GraphQLTokenKind::Eof,
//! ]);
//! ```

use crate::smallvec;
use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;
use crate::GraphQLErrorNote;
use crate::GraphQLSourceSpan;
use crate::SourcePosition;
use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;

pub struct StrGraphQLTokenSource<'src> {
    source: &'src str,

    /// The remaining text to lex is `&source[curr_byte_offset..]`.
    curr_byte_offset: usize,
    curr_line: usize,
    curr_col_utf8: usize,
    curr_col_utf16: usize,

    /// Set after `\r` so that a following `\n` doesn't count as a second
    /// line break.
    last_char_was_cr: bool,

    finished: bool,
    file_path: Option<Arc<PathBuf>>,
}

impl<'src> StrGraphQLTokenSource<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            curr_byte_offset: 0,
            curr_line: 0,
            curr_col_utf8: 0,
            curr_col_utf16: 0,
            last_char_was_cr: false,
            finished: false,
            file_path: None,
        }
    }

    /// Creates a token source whose spans all carry `path`.
    pub fn with_file_path(source: &'src str, path: Arc<PathBuf>) -> Self {
        Self {
            file_path: Some(path),
            ..Self::new(source)
        }
    }

    // =========================================================================
    // Position and scanning helpers
    // =========================================================================

    fn remaining(&self) -> &'src str {
        &self.source[self.curr_byte_offset..]
    }

    fn curr_position(&self) -> SourcePosition {
        SourcePosition::new(
            self.curr_line,
            self.curr_col_utf8,
            self.curr_col_utf16,
            self.curr_byte_offset,
        )
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn peek_char_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Consumes one character, handling `\n`, `\r` and `\r\n` line breaks.
    fn consume(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        match ch {
            '\n' if self.last_char_was_cr => {
                self.last_char_was_cr = false;
            },
            '\n' | '\r' => {
                self.curr_line += 1;
                self.curr_col_utf8 = 0;
                self.curr_col_utf16 = 0;
                self.last_char_was_cr = ch == '\r';
            },
            _ => {
                self.curr_col_utf8 += 1;
                self.curr_col_utf16 += ch.len_utf16();
                self.last_char_was_cr = false;
            },
        }
        self.curr_byte_offset += ch.len_utf8();
        Some(ch)
    }

    /// Advances past `text`, which must not contain line terminators.
    fn consume_within_line(&mut self, text: &str) {
        for ch in text.chars() {
            self.curr_col_utf8 += 1;
            self.curr_col_utf16 += ch.len_utf16();
        }
        self.curr_byte_offset += text.len();
        self.last_char_was_cr = false;
    }

    fn make_span(&self, start: SourcePosition) -> GraphQLSourceSpan {
        let end = self.curr_position();
        match &self.file_path {
            Some(path) => GraphQLSourceSpan::with_file(start, end, path.clone()),
            None => GraphQLSourceSpan::new(start, end),
        }
    }

    fn punctuator(&mut self, start: SourcePosition, kind: GraphQLTokenKind<'src>) -> GraphQLToken<'src> {
        self.consume();
        GraphQLToken::new(kind, self.make_span(start))
    }

    // =========================================================================
    // Lexer main loop
    // =========================================================================

    fn next_token(&mut self) -> GraphQLToken<'src> {
        loop {
            self.skip_ignored();
            let start = self.curr_position();

            return match self.peek_char() {
                None => GraphQLToken::new(GraphQLTokenKind::Eof, self.make_span(start)),
                Some('#') => {
                    self.skip_comment();
                    continue;
                },
                Some('!') => self.punctuator(start, GraphQLTokenKind::Bang),
                Some('$') => self.punctuator(start, GraphQLTokenKind::Dollar),
                Some('&') => self.punctuator(start, GraphQLTokenKind::Ampersand),
                Some('(') => self.punctuator(start, GraphQLTokenKind::ParenOpen),
                Some(')') => self.punctuator(start, GraphQLTokenKind::ParenClose),
                Some(':') => self.punctuator(start, GraphQLTokenKind::Colon),
                Some('=') => self.punctuator(start, GraphQLTokenKind::Equals),
                Some('@') => self.punctuator(start, GraphQLTokenKind::At),
                Some('[') => self.punctuator(start, GraphQLTokenKind::SquareBracketOpen),
                Some(']') => self.punctuator(start, GraphQLTokenKind::SquareBracketClose),
                Some('{') => self.punctuator(start, GraphQLTokenKind::CurlyBraceOpen),
                Some('}') => self.punctuator(start, GraphQLTokenKind::CurlyBraceClose),
                Some('|') => self.punctuator(start, GraphQLTokenKind::Pipe),
                Some('.') => self.lex_dot_or_ellipsis(start),
                Some('"') => self.lex_string(start),
                Some(c) if is_name_start(c) => self.lex_name(start),
                Some(c) if c == '-' || c.is_ascii_digit() => self.lex_number(start),
                Some(c) => self.lex_invalid_character(start, c),
            };
        }
    }

    /// Skips whitespace, line terminators, commas and the BOM.
    fn skip_ignored(&mut self) {
        while let Some(ch) = self.peek_char() {
            match ch {
                ' ' | '\t' | '\n' | '\r' | ',' | '\u{FEFF}' => {
                    self.consume();
                },
                _ => break,
            }
        }
    }

    /// Skips a `#` comment up to (not including) the next line terminator.
    fn skip_comment(&mut self) {
        let rest = self.remaining();
        let len = memchr::memchr2(b'\n', b'\r', rest.as_bytes()).unwrap_or(rest.len());
        self.consume_within_line(&rest[..len]);
    }

    // =========================================================================
    // Dot / Ellipsis lexing
    // =========================================================================

    /// `...` is the only valid use of `.`; spaced or short runs of dots on
    /// the same line produce an error with a hint.
    fn lex_dot_or_ellipsis(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        let first_dot_line = self.curr_line;
        let mut dot_offsets = vec![self.curr_byte_offset];
        self.consume();

        while dot_offsets.len() < 3 {
            self.skip_whitespace_same_line();
            if self.peek_char() != Some('.') || self.curr_line != first_dot_line {
                break;
            }
            dot_offsets.push(self.curr_byte_offset);
            self.consume();
        }
        let span = self.make_span(start);

        let adjacent = dot_offsets.windows(2).all(|w| w[1] == w[0] + 1);
        let kind = match (dot_offsets.len(), adjacent) {
            (3, true) => GraphQLTokenKind::Ellipsis,
            (1, _) => GraphQLTokenKind::error("unexpected `.`", smallvec![]),
            (2, true) => GraphQLTokenKind::error(
                "unexpected `..` (use `...` for spread operator)",
                smallvec![GraphQLErrorNote::help(
                    "add one more `.` to form the spread operator `...`",
                )],
            ),
            _ => GraphQLTokenKind::error(
                format!(
                    "unexpected `{}`",
                    self.source[start.byte_offset()..self.curr_byte_offset].trim_end(),
                ),
                smallvec![GraphQLErrorNote::help(
                    "these dots may have been intended to form a `...` spread \
                    operator; try removing the spacing between them",
                )],
            ),
        };
        GraphQLToken::new(kind, span)
    }

    fn skip_whitespace_same_line(&mut self) {
        while let Some(' ' | '\t' | '\u{FEFF}') = self.peek_char() {
            self.consume();
        }
    }

    // =========================================================================
    // Names and numbers
    // =========================================================================

    /// `true`, `false` and `null` get their own token kinds.
    fn lex_name(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        let rest = self.remaining();
        let len = rest
            .bytes()
            .position(|b| !(b == b'_' || b.is_ascii_alphanumeric()))
            .unwrap_or(rest.len());
        let name = &rest[..len];
        self.consume_within_line(name);

        let kind = match name {
            "true" => GraphQLTokenKind::True,
            "false" => GraphQLTokenKind::False,
            "null" => GraphQLTokenKind::Null,
            _ => GraphQLTokenKind::name_borrowed(name),
        };
        GraphQLToken::new(kind, self.make_span(start))
    }

    /// Lexes `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`.
    fn lex_number(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        let num_start = self.curr_byte_offset;
        let mut is_float = false;

        if self.peek_char() == Some('-') {
            self.consume();
        }

        match self.peek_char() {
            Some('0') => {
                self.consume();
                if self.peek_char().is_some_and(|ch| ch.is_ascii_digit()) {
                    return self.lex_number_error(
                        start,
                        num_start,
                        "invalid number: leading zeros are not allowed",
                    );
                }
            },
            Some(ch) if ch.is_ascii_digit() => self.consume_digits(),
            Some(_) | None => {
                let span = self.make_span(start);
                return GraphQLToken::new(
                    GraphQLTokenKind::error("unexpected `-`", smallvec![]),
                    span,
                );
            },
        }

        if self.peek_char() == Some('.')
            && self.peek_char_nth(1).is_some_and(|ch| ch.is_ascii_digit()) {
            is_float = true;
            self.consume();
            self.consume_digits();
        }

        if let Some('e' | 'E') = self.peek_char() {
            is_float = true;
            self.consume();
            if let Some('+' | '-') = self.peek_char() {
                self.consume();
            }
            if !self.peek_char().is_some_and(|ch| ch.is_ascii_digit()) {
                return self.lex_number_error(
                    start,
                    num_start,
                    "invalid number: exponent must have at least one digit",
                );
            }
            self.consume_digits();
        }

        // `123abc` is not two tokens
        if self.peek_char().is_some_and(is_name_start) {
            return self.lex_number_error(
                start,
                num_start,
                "invalid number: a name cannot immediately follow a number",
            );
        }

        let text = &self.source[num_start..self.curr_byte_offset];
        let kind = if is_float {
            GraphQLTokenKind::FloatValue(Cow::Borrowed(text))
        } else {
            GraphQLTokenKind::IntValue(Cow::Borrowed(text))
        };
        GraphQLToken::new(kind, self.make_span(start))
    }

    fn consume_digits(&mut self) {
        while self.peek_char().is_some_and(|ch| ch.is_ascii_digit()) {
            self.consume();
        }
    }

    fn lex_number_error(
        &mut self,
        start: SourcePosition,
        num_start: usize,
        message: &str,
    ) -> GraphQLToken<'src> {
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_alphanumeric() || ch == '.' || ch == '+' || ch == '-' || ch == '_' {
                self.consume();
            } else {
                break;
            }
        }
        let invalid_text = &self.source[num_start..self.curr_byte_offset];
        let span = self.make_span(start);
        GraphQLToken::new(
            GraphQLTokenKind::error(
                format!("{message}: `{invalid_text}`"),
                smallvec![GraphQLErrorNote::spec(
                    "https://spec.graphql.org/October2021/#sec-Int-Value",
                )],
            ),
            span,
        )
    }

    // =========================================================================
    // Strings
    // =========================================================================

    fn lex_string(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        let str_start = self.curr_byte_offset;
        if self.remaining().starts_with("\"\"\"") {
            return self.lex_block_string(start, str_start);
        }

        self.consume();
        loop {
            match self.peek_char() {
                None | Some('\n') | Some('\r') => {
                    let span = self.make_span(start);
                    return GraphQLToken::new(
                        GraphQLTokenKind::fatal_error(
                            "unterminated string literal",
                            smallvec![
                                GraphQLErrorNote::general(
                                    "single-line strings cannot contain unescaped newlines",
                                ),
                                GraphQLErrorNote::help(
                                    "add a closing `\"`, or use a block string (`\"\"\"`) \
                                    for multi-line text",
                                ),
                            ],
                        ),
                        span,
                    );
                },
                Some('"') => {
                    self.consume();
                    break;
                },
                Some('\\') => {
                    self.consume();
                    if let Some(ch) = self.peek_char()
                        && ch != '\n'
                        && ch != '\r' {
                        self.consume();
                    }
                },
                Some(_) => {
                    self.consume();
                },
            }
        }

        let text = &self.source[str_start..self.curr_byte_offset];
        GraphQLToken::new(
            GraphQLTokenKind::StringValue(Cow::Borrowed(text)),
            self.make_span(start),
        )
    }

    fn lex_block_string(&mut self, start: SourcePosition, str_start: usize) -> GraphQLToken<'src> {
        for _ in 0..3 {
            self.consume();
        }

        loop {
            let rest = self.remaining();
            if rest.is_empty() {
                let span = self.make_span(start);
                return GraphQLToken::new(
                    GraphQLTokenKind::fatal_error(
                        "unterminated block string",
                        smallvec![
                            GraphQLErrorNote::general_with_span(
                                "block string started here",
                                GraphQLSourceSpan::new(start, start),
                            ),
                            GraphQLErrorNote::help("add a closing `\"\"\"`"),
                        ],
                    ),
                    span,
                );
            }
            if rest.starts_with("\\\"\"\"") {
                for _ in 0..4 {
                    self.consume();
                }
            } else if rest.starts_with("\"\"\"") {
                for _ in 0..3 {
                    self.consume();
                }
                break;
            } else {
                self.consume();
            }
        }

        let text = &self.source[str_start..self.curr_byte_offset];
        GraphQLToken::new(
            GraphQLTokenKind::BlockStringValue(Cow::Borrowed(text)),
            self.make_span(start),
        )
    }

    fn lex_invalid_character(&mut self, start: SourcePosition, ch: char) -> GraphQLToken<'src> {
        self.consume();
        GraphQLToken::new(
            GraphQLTokenKind::error(
                format!("unexpected character {}", describe_char(ch)),
                smallvec![],
            ),
            self.make_span(start),
        )
    }
}

impl<'src> Iterator for StrGraphQLTokenSource<'src> {
    type Item = GraphQLToken<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if matches!(token.kind, GraphQLTokenKind::Eof) {
            self.finished = true;
        }
        Some(token)
    }
}

fn is_name_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

/// Printable characters are shown in backticks; invisible ones also get
/// their code point (and name, for the usual suspects).
fn describe_char(ch: char) -> String {
    if ch.is_control() || (ch.is_whitespace() && ch != ' ') || is_invisible_format_char(ch) {
        match invisible_char_name(ch) {
            Some(name) => format!("`{}` (U+{:04X}: {name})", ch, ch as u32),
            None => format!("`{}` (U+{:04X})", ch, ch as u32),
        }
    } else {
        format!("`{ch}`")
    }
}

fn is_invisible_format_char(ch: char) -> bool {
    matches!(ch, '\u{200B}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2060}'..='\u{2064}')
}

fn invisible_char_name(ch: char) -> Option<&'static str> {
    match ch {
        '\u{0000}' => Some("NULL"),
        '\u{0008}' => Some("BACKSPACE"),
        '\u{000B}' => Some("VERTICAL TAB"),
        '\u{000C}' => Some("FORM FEED"),
        '\u{001B}' => Some("ESCAPE"),
        '\u{007F}' => Some("DELETE"),
        '\u{00A0}' => Some("NO-BREAK SPACE"),
        '\u{200B}' => Some("ZERO WIDTH SPACE"),
        '\u{200C}' => Some("ZERO WIDTH NON-JOINER"),
        '\u{200D}' => Some("ZERO WIDTH JOINER"),
        '\u{200E}' => Some("LEFT-TO-RIGHT MARK"),
        '\u{200F}' => Some("RIGHT-TO-LEFT MARK"),
        '\u{202E}' => Some("RIGHT-TO-LEFT OVERRIDE"),
        '\u{2028}' => Some("LINE SEPARATOR"),
        '\u{2029}' => Some("PARAGRAPH SEPARATOR"),
        '\u{2060}' => Some("WORD JOINER"),
        '\u{3000}' => Some("IDEOGRAPHIC SPACE"),
        _ => None,
    }
}
