use crate::GraphQLErrorNotes;
use crate::GraphQLStringParsingError;
use std::borrow::Cow;
use std::num::ParseFloatError;
use std::num::ParseIntError;

/// The kind of a GraphQL token.
///
/// Literal kinds store only the raw source text; use the `parse_*` methods to
/// decode them. The `'src` lifetime lets the string lexer borrow slices of its
/// input instead of allocating.
///
/// Negative numbers such as `-123` are lexed as a single literal token.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphQLTokenKind<'src> {
    // =========================================================================
    // Punctuators
    // =========================================================================
    /// `&`
    Ampersand,
    /// `@`
    At,
    /// `!`
    Bang,
    /// `:`
    Colon,
    /// `}`
    CurlyBraceClose,
    /// `{`
    CurlyBraceOpen,
    /// `$`
    Dollar,
    /// `...`
    Ellipsis,
    /// `=`
    Equals,
    /// `)`
    ParenClose,
    /// `(`
    ParenOpen,
    /// `|`
    Pipe,
    /// `]`
    SquareBracketClose,
    /// `[`
    SquareBracketOpen,

    // =========================================================================
    // Literals (raw source text)
    // =========================================================================
    /// A name matching `/[_A-Za-z][_0-9A-Za-z]*/`.
    Name(Cow<'src, str>),

    /// Raw text of an integer literal, e.g. `-123`.
    IntValue(Cow<'src, str>),

    /// Raw text of a float literal, e.g. `-1.23e-4`.
    FloatValue(Cow<'src, str>),

    /// Raw text of a `"..."` literal, quotes included.
    StringValue(Cow<'src, str>),

    /// Raw text of a `"""..."""` block string, quotes included. Block strings
    /// are kept apart from ordinary strings so that they can be printed back
    /// in their original form.
    BlockStringValue(Cow<'src, str>),

    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,

    /// End of input.
    Eof,

    /// A lexer error. The parser records it and keeps going, unless `fatal`
    /// is set: an unterminated string swallows the rest of its line, so no
    /// meaningful recovery is possible.
    Error {
        message: String,
        error_notes: GraphQLErrorNotes,
        fatal: bool,
    },
}

impl<'src> GraphQLTokenKind<'src> {
    #[inline]
    pub fn name_borrowed(s: &'src str) -> Self {
        GraphQLTokenKind::Name(Cow::Borrowed(s))
    }

    #[inline]
    pub fn name_owned(s: String) -> Self {
        GraphQLTokenKind::Name(Cow::Owned(s))
    }

    #[inline]
    pub fn error(message: impl Into<String>, error_notes: GraphQLErrorNotes) -> Self {
        GraphQLTokenKind::Error {
            message: message.into(),
            error_notes,
            fatal: false,
        }
    }

    #[inline]
    pub fn fatal_error(message: impl Into<String>, error_notes: GraphQLErrorNotes) -> Self {
        GraphQLTokenKind::Error {
            message: message.into(),
            error_notes,
            fatal: true,
        }
    }

    /// Returns the text of this token if it is a punctuator.
    pub fn as_punctuator_str(&self) -> Option<&'static str> {
        match self {
            GraphQLTokenKind::Ampersand => Some("&"),
            GraphQLTokenKind::At => Some("@"),
            GraphQLTokenKind::Bang => Some("!"),
            GraphQLTokenKind::Colon => Some(":"),
            GraphQLTokenKind::CurlyBraceClose => Some("}"),
            GraphQLTokenKind::CurlyBraceOpen => Some("{"),
            GraphQLTokenKind::Dollar => Some("$"),
            GraphQLTokenKind::Ellipsis => Some("..."),
            GraphQLTokenKind::Equals => Some("="),
            GraphQLTokenKind::ParenClose => Some(")"),
            GraphQLTokenKind::ParenOpen => Some("("),
            GraphQLTokenKind::Pipe => Some("|"),
            GraphQLTokenKind::SquareBracketClose => Some("]"),
            GraphQLTokenKind::SquareBracketOpen => Some("["),

            GraphQLTokenKind::Name(_)
            | GraphQLTokenKind::IntValue(_)
            | GraphQLTokenKind::FloatValue(_)
            | GraphQLTokenKind::StringValue(_)
            | GraphQLTokenKind::BlockStringValue(_)
            | GraphQLTokenKind::True
            | GraphQLTokenKind::False
            | GraphQLTokenKind::Null
            | GraphQLTokenKind::Eof
            | GraphQLTokenKind::Error { .. } => None,
        }
    }

    pub fn is_punctuator(&self) -> bool {
        self.as_punctuator_str().is_some()
    }

    /// Returns `true` for the literal kinds that can begin a scalar value:
    /// numbers, strings, block strings, `true`, `false` and `null`.
    pub fn is_value(&self) -> bool {
        match self {
            GraphQLTokenKind::IntValue(_)
            | GraphQLTokenKind::FloatValue(_)
            | GraphQLTokenKind::StringValue(_)
            | GraphQLTokenKind::BlockStringValue(_)
            | GraphQLTokenKind::True
            | GraphQLTokenKind::False
            | GraphQLTokenKind::Null => true,

            GraphQLTokenKind::Ampersand
            | GraphQLTokenKind::At
            | GraphQLTokenKind::Bang
            | GraphQLTokenKind::Colon
            | GraphQLTokenKind::CurlyBraceClose
            | GraphQLTokenKind::CurlyBraceOpen
            | GraphQLTokenKind::Dollar
            | GraphQLTokenKind::Ellipsis
            | GraphQLTokenKind::Equals
            | GraphQLTokenKind::ParenClose
            | GraphQLTokenKind::ParenOpen
            | GraphQLTokenKind::Pipe
            | GraphQLTokenKind::SquareBracketClose
            | GraphQLTokenKind::SquareBracketOpen
            | GraphQLTokenKind::Name(_)
            | GraphQLTokenKind::Eof
            | GraphQLTokenKind::Error { .. } => false,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, GraphQLTokenKind::Error { .. })
    }

    /// Parses an `IntValue`'s raw text. `None` for any other kind.
    pub fn parse_int_value(&self) -> Option<Result<i64, ParseIntError>> {
        match self {
            GraphQLTokenKind::IntValue(raw) => Some(raw.parse()),
            _ => None,
        }
    }

    /// Parses a `FloatValue`'s raw text. `None` for any other kind.
    pub fn parse_float_value(&self) -> Option<Result<f64, ParseFloatError>> {
        match self {
            GraphQLTokenKind::FloatValue(raw) => Some(raw.parse()),
            _ => None,
        }
    }

    /// Cooks a `StringValue` or `BlockStringValue` into its content.
    ///
    /// Ordinary strings have their escape sequences (`\n`, `\"`, `\uXXXX`,
    /// `\u{X...}`, ...) processed. Block strings have their common indentation
    /// and leading/trailing blank lines removed and `\"""` unescaped.
    pub fn parse_string_value(&self) -> Option<Result<String, GraphQLStringParsingError>> {
        match self {
            GraphQLTokenKind::StringValue(raw) => Some(parse_single_line_string(raw)),
            GraphQLTokenKind::BlockStringValue(raw) => Some(parse_block_string(raw)),
            _ => None,
        }
    }
}

fn parse_single_line_string(raw: &str) -> Result<String, GraphQLStringParsingError> {
    if raw.len() < 2 || !raw.starts_with('"') || !raw.ends_with('"') {
        return Err(GraphQLStringParsingError::UnterminatedString);
    }
    let content = &raw[1..raw.len() - 1];

    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('/') => result.push('/'),
            Some('b') => result.push('\u{0008}'),
            Some('f') => result.push('\u{000C}'),
            Some('u') => result.push(parse_unicode_escape(&mut chars)?),
            Some(other) => {
                return Err(GraphQLStringParsingError::InvalidEscapeSequence(
                    format!("\\{other}"),
                ));
            },
            None => {
                return Err(GraphQLStringParsingError::InvalidEscapeSequence(
                    "\\".to_string(),
                ));
            },
        }
    }
    Ok(result)
}

/// Decodes the escape following `\u`: either `XXXX` or `{X...}`.
fn parse_unicode_escape(
    chars: &mut std::iter::Peekable<std::str::Chars>,
) -> Result<char, GraphQLStringParsingError> {
    let mut hex = String::with_capacity(4);
    let braced = chars.peek() == Some(&'{');
    if braced {
        chars.next();
        loop {
            match chars.next() {
                Some('}') => break,
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                Some(c) => {
                    return Err(GraphQLStringParsingError::InvalidUnicodeEscape(
                        format!("\\u{{{hex}{c}"),
                    ));
                },
                None => {
                    return Err(GraphQLStringParsingError::InvalidUnicodeEscape(
                        format!("\\u{{{hex}"),
                    ));
                },
            }
        }
    } else {
        for _ in 0..4 {
            match chars.next() {
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                Some(c) => {
                    return Err(GraphQLStringParsingError::InvalidUnicodeEscape(
                        format!("\\u{hex}{c}"),
                    ));
                },
                None => {
                    return Err(GraphQLStringParsingError::InvalidUnicodeEscape(
                        format!("\\u{hex}"),
                    ));
                },
            }
        }
    }

    let invalid = || {
        let shown = if braced { format!("\\u{{{hex}}}") } else { format!("\\u{hex}") };
        GraphQLStringParsingError::InvalidUnicodeEscape(shown)
    };
    if hex.is_empty() {
        return Err(invalid());
    }
    u32::from_str_radix(&hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(invalid)
}

fn parse_block_string(raw: &str) -> Result<String, GraphQLStringParsingError> {
    if raw.len() < 6 || !raw.starts_with("\"\"\"") || !raw.ends_with("\"\"\"") {
        return Err(GraphQLStringParsingError::UnterminatedString);
    }
    let content = raw[3..raw.len() - 3].replace("\\\"\"\"", "\"\"\"");
    let lines: Vec<&str> = content.lines().collect();

    // First line and blank lines don't count towards the common indent.
    let common_indent = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut result_lines: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i > 0 {
                line.get(common_indent..).unwrap_or(line)
            } else {
                line
            }
        })
        .collect();

    while result_lines.first().is_some_and(|l| l.trim().is_empty()) {
        result_lines.remove(0);
    }
    while result_lines.last().is_some_and(|l| l.trim().is_empty()) {
        result_lines.pop();
    }

    Ok(result_lines.join("\n"))
}
