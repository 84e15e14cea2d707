/// Errors produced while cooking the raw text of a string literal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphQLStringParsingError {
    #[error("invalid escape sequence `{0}`")]
    InvalidEscapeSequence(String),

    #[error("invalid unicode escape `{0}`")]
    InvalidUnicodeEscape(String),

    #[error("unterminated string")]
    UnterminatedString,
}
