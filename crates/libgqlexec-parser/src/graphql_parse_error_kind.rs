/// Categorizes parse errors for programmatic handling.
///
/// The `#[error(...)]` messages are short and programmatic. The full
/// human-readable message lives in `GraphQLParseError::message()`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphQLParseErrorKind {
    /// The grammar called for one of `expected` but something else was
    /// found.
    #[error("unexpected token: `{found}`")]
    UnexpectedToken {
        expected: Vec<String>,
        found: String,
    },

    #[error("unexpected end of input")]
    UnexpectedEof {
        expected: Vec<String>,
    },

    /// The lexer produced an error token. The lexer's message and notes are
    /// carried on the parent error.
    #[error("lexer error")]
    LexerError,

    /// A string literal ran to the end of its line (or of the input). The
    /// token stream cannot be resynchronized after this, so parsing stops.
    #[error("unterminated string")]
    UnterminatedString,

    /// A delimiter was opened and the input ended before it was closed.
    #[error("unclosed delimiter: `{delimiter}`")]
    UnclosedDelimiter {
        delimiter: String,
    },

    /// The number of `[` and `]` in a type reference disagree.
    #[error("mismatched delimiter")]
    MismatchedDelimiter {
        expected: String,
        found: String,
    },

    /// A type reference nests lists deeper than `TypeRef::MAX_DEPTH`.
    #[error("list type nested {depth} levels deep")]
    ListDepthExceeded {
        depth: usize,
    },

    /// A numeric literal or string escape could not be decoded.
    #[error("invalid value: `{raw}`")]
    InvalidValue {
        raw: String,
    },

    /// `$name` is used inside an operation that never declares it.
    #[error("undefined variable: `${name}`")]
    UndefinedVariable {
        name: String,
    },

    /// An operation declares the same variable twice.
    #[error("duplicate variable: `${name}`")]
    DuplicateVariable {
        name: String,
    },

    /// Two operations or fragments (or two fields of one schema type) share
    /// a name.
    #[error("duplicate definition: `{name}`")]
    DuplicateDefinition {
        name: String,
    },

    /// A schema construct this parser deliberately does not support, such as
    /// `schema { ... }` blocks and `extend` definitions.
    #[error("unsupported definition: `{keyword}`")]
    UnsupportedDefinition {
        keyword: String,
    },

    /// `on` used as a fragment name, or `true`/`false`/`null` used as an
    /// enum value.
    #[error("reserved name: `{name}`")]
    ReservedName {
        name: String,
    },

    /// A definition that is not allowed in the kind of document being
    /// parsed (e.g. `type Foo` inside an executable document).
    #[error("wrong document kind: found {found}")]
    WrongDocumentKind {
        found: String,
    },

    /// `{}` selection sets and `()` argument lists are not allowed.
    #[error("invalid empty construct: `{construct}`")]
    InvalidEmptyConstruct {
        construct: String,
    },

    #[error("maximum nesting depth exceeded")]
    RecursionLimitExceeded,

    /// Catch-all; the message carries the details.
    #[error("invalid syntax")]
    InvalidSyntax,
}
