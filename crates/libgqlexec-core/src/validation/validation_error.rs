use crate::ErrorCategory;
use libgqlexec_parser::ast::DirectiveLocation;
use libgqlexec_parser::GraphQLSourceSpan;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("on condition type `{condition}` is not an object, interface or union type")]
    ConditionNotComposite {
        condition: String,
        span: GraphQLSourceSpan,
    },

    #[error("on condition type `{condition}` does not implement interface `{interface}`")]
    ConditionNotImplemented {
        condition: String,
        interface: String,
        span: GraphQLSourceSpan,
    },

    #[error("on condition type `{condition}` is not a member of union `{union_name}`")]
    ConditionNotMember {
        condition: String,
        union_name: String,
        span: GraphQLSourceSpan,
    },

    #[error("on condition type `{condition}` can never apply to type `{parent}`")]
    ConditionNeverApplies {
        condition: String,
        parent: String,
        span: GraphQLSourceSpan,
    },

    #[error("duplicate field at response path `{path}` (first selected at {})", .first.start_inclusive)]
    DuplicateField {
        path: String,
        span: GraphQLSourceSpan,
        first: GraphQLSourceSpan,
    },

    #[error("fragment cycle: {}", .cycle.join(" -> "))]
    FragmentCycle {
        cycle: Vec<String>,
        span: GraphQLSourceSpan,
    },

    #[error("`{value}` does not fit in a 32-bit `Int`")]
    IntOutOfRange {
        value: i64,
        span: GraphQLSourceSpan,
    },

    #[error("`{value}` is not a value of enum `{enum_name}`")]
    InvalidEnumValue {
        enum_name: String,
        value: String,
        span: GraphQLSourceSpan,
    },

    #[error("list depth mismatch for `{type_name}`: expected {expected} level(s), found {found}")]
    ListDepthMismatch {
        type_name: String,
        expected: u8,
        found: u8,
        span: GraphQLSourceSpan,
    },

    #[error("directive `@{name}` may not be used on {location}")]
    MisplacedDirective {
        name: String,
        location: DirectiveLocation,
        span: GraphQLSourceSpan,
    },

    #[error("argument `{argument}` of `{owner}` must be defined")]
    MissingArgument {
        owner: String,
        argument: String,
        span: GraphQLSourceSpan,
    },

    #[error("field `{field}` of input type `{type_name}` must be defined")]
    MissingInputField {
        type_name: String,
        field: String,
        span: GraphQLSourceSpan,
    },

    #[error("field `{field}` of type `{type_name}` must have a selection of subfields")]
    MissingSelectionSet {
        field: String,
        type_name: String,
        span: GraphQLSourceSpan,
    },

    #[error("variable `${name}` of non-null type `{type_name}` must be defined")]
    MissingVariable {
        name: String,
        type_name: String,
        span: GraphQLSourceSpan,
    },

    #[error("no operation to validate: statement is a fragment")]
    NotAnOperation { span: GraphQLSourceSpan },

    #[error("`{type_name}` cannot be used as an input type")]
    NotInputType {
        type_name: String,
        span: GraphQLSourceSpan,
    },

    #[error("null is not allowed for non-null type `{expected}`")]
    NonNullViolation {
        expected: String,
        span: GraphQLSourceSpan,
    },

    #[error("too many errors (limit {limit}); validation aborted")]
    TooManyErrors { limit: usize },

    #[error("expected `{expected}`, found {found}")]
    TypeMismatch {
        expected: String,
        found: String,
        span: GraphQLSourceSpan,
    },

    #[error("field `{field}` of leaf type `{type_name}` cannot have a selection set")]
    UnexpectedSelectionSet {
        field: String,
        type_name: String,
        span: GraphQLSourceSpan,
    },

    #[error("undefined variable `${name}`")]
    UndefinedVariable {
        name: String,
        span: GraphQLSourceSpan,
    },

    #[error("unknown argument `{argument}` on `{owner}`")]
    UnknownArgument {
        owner: String,
        argument: String,
        span: GraphQLSourceSpan,
    },

    #[error("unknown directive `@{name}`")]
    UnknownDirective {
        name: String,
        span: GraphQLSourceSpan,
    },

    #[error("`{field}` is not a member of type `{type_name}`")]
    UnknownField {
        type_name: String,
        field: String,
        span: GraphQLSourceSpan,
    },

    #[error("unknown fragment `{name}`")]
    UnknownFragment {
        name: String,
        span: GraphQLSourceSpan,
    },

    #[error("`{field}` is not a field of input type `{type_name}`")]
    UnknownInputField {
        type_name: String,
        field: String,
        span: GraphQLSourceSpan,
    },

    #[error("unknown type `{name}`")]
    UnknownType {
        name: String,
        span: GraphQLSourceSpan,
    },
}

impl ValidationError {
    pub fn category(&self) -> ErrorCategory {
        use ValidationError::*;
        match self {
            DuplicateField { .. } => ErrorCategory::DuplicateField,
            MisplacedDirective { .. } => ErrorCategory::DirectiveLocation,
            TooManyErrors { .. } => ErrorCategory::Aborted,
            FragmentCycle { .. }
            | UndefinedVariable { .. }
            | UnknownArgument { .. }
            | UnknownDirective { .. }
            | UnknownField { .. }
            | UnknownFragment { .. }
            | UnknownInputField { .. }
            | UnknownType { .. } => ErrorCategory::UndefinedReference,
            ConditionNotComposite { .. }
            | ConditionNotImplemented { .. }
            | ConditionNotMember { .. }
            | ConditionNeverApplies { .. }
            | IntOutOfRange { .. }
            | InvalidEnumValue { .. }
            | ListDepthMismatch { .. }
            | MissingArgument { .. }
            | MissingInputField { .. }
            | MissingSelectionSet { .. }
            | MissingVariable { .. }
            | NotAnOperation { .. }
            | NotInputType { .. }
            | NonNullViolation { .. }
            | TypeMismatch { .. }
            | UnexpectedSelectionSet { .. } => ErrorCategory::TypeMismatch,
        }
    }

    pub fn span(&self) -> Option<&GraphQLSourceSpan> {
        use ValidationError::*;
        match self {
            TooManyErrors { .. } => None,
            ConditionNotComposite { span, .. }
            | ConditionNotImplemented { span, .. }
            | ConditionNotMember { span, .. }
            | ConditionNeverApplies { span, .. }
            | DuplicateField { span, .. }
            | FragmentCycle { span, .. }
            | IntOutOfRange { span, .. }
            | InvalidEnumValue { span, .. }
            | ListDepthMismatch { span, .. }
            | MisplacedDirective { span, .. }
            | MissingArgument { span, .. }
            | MissingInputField { span, .. }
            | MissingSelectionSet { span, .. }
            | MissingVariable { span, .. }
            | NotAnOperation { span }
            | NotInputType { span, .. }
            | NonNullViolation { span, .. }
            | TypeMismatch { span, .. }
            | UnexpectedSelectionSet { span, .. }
            | UndefinedVariable { span, .. }
            | UnknownArgument { span, .. }
            | UnknownDirective { span, .. }
            | UnknownField { span, .. }
            | UnknownFragment { span, .. }
            | UnknownInputField { span, .. }
            | UnknownType { span, .. } => Some(span),
        }
    }
}
