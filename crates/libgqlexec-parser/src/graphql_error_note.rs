use crate::GraphQLErrorNoteKind;
use crate::GraphQLSourceSpan;
use crate::SmallVec;

/// Additional context attached to an error: an explanation, a suggestion, a
/// spec link or a pointer to a related source location.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQLErrorNote {
    pub kind: GraphQLErrorNoteKind,
    pub message: String,
    pub span: Option<GraphQLSourceSpan>,
}

impl GraphQLErrorNote {
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            kind: GraphQLErrorNoteKind::General,
            message: message.into(),
            span: None,
        }
    }

    pub fn general_with_span(message: impl Into<String>, span: GraphQLSourceSpan) -> Self {
        Self {
            kind: GraphQLErrorNoteKind::General,
            message: message.into(),
            span: Some(span),
        }
    }

    pub fn help(message: impl Into<String>) -> Self {
        Self {
            kind: GraphQLErrorNoteKind::Help,
            message: message.into(),
            span: None,
        }
    }

    pub fn spec(url: impl Into<String>) -> Self {
        Self {
            kind: GraphQLErrorNoteKind::Spec,
            message: url.into(),
            span: None,
        }
    }

    /// The `= note:`/`= help:`/`= spec:` prefix used when rendering.
    pub fn prefix(&self) -> &'static str {
        match self.kind {
            GraphQLErrorNoteKind::General => "note",
            GraphQLErrorNoteKind::Help => "help",
            GraphQLErrorNoteKind::Spec => "spec",
        }
    }
}

/// Most errors carry 0-2 notes.
pub type GraphQLErrorNotes = SmallVec<[GraphQLErrorNote; 2]>;
