/// Determines the prefix an error note is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphQLErrorNoteKind {
    /// Rendered as `= note: ...`.
    General,

    /// An actionable suggestion. Rendered as `= help: ...`.
    Help,

    /// A link to the relevant section of the GraphQL specification.
    /// Rendered as `= spec: ...`.
    Spec,
}
