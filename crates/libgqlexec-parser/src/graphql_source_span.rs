use crate::SourcePosition;
use std::path::PathBuf;
use std::sync::Arc;

/// A half-open span `[start_inclusive, end_exclusive)` of source text.
///
/// The optional file path is reference counted since every node parsed from
/// the same file shares it.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct GraphQLSourceSpan {
    pub start_inclusive: SourcePosition,
    pub end_exclusive: SourcePosition,
    pub file_path: Option<Arc<PathBuf>>,
}

impl GraphQLSourceSpan {
    /// Creates a span without file path information.
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self {
            start_inclusive: start,
            end_exclusive: end,
            file_path: None,
        }
    }

    /// Creates a span with file path information.
    pub fn with_file(
        start: SourcePosition,
        end: SourcePosition,
        file_path: Arc<PathBuf>,
    ) -> Self {
        Self {
            start_inclusive: start,
            end_exclusive: end,
            file_path: Some(file_path),
        }
    }

    /// Spans synthesized nodes (builtins, defaults) that have no source.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Returns a new span from the start of `self` to the end of `other`.
    pub fn to(&self, other: &GraphQLSourceSpan) -> GraphQLSourceSpan {
        GraphQLSourceSpan {
            start_inclusive: self.start_inclusive,
            end_exclusive: other.end_exclusive,
            file_path: self.file_path.clone(),
        }
    }

    /// Returns the slice of `source` this span covers, if it is in bounds.
    pub fn source_slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(
            self.start_inclusive.byte_offset()..self.end_exclusive.byte_offset(),
        )
    }

    /// Formats the location as `file:line:col` (or `<input>:line:col`).
    pub fn location_display(&self) -> String {
        let file_name = self
            .file_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<input>".to_string());
        format!("{file_name}:{}", self.start_inclusive)
    }
}
