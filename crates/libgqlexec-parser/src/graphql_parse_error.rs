use crate::GraphQLErrorNote;
use crate::GraphQLErrorNotes;
use crate::GraphQLParseErrorKind;
use crate::GraphQLSourceSpan;

/// A parse error with location information and contextual notes.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", self.format_oneline())]
pub struct GraphQLParseError {
    /// Human-readable primary message, e.g. "expected `:`, found `String`".
    message: String,

    /// Where the error was detected. For "expected X" errors this is the
    /// token found in place of X.
    span: GraphQLSourceSpan,

    kind: GraphQLParseErrorKind,

    notes: GraphQLErrorNotes,
}

impl GraphQLParseError {
    pub fn new(
        message: impl Into<String>,
        span: GraphQLSourceSpan,
        kind: GraphQLParseErrorKind,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            notes: GraphQLErrorNotes::new(),
        }
    }

    pub fn with_notes(
        message: impl Into<String>,
        span: GraphQLSourceSpan,
        kind: GraphQLParseErrorKind,
        notes: GraphQLErrorNotes,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            notes,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> &GraphQLSourceSpan {
        &self.span
    }

    pub fn kind(&self) -> &GraphQLParseErrorKind {
        &self.kind
    }

    pub fn notes(&self) -> &GraphQLErrorNotes {
        &self.notes
    }

    pub fn add_note(&mut self, message: impl Into<String>) {
        self.notes.push(GraphQLErrorNote::general(message));
    }

    pub fn add_note_with_span(&mut self, message: impl Into<String>, span: GraphQLSourceSpan) {
        self.notes.push(GraphQLErrorNote::general_with_span(message, span));
    }

    pub fn add_help(&mut self, message: impl Into<String>) {
        self.notes.push(GraphQLErrorNote::help(message));
    }

    pub fn add_spec(&mut self, url: impl Into<String>) {
        self.notes.push(GraphQLErrorNote::spec(url));
    }

    /// Formats this error as a multi-line diagnostic for CLI output:
    ///
    /// ```text
    /// error: expected `:`, found `String`
    ///   --> query.graphql:5:12
    ///    |
    ///  5 |     $limit Int
    ///    |            ^^^
    ///    = help: variable definitions are written `$name: Type`
    /// ```
    ///
    /// Snippets are omitted when `source` is `None`.
    pub fn format_detailed(&self, source: Option<&str>) -> String {
        let mut output = String::new();
        output.push_str("error: ");
        output.push_str(&self.message);
        output.push('\n');
        output.push_str(&format!("  --> {}\n", self.span.location_display()));

        if let Some(src) = source
            && let Some(snippet) = format_source_snippet(src, &self.span)
        {
            output.push_str(&snippet);
        }

        for note in &self.notes {
            output.push_str(&format!("   = {}: {}\n", note.prefix(), note.message));
            if let (Some(note_span), Some(src)) = (&note.span, source)
                && let Some(snippet) = format_source_snippet(src, note_span)
            {
                output.push_str(&snippet);
            }
        }

        output
    }

    /// Formats this error as `file:line:col: error: message`.
    pub fn format_oneline(&self) -> String {
        format!("{}: error: {}", self.span.location_display(), self.message)
    }
}

fn format_source_snippet(source: &str, span: &GraphQLSourceSpan) -> Option<String> {
    let line_num = span.start_inclusive.line();
    let line_content = source.lines().nth(line_num)?;
    let display_line_num = line_num + 1;
    let width = display_line_num.to_string().len().max(2);

    let col_start = span.start_inclusive.col_utf8();
    let underline_len =
        if span.end_exclusive.line() == line_num
            && span.end_exclusive.col_utf8() > col_start {
            span.end_exclusive.col_utf8() - col_start
        } else {
            1
        };

    let mut output = String::new();
    output.push_str(&format!("{:>width$} |\n", ""));
    output.push_str(&format!("{display_line_num:>width$} | {line_content}\n"));
    output.push_str(&format!(
        "{:>width$} | {:>col_start$}{}\n",
        "",
        "",
        "^".repeat(underline_len),
    ));
    Some(output)
}
