//! Tests for `GraphQLParseError` rendering.

use crate::tests::utils::parse_errors;
use crate::GraphQLErrorNoteKind;
use crate::GraphQLParseError;
use crate::GraphQLParseErrorKind;
use crate::GraphQLSourceSpan;
use crate::SourcePosition;

#[test]
fn oneline_format_uses_one_based_location() {
    let errors = parse_errors("{\n  a(x: )\n}");
    let line = errors[0].format_oneline();
    assert!(line.starts_with("<input>:2:"), "got {line}");
    assert!(line.contains("error: expected value"), "got {line}");
}

#[test]
fn detailed_format_includes_snippet_and_notes() {
    let source = "query Q {\n  a\n";
    let errors = parse_errors(source);
    let detailed = errors[0].format_detailed(Some(source));
    assert!(detailed.starts_with("error: unclosed `{`"), "got {detailed}");
    assert!(detailed.contains("= note: opening `{` in selection set here"), "got {detailed}");
    assert!(detailed.contains("query Q {"), "got {detailed}");
}

#[test]
fn detailed_format_without_source_omits_snippet() {
    let pos = SourcePosition::new(3, 4, 4, 40);
    let mut error = GraphQLParseError::new(
        "something went wrong",
        GraphQLSourceSpan::new(pos, pos),
        GraphQLParseErrorKind::InvalidSyntax,
    );
    error.add_help("try something else");
    let detailed = error.format_detailed(None);
    assert_eq!(
        detailed,
        "error: something went wrong\n  --> <input>:4:5\n   = help: try something else\n",
    );
    assert_eq!(error.notes()[0].kind, GraphQLErrorNoteKind::Help);
}
