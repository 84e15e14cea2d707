//! Tests for `StrGraphQLTokenSource`.

use crate::token::GraphQLTokenKind;
use crate::token_source::StrGraphQLTokenSource;
use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;

fn token_kinds(source: &str) -> Vec<GraphQLTokenKind<'_>> {
    StrGraphQLTokenSource::new(source).map(|t| t.kind).collect()
}

#[test]
fn punctuators() {
    let kinds = token_kinds("{ } ( ) [ ] : = @ ! $ & | ...");
    assert_eq!(
        kinds,
        vec![
            GraphQLTokenKind::CurlyBraceOpen,
            GraphQLTokenKind::CurlyBraceClose,
            GraphQLTokenKind::ParenOpen,
            GraphQLTokenKind::ParenClose,
            GraphQLTokenKind::SquareBracketOpen,
            GraphQLTokenKind::SquareBracketClose,
            GraphQLTokenKind::Colon,
            GraphQLTokenKind::Equals,
            GraphQLTokenKind::At,
            GraphQLTokenKind::Bang,
            GraphQLTokenKind::Dollar,
            GraphQLTokenKind::Ampersand,
            GraphQLTokenKind::Pipe,
            GraphQLTokenKind::Ellipsis,
            GraphQLTokenKind::Eof,
        ],
    );
}

#[test]
fn names_keywords_and_numbers() {
    let kinds = token_kinds("allPersons _x true false null 0 -12 3.5 1e10 -0.5E-3");
    assert_eq!(
        kinds,
        vec![
            GraphQLTokenKind::name_borrowed("allPersons"),
            GraphQLTokenKind::name_borrowed("_x"),
            GraphQLTokenKind::True,
            GraphQLTokenKind::False,
            GraphQLTokenKind::Null,
            GraphQLTokenKind::IntValue(Cow::Borrowed("0")),
            GraphQLTokenKind::IntValue(Cow::Borrowed("-12")),
            GraphQLTokenKind::FloatValue(Cow::Borrowed("3.5")),
            GraphQLTokenKind::FloatValue(Cow::Borrowed("1e10")),
            GraphQLTokenKind::FloatValue(Cow::Borrowed("-0.5E-3")),
            GraphQLTokenKind::Eof,
        ],
    );
}

#[test]
fn strings_keep_their_raw_text() {
    let kinds = token_kinds(r#""a\"b" """block "quoted" text""""#);
    assert_eq!(
        kinds,
        vec![
            GraphQLTokenKind::StringValue(Cow::Borrowed(r#""a\"b""#)),
            GraphQLTokenKind::BlockStringValue(Cow::Borrowed(r#""""block "quoted" text""""#)),
            GraphQLTokenKind::Eof,
        ],
    );
}

#[test]
fn commas_whitespace_and_comments_are_ignored() {
    let kinds = token_kinds("a,,b # comment { }\n\t c");
    assert_eq!(
        kinds,
        vec![
            GraphQLTokenKind::name_borrowed("a"),
            GraphQLTokenKind::name_borrowed("b"),
            GraphQLTokenKind::name_borrowed("c"),
            GraphQLTokenKind::Eof,
        ],
    );
}

#[test]
fn positions_track_lines_and_utf16_columns() {
    let tokens: Vec<_> = StrGraphQLTokenSource::new("a\r\n  \"😀\" b").collect();
    assert_eq!(tokens[0].span.start_inclusive.line(), 0);
    assert_eq!(tokens[1].span.start_inclusive.line(), 1);
    assert_eq!(tokens[1].span.start_inclusive.col_utf8(), 2);
    let b = &tokens[2].span.start_inclusive;
    assert_eq!(b.line(), 1);
    assert_eq!(b.col_utf8(), 6);
    assert_eq!(b.col_utf16(), 7);
}

#[test]
fn spans_carry_the_file_path() {
    let path = Arc::new(PathBuf::from("queries/q.graphql"));
    let tokens: Vec<_> = StrGraphQLTokenSource::with_file_path("{ a }", path.clone()).collect();
    assert!(tokens.iter().all(|t| t.span.file_path.as_ref() == Some(&path)));
    assert_eq!(tokens[1].span.location_display(), "queries/q.graphql:1:3");
}

#[test]
fn number_errors() {
    for source in ["007", "1.5e", "123abc", "-"] {
        let kinds = token_kinds(source);
        assert!(kinds[0].is_error(), "expected an error for `{source}`, got {kinds:?}");
        assert_eq!(kinds.last(), Some(&GraphQLTokenKind::Eof));
    }
}

#[test]
fn dot_errors() {
    let kinds = token_kinds("a . b .. c");
    assert_eq!(kinds.iter().filter(|k| k.is_error()).count(), 2);
    assert!(kinds[1].is_error());
    assert!(kinds[3].is_error());
}

#[test]
fn unterminated_strings_are_fatal() {
    for source in ["\"abc\n\"", "\"\"\"never closed"] {
        let kinds = token_kinds(source);
        assert!(
            matches!(kinds[0], GraphQLTokenKind::Error { fatal: true, .. }),
            "expected a fatal error for {source:?}, got {kinds:?}",
        );
    }
}

#[test]
fn invisible_characters_are_named() {
    let kinds = token_kinds("a \u{200B} b");
    let GraphQLTokenKind::Error { message, fatal, .. } = &kinds[1] else {
        panic!("expected an error token, got {kinds:?}");
    };
    assert!(!fatal);
    assert!(message.contains("ZERO WIDTH SPACE"), "got {message}");
}

#[test]
fn iterator_stops_after_eof() {
    let mut source = StrGraphQLTokenSource::new("");
    assert_eq!(source.next().map(|t| t.kind), Some(GraphQLTokenKind::Eof));
    assert!(source.next().is_none());
}
