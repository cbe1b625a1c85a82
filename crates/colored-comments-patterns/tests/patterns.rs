//! Public API smoke tests for tag identifier compilation.
#![expect(clippy::expect_used, reason = "test asserts conversion path")]

use regex::Regex;

use colored_comments_patterns::{
    IdentifierKind, PatternError, Priority, build_tag_regex, compile_tag_regex, escape_identifier,
};

#[test]
fn compile_tag_regex_smoke_test() {
    let regex = compile_tag_regex("TODO", IdentifierKind::Literal)
        .expect("identifier should compile into regex");
    assert!(regex.is_match("TODO fix this"));

    assert!(
        compile_tag_regex("[unclosed", IdentifierKind::Regex).is_err(),
        "malformed regex identifier should fail to compile"
    );
}

#[test]
fn literal_dot_is_not_a_wildcard() {
    let source = build_tag_regex("v1.`2`", IdentifierKind::Literal);
    assert!(!source.contains(r"\`"), "backtick must stay unescaped");
    let regex = Regex::new(&source).expect("regex should compile");
    assert!(regex.is_match("v1.`2` released"));
    assert!(!regex.is_match("v1x`2` released"));
}

#[test]
fn captures_the_identifier() {
    let regex = compile_tag_regex(r"TODO\((\w+)\)", IdentifierKind::Regex)
        .expect("identifier should compile");
    let captures = regex
        .captures("TODO(sam) rename the module")
        .expect("line should match");
    assert_eq!(
        captures.get(1).map(|m| m.as_str()),
        Some("TODO(sam)"),
        "group one holds the full identifier"
    );
}

#[test]
fn exposes_regex_error_details() {
    let Err(err) = compile_tag_regex("(", IdentifierKind::Regex) else {
        panic!("expected regex error");
    };
    let PatternError::Regex { pattern, source } = err;
    assert_eq!(pattern, r"^(()[ \t]+(?:.*)");
    assert!(matches!(source, regex::Error::Syntax(_)));
}

#[test]
fn escaping_is_idempotent_for_plain_words() {
    assert_eq!(escape_identifier("HACK"), "HACK");
}

#[test]
fn priorities_sort_ascending_with_lowest_last() {
    let mut priorities = vec![Priority::LOWEST, Priority::new(5), Priority::new(-1)];
    priorities.sort();
    assert_eq!(
        priorities,
        vec![Priority::new(-1), Priority::new(5), Priority::LOWEST]
    );
}
