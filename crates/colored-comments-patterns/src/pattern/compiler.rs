//! Convert tag identifiers into anchored regular-expression sources.

use crate::escape::escape_identifier;

/// How a tag's `identifier` should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierKind {
    /// Match the identifier text literally.
    #[default]
    Literal,
    /// Use the identifier verbatim as a regular-expression body.
    Regex,
}

impl IdentifierKind {
    /// Select the kind from a tag's `is_regex` flag.
    #[must_use]
    pub const fn from_is_regex(is_regex: bool) -> Self {
        if is_regex { Self::Regex } else { Self::Literal }
    }
}

/// Build the anchored regular expression for a tag identifier.
///
/// The identifier is captured in group 1, must be followed by at least one
/// space or tab, and any remaining text on the line is accepted. Callers
/// match against trimmed line text, so leading whitespace never reaches the
/// `^` anchor.
///
/// # Examples
/// ```
/// use colored_comments_patterns::{IdentifierKind, build_tag_regex};
/// assert_eq!(
///     build_tag_regex("TODO.", IdentifierKind::Literal),
///     r"^(TODO\.)[ \t]+(?:.*)"
/// );
/// assert_eq!(
///     build_tag_regex(r"FIX(ME)?", IdentifierKind::Regex),
///     r"^(FIX(ME)?)[ \t]+(?:.*)"
/// );
/// ```
#[must_use]
pub fn build_tag_regex(identifier: &str, kind: IdentifierKind) -> String {
    let body = match kind {
        IdentifierKind::Literal => escape_identifier(identifier),
        IdentifierKind::Regex => identifier.to_owned(),
    };
    let mut regex = String::with_capacity(body.len() + 16);
    regex.push_str("^(");
    regex.push_str(&body);
    regex.push_str(r")[ \t]+(?:.*)");
    regex
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(false, IdentifierKind::Literal)]
    #[case(true, IdentifierKind::Regex)]
    fn selects_kind_from_flag(#[case] is_regex: bool, #[case] expected: IdentifierKind) {
        assert_eq!(IdentifierKind::from_is_regex(is_regex), expected);
    }

    #[test]
    fn wraps_literal_identifier() {
        assert_eq!(
            build_tag_regex("NOTE", IdentifierKind::Literal),
            r"^(NOTE)[ \t]+(?:.*)"
        );
    }

    #[test]
    fn leaves_passthrough_characters_unescaped() {
        let source = build_tag_regex("`x`.<y>'", IdentifierKind::Literal);
        assert_eq!(source, r"^(`x`\.<y>')[ \t]+(?:.*)");
        assert!(!source.contains(r"\`"));
    }

    #[test]
    fn regex_identifiers_are_not_escaped() {
        assert_eq!(
            build_tag_regex(r"\d+\.", IdentifierKind::Regex),
            r"^(\d+\.)[ \t]+(?:.*)"
        );
    }
}
