//! Literal identifier escaping.

/// Characters that stay unescaped when a literal identifier is escaped.
///
/// None of them carry meaning in the generated pattern, so they are emitted
/// verbatim to keep the regex source readable.
pub const LITERAL_PASSTHROUGH: [char; 4] = ['\'', '<', '>', '`'];

/// Escape a literal tag identifier for embedding in a regular expression.
///
/// Every regex metacharacter is backslash-escaped except those listed in
/// [`LITERAL_PASSTHROUGH`]. Escaping happens per character so a literal
/// backslash followed by a passthrough character can never collapse into an
/// escape sequence such as `\<`.
///
/// # Examples
/// ```
/// use colored_comments_patterns::escape_identifier;
/// assert_eq!(escape_identifier("TODO(me).`x`"), r"TODO\(me\)\.`x`");
/// ```
#[must_use]
pub fn escape_identifier(identifier: &str) -> String {
    let mut escaped = String::with_capacity(identifier.len().saturating_mul(2));
    let mut buf = [0u8; 4];
    for ch in identifier.chars() {
        if LITERAL_PASSTHROUGH.contains(&ch) {
            escaped.push(ch);
        } else {
            escaped.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("TODO", "TODO")]
    #[case("TODO:", "TODO:")]
    #[case("FIXME!", "FIXME!")]
    #[case("a.b", r"a\.b")]
    #[case("[x]", r"\[x\]")]
    #[case("*", r"\*")]
    #[case("?", r"\?")]
    #[case("<me>", "<me>")]
    #[case("it's", "it's")]
    #[case("`code`", "`code`")]
    fn escapes_metacharacters_only(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_identifier(input), expected);
    }

    #[test]
    fn backslash_before_passthrough_stays_literal() {
        assert_eq!(escape_identifier(r"\<"), r"\\<");
    }

    #[test]
    fn keeps_non_ascii_identifiers() {
        assert_eq!(escape_identifier("à faire"), "à faire");
    }
}
