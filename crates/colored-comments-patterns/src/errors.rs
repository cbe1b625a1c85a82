//! Error types shared by the pattern compilation modules.

use thiserror::Error;

/// Errors surfaced while converting tag identifiers into regular expressions.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The generated regular expression source failed to compile.
    #[error("invalid tag pattern '{pattern}': {source}")]
    Regex {
        /// Anchored regex source that was rejected.
        pattern: String,
        /// The underlying compilation error.
        #[source]
        source: regex::Error,
    },
}

impl PatternError {
    /// The regex source that failed to compile.
    ///
    /// # Examples
    /// ```
    /// use colored_comments_patterns::{IdentifierKind, compile_tag_regex};
    /// let err = compile_tag_regex("(", IdentifierKind::Regex).err();
    /// assert_eq!(err.as_ref().map(|err| err.pattern()), Some(r"^(()[ \t]+(?:.*)"));
    /// ```
    #[must_use]
    pub fn pattern(&self) -> &str {
        match self {
            Self::Regex { pattern, .. } => pattern,
        }
    }
}
