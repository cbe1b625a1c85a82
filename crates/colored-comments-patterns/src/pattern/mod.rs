//! Anchored tag-regex construction and compilation.

mod compiler;

use crate::errors::PatternError;
use regex::Regex;

pub use compiler::{IdentifierKind, build_tag_regex};

/// Build and compile the matcher for a tag identifier.
///
/// # Errors
/// Returns [`PatternError`] when the generated regex source cannot be
/// compiled, which only happens for malformed [`IdentifierKind::Regex`]
/// identifiers.
pub fn compile_tag_regex(identifier: &str, kind: IdentifierKind) -> Result<Regex, PatternError> {
    let pattern = build_tag_regex(identifier, kind);
    Regex::new(&pattern).map_err(|source| PatternError::Regex { pattern, source })
}
