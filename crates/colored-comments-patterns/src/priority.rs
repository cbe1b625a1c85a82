//! Tag priority ranking.
//!
//! Priorities order compiled tags: lower values are tried first. Anything
//! that cannot be read as an integer ranks last.

use std::fmt;

/// Numeric priority of a tag. Lower values win.
///
/// # Examples
/// ```
/// use colored_comments_patterns::Priority;
/// assert!(Priority::new(1) < Priority::new(5));
/// assert!(Priority::new(5) < Priority::LOWEST);
/// assert_eq!(Priority::parse_lenient(" 7 "), Priority::new(7));
/// assert_eq!(Priority::parse_lenient("soon"), Priority::LOWEST);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(i64);

impl Priority {
    /// Sentinel for tags without a usable priority.
    pub const LOWEST: Self = Self(i64::MAX);

    /// Wrap an explicit priority value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Parse a textual priority, falling back to [`Priority::LOWEST`].
    ///
    /// Surrounding whitespace and a leading sign are accepted; fractional or
    /// otherwise non-integer text is not.
    #[must_use]
    pub fn parse_lenient(text: &str) -> Self {
        text.trim().parse().map_or(Self::LOWEST, Self)
    }

    /// Convert a floating point priority by truncating towards zero.
    ///
    /// Non-finite values fall back to [`Priority::LOWEST`].
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "priorities are truncated like an integer conversion"
    )]
    pub fn from_f64_lenient(value: f64) -> Self {
        if value.is_finite() {
            Self(value.trunc() as i64)
        } else {
            Self::LOWEST
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::LOWEST
    }
}

impl From<i64> for Priority {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::LOWEST {
            f.write_str("lowest")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
