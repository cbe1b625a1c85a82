//! Serialisation shape of a color scheme, chosen by file extension.

use crate::error::ThemeError;

/// The two color-scheme shapes the merger understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeFormat {
    /// `.sublime-color-scheme`: JSON with a top-level `rules` array.
    ColorScheme,
    /// `.tmTheme`: property list with a top-level `settings` array.
    TmTheme,
}

impl ThemeFormat {
    /// Detect the format from a scheme reference's extension.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::UnsupportedFormat`] for any other extension.
    ///
    /// # Examples
    /// ```
    /// use colored_comments::theme::ThemeFormat;
    /// assert_eq!(
    ///     ThemeFormat::from_reference("Packages/X/Mariana.sublime-color-scheme").ok(),
    ///     Some(ThemeFormat::ColorScheme)
    /// );
    /// assert!(ThemeFormat::from_reference("Packages/X/Theme.json").is_err());
    /// ```
    pub fn from_reference(reference: &str) -> Result<Self, ThemeError> {
        if reference.ends_with(".sublime-color-scheme") {
            Ok(Self::ColorScheme)
        } else if reference.ends_with(".tmTheme") {
            Ok(Self::TmTheme)
        } else {
            Err(ThemeError::UnsupportedFormat {
                reference: reference.to_owned(),
            })
        }
    }

    /// Top-level key holding the entry list.
    #[must_use]
    pub const fn entries_key(self) -> &'static str {
        match self {
            Self::ColorScheme => "rules",
            Self::TmTheme => "settings",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Mariana.sublime-color-scheme", Some(ThemeFormat::ColorScheme))]
    #[case("Packages/User/Old.tmTheme", Some(ThemeFormat::TmTheme))]
    #[case("Packages/User/Old.tmtheme", None)]
    #[case("Packages/User/Old.sublime-color-schem", None)]
    #[case("", None)]
    fn detects_by_extension(#[case] reference: &str, #[case] expected: Option<ThemeFormat>) {
        assert_eq!(ThemeFormat::from_reference(reference).ok(), expected);
    }

    #[test]
    fn entries_keys_differ_per_format() {
        assert_eq!(ThemeFormat::ColorScheme.entries_key(), "rules");
        assert_eq!(ThemeFormat::TmTheme.entries_key(), "settings");
    }
}
