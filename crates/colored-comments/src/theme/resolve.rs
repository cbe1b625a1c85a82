//! Destination naming and the write policy for derived schemes.

use camino::Utf8PathBuf;

/// Root segment of every resource reference.
pub const PACKAGES_ROOT: &str = "Packages";

/// Prefix marking a derived scheme's file name.
pub const DERIVED_PREFIX: &str = "Colored Comments-";

/// Directory, relative to the packages root, receiving derived schemes.
pub const DESTINATION_DIR: &str = "User/Colored Comments";

/// Package holding the editor's bundled schemes.
pub const DEFAULT_SCHEME_PACKAGE: &str = "Packages/Color Scheme - Default";

const DEFAULT_SCHEMES: [&str; 5] = [
    "Mariana.sublime-color-scheme",
    "Celeste.sublime-color-scheme",
    "Monokai.sublime-color-scheme",
    "Breakers.sublime-color-scheme",
    "Sixteen.sublime-color-scheme",
];

/// Expand a bare bundled scheme name into its full reference.
///
/// Preferences may name a bundled scheme without its package; anything else
/// is returned unchanged.
///
/// # Examples
/// ```
/// use colored_comments::theme::resolve_source_reference;
/// assert_eq!(
///     resolve_source_reference("Mariana.sublime-color-scheme"),
///     "Packages/Color Scheme - Default/Mariana.sublime-color-scheme"
/// );
/// assert_eq!(resolve_source_reference("Packages/User/X.tmTheme"), "Packages/User/X.tmTheme");
/// ```
#[must_use]
pub fn resolve_source_reference(scheme: &str) -> String {
    if DEFAULT_SCHEMES.contains(&scheme) {
        format!("{DEFAULT_SCHEME_PACKAGE}/{scheme}")
    } else {
        scheme.to_owned()
    }
}

/// Final path segment of a reference.
fn base_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

/// Where a derived scheme is written and how the editor refers to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// File name, always carrying [`DERIVED_PREFIX`].
    pub base_name: String,
    /// Path relative to the packages root.
    pub path: Utf8PathBuf,
    /// Resource reference as stored in the editor preferences.
    pub reference: String,
}

/// What a generation pass should do with the destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDecision {
    /// Remove any existing file, then write unconditionally.
    Regenerate,
    /// Write the merged document over the destination.
    Write,
    /// Leave the destination alone.
    Skip,
}

/// Decides destination names and whether to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeFileResolver {
    directory: Utf8PathBuf,
}

impl Default for ThemeFileResolver {
    fn default() -> Self {
        Self::new(DESTINATION_DIR)
    }
}

impl ThemeFileResolver {
    /// Resolver writing into `directory`, relative to the packages root.
    #[must_use]
    pub fn new(directory: impl Into<Utf8PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Whether a reference already names a derived scheme.
    #[must_use]
    pub fn is_derived(reference: &str) -> bool {
        base_name(reference).starts_with(DERIVED_PREFIX)
    }

    /// Destination for a scheme derived from `source`.
    ///
    /// The prefix is only added once, so deriving from a derived scheme
    /// reuses its name.
    ///
    /// # Examples
    /// ```
    /// use colored_comments::theme::ThemeFileResolver;
    /// let resolver = ThemeFileResolver::default();
    /// let dest = resolver.destination("Packages/Color Scheme - Default/Mariana.sublime-color-scheme");
    /// assert_eq!(dest.base_name, "Colored Comments-Mariana.sublime-color-scheme");
    /// assert_eq!(
    ///     dest.reference,
    ///     "Packages/User/Colored Comments/Colored Comments-Mariana.sublime-color-scheme"
    /// );
    /// assert_eq!(resolver.destination(&dest.reference), dest);
    /// ```
    #[must_use]
    pub fn destination(&self, source: &str) -> Destination {
        let base = base_name(source);
        let base_name = if base.starts_with(DERIVED_PREFIX) {
            base.to_owned()
        } else {
            format!("{DERIVED_PREFIX}{base}")
        };
        let directory = self.directory.as_str().trim_matches('/');
        let reference = if directory.is_empty() {
            format!("{PACKAGES_ROOT}/{base_name}")
        } else {
            format!("{PACKAGES_ROOT}/{directory}/{base_name}")
        };
        Destination {
            path: self.directory.join(&base_name),
            base_name,
            reference,
        }
    }

    /// Apply the write policy.
    ///
    /// Regeneration always rewrites. Otherwise the file is written when the
    /// merge appended entries or the derived scheme is not yet the active
    /// one, which covers first-time activation.
    #[must_use]
    pub fn decide(
        regenerate: bool,
        changed: bool,
        active: Option<&str>,
        destination: &Destination,
    ) -> WriteDecision {
        if regenerate {
            WriteDecision::Regenerate
        } else if changed || active != Some(destination.reference.as_str()) {
            WriteDecision::Write
        } else {
            WriteDecision::Skip
        }
    }
}
