//! Semantic error types for compilation and theme generation.
//!
//! Configuration problems abort a compilation pass; theme problems abort a
//! generation pass. Neither is recoverable mid-pass, so both are returned to
//! the caller rather than logged and swallowed.

use camino::Utf8PathBuf;
use colored_comments_patterns::PatternError;
use thiserror::Error;

/// Errors raised while reading settings or compiling tag definitions.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A tag definition has no `identifier` to match against.
    #[error("tag '{tag}' is missing its required 'identifier'")]
    MissingIdentifier {
        /// Name of the offending tag.
        tag: String,
    },

    /// A regex identifier failed to compile.
    #[error("tag '{tag}' has an invalid pattern '{pattern}'")]
    InvalidPattern {
        /// Name of the offending tag.
        tag: String,
        /// Regular-expression source that failed to compile.
        pattern: String,
        /// The underlying compilation error.
        #[source]
        source: PatternError,
    },

    /// A tag declares neither a `color` block nor an explicit `scope`.
    #[error("tag '{tag}' needs either a 'color' block or an explicit 'scope'")]
    MissingScope {
        /// Name of the offending tag.
        tag: String,
    },

    /// The settings document could not be decoded.
    #[error("invalid settings: {0}")]
    Parse(String),
}

/// Errors raised during a theme generation pass.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The source color scheme could not be read.
    #[error("failed to read color scheme '{reference}': {source}")]
    SourceRead {
        /// Resource reference that was requested.
        reference: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The source color scheme bytes are not a valid document.
    #[error("failed to parse color scheme '{reference}': {message}")]
    Parse {
        /// Resource reference that was parsed.
        reference: String,
        /// Decoder diagnostic.
        message: String,
    },

    /// The source color scheme has a shape the merger cannot extend.
    #[error("malformed color scheme '{reference}': {message}")]
    MalformedDocument {
        /// Resource reference that was parsed.
        reference: String,
        /// What was wrong with the document.
        message: String,
    },

    /// The reference is neither a `.sublime-color-scheme` nor a `.tmTheme`.
    #[error("unsupported color scheme format '{reference}'")]
    UnsupportedFormat {
        /// The rejected reference.
        reference: String,
    },

    /// Serialising the merged document failed.
    #[error("failed to serialise color scheme: {0}")]
    Serialise(String),

    /// Writing the derived color scheme failed.
    #[error("failed to write '{path}': {source}")]
    Write {
        /// Destination that could not be written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
