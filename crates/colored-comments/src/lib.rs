//! Tag-driven comment highlighting and derived color-scheme generation.
//!
//! Users describe comment tags (`TODO:`, `!`, `?`, ...) in the plugin
//! settings. This crate turns those descriptions into two things:
//!
//! - an ordered matcher set that assigns each comment line to at most one
//!   tag, plus the scope and draw flags the renderer needs, and
//! - colour rules merged into a copy of the active color scheme so the
//!   renderer has something to look those scopes up in.
//!
//! # Overview
//!
//! ```text
//! Settings ──► compile_tags ──► CompiledTags ──► classify ──► Classification
//!     │                                                            │
//!     ├──────► DecorationPlan ─────────────────────────► apply ◄───┘
//!     │
//!     └──────► merge_tags(ThemeDocument) ──► ThemeFileResolver ──► ThemeStore
//! ```
//!
//! Finding comment regions, storing settings and showing dialogs belong to
//! the host editor; they are reached through [`CommentSource`],
//! [`host::Preferences`], [`host::Dialogs`] and [`theme::ThemeStore`].
//!
//! # Example
//!
//! ```
//! use colored_comments::{ColoredComments, CommentSource, LineCommentSource, Settings, comment_lines};
//!
//! let settings = Settings::from_json(r##"{
//!     "continued_matching": true,
//!     "tags": {
//!         "Todo": {"identifier": "TODO:", "color": {"name": "Orange", "foreground": "#f80"}}
//!     }
//! }"##)?;
//! let context = ColoredComments::new(settings)?;
//!
//! let buffer = "// TODO: fix\n// - detail\n// plain\n";
//! let source = LineCommentSource::default();
//! let lines = comment_lines(buffer, &source.comment_regions(buffer));
//! let decorations = context.decorate(&lines);
//! assert_eq!(decorations.len(), 1);
//! assert_eq!(decorations[0].regions.len(), 2);
//! assert_eq!(decorations[0].scope, "colored.comments.color.orange");
//! # Ok::<(), colored_comments::ConfigError>(())
//! ```

mod classify;
mod compile;
mod context;
mod decorate;
mod error;
pub mod host;
pub mod jsonc;
pub mod scope;
mod settings;
mod source;
mod tags;
pub mod theme;

/// In-memory collaborators for unit and integration tests.
///
/// This module is hidden from documentation as it's intended for test use
/// only.
#[cfg(feature = "test-support")]
#[doc(hidden)]
pub mod test_support;

pub use classify::{Classification, CommentLine, Span, classify};
pub use compile::{CompiledTag, CompiledTags, compile_tags};
pub use context::{ColoredComments, DEFAULT_COLOR_SCHEME, GenerationReport};
pub use decorate::{Decoration, DecorationPlan, StyleFlags, TagStyle, resolve_scope};
pub use error::{ConfigError, ThemeError};
pub use settings::Settings;
pub use source::{CommentSource, LineCommentSource, comment_lines};
pub use tags::{ColorSpec, DEFAULT_COLOR_PROPERTY, TagDefinition, TagMap};
