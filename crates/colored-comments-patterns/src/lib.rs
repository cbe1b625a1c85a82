//! Tag identifier compilation utilities for colored-comments.
//!
//! The crate turns the `identifier` of a user-defined comment tag into an
//! anchored regular expression and ranks tags by priority. The runtime crate
//! builds its ordered matcher set on top of these helpers so the escaping and
//! anchoring rules live in exactly one place.

mod errors;
mod escape;
mod pattern;
mod priority;

pub use errors::PatternError;
pub use escape::{LITERAL_PASSTHROUGH, escape_identifier};
pub use pattern::{IdentifierKind, build_tag_regex, compile_tag_regex};
pub use priority::Priority;
