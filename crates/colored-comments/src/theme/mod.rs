//! Derived color-scheme generation.
//!
//! ```text
//! ThemeStore::read(source)          raw bytes of the active scheme
//!     │
//!     ▼
//! document.rs: ThemeDocument::parse  JSON rules or plist settings
//!     │
//!     ▼
//! merge.rs:    merge_tags            append missing tag entries
//!     │
//!     ▼
//! resolve.rs:  ThemeFileResolver     destination name + write decision
//!     │
//!     ▼
//! ThemeStore::write(destination)     atomic whole-file replace
//! ```

mod document;
mod format;
mod merge;
mod resolve;
mod store;

pub use document::{ThemeDocument, ThemeEntry};
pub use format::ThemeFormat;
pub use merge::{MergeOutcome, merge_tags};
pub use resolve::{
    DEFAULT_SCHEME_PACKAGE, DERIVED_PREFIX, DESTINATION_DIR, Destination, PACKAGES_ROOT,
    ThemeFileResolver, WriteDecision, resolve_source_reference,
};
pub(crate) use store::reference_path;
pub use store::{DirectoryStore, ThemeStore};
