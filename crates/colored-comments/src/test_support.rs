//! In-memory collaborators for tests.
//!
//! Only compiled with the `test-support` feature.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::io;

use camino::Utf8Path;

use crate::host::{Dialogs, Preferences};
use crate::theme::ThemeStore;
use crate::theme::reference_path as theme_store_path;

/// A packages tree held in memory, counting every mutation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RefCell<BTreeMap<String, Vec<u8>>>,
    writes: Cell<usize>,
    removals: Cell<usize>,
    fail_removal: Cell<Option<io::ErrorKind>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a resource by reference (`Packages/...`).
    #[must_use]
    pub fn with_resource(self, reference: &str, bytes: impl Into<Vec<u8>>) -> Self {
        if let Some(path) = theme_store_path(reference) {
            self.files.borrow_mut().insert(path.to_string(), bytes.into());
        }
        self
    }

    /// Make every removal fail with `kind`.
    pub fn fail_removals_with(&self, kind: io::ErrorKind) {
        self.fail_removal.set(Some(kind));
    }

    /// Contents of the file at `path`, relative to the packages root.
    #[must_use]
    pub fn file(&self, path: &Utf8Path) -> Option<Vec<u8>> {
        self.files.borrow().get(path.as_str()).cloned()
    }

    /// Number of successful writes.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Number of successful removals.
    #[must_use]
    pub fn removals(&self) -> usize {
        self.removals.get()
    }
}

impl ThemeStore for MemoryStore {
    fn read(&self, reference: &str) -> io::Result<Vec<u8>> {
        theme_store_path(reference)
            .and_then(|path| self.files.borrow().get(path.as_str()).cloned())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, reference.to_owned()))
    }

    fn exists(&self, reference: &str) -> bool {
        theme_store_path(reference)
            .is_some_and(|path| self.files.borrow().contains_key(path.as_str()))
    }

    fn remove(&self, path: &Utf8Path) -> io::Result<()> {
        if let Some(kind) = self.fail_removal.get() {
            return Err(io::Error::new(kind, "removal refused"));
        }
        self.files
            .borrow_mut()
            .remove(path.as_str())
            .map(|_| self.removals.set(self.removals.get() + 1))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
    }

    fn write(&self, path: &Utf8Path, bytes: &[u8]) -> io::Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_string(), bytes.to_vec());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Preferences held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPreferences {
    /// Active color scheme.
    pub color_scheme: Option<String>,
}

impl MemoryPreferences {
    /// Preferences with `reference` active.
    #[must_use]
    pub fn with_scheme(reference: &str) -> Self {
        Self {
            color_scheme: Some(reference.to_owned()),
        }
    }
}

impl Preferences for MemoryPreferences {
    fn color_scheme(&self) -> Option<String> {
        self.color_scheme.clone()
    }

    fn set_color_scheme(&mut self, reference: &str) {
        self.color_scheme = Some(reference.to_owned());
    }

    fn erase_color_scheme(&mut self) {
        self.color_scheme = None;
    }
}

/// Dialogs answering from a script and recording what was shown.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDialogs {
    answers: VecDeque<bool>,
    /// Questions asked, in order.
    pub questions: Vec<String>,
    /// Errors shown, in order.
    pub errors: Vec<String>,
}

impl ScriptedDialogs {
    /// Dialogs answering `answers` in order, then cancel.
    #[must_use]
    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl Dialogs for ScriptedDialogs {
    fn ok_cancel(&mut self, message: &str) -> bool {
        self.questions.push(message.to_owned());
        self.answers.pop_front().unwrap_or(false)
    }

    fn error_message(&mut self, message: &str) {
        self.errors.push(message.to_owned());
    }
}
