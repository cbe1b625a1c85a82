//! Storage for source and derived color schemes.
//!
//! Sources are addressed by resource reference (`Packages/...`); derived
//! schemes by a path relative to the packages root. [`DirectoryStore`]
//! backs both with a directory on disk.

use std::io;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tracing::debug;

use super::resolve::PACKAGES_ROOT;

/// Path of a `Packages/...` reference relative to the packages root.
pub(crate) fn reference_path(reference: &str) -> Option<&Utf8Path> {
    reference
        .strip_prefix(PACKAGES_ROOT)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|rest| !rest.is_empty())
        .map(Utf8Path::new)
}

fn outside_packages(reference: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("'{reference}' is not a {PACKAGES_ROOT}/ reference"),
    )
}

/// Reads source schemes and writes derived ones.
pub trait ThemeStore {
    /// Raw bytes of the resource named by `reference`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the resource is missing or
    /// unreadable.
    fn read(&self, reference: &str) -> io::Result<Vec<u8>>;

    /// Whether `reference` names an existing resource.
    fn exists(&self, reference: &str) -> bool;

    /// Remove the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error, including `NotFound`.
    fn remove(&self, path: &Utf8Path) -> io::Result<()>;

    /// Replace the file at `path` with `bytes` in one step.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn write(&self, path: &Utf8Path, bytes: &[u8]) -> io::Result<()>;
}

/// A packages directory on disk.
#[derive(Debug)]
pub struct DirectoryStore {
    root: Dir,
}

impl DirectoryStore {
    /// Open the packages directory at `location`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the directory cannot be opened.
    pub fn open(location: impl AsRef<Utf8Path>) -> io::Result<Self> {
        let root = Dir::open_ambient_dir(location.as_ref(), ambient_authority())?;
        Ok(Self { root })
    }
}

impl ThemeStore for DirectoryStore {
    fn read(&self, reference: &str) -> io::Result<Vec<u8>> {
        let path = reference_path(reference).ok_or_else(|| outside_packages(reference))?;
        self.root.read(path)
    }

    fn exists(&self, reference: &str) -> bool {
        reference_path(reference).is_some_and(|path| self.root.exists(path))
    }

    fn remove(&self, path: &Utf8Path) -> io::Result<()> {
        self.root.remove_file(path)
    }

    fn write(&self, path: &Utf8Path, bytes: &[u8]) -> io::Result<()> {
        let file_name = path
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "missing file name"))?;
        let parent = path.parent().unwrap_or_else(|| Utf8Path::new(""));
        if !parent.as_str().is_empty() {
            self.root.create_dir_all(parent)?;
        }
        let staging = parent.join(format!(".{file_name}.tmp"));
        self.root.write(&staging, bytes)?;
        if let Err(err) = self.root.rename(&staging, &self.root, path) {
            let _ = self.root.remove_file(&staging);
            return Err(err);
        }
        debug!(%path, bytes = bytes.len(), "wrote color scheme");
        Ok(())
    }
}
