//! File-backed host collaborators.
//!
//! The editor keeps the active scheme in a preferences file and asks the
//! user before switching to a derived scheme. On the command line the
//! preferences are a JSON file and the answer comes from `--yes`/`--no`.

use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use colored_comments::host::{Dialogs, Preferences};
use colored_comments::jsonc;
use serde_json::{Map, Value};
use tracing::{error, info};

use crate::error::CliError;

/// Preferences key naming the active scheme.
const COLOR_SCHEME_KEY: &str = "color_scheme";

/// Editor preferences stored as a JSON object.
///
/// Keys other than `color_scheme` are kept as they are.
#[derive(Debug, Clone)]
pub struct JsonPreferences {
    path: Utf8PathBuf,
    values: Map<String, Value>,
    dirty: bool,
}

impl JsonPreferences {
    /// Load preferences from `path`. A missing file reads as empty.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file exists but cannot be read, or
    /// [`CliError::Preferences`] when it is not a JSON object.
    pub fn load(path: &Utf8Path) -> eyre::Result<Self> {
        let values = match fs::read_to_string(path) {
            Ok(text) if text.trim().is_empty() => Map::new(),
            Ok(text) => parse_object(path, &text)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Map::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path: path.to_owned(),
            values,
            dirty: false,
        })
    }

    /// Whether the preferences changed since loading.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the preferences back when they changed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn save(&mut self) -> eyre::Result<()> {
        if !self.is_dirty() {
            return Ok(());
        }
        let mut text = serde_json::to_string_pretty(&self.values)?;
        text.push('\n');
        fs::write(&self.path, text)?;
        self.dirty = false;
        info!(path = %self.path, "saved preferences");
        Ok(())
    }
}

fn parse_object(path: &Utf8Path, text: &str) -> Result<Map<String, Value>, CliError> {
    let invalid = |message: String| CliError::Preferences {
        path: path.to_string(),
        message,
    };
    match serde_json::from_str::<Value>(&jsonc::strip(text)) {
        Ok(Value::Object(values)) => Ok(values),
        Ok(_) => Err(invalid("expected an object".to_owned())),
        Err(err) => Err(invalid(err.to_string())),
    }
}

impl Preferences for JsonPreferences {
    fn color_scheme(&self) -> Option<String> {
        self.values
            .get(COLOR_SCHEME_KEY)
            .and_then(Value::as_str)
            .filter(|scheme| !scheme.is_empty())
            .map(str::to_owned)
    }

    fn set_color_scheme(&mut self, reference: &str) {
        self.values
            .insert(COLOR_SCHEME_KEY.to_owned(), Value::String(reference.to_owned()));
        self.dirty = true;
    }

    fn erase_color_scheme(&mut self) {
        if self.values.remove(COLOR_SCHEME_KEY).is_some() {
            self.dirty = true;
        }
    }
}

/// Dialogs answered up front from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedAnswer {
    accept: bool,
}

impl FixedAnswer {
    /// Answer every question with `accept`.
    #[must_use]
    pub fn new(accept: bool) -> Self {
        Self { accept }
    }
}

impl Dialogs for FixedAnswer {
    fn ok_cancel(&mut self, message: &str) -> bool {
        info!(accepted = self.accept, "{message}");
        self.accept
    }

    fn error_message(&mut self, message: &str) {
        error!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn dir() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().unwrap_or_else(|err| panic!("temp dir: {err}"));
        let path = Utf8PathBuf::from_path_buf(dir.path().join("Preferences.sublime-settings"))
            .unwrap_or_else(|path| panic!("non UTF-8 temp dir {}", path.display()));
        (dir, path)
    }

    #[rstest]
    fn missing_file_reads_as_empty(dir: (TempDir, Utf8PathBuf)) {
        let (_guard, path) = dir;
        let preferences =
            JsonPreferences::load(&path).unwrap_or_else(|err| panic!("load: {err}"));
        assert_eq!(preferences.color_scheme(), None);
        assert!(!preferences.is_dirty());
    }

    #[rstest]
    fn keeps_unrelated_keys(dir: (TempDir, Utf8PathBuf)) {
        let (_guard, path) = dir;
        fs::write(
            &path,
            "{\n  // editor font\n  \"font_size\": 12,\n  \"color_scheme\": \"Mariana.sublime-color-scheme\",\n}\n",
        )
        .unwrap_or_else(|err| panic!("seed: {err}"));

        let mut preferences =
            JsonPreferences::load(&path).unwrap_or_else(|err| panic!("load: {err}"));
        assert_eq!(
            preferences.color_scheme().as_deref(),
            Some("Mariana.sublime-color-scheme")
        );
        preferences.set_color_scheme("Packages/User/X.tmTheme");
        preferences.save().unwrap_or_else(|err| panic!("save: {err}"));

        let saved: Value = serde_json::from_str(
            &fs::read_to_string(&path).unwrap_or_else(|err| panic!("read back: {err}")),
        )
        .unwrap_or_else(|err| panic!("parse back: {err}"));
        assert_eq!(saved.get("font_size"), Some(&Value::from(12)));
        assert_eq!(
            saved.get("color_scheme"),
            Some(&Value::from("Packages/User/X.tmTheme"))
        );
    }

    #[rstest]
    fn rejects_non_objects(dir: (TempDir, Utf8PathBuf)) {
        let (_guard, path) = dir;
        fs::write(&path, "[1, 2]").unwrap_or_else(|err| panic!("seed: {err}"));
        let err = JsonPreferences::load(&path).err();
        assert!(err.is_some_and(|err| err.to_string().contains("expected an object")));
    }

    #[test]
    fn erasing_an_absent_scheme_changes_nothing() {
        let mut preferences = JsonPreferences {
            path: Utf8PathBuf::from("unused"),
            values: Map::new(),
            dirty: false,
        };
        preferences.erase_color_scheme();
        assert!(!preferences.is_dirty());
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn fixed_answer_is_returned(#[case] accept: bool) {
        assert_eq!(FixedAnswer::new(accept).ok_cancel("switch?"), accept);
    }
}
