//! A parsed color scheme, independent of its serialisation shape.
//!
//! The entry list is held apart from the rest of the document while it is
//! being extended and put back in its original position on serialisation,
//! so keys the merger does not touch keep their order.

use std::io::Cursor;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use super::format::ThemeFormat;
use crate::error::ThemeError;
use crate::jsonc;

/// One colour rule of a color scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeEntry {
    /// Display name.
    pub name: String,
    /// Scope selector the rule applies to.
    pub scope: String,
    /// Foreground colour.
    pub foreground: String,
    /// Background colour.
    pub background: String,
}

#[derive(Debug, Clone, PartialEq)]
enum Body {
    ColorScheme {
        root: Map<String, Value>,
        rules: Vec<Value>,
    },
    TmTheme {
        root: plist::Dictionary,
        settings: Vec<plist::Value>,
    },
}

/// A color scheme whose entry list can be read, extended and serialised.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeDocument {
    body: Body,
}

impl ThemeDocument {
    /// An empty document of the given format, holding no entries.
    #[must_use]
    pub fn empty(format: ThemeFormat) -> Self {
        let body = match format {
            ThemeFormat::ColorScheme => {
                let mut root = Map::new();
                root.insert(format.entries_key().to_owned(), Value::Array(Vec::new()));
                Body::ColorScheme {
                    root,
                    rules: Vec::new(),
                }
            }
            ThemeFormat::TmTheme => {
                let mut root = plist::Dictionary::new();
                root.insert(
                    format.entries_key().to_owned(),
                    plist::Value::Array(Vec::new()),
                );
                Body::TmTheme {
                    root,
                    settings: Vec::new(),
                }
            }
        };
        Self { body }
    }

    /// Parse raw scheme bytes. `reference` is only used in error messages.
    ///
    /// A document without an entry list gets an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Parse`] for undecodable bytes and
    /// [`ThemeError::MalformedDocument`] when the root is not an object or
    /// the entry list is not an array.
    pub fn parse(format: ThemeFormat, bytes: &[u8], reference: &str) -> Result<Self, ThemeError> {
        let parse_error = |message: String| ThemeError::Parse {
            reference: reference.to_owned(),
            message,
        };
        let malformed = |message: &str| ThemeError::MalformedDocument {
            reference: reference.to_owned(),
            message: message.to_owned(),
        };
        let key = format.entries_key();

        let body = match format {
            ThemeFormat::ColorScheme => {
                let text = std::str::from_utf8(bytes).map_err(|err| parse_error(err.to_string()))?;
                let value: Value = serde_json::from_str(&jsonc::strip(text))
                    .map_err(|err| parse_error(err.to_string()))?;
                let Value::Object(mut root) = value else {
                    return Err(malformed("root must be an object"));
                };
                let slot = root
                    .entry(key)
                    .or_insert_with(|| Value::Array(Vec::new()));
                let Value::Array(rules) = slot else {
                    return Err(malformed("'rules' must be an array"));
                };
                let rules = std::mem::take(rules);
                Body::ColorScheme { root, rules }
            }
            ThemeFormat::TmTheme => {
                let value = plist::Value::from_reader(Cursor::new(bytes))
                    .map_err(|err| parse_error(err.to_string()))?;
                let Some(mut root) = value.into_dictionary() else {
                    return Err(malformed("root must be a dictionary"));
                };
                if root.get(key).is_none() {
                    root.insert(key.to_owned(), plist::Value::Array(Vec::new()));
                }
                let Some(settings) = root.get_mut(key).and_then(plist::Value::as_array_mut) else {
                    return Err(malformed("'settings' must be an array"));
                };
                let settings = std::mem::take(settings);
                Body::TmTheme { root, settings }
            }
        };
        Ok(Self { body })
    }

    /// Serialisation shape of this document.
    #[must_use]
    pub const fn format(&self) -> ThemeFormat {
        match self.body {
            Body::ColorScheme { .. } => ThemeFormat::ColorScheme,
            Body::TmTheme { .. } => ThemeFormat::TmTheme,
        }
    }

    /// Number of entries, including ones without a scope.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.body {
            Body::ColorScheme { rules, .. } => rules.len(),
            Body::TmTheme { settings, .. } => settings.len(),
        }
    }

    /// Whether the entry list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any entry carries exactly this scope.
    #[must_use]
    pub fn has_scope(&self, scope: &str) -> bool {
        self.entries().iter().any(|entry| entry.scope == scope)
    }

    /// Entries as uniform records. Missing fields read as empty strings.
    #[must_use]
    pub fn entries(&self) -> Vec<ThemeEntry> {
        match &self.body {
            Body::ColorScheme { rules, .. } => rules
                .iter()
                .map(|rule| {
                    let field = |key: &str| {
                        rule.get(key)
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_owned()
                    };
                    ThemeEntry {
                        name: field("name"),
                        scope: field("scope"),
                        foreground: field("foreground"),
                        background: field("background"),
                    }
                })
                .collect(),
            Body::TmTheme { settings, .. } => settings
                .iter()
                .map(|item| {
                    let dict = item.as_dictionary();
                    let field = |key: &str| {
                        dict.and_then(|d| d.get(key))
                            .and_then(plist::Value::as_string)
                            .unwrap_or_default()
                            .to_owned()
                    };
                    let colour = |key: &str| {
                        dict.and_then(|d| d.get("settings"))
                            .and_then(plist::Value::as_dictionary)
                            .and_then(|s| s.get(key))
                            .and_then(plist::Value::as_string)
                            .unwrap_or_default()
                            .to_owned()
                    };
                    ThemeEntry {
                        name: field("name"),
                        scope: field("scope"),
                        foreground: colour("foreground"),
                        background: colour("background"),
                    }
                })
                .collect(),
        }
    }

    /// Append an entry in this document's shape.
    ///
    /// JSON schemes carry the colours as direct keys; property lists nest
    /// them under a `settings` dictionary.
    pub fn push_entry(&mut self, entry: &ThemeEntry) {
        match &mut self.body {
            Body::ColorScheme { rules, .. } => {
                let mut rule = Map::new();
                rule.insert("name".to_owned(), Value::String(entry.name.clone()));
                rule.insert("scope".to_owned(), Value::String(entry.scope.clone()));
                rule.insert(
                    "foreground".to_owned(),
                    Value::String(entry.foreground.clone()),
                );
                rule.insert(
                    "background".to_owned(),
                    Value::String(entry.background.clone()),
                );
                rules.push(Value::Object(rule));
            }
            Body::TmTheme { settings, .. } => {
                let mut colours = plist::Dictionary::new();
                colours.insert(
                    "foreground".to_owned(),
                    plist::Value::String(entry.foreground.clone()),
                );
                colours.insert(
                    "background".to_owned(),
                    plist::Value::String(entry.background.clone()),
                );
                let mut item = plist::Dictionary::new();
                item.insert("name".to_owned(), plist::Value::String(entry.name.clone()));
                item.insert(
                    "scope".to_owned(),
                    plist::Value::String(entry.scope.clone()),
                );
                item.insert("settings".to_owned(), plist::Value::Dictionary(colours));
                settings.push(plist::Value::Dictionary(item));
            }
        }
    }

    /// Serialise in the document's own format.
    ///
    /// JSON is indented by four spaces; property lists are written as XML.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Serialise`] if the encoder fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ThemeError> {
        let key = self.format().entries_key().to_owned();
        let mut out = Vec::new();
        match &self.body {
            Body::ColorScheme { root, rules } => {
                let mut root = root.clone();
                root.insert(key, Value::Array(rules.clone()));
                let mut serializer = serde_json::Serializer::with_formatter(
                    &mut out,
                    PrettyFormatter::with_indent(b"    "),
                );
                Value::Object(root)
                    .serialize(&mut serializer)
                    .map_err(|err| ThemeError::Serialise(err.to_string()))?;
            }
            Body::TmTheme { root, settings } => {
                let mut root = root.clone();
                root.insert(key, plist::Value::Array(settings.clone()));
                plist::Value::Dictionary(root)
                    .to_writer_xml(&mut out)
                    .map_err(|err| ThemeError::Serialise(err.to_string()))?;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;

    const MARIANA_LIKE: &str = r##"{
        // Trimmed sample.
        "name": "Mariana",
        "variables": {"blue": "hsl(210, 50%, 60%)"},
        "globals": {"background": "var(blue)"},
        "rules": [
            {"name": "Comment", "scope": "comment", "foreground": "#aaa"},
        ],
    }"##;

    const TMTHEME: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>name</key>
    <string>Old</string>
    <key>settings</key>
    <array>
        <dict>
            <key>settings</key>
            <dict>
                <key>background</key>
                <string>#272822</string>
            </dict>
        </dict>
    </array>
</dict>
</plist>"#;

    fn entry(scope: &str) -> ThemeEntry {
        ThemeEntry {
            name: "[Colored Comments] Orange".to_owned(),
            scope: scope.to_owned(),
            foreground: "#FF8800".to_owned(),
            background: "#000000".to_owned(),
        }
    }

    fn parse(format: ThemeFormat, text: &str) -> ThemeDocument {
        ThemeDocument::parse(format, text.as_bytes(), "test")
            .expect("document should parse")
    }

    #[test]
    fn reads_relaxed_json_schemes() {
        let doc = parse(ThemeFormat::ColorScheme, MARIANA_LIKE);
        assert_eq!(doc.format(), ThemeFormat::ColorScheme);
        assert_eq!(doc.len(), 1);
        assert!(doc.has_scope("comment"));
    }

    #[test]
    fn json_output_keeps_key_order_and_appends_rule() {
        let mut doc = parse(ThemeFormat::ColorScheme, MARIANA_LIKE);
        doc.push_entry(&entry("colored.comments.color.orange"));
        let text = String::from_utf8(doc.to_bytes().expect("serialise")).expect("utf8");
        let name_at = text.find("\"name\": \"Mariana\"");
        let rules_at = text.find("\"rules\"");
        assert!(name_at < rules_at, "rules should stay after name:\n{text}");
        assert!(text.contains("\n    \"globals\""), "four space indent:\n{text}");
        let reparsed = parse(ThemeFormat::ColorScheme, &text);
        assert_eq!(reparsed.len(), 2);
        assert_eq!(reparsed.entries().last(), Some(&entry("colored.comments.color.orange")));
    }

    #[test]
    fn reads_and_extends_property_lists() {
        let mut doc = parse(ThemeFormat::TmTheme, TMTHEME);
        assert_eq!(doc.len(), 1);
        assert!(!doc.has_scope("colored.comments.color.orange"));
        doc.push_entry(&entry("colored.comments.color.orange"));
        let bytes = doc.to_bytes().expect("serialise");
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("<key>scope</key>"));
        let reparsed = ThemeDocument::parse(ThemeFormat::TmTheme, &bytes, "roundtrip")
            .expect("written plist should parse");
        assert_eq!(reparsed.entries().last(), Some(&entry("colored.comments.color.orange")));
    }

    #[test]
    fn missing_entry_list_is_created() {
        let doc = parse(ThemeFormat::ColorScheme, r#"{"name": "Bare"}"#);
        assert!(doc.is_empty());
        let text = String::from_utf8(doc.to_bytes().expect("serialise")).expect("utf8");
        assert!(text.contains("\"rules\": []"));
    }

    #[test]
    fn rejects_non_array_entry_lists() {
        let result = ThemeDocument::parse(ThemeFormat::ColorScheme, br#"{"rules": {}}"#, "bad");
        assert!(matches!(result, Err(ThemeError::MalformedDocument { .. })));
    }

    #[test]
    fn rejects_undecodable_bytes() {
        let result = ThemeDocument::parse(ThemeFormat::TmTheme, b"not a plist", "bad");
        assert!(matches!(result, Err(ThemeError::Parse { .. })));
        let result = ThemeDocument::parse(ThemeFormat::ColorScheme, b"{", "bad");
        assert!(matches!(result, Err(ThemeError::Parse { .. })));
    }

    #[test]
    fn empty_documents_serialise() {
        for format in [ThemeFormat::ColorScheme, ThemeFormat::TmTheme] {
            let doc = ThemeDocument::empty(format);
            let bytes = doc.to_bytes().expect("serialise");
            let reparsed = ThemeDocument::parse(format, &bytes, "empty")
                .unwrap_or_else(|err| panic!("empty {format:?} should parse: {err}"));
            assert_eq!(reparsed, doc);
        }
    }
}
