//! Tag definitions as read from the plugin settings.
//!
//! Decoding is deliberately lenient: the settings file is hand-edited, so a
//! priority written as `"3"` or `2.0` still counts, and style flags only
//! switch on for a literal `true`. A missing `identifier` is not a decode
//! error; it is reported as [`ConfigError::MissingIdentifier`] when the tags
//! are compiled, so the settings are rejected as a whole. An empty
//! identifier is kept and compiles to a matcher that never fires.
//!
//! [`ConfigError::MissingIdentifier`]: crate::ConfigError::MissingIdentifier

use colored_comments_patterns::{IdentifierKind, Priority};
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Placeholder used for any missing colour property.
pub const DEFAULT_COLOR_PROPERTY: &str = "colored_comments_default";

/// Colour block of a tag, used to derive a theme entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColorSpec {
    /// Display name; also the source of the scope identifier.
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// Foreground colour in any notation the editor accepts.
    #[serde(deserialize_with = "lenient_string")]
    pub foreground: Option<String>,
    /// Background colour in any notation the editor accepts.
    #[serde(deserialize_with = "lenient_string")]
    pub background: Option<String>,
}

impl ColorSpec {
    /// Colour name, or the placeholder when unset.
    #[must_use]
    pub fn name_or_default(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_COLOR_PROPERTY)
    }

    /// Foreground colour, or the placeholder when unset.
    #[must_use]
    pub fn foreground_or_default(&self) -> &str {
        self.foreground.as_deref().unwrap_or(DEFAULT_COLOR_PROPERTY)
    }

    /// Background colour, or the placeholder when unset.
    #[must_use]
    pub fn background_or_default(&self) -> &str {
        self.background.as_deref().unwrap_or(DEFAULT_COLOR_PROPERTY)
    }
}

/// A single user-defined comment tag.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TagDefinition {
    /// Literal text or regex body that opens a tagged comment line.
    #[serde(deserialize_with = "identifier_string")]
    pub identifier: Option<String>,
    /// Treat `identifier` as a regular expression.
    #[serde(deserialize_with = "lenient_flag")]
    pub is_regex: bool,
    /// Match precedence; lower values are tried first.
    #[serde(deserialize_with = "lenient_priority")]
    pub priority: Priority,
    /// Colour block used for theme generation.
    pub color: Option<ColorSpec>,
    /// Draw the region as an outline instead of filling it.
    #[serde(deserialize_with = "lenient_flag")]
    pub outline: bool,
    /// Draw a solid underline.
    #[serde(deserialize_with = "lenient_flag")]
    pub underline: bool,
    /// Draw a stippled underline.
    #[serde(deserialize_with = "lenient_flag")]
    pub stippled_underline: bool,
    /// Draw a squiggly underline.
    #[serde(deserialize_with = "lenient_flag")]
    pub squiggly_underline: bool,
    /// Explicit scope overriding the one derived from `color`.
    #[serde(deserialize_with = "lenient_string")]
    pub scope: Option<String>,
}

impl TagDefinition {
    /// Create a literal tag with the given identifier and defaults elsewhere.
    #[must_use]
    pub fn literal(identifier: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
            ..Self::default()
        }
    }

    /// Set the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Priority::new(priority);
        self
    }

    /// Attach a colour block.
    #[must_use]
    pub fn with_color(mut self, name: &str, foreground: &str, background: &str) -> Self {
        self.color = Some(ColorSpec {
            name: Some(name.to_owned()),
            foreground: Some(foreground.to_owned()),
            background: Some(background.to_owned()),
        });
        self
    }

    /// How the identifier is interpreted.
    #[must_use]
    pub const fn identifier_kind(&self) -> IdentifierKind {
        IdentifierKind::from_is_regex(self.is_regex)
    }
}

/// Tag definitions keyed by name, in the order they were written.
///
/// Insertion order matters twice: it breaks priority ties during matching and
/// fixes the order of appended theme entries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct TagMap {
    entries: IndexMap<String, TagDefinition>,
}

impl TagMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a tag. A replaced tag keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, tag: TagDefinition) {
        self.entries.insert(name.into(), tag);
    }

    /// Look up a tag by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TagDefinition> {
        self.entries.get(name)
    }

    /// Iterate tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagDefinition)> {
        self.entries.iter().map(|(name, tag)| (name.as_str(), tag))
    }

    /// Number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no tags are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Equal when both hold the same tags in the same order.
impl PartialEq for TagMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl<N: Into<String>> FromIterator<(N, TagDefinition)> for TagMap {
    fn from_iter<I: IntoIterator<Item = (N, TagDefinition)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, tag)| (name.into(), tag))
                .collect(),
        }
    }
}

/// An identifier is kept verbatim, empty included. `null` counts as absent;
/// any other non-string value is a decode error.
fn identifier_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        Value::Null => Ok(None),
        other => Err(D::Error::custom(format!(
            "identifier must be a string, found {other}"
        ))),
    }
}

pub(crate) fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) if !text.is_empty() => Some(text),
        _ => None,
    })
}

/// Loose truthiness for behaviour switches: `0`, `""`, `null`, `false` and
/// empty containers are off, anything else is on.
pub(crate) fn truthy_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|value| value.abs() > 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    })
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

fn lenient_priority<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Priority, D::Error> {
    Ok(priority_from_value(&Value::deserialize(deserializer)?))
}

/// Coerce a settings value to a priority, defaulting to the lowest.
pub(crate) fn priority_from_value(value: &Value) -> Priority {
    match value {
        Value::Number(number) => number
            .as_i64()
            .map(Priority::new)
            .or_else(|| number.as_f64().map(Priority::from_f64_lenient))
            .unwrap_or(Priority::LOWEST),
        Value::String(text) => Priority::parse_lenient(text),
        _ => Priority::LOWEST,
    }
}
