//! Plugin settings: tag definitions plus behaviour switches.
//!
//! The typed view is read wholesale at the start of every pass. The raw
//! document is kept alongside it so settings written back by the plugin
//! (the remembered color scheme, the prompt switch) do not lose keys the
//! plugin does not know about.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::jsonc;
use crate::tags::{TagMap, lenient_string, truthy_flag};

const KEY_OLD_COLOR_SCHEME: &str = "old_color_scheme";
const KEY_PROMPT_NEW_COLOR_SCHEME: &str = "prompt_new_color_scheme";

const fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
struct SettingsView {
    #[serde(default)]
    tags: TagMap,
    #[serde(default, deserialize_with = "truthy_flag")]
    continued_matching: bool,
    #[serde(default = "default_true", deserialize_with = "truthy_flag")]
    prompt_new_color_scheme: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    old_color_scheme: Option<String>,
}

/// Settings for a compilation, classification or theme pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    tags: TagMap,
    continued_matching: bool,
    prompt_new_color_scheme: bool,
    old_color_scheme: Option<String>,
    raw: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tags: TagMap::default(),
            continued_matching: false,
            prompt_new_color_scheme: true,
            old_color_scheme: None,
            raw: Map::new(),
        }
    }
}

impl Settings {
    /// Decode settings from relaxed JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not a JSON object or a
    /// known key has the wrong shape.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(&jsonc::strip(text))
            .map_err(|err| ConfigError::Parse(err.to_string()))?;
        Self::from_value(value)
    }

    /// Decode settings from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the value is not an object or a
    /// known key has the wrong shape.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let Value::Object(raw) = value else {
            return Err(ConfigError::Parse(
                "settings must be a JSON object".to_owned(),
            ));
        };
        let view = SettingsView::deserialize(Value::Object(raw.clone()))
            .map_err(|err| ConfigError::Parse(err.to_string()))?;
        Ok(Self {
            tags: view.tags,
            continued_matching: view.continued_matching,
            prompt_new_color_scheme: view.prompt_new_color_scheme,
            old_color_scheme: view.old_color_scheme.filter(|scheme| !scheme.is_empty()),
            raw,
        })
    }

    /// Settings with the given tags and defaults elsewhere.
    #[must_use]
    pub fn with_tags(tags: TagMap) -> Self {
        Self {
            tags,
            ..Self::default()
        }
    }

    /// Enable or disable continuation matching.
    #[must_use]
    pub fn with_continued_matching(mut self, enabled: bool) -> Self {
        self.continued_matching = enabled;
        self
    }

    /// Tag definitions in document order.
    #[must_use]
    pub fn tags(&self) -> &TagMap {
        &self.tags
    }

    /// Whether a `-` line continues the previously tagged line.
    #[must_use]
    pub fn continued_matching(&self) -> bool {
        self.continued_matching
    }

    /// Whether the user may be asked to switch to the derived scheme.
    #[must_use]
    pub fn prompt_new_color_scheme(&self) -> bool {
        self.prompt_new_color_scheme
    }

    /// The scheme that was active before the derived one was generated.
    #[must_use]
    pub fn old_color_scheme(&self) -> Option<&str> {
        self.old_color_scheme.as_deref()
    }

    /// Update the prompt switch.
    pub fn set_prompt_new_color_scheme(&mut self, enabled: bool) {
        self.prompt_new_color_scheme = enabled;
        self.raw
            .insert(KEY_PROMPT_NEW_COLOR_SCHEME.to_owned(), Value::Bool(enabled));
    }

    /// Remember or forget the original scheme.
    pub fn set_old_color_scheme(&mut self, scheme: Option<&str>) {
        self.old_color_scheme = scheme.filter(|s| !s.is_empty()).map(str::to_owned);
        match &self.old_color_scheme {
            Some(scheme) => {
                self.raw
                    .insert(KEY_OLD_COLOR_SCHEME.to_owned(), Value::String(scheme.clone()));
            }
            None => {
                self.raw.remove(KEY_OLD_COLOR_SCHEME);
            }
        }
    }

    /// Render the settings document, including keys this crate ignores.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialisation fails.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(&self.raw).map_err(|err| ConfigError::Parse(err.to_string()))
    }
}
