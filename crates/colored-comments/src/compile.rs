//! Ordered compilation of tag definitions into matchers.
//!
//! Tags are sorted by ascending priority with a stable sort, so tags sharing
//! a priority keep the order they were written in. The resulting sequence is
//! what the classifier walks for every comment line.

use colored_comments_patterns::{Priority, compile_tag_regex};
use regex::Regex;
use tracing::debug;

use crate::error::ConfigError;
use crate::tags::TagMap;

/// A tag's matcher together with its ranking.
#[derive(Debug, Clone)]
pub struct CompiledTag {
    /// Tag name as written in the settings.
    pub name: String,
    /// Position of the tag in the settings, used to address its bucket.
    pub index: usize,
    /// Priority the tag was ranked by.
    pub priority: Priority,
    /// Anchored matcher for trimmed comment text.
    pub regex: Regex,
}

impl CompiledTag {
    /// Whether the trimmed comment text opens with this tag.
    #[must_use]
    pub fn matches(&self, trimmed: &str) -> bool {
        self.regex.is_match(trimmed)
    }
}

/// The full matcher set for one settings snapshot.
#[derive(Debug, Clone, Default)]
pub struct CompiledTags {
    ordered: Vec<CompiledTag>,
    names: Vec<String>,
}

impl CompiledTags {
    /// Matchers in the order they must be tried.
    #[must_use]
    pub fn ordered(&self) -> &[CompiledTag] {
        &self.ordered
    }

    /// Every tag name in settings order, matched or not.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of compiled tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Whether there is nothing to match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// Compile every tag into an anchored matcher, ordered by priority.
///
/// The settings are only read; nothing is cached or mutated here.
///
/// # Errors
///
/// Returns [`ConfigError::MissingIdentifier`] for a tag without an
/// identifier and [`ConfigError::InvalidPattern`] for a regex identifier
/// that does not compile. No partial matcher set is returned.
///
/// # Examples
/// ```
/// use colored_comments::{TagDefinition, TagMap, compile_tags};
///
/// let tags: TagMap = [
///     ("Todo", TagDefinition::literal("TODO").with_priority(5)),
///     ("Mine", TagDefinition::literal("TODO(me)").with_priority(1)),
/// ]
/// .into_iter()
/// .collect();
/// let compiled = compile_tags(&tags).unwrap_or_default();
/// let order: Vec<&str> = compiled.ordered().iter().map(|t| t.name.as_str()).collect();
/// assert_eq!(order, ["Mine", "Todo"]);
/// ```
pub fn compile_tags(tags: &TagMap) -> Result<CompiledTags, ConfigError> {
    let mut ordered = Vec::with_capacity(tags.len());
    let mut names = Vec::with_capacity(tags.len());

    for (index, (name, tag)) in tags.iter().enumerate() {
        let identifier = tag
            .identifier
            .as_deref()
            .ok_or_else(|| ConfigError::MissingIdentifier {
                tag: name.to_owned(),
            })?;
        let regex = compile_tag_regex(identifier, tag.identifier_kind()).map_err(|source| {
            ConfigError::InvalidPattern {
                tag: name.to_owned(),
                pattern: source.pattern().to_owned(),
                source,
            }
        })?;
        names.push(name.to_owned());
        ordered.push(CompiledTag {
            name: name.to_owned(),
            index,
            priority: tag.priority,
            regex,
        });
    }

    // `sort_by_key` is stable: equal priorities keep settings order.
    ordered.sort_by_key(|tag| tag.priority);
    debug!(
        count = ordered.len(),
        order = ?ordered.iter().map(|tag| tag.name.as_str()).collect::<Vec<_>>(),
        "compiled comment tags"
    );
    Ok(CompiledTags { ordered, names })
}
