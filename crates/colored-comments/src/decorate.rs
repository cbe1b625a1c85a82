//! Decorations handed to the renderer after classification.
//!
//! Each tag resolves once per settings snapshot to a scope and a set of draw
//! flags. Applying a [`Classification`] pairs those with the tagged lines.

use bitflags::bitflags;

use crate::classify::{Classification, Span};
use crate::error::ConfigError;
use crate::scope::scope_for_color;
use crate::tags::{TagDefinition, TagMap};

bitflags! {
    /// Draw flags for a decorated region.
    ///
    /// Values match the host editor's region flags so they can be passed
    /// through unchanged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StyleFlags: u32 {
        /// Keep the region across buffer reloads and redraws.
        const PERSISTENT = 16;
        /// Outline the region instead of filling it.
        const NO_FILL = 32;
        /// Solid underline.
        const SOLID_UNDERLINE = 512;
        /// Stippled underline.
        const STIPPLED_UNDERLINE = 1024;
        /// Squiggly underline.
        const SQUIGGLY_UNDERLINE = 2048;
    }
}

impl StyleFlags {
    /// Flags requested by a tag definition. Always persistent.
    #[must_use]
    pub fn for_tag(tag: &TagDefinition) -> Self {
        let mut flags = Self::PERSISTENT;
        flags.set(Self::NO_FILL, tag.outline);
        flags.set(Self::SOLID_UNDERLINE, tag.underline);
        flags.set(Self::STIPPLED_UNDERLINE, tag.stippled_underline);
        flags.set(Self::SQUIGGLY_UNDERLINE, tag.squiggly_underline);
        flags
    }
}

/// Resolve the scope a tag is drawn with.
///
/// An explicit `scope` wins; otherwise the scope is derived from the colour
/// name, which falls back to the placeholder name when unset.
///
/// # Errors
///
/// Returns [`ConfigError::MissingScope`] when the tag has neither.
pub fn resolve_scope(name: &str, tag: &TagDefinition) -> Result<String, ConfigError> {
    if let Some(scope) = &tag.scope {
        return Ok(scope.clone());
    }
    tag.color
        .as_ref()
        .map(|color| scope_for_color(color.name_or_default()))
        .ok_or_else(|| ConfigError::MissingScope {
            tag: name.to_owned(),
        })
}

/// Rendering style of one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagStyle {
    /// Tag name.
    pub tag: String,
    /// Scope the renderer looks the colours up by.
    pub scope: String,
    /// Draw flags.
    pub flags: StyleFlags,
}

/// Styles for every tag of a settings snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationPlan {
    styles: Vec<TagStyle>,
}

impl DecorationPlan {
    /// Resolve the style of every tag.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingScope`] for the first tag that cannot be
    /// given a scope.
    pub fn new(tags: &TagMap) -> Result<Self, ConfigError> {
        let styles = tags
            .iter()
            .map(|(name, tag)| {
                Ok(TagStyle {
                    tag: name.to_owned(),
                    scope: resolve_scope(name, tag)?,
                    flags: StyleFlags::for_tag(tag),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self { styles })
    }

    /// Style of a tag by name.
    #[must_use]
    pub fn style(&self, tag: &str) -> Option<&TagStyle> {
        self.styles.iter().find(|style| style.tag == tag)
    }

    /// Pair the tagged lines of a classification with their styles.
    ///
    /// Tags without lines still yield a decoration with no regions so the
    /// renderer clears what it drew on the previous pass.
    #[must_use]
    pub fn apply(&self, classification: &Classification) -> Vec<Decoration> {
        self.styles
            .iter()
            .map(|style| Decoration {
                tag: style.tag.clone(),
                regions: classification
                    .lines_for(&style.tag)
                    .map(<[Span]>::to_vec)
                    .unwrap_or_default(),
                scope: style.scope.clone(),
                flags: style.flags,
            })
            .collect()
    }
}

/// Regions to draw for one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    /// Tag name, also the region key in the renderer.
    pub tag: String,
    /// Tagged line spans.
    pub regions: Vec<Span>,
    /// Scope used to look up colours.
    pub scope: String,
    /// Draw flags.
    pub flags: StyleFlags,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::ColorSpec;

    fn colored(identifier: &str, color: &str) -> TagDefinition {
        TagDefinition::literal(identifier).with_color(color, "#fff", "#000")
    }

    #[test]
    fn flags_follow_style_switches() {
        let mut tag = TagDefinition::literal("!");
        assert_eq!(StyleFlags::for_tag(&tag), StyleFlags::PERSISTENT);
        tag.outline = true;
        tag.squiggly_underline = true;
        let flags = StyleFlags::for_tag(&tag);
        assert_eq!(
            flags,
            StyleFlags::PERSISTENT | StyleFlags::NO_FILL | StyleFlags::SQUIGGLY_UNDERLINE
        );
        assert_eq!(flags.bits(), 16 | 32 | 2048);
    }

    #[test]
    fn explicit_scope_wins_over_color() {
        let mut tag = colored("!", "Red");
        tag.scope = Some("comment.line.important".to_owned());
        assert_eq!(resolve_scope("Important", &tag).ok().as_deref(), Some("comment.line.important"));
    }

    #[test]
    fn color_name_defaults_to_placeholder_scope() {
        let mut tag = TagDefinition::literal("?");
        tag.color = Some(ColorSpec::default());
        assert_eq!(
            resolve_scope("Question", &tag).ok().as_deref(),
            Some("colored.comments.color.colored_comments_default")
        );
    }

    #[test]
    fn tag_without_color_or_scope_is_rejected() {
        let tags: TagMap = [("Bare", TagDefinition::literal("B"))].into_iter().collect();
        assert!(matches!(
            DecorationPlan::new(&tags),
            Err(ConfigError::MissingScope { tag }) if tag == "Bare"
        ));
    }

    #[test]
    fn apply_covers_tags_without_lines() {
        let tags: TagMap = [
            ("Todo", colored("TODO", "Dark Orange")),
            ("Note", colored("NOTE", "Teal")),
        ]
        .into_iter()
        .collect();
        let plan = DecorationPlan::new(&tags).unwrap_or_default();
        let decorations = plan.apply(&Classification::default());
        assert_eq!(decorations.len(), 2);
        assert!(decorations.iter().all(|d| d.regions.is_empty()));
        assert_eq!(
            plan.style("Todo").map(|style| style.scope.as_str()),
            Some("colored.comments.color.dark.orange")
        );
    }
}
