//! Merge tag colours into a color scheme.

use tracing::debug;

use super::document::{ThemeDocument, ThemeEntry};
use crate::scope::{entry_name, scope_for_color};
use crate::tags::TagMap;

/// Result of merging tags into a document.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// Whether any entry was appended.
    pub changed: bool,
    /// The document, extended when `changed` is set.
    pub document: ThemeDocument,
}

/// Append an entry for every coloured tag whose scope is not yet present.
///
/// Tags are visited in settings order. Existing entries are never rewritten,
/// even when their colours differ from the tag's, so manual edits to the
/// scheme survive regeneration. Tags without a `color` block contribute
/// nothing. Merging the output again with the same tags changes nothing.
///
/// # Examples
/// ```
/// use colored_comments::theme::{ThemeDocument, ThemeFormat, merge_tags};
/// use colored_comments::{TagDefinition, TagMap};
///
/// let tags: TagMap = [("Todo", TagDefinition::literal("TODO").with_color("Orange", "#f80", "#000"))]
///     .into_iter()
///     .collect();
/// let first = merge_tags(ThemeDocument::empty(ThemeFormat::ColorScheme), &tags);
/// assert!(first.changed);
/// let second = merge_tags(first.document.clone(), &tags);
/// assert!(!second.changed);
/// assert_eq!(second.document, first.document);
/// ```
#[must_use]
pub fn merge_tags(mut document: ThemeDocument, tags: &TagMap) -> MergeOutcome {
    let mut changed = false;

    for (name, tag) in tags.iter() {
        let Some(color) = &tag.color else {
            continue;
        };
        let color_name = color.name_or_default().to_lowercase();
        let scope = scope_for_color(&color_name);
        if document.has_scope(&scope) {
            debug!(tag = name, %scope, "scope already present");
            continue;
        }
        debug!(tag = name, %scope, "appending color scheme entry");
        document.push_entry(&ThemeEntry {
            name: entry_name(&color_name),
            scope,
            foreground: color.foreground_or_default().to_owned(),
            background: color.background_or_default().to_owned(),
        });
        changed = true;
    }

    MergeOutcome { changed, document }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::{ColorSpec, TagDefinition};
    use crate::theme::format::ThemeFormat;
    use rstest::rstest;

    fn colored(color: &str, foreground: &str) -> TagDefinition {
        TagDefinition::literal("x").with_color(color, foreground, "#000")
    }

    #[rstest]
    #[case(ThemeFormat::ColorScheme)]
    #[case(ThemeFormat::TmTheme)]
    fn merge_is_idempotent(#[case] format: ThemeFormat) {
        let tags: TagMap = [("Todo", colored("Orange", "#f80"))].into_iter().collect();
        let first = merge_tags(ThemeDocument::empty(format), &tags);
        assert!(first.changed);
        assert_eq!(first.document.len(), 1);

        let bytes = first.document.to_bytes().unwrap_or_default();
        let second = merge_tags(first.document, &tags);
        assert!(!second.changed);
        assert_eq!(second.document.len(), 1);
        assert_eq!(second.document.to_bytes().unwrap_or_default(), bytes);
    }

    #[test]
    fn existing_entries_are_not_rewritten() {
        let tags: TagMap = [("Todo", colored("Orange", "#f80"))].into_iter().collect();
        let first = merge_tags(ThemeDocument::empty(ThemeFormat::ColorScheme), &tags);
        let recoloured: TagMap = [("Todo", colored("orange", "#123456"))].into_iter().collect();
        let second = merge_tags(first.document, &recoloured);
        assert!(!second.changed);
        let entries = second.document.entries();
        assert_eq!(entries.first().map(|e| e.foreground.as_str()), Some("#f80"));
    }

    #[test]
    fn appends_in_settings_order_not_priority() {
        let tags: TagMap = [
            ("Later", colored("Zebra", "#1").with_priority(9)),
            ("Sooner", colored("Apple", "#2").with_priority(1)),
        ]
        .into_iter()
        .collect();
        let outcome = merge_tags(ThemeDocument::empty(ThemeFormat::ColorScheme), &tags);
        let scopes: Vec<String> = outcome.document.entries().into_iter().map(|e| e.scope).collect();
        assert_eq!(
            scopes,
            vec![
                "colored.comments.color.zebra".to_owned(),
                "colored.comments.color.apple".to_owned(),
            ]
        );
    }

    #[test]
    fn tags_without_color_are_skipped() {
        let mut scoped = TagDefinition::literal("!");
        scoped.scope = Some("comment.important".to_owned());
        let tags: TagMap = [("Scoped", scoped)].into_iter().collect();
        let outcome = merge_tags(ThemeDocument::empty(ThemeFormat::TmTheme), &tags);
        assert!(!outcome.changed);
        assert!(outcome.document.is_empty());
    }

    #[test]
    fn shared_color_names_produce_one_entry() {
        let tags: TagMap = [
            ("Todo", colored("Orange", "#f80")),
            ("Fixme", colored("orange", "#f00")),
        ]
        .into_iter()
        .collect();
        let outcome = merge_tags(ThemeDocument::empty(ThemeFormat::ColorScheme), &tags);
        assert_eq!(outcome.document.len(), 1);
    }

    #[test]
    fn missing_color_properties_use_placeholder() {
        let mut tag = TagDefinition::literal("?");
        tag.color = Some(ColorSpec {
            name: Some("Light Blue".to_owned()),
            ..ColorSpec::default()
        });
        let tags: TagMap = [("Question", tag)].into_iter().collect();
        let outcome = merge_tags(ThemeDocument::empty(ThemeFormat::ColorScheme), &tags);
        let entries = outcome.document.entries();
        let Some(entry) = entries.first() else {
            panic!("expected one entry");
        };
        assert_eq!(entry.name, "[Colored Comments] Light Blue");
        assert_eq!(entry.scope, "colored.comments.color.light.blue");
        assert_eq!(entry.foreground, "colored_comments_default");
        assert_eq!(entry.background, "colored_comments_default");
    }
}
