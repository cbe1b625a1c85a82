//! Line classification against the compiled tag set.
//!
//! A single pass over comment lines in buffer order. The only state carried
//! between lines is the tag of the most recent tagged line, which a `-`
//! line may continue when continuation matching is enabled.

use std::ops::Range;

use tracing::trace;

use crate::compile::CompiledTags;

/// Byte range of a line within its buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl Span {
    /// Create a span from offsets.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers nothing.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// One comment line as supplied by the comment source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentLine<'a> {
    /// Location of the untrimmed line in the buffer.
    pub span: Span,
    /// Text of the line, untrimmed.
    pub text: &'a str,
}

impl<'a> CommentLine<'a> {
    /// Pair a span with its text.
    #[must_use]
    pub const fn new(span: Span, text: &'a str) -> Self {
        Self { span, text }
    }
}

/// Per-tag line buckets produced by one classification pass.
///
/// Every tag has a bucket, even an empty one, so callers can clear stale
/// decorations for tags that no longer match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    buckets: Vec<(String, Vec<Span>)>,
}

impl Classification {
    fn with_tags(names: &[String]) -> Self {
        Self {
            buckets: names.iter().map(|name| (name.clone(), Vec::new())).collect(),
        }
    }

    fn push(&mut self, index: usize, span: Span) {
        if let Some((_, spans)) = self.buckets.get_mut(index) {
            spans.push(span);
        }
    }

    /// Lines assigned to a tag, or `None` for an unknown tag name.
    #[must_use]
    pub fn lines_for(&self, tag: &str) -> Option<&[Span]> {
        self.buckets
            .iter()
            .find(|(name, _)| name == tag)
            .map(|(_, spans)| spans.as_slice())
    }

    /// Iterate buckets in settings order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Span])> {
        self.buckets
            .iter()
            .map(|(name, spans)| (name.as_str(), spans.as_slice()))
    }

    /// Number of buckets, one per tag.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether there are no tags at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of tagged lines across all buckets.
    #[must_use]
    pub fn tagged_lines(&self) -> usize {
        self.buckets.iter().map(|(_, spans)| spans.len()).sum()
    }
}

/// Assign each comment line to at most one tag.
///
/// Matchers are tried in priority order and the first match wins. With
/// `continuation` enabled, a non-matching line whose trimmed text starts
/// with `-` joins the bucket of the last tagged line. Any other non-empty,
/// non-matching line ends the run; blank lines neither extend nor end it.
///
/// # Examples
/// ```
/// use colored_comments::{CommentLine, Span, TagDefinition, TagMap, classify, compile_tags};
///
/// let tags: TagMap = [("Todo", TagDefinition::literal("TODO:"))].into_iter().collect();
/// let compiled = compile_tags(&tags).unwrap_or_default();
/// let lines = [
///     CommentLine::new(Span::new(2, 13), " TODO: fix"),
///     CommentLine::new(Span::new(16, 26), " - detail"),
/// ];
/// let result = classify(&compiled, &lines, true);
/// assert_eq!(result.lines_for("Todo").map(<[Span]>::len), Some(2));
/// ```
#[must_use]
pub fn classify(
    compiled: &CompiledTags,
    lines: &[CommentLine<'_>],
    continuation: bool,
) -> Classification {
    let mut result = Classification::with_tags(compiled.names());
    let mut previous: Option<usize> = None;

    for line in lines {
        let trimmed = line.text.trim();
        if let Some(tag) = compiled.ordered().iter().find(|tag| tag.matches(trimmed)) {
            trace!(tag = %tag.name, start = line.span.start, "tagged comment line");
            result.push(tag.index, line.span);
            previous = Some(tag.index);
            continue;
        }
        if trimmed.is_empty() {
            continue;
        }
        match previous {
            Some(index) if continuation && trimmed.starts_with('-') => {
                trace!(start = line.span.start, "continued comment line");
                result.push(index, line.span);
            }
            _ => previous = None,
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile_tags;
    use crate::tags::{TagDefinition, TagMap};
    use rstest::{fixture, rstest};

    /// Lay out lines back to back, one byte apart for the newline.
    fn lines<'a>(texts: &[&'a str]) -> Vec<CommentLine<'a>> {
        let mut offset = 0;
        texts
            .iter()
            .map(|text| {
                let span = Span::new(offset, offset + text.len());
                offset = span.end + 1;
                CommentLine::new(span, text)
            })
            .collect()
    }

    fn tagged(result: &Classification, tag: &str) -> Vec<usize> {
        result
            .lines_for(tag)
            .unwrap_or_default()
            .iter()
            .map(|span| span.start)
            .collect()
    }

    #[fixture]
    fn todo_tags() -> CompiledTags {
        let tags: TagMap = [
            ("Todo", TagDefinition::literal("TODO:")),
            ("Important", TagDefinition::literal("!")),
        ]
        .into_iter()
        .collect();
        compile_tags(&tags).unwrap_or_default()
    }

    #[rstest]
    fn continuation_attaches_dash_lines(todo_tags: CompiledTags) {
        let input = lines(&[" TODO: fix", " - detail", " plain"]);
        let result = classify(&todo_tags, &input, true);
        assert_eq!(tagged(&result, "Todo"), vec![0, 11]);
        assert_eq!(tagged(&result, "Important"), Vec::<usize>::new());
    }

    #[rstest]
    fn continuation_disabled_ignores_dash_lines(todo_tags: CompiledTags) {
        let input = lines(&[" TODO: fix", " - detail"]);
        let result = classify(&todo_tags, &input, false);
        assert_eq!(tagged(&result, "Todo"), vec![0]);
    }

    #[rstest]
    fn plain_line_ends_the_run(todo_tags: CompiledTags) {
        let input = lines(&["TODO: a", "plain", "- orphan"]);
        let result = classify(&todo_tags, &input, true);
        assert_eq!(tagged(&result, "Todo"), vec![0]);
    }

    #[rstest]
    fn blank_lines_keep_the_run(todo_tags: CompiledTags) {
        let input = lines(&["TODO: a", "   ", "", "- still"]);
        let result = classify(&todo_tags, &input, true);
        assert_eq!(tagged(&result, "Todo"), vec![0, 13]);
    }

    #[rstest]
    fn dash_line_without_previous_tag_is_untagged(todo_tags: CompiledTags) {
        let input = lines(&["- nothing before"]);
        let result = classify(&todo_tags, &input, true);
        assert_eq!(result.tagged_lines(), 0);
    }

    #[rstest]
    fn matching_line_switches_the_run(todo_tags: CompiledTags) {
        let input = lines(&["TODO: a", "! careful", "- about this"]);
        let result = classify(&todo_tags, &input, true);
        assert_eq!(tagged(&result, "Todo"), vec![0]);
        assert_eq!(tagged(&result, "Important"), vec![8, 18]);
    }

    #[rstest]
    fn identifier_needs_trailing_whitespace(todo_tags: CompiledTags) {
        let input = lines(&["TODO:", "TODO:x", "!important"]);
        let result = classify(&todo_tags, &input, false);
        assert_eq!(result.tagged_lines(), 0);
    }

    #[rstest]
    fn every_tag_gets_a_bucket(todo_tags: CompiledTags) {
        let result = classify(&todo_tags, &[], true);
        assert_eq!(result.len(), 2);
        assert_eq!(result.lines_for("Important"), Some(&[][..]));
        assert_eq!(result.lines_for("Unknown"), None);
    }

    #[test]
    fn more_specific_tag_wins_by_priority() {
        let mut mine = TagDefinition::literal(r"TODO\(\w+\):").with_priority(1);
        mine.is_regex = true;
        let tags: TagMap = [
            ("Todo", TagDefinition::literal("TODO").with_priority(5)),
            ("Mine", mine),
        ]
        .into_iter()
        .collect();
        let compiled = compile_tags(&tags).unwrap_or_default();
        let input = lines(&["TODO(kim): merge", "TODO later"]);
        let result = classify(&compiled, &input, false);
        assert_eq!(tagged(&result, "Mine"), vec![0]);
        assert_eq!(tagged(&result, "Todo"), vec![17]);
    }

    #[test]
    fn spans_refer_to_untrimmed_lines() {
        let tags: TagMap = [("Todo", TagDefinition::literal("TODO"))].into_iter().collect();
        let compiled = compile_tags(&tags).unwrap_or_default();
        let input = lines(&["   TODO indent   "]);
        let result = classify(&compiled, &input, false);
        assert_eq!(result.lines_for("Todo"), Some(&[Span::new(0, 17)][..]));
    }

    #[test]
    fn repeated_passes_start_fresh() {
        let tags: TagMap = [("Todo", TagDefinition::literal("TODO"))].into_iter().collect();
        let compiled = compile_tags(&tags).unwrap_or_default();
        let input = lines(&["TODO once"]);
        let first = classify(&compiled, &input, false);
        let second = classify(&compiled, &input, false);
        assert_eq!(first, second);
        assert_eq!(second.tagged_lines(), 1);
    }
}
