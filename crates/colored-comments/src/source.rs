//! Comment regions and their lines.
//!
//! Finding comments belongs to the host editor. [`CommentSource`] is the
//! seam it plugs into; [`LineCommentSource`] is a marker-based stand-in for
//! plain files with line comments, good enough for the command line tool.

use crate::classify::{CommentLine, Span};

/// Supplies the comment regions of a buffer, in buffer order.
///
/// Regions exclude the comment punctuation itself, so the text of a region
/// starts right after `//` or `#`.
pub trait CommentSource {
    /// Byte spans of the comment regions of `buffer`.
    fn comment_regions(&self, buffer: &str) -> Vec<Span>;
}

/// Split comment regions into lines, preserving order.
///
/// Regions falling outside `buffer` or off a character boundary are
/// skipped. A trailing carriage return is excluded from the line span.
#[must_use]
pub fn comment_lines<'a>(buffer: &'a str, regions: &[Span]) -> Vec<CommentLine<'a>> {
    let mut lines = Vec::new();
    for region in regions {
        let Some(text) = buffer.get(region.start..region.end) else {
            continue;
        };
        let mut offset = region.start;
        for piece in text.split('\n') {
            let line = piece.strip_suffix('\r').unwrap_or(piece);
            lines.push(CommentLine::new(
                Span::new(offset, offset + line.len()),
                line,
            ));
            offset += piece.len() + 1;
        }
    }
    lines
}

/// Treats the text after a line-comment marker as a comment region.
///
/// This is not language aware: a marker inside a string literal still opens
/// a comment. Doubled markers such as `///` or `##` are consumed whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCommentSource {
    markers: Vec<String>,
}

impl Default for LineCommentSource {
    fn default() -> Self {
        Self::new(["//", "#"])
    }
}

impl LineCommentSource {
    /// Build a source from the given markers. Empty markers are ignored.
    #[must_use]
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(Into::into)
                .filter(|marker: &String| !marker.is_empty())
                .collect(),
        }
    }

    /// Markers recognised by this source.
    #[must_use]
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Byte offset just past the earliest marker in `line`, if any.
    fn comment_start(&self, line: &str) -> Option<usize> {
        let (position, marker) = self
            .markers
            .iter()
            .filter_map(|marker| line.find(marker.as_str()).map(|pos| (pos, marker)))
            .min_by_key(|(pos, _)| *pos)?;
        let mut start = position + marker.len();
        if let Some(repeat) = marker.chars().last() {
            let rest = line.get(start..).unwrap_or_default();
            start += rest.len() - rest.trim_start_matches(repeat).len();
        }
        Some(start)
    }
}

impl CommentSource for LineCommentSource {
    fn comment_regions(&self, buffer: &str) -> Vec<Span> {
        let mut regions = Vec::new();
        let mut offset = 0;
        for piece in buffer.split_inclusive('\n') {
            let line = piece.trim_end_matches(['\n', '\r']);
            if let Some(start) = self.comment_start(line) {
                regions.push(Span::new(offset + start, offset + line.len()));
            }
            offset += piece.len();
        }
        regions
    }
}
