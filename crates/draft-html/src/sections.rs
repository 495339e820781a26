//! Partitioning of block text into entity, annotation and plain sections.
//!
//! Entity ranges come from the document; annotation ranges are detected by
//! scanning the text for a trigger pattern. Both are merged into one ordered,
//! contiguous, non-overlapping list of [`Section`]s covering the whole text.

use crate::model::{EntityKey, EntityRange};
use crate::options::{
    AnnotationConfig, AnnotationKind, DEFAULT_SEPARATOR, DEFAULT_TRIGGER, MentionSuggestion,
};

/// A span of block text assigned to one entity, one annotation, or nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section<'a> {
    /// First char offset.
    pub start: usize,
    /// One past the last char offset.
    pub end: usize,
    /// What the span is attached to.
    pub kind: SectionKind<'a>,
}

/// Section classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SectionKind<'a> {
    /// Text with no entity or annotation.
    Plain,
    /// Text linked to an entity.
    Entity(&'a EntityKey),
    /// Text matched by annotation detection.
    Annotation(Annotation<'a>),
}

/// A detected annotation token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Annotation<'a> {
    /// Hashtag token.
    Hashtag,
    /// Mention token with the suggestion it matched.
    Mention(&'a MentionSuggestion),
}

/// Range before partitioning.
#[derive(Clone, Debug, PartialEq, Eq)]
struct PendingRange<'a> {
    start: usize,
    end: usize,
    kind: SectionKind<'a>,
}

/// Partition `text` into sections.
///
/// Entity ranges are taken before annotation ranges when both start at the
/// same offset. Ranges are expected to be well-formed; if they are not, ends
/// are clamped to the text, a range starting inside an earlier one is clipped
/// to start where the earlier one ends, and ranges left empty are dropped.
/// The result always covers `0..text.len()` exactly.
pub fn resolve_sections<'a>(
    text: &[char],
    entity_ranges: &'a [EntityRange],
    annotations: Option<&'a AnnotationConfig>,
) -> Vec<Section<'a>> {
    let mut ranges: Vec<PendingRange<'a>> = entity_ranges
        .iter()
        .map(|r| PendingRange {
            start: r.offset,
            end: r.offset.saturating_add(r.length),
            kind: SectionKind::Entity(&r.key),
        })
        .collect();
    if let Some(config) = annotations {
        ranges.extend(detect_annotations(text, config));
    }
    // Stable: keeps entity ranges ahead of annotations on equal offsets.
    ranges.sort_by_key(|r| r.start);

    let len = text.len();
    let mut sections = Vec::with_capacity(ranges.len() * 2 + 1);
    let mut cursor = 0;
    for range in ranges {
        let start = range.start.max(cursor);
        let end = range.end.min(len);
        if start >= end {
            if range.start < range.end {
                tracing::debug!(
                    start = range.start,
                    end = range.end,
                    "Dropping range covered by an earlier range"
                );
            }
            continue;
        }
        if start != range.start || end != range.end {
            tracing::debug!(start = range.start, end = range.end, "Clipping malformed range");
        }
        if start > cursor {
            sections.push(Section {
                start: cursor,
                end: start,
                kind: SectionKind::Plain,
            });
        }
        sections.push(Section {
            start,
            end,
            kind: range.kind,
        });
        cursor = end;
    }
    if cursor < len {
        sections.push(Section {
            start: cursor,
            end: len,
            kind: SectionKind::Plain,
        });
    }
    sections
}

/// Scan `text` for trigger tokens.
fn detect_annotations<'a>(text: &[char], config: &'a AnnotationConfig) -> Vec<PendingRange<'a>> {
    let trigger: Vec<char> = non_empty_or(&config.trigger, DEFAULT_TRIGGER).chars().collect();
    let separator: Vec<char> = non_empty_or(&config.separator, DEFAULT_SEPARATOR)
        .chars()
        .collect();
    let boundary: Vec<char> = separator.iter().chain(&trigger).copied().collect();

    let mut ranges = Vec::new();
    let mut cursor = 0;
    let mut next = text.starts_with(&trigger).then_some(0);
    if next.is_none() {
        next = find(text, &boundary, 0).map(|i| i + separator.len());
    }

    while let Some(token_start) = next {
        let content_start = token_start + trigger.len();
        let content_end = find(text, &separator, content_start).unwrap_or(text.len());
        let content = &text[content_start..content_end];

        if !content.is_empty() {
            let kind = match &config.kind {
                AnnotationKind::Hashtag => Some(Annotation::Hashtag),
                AnnotationKind::Mention { suggestions } => {
                    let value: String = content.iter().collect();
                    suggestions
                        .iter()
                        .find(|s| s.value == value)
                        .map(Annotation::Mention)
                }
            };
            if let Some(annotation) = kind {
                ranges.push(PendingRange {
                    start: token_start,
                    end: content_end,
                    kind: SectionKind::Annotation(annotation),
                });
            }
        }

        cursor = cursor.max(content_end);
        next = find(text, &boundary, cursor).map(|i| i + separator.len());
    }
    ranges
}

fn non_empty_or<'s>(value: &'s str, default: &'s str) -> &'s str {
    if value.is_empty() { default } else { value }
}

/// Position of `needle` in `haystack` at or after `from`.
fn find(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|i| i + from)
}
