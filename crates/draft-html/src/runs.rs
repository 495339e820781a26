//! Run-length encoding of style vectors.

use crate::style::{ActiveStyles, StyleName, StyleVector};

/// Maximal span where the compared styles are constant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRun<'a> {
    /// First char offset.
    pub start: usize,
    /// One past the last char offset.
    pub end: usize,
    /// Full style state at `start`.
    pub styles: ActiveStyles<'a>,
}

/// Split `start..end` into runs of identical state for `names`.
///
/// Each offset is compared with the one before it only; `start` always opens
/// a new run whatever precedes it. `end` is clamped to the vector length.
pub fn encode_runs<'a>(
    vector: &StyleVector<'a>,
    names: &[StyleName],
    start: usize,
    end: usize,
) -> Vec<StyleRun<'a>> {
    let end = end.min(vector.len());
    let mut runs: Vec<StyleRun<'a>> = Vec::new();
    for offset in start..end {
        let continues = offset != start && vector.same_as_previous(names, offset);
        if continues && let Some(run) = runs.last_mut() {
            run.end = offset + 1;
        } else {
            runs.push(StyleRun {
                start: offset,
                end: offset + 1,
                styles: vector.at(offset),
            });
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InlineStyleRange;
    use crate::style::{PropertyStyle, TagStyle};

    fn style(offset: usize, length: usize, name: &str) -> InlineStyleRange {
        InlineStyleRange {
            offset,
            length,
            style: name.to_owned(),
        }
    }

    fn spans(runs: &[StyleRun<'_>]) -> Vec<(usize, usize)> {
        runs.iter().map(|r| (r.start, r.end)).collect()
    }

    #[test]
    fn test_unstyled_single_run() {
        let vector = StyleVector::build(5, std::iter::empty::<&InlineStyleRange>());
        let runs = encode_runs(&vector, &StyleName::TAGS, 0, 5);
        assert_eq!(spans(&runs), vec![(0, 5)]);
    }

    #[test]
    fn test_runs_split_on_change() {
        let ranges = [style(2, 3, "BOLD"), style(3, 1, "ITALIC")];
        let vector = StyleVector::build(7, &ranges);
        let runs = encode_runs(&vector, &StyleName::TAGS, 0, 7);
        assert_eq!(spans(&runs), vec![(0, 2), (2, 3), (3, 4), (4, 5), (5, 7)]);
        assert!(runs[2].styles.has_tag(TagStyle::Italic));
        assert!(runs[3].styles.has_tag(TagStyle::Bold));
        assert!(!runs[3].styles.has_tag(TagStyle::Italic));
    }

    #[test]
    fn test_ignores_styles_outside_names() {
        let ranges = [style(0, 2, "BOLD"), style(1, 3, "color-red")];
        let vector = StyleVector::build(4, &ranges);
        let runs = encode_runs(&vector, &StyleName::PROPERTIES, 0, 4);
        assert_eq!(spans(&runs), vec![(0, 1), (1, 4)]);
        assert_eq!(runs[1].styles.property(PropertyStyle::Color), Some("red"));
    }

    #[test]
    fn test_window_start_always_opens_run() {
        let ranges = [style(0, 6, "BOLD")];
        let vector = StyleVector::build(6, &ranges);
        let runs = encode_runs(&vector, &StyleName::TAGS, 2, 5);
        assert_eq!(spans(&runs), vec![(2, 5)]);
    }

    #[test]
    fn test_empty_window() {
        let vector = StyleVector::build(3, std::iter::empty::<&InlineStyleRange>());
        assert!(encode_runs(&vector, &StyleName::TAGS, 2, 2).is_empty());
        assert!(encode_runs(&vector, &StyleName::TAGS, 1, 9).len() == 1);
    }

    #[test]
    fn test_runs_partition_and_are_maximal() {
        let ranges = [
            style(0, 3, "BOLD"),
            style(2, 4, "ITALIC"),
            style(5, 4, "color-red"),
            style(7, 2, "color-blue"),
            style(1, 1, "CODE"),
        ];
        let vector = StyleVector::build(10, &ranges);
        for names in [&StyleName::TAGS[..], &StyleName::PROPERTIES[..]] {
            for (start, end) in [(0, 10), (1, 8), (4, 6)] {
                let runs = encode_runs(&vector, names, start, end);
                let mut cursor = start;
                for run in &runs {
                    assert_eq!(run.start, cursor);
                    assert!(run.end > run.start);
                    cursor = run.end;
                }
                assert_eq!(cursor, end);
                for pair in runs.windows(2) {
                    assert!(!vector.same_as_previous(names, pair[1].start));
                }
            }
        }
    }
}
