//! Rebuilds logical text lines from positioned words.
//!
//! The 2026 layout's native reading-order text interleaves columns, so its
//! lines are regrouped from word positions instead. Print-separation plate
//! markers (bare C/M/Y/K runs placed at or before the left margin) leak into
//! the word stream and are dropped; a real word that happens to spell only
//! those letters sits at a positive offset and survives.

use std::collections::BTreeMap;

use crate::document::Word;

use super::patterns::{PLATE_MARKER_PREFIX, PLATE_MARKER_WORD};

/// Default row-grouping tolerance, in page units.
///
/// The right value depends on document resolution and was tuned empirically
/// against known bill renders; override per parse when a render uses a
/// different scale.
pub const DEFAULT_ROW_TOLERANCE: f32 = 1.0;

/// Group words into rows and rebuild one line per row, top to bottom.
///
/// Words whose vertical coordinate quantizes to the same step merge into one
/// row even with sub-unit jitter; `tolerance` is the quantization step.
/// Within a row, words are ordered by horizontal offset and joined with
/// single spaces.
pub fn reconstruct_lines(words: &[Word], tolerance: f32) -> Vec<String> {
    let step = if tolerance > 0.0 {
        tolerance
    } else {
        DEFAULT_ROW_TOLERANCE
    };

    let mut rows: BTreeMap<i64, Vec<&Word>> = BTreeMap::new();
    for word in words {
        let key = (word.top / step).round() as i64;
        rows.entry(key).or_default().push(word);
    }

    let mut lines = Vec::with_capacity(rows.len());
    for (_, mut row) in rows {
        row.sort_by(|a, b| a.x0.partial_cmp(&b.x0).unwrap_or(std::cmp::Ordering::Equal));
        let text = row
            .iter()
            .filter(|w| w.x0 > 0.0 || !PLATE_MARKER_WORD.is_match(&w.text))
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let text = text.trim();
        if !text.is_empty() {
            lines.push(text.to_string());
        }
    }
    lines
}

/// Strip leading plate-marker runs from a natively extracted line.
pub fn strip_plate_markers(line: &str) -> String {
    PLATE_MARKER_PREFIX
        .replace(line.trim(), "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_marker_at_margin_dropped() {
        let words = vec![
            Word::new("CM", -1.0, 10.0),
            Word::new("Energia", 5.0, 10.0),
            Word::new("Ativa", 20.0, 10.0),
        ];
        assert_eq!(
            reconstruct_lines(&words, DEFAULT_ROW_TOLERANCE),
            vec!["Energia Ativa".to_string()]
        );
    }

    #[test]
    fn test_marker_lookalike_mid_line_kept() {
        let words = vec![
            Word::new("Bandeira", 5.0, 10.0),
            Word::new("CM", 40.0, 10.0),
        ];
        assert_eq!(
            reconstruct_lines(&words, DEFAULT_ROW_TOLERANCE),
            vec!["Bandeira CM".to_string()]
        );
    }

    #[test]
    fn test_jittered_rows_merge() {
        let words = vec![
            Word::new("Energia", 5.0, 10.2),
            Word::new("Ativa", 20.0, 9.8),
            Word::new("Injetada", 5.0, 22.0),
        ];
        assert_eq!(
            reconstruct_lines(&words, DEFAULT_ROW_TOLERANCE),
            vec!["Energia Ativa".to_string(), "Injetada".to_string()]
        );
    }

    #[test]
    fn test_words_ordered_by_offset() {
        let words = vec![
            Word::new("Ativa", 20.0, 10.0),
            Word::new("Energia", 5.0, 10.0),
        ];
        assert_eq!(
            reconstruct_lines(&words, DEFAULT_ROW_TOLERANCE),
            vec!["Energia Ativa".to_string()]
        );
    }

    #[test]
    fn test_strip_plate_markers() {
        assert_eq!(strip_plate_markers("CMYK CM Energia Ativa"), "Energia Ativa");
        assert_eq!(strip_plate_markers("Energia Ativa"), "Energia Ativa");
        assert_eq!(strip_plate_markers(""), "");
    }
}
