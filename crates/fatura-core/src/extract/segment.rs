//! Splits one raw bill line into description, unit, and value run.

use super::patterns::{HISTORY_SUFFIX, NUMBER_SPLIT, UNIT_SPLIT};

/// Arity class of a segmented line; decides the field-mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Description + unit keyword + full value run.
    Standard,
    /// Description + value run, no unit column.
    Simple,
}

/// A bill line split into its logical columns.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedLine {
    /// Item description.
    pub description: String,
    /// Unit keyword, empty for simple lines.
    pub unit: String,
    /// Whitespace-separated value tokens, untouched.
    pub values: String,
    /// Which mapping table applies.
    pub kind: LineKind,
}

/// Try to split a raw line into description | unit | values.
///
/// Trailing historical-consumption fragments (month abbreviation + year and
/// everything after) are stripped first; a line that is only history yields
/// nothing. Returns `None` for any line not recognized as an item line.
pub fn segment_line(line: &str) -> Option<SegmentedLine> {
    let cleaned = HISTORY_SUFFIX.replace(line, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    if let Some(caps) = UNIT_SPLIT.captures(cleaned) {
        return Some(SegmentedLine {
            description: caps[1].trim().to_string(),
            unit: caps[2].trim().to_string(),
            values: caps[3].trim().to_string(),
            kind: LineKind::Standard,
        });
    }

    if let Some(caps) = NUMBER_SPLIT.captures(cleaned) {
        return Some(SegmentedLine {
            description: caps[1].trim().to_string(),
            unit: String::new(),
            values: caps[2].trim().to_string(),
            kind: LineKind::Simple,
        });
    }

    None
}
