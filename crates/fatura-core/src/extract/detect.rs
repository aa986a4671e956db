//! First-page format-generation detection.

use tracing::debug;

use super::patterns::{find_bare_reference, DETECT_DUE_YEAR, DETECT_PAYMENT_YEAR};

/// Supported bill-format generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    /// 2025 layout: native reading-order text is usable line for line.
    V2025,
    /// 2026 layout: interleaved native text; lines rebuilt from words.
    V2026,
}

impl Generation {
    /// Route a bill year to the generation that parses it.
    pub fn from_year(year: i32) -> Self {
        if year >= 2026 {
            Self::V2026
        } else {
            Self::V2025
        }
    }
}

/// Decide which generation parser applies, from first-page text.
///
/// Never fails: when no pattern matches, the earliest known generation is
/// the default routing decision.
pub fn detect_generation(text: &str) -> Generation {
    let year = detect_year(text).unwrap_or(2025);
    debug!(year, "detected bill year");
    Generation::from_year(year)
}

fn detect_year(text: &str) -> Option<i32> {
    // Payment line carries the reference period in its third column.
    if let Some(caps) = DETECT_PAYMENT_YEAR.captures(text) {
        if let Ok(year) = caps[2].parse() {
            return Some(year);
        }
    }

    // Due-date header fallback.
    if let Some(caps) = DETECT_DUE_YEAR.captures(text) {
        if let Ok(year) = caps[2].parse() {
            return Some(year);
        }
    }

    // Last resort: any bare MM/YYYY outside a dd/mm/yyyy date.
    if let Some(reference) = find_bare_reference(text) {
        if let Some((_, year)) = reference.split_once('/') {
            if let Ok(year) = year.parse() {
                return Some(year);
            }
        }
    }

    None
}
