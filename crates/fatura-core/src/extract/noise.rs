//! Noise-line filtering for the financial table walk.
//!
//! Two gates: one on the raw candidate line before segmentation is attempted,
//! one on the extracted description afterwards. Both tables are immutable
//! static data.

use super::patterns::{HISTORY_LABEL, LEADING_DIGIT_RUN, LOOSE_HISTORY, TOTALS_ROW};

/// Header, footer, and page-furniture terms that disqualify a line.
pub const IGNORED_TERMS: [&str; 17] = [
    "MES_ANO",
    "COMSUMO",
    "CONSUMO",
    "TIPOS DE FATURAMENTO",
    "DIAS",
    "TRIBUTOS",
    "ICMS UNIT",
    "PIS/PASEP",
    "DADOS DE MEDIÇÃO",
    "LEITURA",
    "CONST. MEDIDOR",
    "GRANDEZAS",
    "POSTOS TARIFÁRIOS",
    "ELE-",
    "HFP",
    "SALDO",
    "RESERVADO",
];

/// Descriptions that are tax labels or totals rather than item rows.
pub const JUNK_DESCRIPTIONS: [&str; 6] = ["PIS", "COFINS", "ICMS", "I CMS", "TOTAL", "SUBTOTAL"];

/// Pre-segmentation drop decision for a candidate line.
///
/// `upper` is the upper-cased form of `line`; the caller already has it on
/// hand during the table walk.
pub fn is_noise_line(line: &str, upper: &str) -> bool {
    if IGNORED_TERMS.iter().any(|term| upper.contains(term)) {
        return true;
    }
    // Meter/protocol numbers.
    if LEADING_DIGIT_RUN.is_match(line) {
        return true;
    }
    // History residue without a separator ("AGO25 477.00 30 LID").
    if LOOSE_HISTORY.is_match(line) {
        return true;
    }
    // Totalization row: numbers only, no description.
    TOTALS_ROW.is_match(line)
}

/// Post-segmentation drop decision on the extracted description.
pub fn is_junk_description(description: &str) -> bool {
    let upper = description.trim().to_uppercase();
    JUNK_DESCRIPTIONS.contains(&upper.as_str()) || HISTORY_LABEL.is_match(&upper)
}
