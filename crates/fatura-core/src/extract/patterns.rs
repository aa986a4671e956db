//! Shared regex patterns for Enel-CE bill extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Trailing historical-consumption columns that bleed into item lines,
    // e.g. " AGO/2025 477 30" glued to the end of a financial row.
    pub static ref HISTORY_SUFFIX: Regex = Regex::new(
        r"(?i)\s(JAN|FEV|MAR|ABR|MAI|JUN|JUL|AGO|SET|OUT|NOV|DEZ)[\s/]*\d{2,4}.*$"
    ).unwrap();

    // Description, unit keyword, value run.
    pub static ref UNIT_SPLIT: Regex = Regex::new(
        r"(?i)^(.*?)\s+(kWh|kW|dias|unid|un)\s+(.*)$"
    ).unwrap();

    // Fallback split: description followed by a money-shaped token.
    pub static ref NUMBER_SPLIT: Regex = Regex::new(
        r"^(.*?)\s+(\d+[.,]\d{2}.*)$"
    ).unwrap();

    // Tax/label keywords trailing a value run. Page-layout artifacts from the
    // tax box printed beside the table, not data columns.
    pub static ref TAX_LABEL_TAIL: Regex = Regex::new(
        r"(?i)\s(I\s?CMS|LID|DE|FATURAMENTO|TRIBUTOS|COFINS|PIS).*"
    ).unwrap();

    // Bare month/year history label ("AGO/25", "SET 2025").
    pub static ref HISTORY_LABEL: Regex = Regex::new(
        r"^(JAN|FEV|MAR|ABR|MAI|JUN|JUL|AGO|SET|OUT|NOV|DEZ)[\s/\-]*\d{2,4}$"
    ).unwrap();

    // History residue with no separator ("AGO25 477.00 30 LID").
    pub static ref LOOSE_HISTORY: Regex = Regex::new(
        r"^(JAN|FEV|MAR|ABR|MAI|JUN|JUL|AGO|SET|OUT|NOV|DEZ)\d{2}\s"
    ).unwrap();

    // Totalization row: two money-shaped numbers back-to-back, no description.
    pub static ref TOTALS_ROW: Regex = Regex::new(
        r"^\d+[.,]\d{2}\s+\d+[.,]\d{2}"
    ).unwrap();

    // Meter/protocol numbers at the start of a line.
    pub static ref LEADING_DIGIT_RUN: Regex = Regex::new(r"^\d{5,}").unwrap();

    // Positional measurement row: meter id, segment label, previous reading
    // date and value, current reading date and value, multiplier, consumption,
    // day count.
    pub static ref MEASUREMENT_ROW: Regex = Regex::new(
        r"(\S+)\s+(.+?)\s+(\d{2}/\d{2}/\d{4})\s+([\d.]+)\s+(\d{2}/\d{2}/\d{4})\s+([\d.]+)\s+([\d.]+)\s+([\d.]+)\s+(\d+)"
    ).unwrap();

    // Leading runs of color-plate markers leaking from print-separation
    // metadata into extracted text (2026 layout).
    pub static ref PLATE_MARKER_PREFIX: Regex = Regex::new(
        r"^(?:[CMYK]{1,8}\s+)+"
    ).unwrap();

    // A word made only of plate-marker letters.
    pub static ref PLATE_MARKER_WORD: Regex = Regex::new(r"^[CMYK]+$").unwrap();

    // Client id spelled out in the payment instructions. Works across
    // format generations.
    pub static ref CLIENT_CODE: Regex = Regex::new(
        r"(?i)utilizando\s+o\s+código\s+(\d+)"
    ).unwrap();

    // Visual fallback: a long digit run immediately above the reference
    // period in the bill header box.
    pub static ref CLIENT_VISUAL: Regex = Regex::new(
        r"\b(\d{7,12})\s*\n\s*\d{2}/\d{4}"
    ).unwrap();

    // 2026 header pair "4869679 / 52217494 R$"; the second id is the client
    // number.
    pub static ref CLIENT_PAIR: Regex = Regex::new(
        r"(\d{7,12})\s*/\s*(\d{7,12})\s+R\$"
    ).unwrap();

    // Candidate bare reference period. Callers must reject matches preceded
    // by "<digit>/" so dd/mm/yyyy interiors do not qualify; see
    // [`find_bare_reference`].
    pub static ref REFERENCE_BARE: Regex = Regex::new(
        r"\b(\d{2}/\d{4})\b"
    ).unwrap();

    // 2026 payment line: due date, protocol, reference, due date, amount.
    pub static ref REFERENCE_PAYMENT: Regex = Regex::new(
        r"\d{2}/\d{2}/\d{4}\s+\d+\s+(\d{2}/\d{4})\s+\d{2}/\d{2}/\d{4}\s+[\d.,]+"
    ).unwrap();

    // 2026 fallback: reference beside the due date and currency marker.
    pub static ref REFERENCE_DUE: Regex = Regex::new(
        r"(\d{2}/\d{4})\s+\d{2}/\d{2}/\d{4}\s+R\$"
    ).unwrap();

    // Format-detector variants of the two patterns above, capturing the year.
    pub static ref DETECT_PAYMENT_YEAR: Regex = Regex::new(
        r"\d{2}/\d{2}/(\d{4})\s+\d+\s+\d{2}/(\d{4})\s+\d{2}/\d{2}/\d{4}\s+[\d.,]+"
    ).unwrap();

    pub static ref DETECT_DUE_YEAR: Regex = Regex::new(
        r"(\d{2}/(\d{4}))\s+\d{2}/\d{2}/\d{4}\s+R\$"
    ).unwrap();
}

/// First bare `MM/YYYY` occurrence that is not the interior of a
/// `dd/mm/yyyy` date.
///
/// The regex crate has no lookbehind, so the "not preceded by `<digit>/`"
/// condition is checked on the match position instead.
pub fn find_bare_reference(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    for m in REFERENCE_BARE.find_iter(text) {
        let start = m.start();
        let inside_date =
            start >= 2 && bytes[start - 1] == b'/' && bytes[start - 2].is_ascii_digit();
        if !inside_date {
            return Some(m.as_str());
        }
    }
    None
}
