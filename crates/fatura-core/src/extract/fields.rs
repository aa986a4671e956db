//! Positional mapping of value tokens onto named fields.

use std::collections::BTreeMap;

use super::normalize::normalize_signed;
use super::patterns::TAX_LABEL_TAIL;
use super::segment::LineKind;

/// Field order for standard (unit-keyword) lines.
pub const STANDARD_FIELDS: [&str; 8] = [
    "quantidade",
    "preco_unitario",
    "valor_total",
    "pis_cofins",
    "base_calculo_icms",
    "aliquota_icms",
    "valor_icms",
    "tarifa_unitaria",
];

/// Tail fields for simple lines, filled after the total value.
pub const SIMPLE_TAIL: [&str; 4] = [
    "pis_cofins",
    "base_calculo_icms",
    "aliquota_icms",
    "valor_icms",
];

/// Map a value-token run onto the fixed field set for its line kind.
///
/// The layout has no column delimiters, so placement depends on how many
/// tokens survived extraction:
/// - standard, 3+ tokens: positional assignment along [`STANDARD_FIELDS`],
///   truncated to the tokens present (8+ tokens fill every field);
/// - standard, fewer than 3 tokens: nothing is placed;
/// - simple: first token is the total value, the rest fill [`SIMPLE_TAIL`].
///
/// Every key of [`STANDARD_FIELDS`] is present in the output, empty when
/// unassigned. Unknown arities never fail; they yield the partially-empty map.
pub fn map_values(values: &str, kind: LineKind) -> BTreeMap<&'static str, String> {
    let cleaned = TAX_LABEL_TAIL.replace(values, "");
    let cleaned = cleaned.trim();

    let tokens: Vec<String> = cleaned.split_whitespace().map(normalize_signed).collect();

    let mut columns: BTreeMap<&'static str, String> = STANDARD_FIELDS
        .iter()
        .map(|field| (*field, String::new()))
        .collect();

    if tokens.is_empty() {
        return columns;
    }

    match kind {
        LineKind::Standard => {
            if tokens.len() >= 3 {
                for (field, token) in STANDARD_FIELDS.iter().zip(tokens.iter()) {
                    columns.insert(*field, token.clone());
                }
            }
        }
        LineKind::Simple => {
            columns.insert("valor_total", tokens[0].clone());
            for (field, token) in SIMPLE_TAIL.iter().zip(tokens.iter().skip(1)) {
                columns.insert(*field, token.clone());
            }
        }
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_standard_eight_tokens() {
        let cols = map_values(
            "477,00 0,55 262,35 5,20 262,35 20,00 52,47 0,45",
            LineKind::Standard,
        );
        assert_eq!(cols["quantidade"], "477.00");
        assert_eq!(cols["preco_unitario"], "0.55");
        assert_eq!(cols["valor_total"], "262.35");
        assert_eq!(cols["tarifa_unitaria"], "0.45");
    }

    #[test]
    fn test_standard_partial_run() {
        let cols = map_values("477,00 0,55 262,35 5,20", LineKind::Standard);
        assert_eq!(cols["quantidade"], "477.00");
        assert_eq!(cols["valor_total"], "262.35");
        assert_eq!(cols["pis_cofins"], "5.20");
        assert_eq!(cols["base_calculo_icms"], "");
        assert_eq!(cols["tarifa_unitaria"], "");
    }

    #[test]
    fn test_standard_too_few_tokens() {
        let cols = map_values("477,00 0,55", LineKind::Standard);
        assert!(cols.values().all(String::is_empty));
    }

    #[test]
    fn test_simple_single_token() {
        let cols = map_values("23,01", LineKind::Simple);
        assert_eq!(cols["valor_total"], "23.01");
        assert_eq!(cols["quantidade"], "");
        assert_eq!(cols["pis_cofins"], "");
    }

    #[test]
    fn test_simple_with_tail() {
        let cols = map_values("23,01 0,43 23,01 20,00", LineKind::Simple);
        assert_eq!(cols["valor_total"], "23.01");
        assert_eq!(cols["pis_cofins"], "0.43");
        assert_eq!(cols["base_calculo_icms"], "23.01");
        assert_eq!(cols["aliquota_icms"], "20.00");
        assert_eq!(cols["valor_icms"], "");
    }

    #[test]
    fn test_tax_label_tail_stripped() {
        let cols = map_values(
            "477,00 0,55 262,35 ICMS 20,00",
            LineKind::Standard,
        );
        assert_eq!(cols["valor_total"], "262.35");
        assert_eq!(cols["pis_cofins"], "");
    }

    #[test]
    fn test_negative_tokens_keep_sign() {
        let cols = map_values("100,00 0,50 50,00- 1,20", LineKind::Standard);
        assert_eq!(cols["valor_total"], "-50.00");
    }
}
