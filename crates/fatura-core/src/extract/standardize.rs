//! Column-name standardization for the output record sets.

/// Source-label to canonical-name rename table.
///
/// Labels are the column headers printed on the bill; canonical names are the
/// snake_case keys downstream consumers expect.
pub const COLUMN_RENAMES: &[(&str, &str)] = &[
    ("Itens de Fatura", "descricao"),
    ("Unid.", "unidade"),
    ("Quant.", "quantidade"),
    ("Preço unit (R$) com tributos", "preco_unitario"),
    ("Valor (R$)", "valor_total"),
    ("PIS/COFINS", "pis_cofins"),
    ("Base Calc ICMS (R$)", "base_calculo_icms"),
    ("Alíquota ICMS", "aliquota_icms"),
    ("ICMS", "valor_icms"),
    ("Tarifa unit (R$)", "tarifa_unitaria"),
    ("N° Medidor", "numero_medidor"),
    ("P.Horário/Segmento", "segmento"),
    ("Data Leitura (Anterior)", "data_leitura_anterior"),
    ("Leitura (Anterior)", "leitura_anterior"),
    ("Data Leitura (Atual)", "data_leitura_atual"),
    ("Leitura (Atual)", "leitura_atual"),
    ("Fator Multiplicador", "fator_multiplicador"),
    ("Consumo kWh", "consumo_kwh"),
    ("N° Dias", "numero_dias"),
];

/// Canonicalize a column label.
///
/// Trims, renames known source labels, transliterates Portuguese accents to
/// ASCII, lower-cases, and replaces spaces, slashes, and dots with
/// underscores. Idempotent: canonical names map to themselves.
pub fn canonical_column(label: &str) -> String {
    let trimmed = label.trim();
    if let Some((_, canonical)) = COLUMN_RENAMES
        .iter()
        .find(|(source, _)| *source == trimmed)
    {
        return (*canonical).to_string();
    }

    let mut out = String::with_capacity(trimmed.len());
    for c in trimmed.to_lowercase().chars() {
        match c {
            'á' | 'ã' | 'â' | 'à' => out.push('a'),
            'é' | 'ê' => out.push('e'),
            'í' => out.push('i'),
            'ó' | 'õ' | 'ô' => out.push('o'),
            'ú' => out.push('u'),
            'ç' => out.push('c'),
            ' ' | '/' | '.' => out.push('_'),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_known_labels_renamed() {
        assert_eq!(canonical_column("Itens de Fatura"), "descricao");
        assert_eq!(canonical_column("  Valor (R$) "), "valor_total");
        assert_eq!(canonical_column("P.Horário/Segmento"), "segmento");
        assert_eq!(canonical_column("N° Dias"), "numero_dias");
    }

    #[test]
    fn test_unknown_labels_transliterated() {
        assert_eq!(canonical_column("Alíquota Média"), "aliquota_media");
        assert_eq!(canonical_column("Preço/Posto Horário"), "preco_posto_horario");
    }

    #[test]
    fn test_canonicalization_is_idempotent() {
        for (source, _) in COLUMN_RENAMES {
            let once = canonical_column(source);
            let twice = canonical_column(&once);
            assert_eq!(once, twice);
        }
        assert_eq!(
            canonical_column(&canonical_column("Alíquota Média")),
            "aliquota_media"
        );
    }
}
