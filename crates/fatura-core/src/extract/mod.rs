//! Bill extraction pipeline.
//!
//! Control flow: facade -> format detector -> generation parser -> (line
//! reconstructor when the layout needs it) -> per line: noise filter ->
//! segmenter -> field mapper -> value normalizer -> assembled records ->
//! column standardization and numeric coercion -> two output record sets.

pub mod detect;
pub mod fields;
pub mod noise;
pub mod normalize;
pub mod parser;
pub mod patterns;
pub mod reconstruct;
pub mod segment;
pub mod standardize;

pub use detect::{detect_generation, Generation};
pub use parser::{GenerationParser, RawBill, RawRecord};
pub use reconstruct::DEFAULT_ROW_TOLERANCE;
pub use segment::{LineKind, SegmentedLine};

use chrono::NaiveDate;
use tracing::{error, info};

use crate::document::{DocumentInput, FirstPage, PageDecoder};
use crate::error::DocumentError;
use crate::models::{
    BillTables, FinancialItem, MeasurementItem, DEFAULT_BILLING_DAYS, DEFAULT_SEGMENT,
};

/// Extract both record sets from a document.
///
/// Total with respect to the document: decoder failures are logged and
/// collapse into empty tables, so a batch import never aborts on one bad
/// file. A wrong password and a corrupt document produce different log
/// entries but the same empty outcome.
pub fn extract_bill<D: PageDecoder>(
    decoder: &D,
    input: DocumentInput<'_>,
    password: Option<&str>,
) -> BillTables {
    let page = match decoder.first_page(input, password) {
        Ok(page) => page,
        Err(DocumentError::WrongPassword) => {
            error!("password error: document is encrypted and the supplied password does not match");
            return BillTables::default();
        }
        Err(err) => {
            error!("critical extraction failure: {err}");
            return BillTables::default();
        }
    };

    extract_from_page(&page)
}

/// Extract both record sets from already-decoded first-page content.
pub fn extract_from_page(page: &FirstPage) -> BillTables {
    let generation = detect_generation(&page.text);
    let parser = GenerationParser::new(generation);
    let raw = parser.parse(page);
    assemble(&raw)
}

/// Attach the reference period and client id to every raw record,
/// standardize column names, and coerce values into typed items.
fn assemble(raw: &RawBill) -> BillTables {
    let mut tables = BillTables::default();

    for record in &raw.items {
        tables
            .financial
            .push(financial_from_record(record, &raw.reference, &raw.client_id));
    }
    for record in &raw.measurement {
        tables
            .measurement
            .push(measurement_from_record(record, &raw.reference, &raw.client_id));
    }

    info!(
        financial = tables.financial.len(),
        measurement = tables.measurement.len(),
        reference = %raw.reference,
        "assembled bill tables"
    );
    tables
}

/// Re-key a raw record through column canonicalization. The parsers already
/// emit canonical keys, so this is a no-op for them; it keeps the facade
/// correct for records assembled from printed header labels.
fn canonicalized(record: &RawRecord) -> RawRecord {
    record
        .iter()
        .map(|(key, value)| (standardize::canonical_column(key), value.clone()))
        .collect()
}

fn financial_from_record(record: &RawRecord, reference: &str, client_id: &str) -> FinancialItem {
    let record = canonicalized(record);
    let get = |key: &str| record.get(key).map(String::as_str).unwrap_or("");
    // Financial numerics default to zero when missing or unparseable.
    let money = |key: &str| normalize::parse_decimal(get(key)).unwrap_or_default();

    FinancialItem {
        descricao: get("descricao").to_string(),
        unidade: get("unidade").to_string(),
        quantidade: money("quantidade"),
        preco_unitario: money("preco_unitario"),
        valor_total: money("valor_total"),
        pis_cofins: money("pis_cofins"),
        base_calculo_icms: money("base_calculo_icms"),
        aliquota_icms: money("aliquota_icms"),
        valor_icms: money("valor_icms"),
        tarifa_unitaria: money("tarifa_unitaria"),
        mes_referencia: reference.to_string(),
        numero_cliente: client_id.to_string(),
    }
}

fn measurement_from_record(record: &RawRecord, reference: &str, client_id: &str) -> MeasurementItem {
    let record = canonicalized(record);
    let get = |key: &str| record.get(key).map(String::as_str).unwrap_or("");
    // Measurement numerics stay None when missing or unparseable.
    let reading = |key: &str| normalize::parse_decimal(get(key));
    let date = |key: &str| NaiveDate::parse_from_str(get(key), "%d/%m/%Y").ok();

    let segmento = get("segmento").trim();
    let numero_dias = get("numero_dias").trim().parse().unwrap_or(DEFAULT_BILLING_DAYS);

    MeasurementItem {
        numero_medidor: get("numero_medidor").to_string(),
        segmento: if segmento.is_empty() {
            DEFAULT_SEGMENT.to_string()
        } else {
            segmento.to_string()
        },
        data_leitura_anterior: date("data_leitura_anterior"),
        leitura_anterior: reading("leitura_anterior"),
        data_leitura_atual: date("data_leitura_atual"),
        leitura_atual: reading("leitura_atual"),
        fator_multiplicador: reading("fator_multiplicador"),
        consumo_kwh: reading("consumo_kwh"),
        numero_dias,
        mes_referencia: reference.to_string(),
        numero_cliente: client_id.to_string(),
    }
}
