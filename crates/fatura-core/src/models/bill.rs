//! Flat record models for the financial and measurement tables.
//!
//! Every record carries the reference period and client number denormalized,
//! matching the tabular shape downstream consumers ingest. Records are built
//! once per extraction run and never mutated afterwards.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel used when a reference-period or client-id pattern does not match.
///
/// A sentinel here is a soft failure: downstream record sets come out empty,
/// no error is raised.
pub const NOT_FOUND: &str = "Not Found";

/// Tariff-segment label assumed when the measurement table carries none.
pub const DEFAULT_SEGMENT: &str = "Convencional";

/// Billing-period day count assumed when the measurement table carries none.
pub const DEFAULT_BILLING_DAYS: u32 = 30;

/// One billed line item: a charge (positive) or credit/discount (negative).
///
/// Numeric fields default to zero when the source line did not carry the
/// column; sign information survives normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialItem {
    /// Item description.
    pub descricao: String,

    /// Unit keyword (kWh, kW, dias, unid, un), empty for simple lines.
    pub unidade: String,

    /// Billed quantity.
    pub quantidade: Decimal,

    /// Unit price including taxes.
    pub preco_unitario: Decimal,

    /// Total billed value for the line.
    pub valor_total: Decimal,

    /// PIS/COFINS tax amount.
    pub pis_cofins: Decimal,

    /// ICMS calculation base.
    pub base_calculo_icms: Decimal,

    /// ICMS rate.
    pub aliquota_icms: Decimal,

    /// ICMS amount.
    pub valor_icms: Decimal,

    /// Unit tariff without taxes.
    pub tarifa_unitaria: Decimal,

    /// Reference period (`MM/YYYY`) the bill covers.
    pub mes_referencia: String,

    /// Client number the bill belongs to.
    pub numero_cliente: String,
}

/// One meter-reading row of the measurement table.
///
/// Numeric fields stay `None` when unparseable; the day count and segment
/// label fall back to conventional defaults instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementItem {
    /// Meter identifier.
    pub numero_medidor: String,

    /// Tariff-segment/time-of-use label; distinguishes grid consumption from
    /// injected (e.g. solar) generation downstream.
    pub segmento: String,

    /// Date of the previous reading.
    pub data_leitura_anterior: Option<NaiveDate>,

    /// Previous reading value.
    pub leitura_anterior: Option<Decimal>,

    /// Date of the current reading.
    pub data_leitura_atual: Option<NaiveDate>,

    /// Current reading value.
    pub leitura_atual: Option<Decimal>,

    /// Meter multiplier factor.
    pub fator_multiplicador: Option<Decimal>,

    /// Computed consumption in kWh.
    pub consumo_kwh: Option<Decimal>,

    /// Billing-period day count.
    pub numero_dias: u32,

    /// Reference period (`MM/YYYY`) the bill covers.
    pub mes_referencia: String,

    /// Client number the bill belongs to.
    pub numero_cliente: String,
}

impl Default for MeasurementItem {
    fn default() -> Self {
        Self {
            numero_medidor: String::new(),
            segmento: DEFAULT_SEGMENT.to_string(),
            data_leitura_anterior: None,
            leitura_anterior: None,
            data_leitura_atual: None,
            leitura_atual: None,
            fator_multiplicador: None,
            consumo_kwh: None,
            numero_dias: DEFAULT_BILLING_DAYS,
            mes_referencia: String::new(),
            numero_cliente: String::new(),
        }
    }
}

/// The two record sets produced by one extraction run.
///
/// Both sequences may be empty; neither is ever absent. An unreadable
/// document yields a default value of this type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillTables {
    /// Billed line items.
    pub financial: Vec<FinancialItem>,

    /// Meter-reading line items.
    pub measurement: Vec<MeasurementItem>,
}
