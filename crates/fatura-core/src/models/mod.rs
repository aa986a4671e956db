//! Output data models for bill extraction.

mod bill;

pub use bill::{
    BillTables, FinancialItem, MeasurementItem, DEFAULT_BILLING_DAYS, DEFAULT_SEGMENT, NOT_FOUND,
};
