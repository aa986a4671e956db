//! Core library for Enel-CE energy bill extraction.
//!
//! This crate turns the positionally-extracted text of an electricity bill's
//! first page into two structured record sets:
//! - financial line items (billed charges and credits)
//! - measurement line items (meter readings and consumption in kWh)
//!
//! The source text is a lossy, whitespace-aligned rendering of a tabular
//! layout with no reliable delimiters, so the pipeline is heuristic
//! throughout: table boundaries come from header/footer keyword markers,
//! columns from unit-keyword and numeric-run splits, and field placement from
//! arity-dependent positional mapping.
//!
//! Two bill-format generations are supported through one pipeline: the 2025
//! layout, whose native reading-order text is usable line for line, and the
//! 2026 layout, whose native text interleaves columns and is rebuilt from
//! positioned words instead (dropping the color-plate markers that leak into
//! it). Document decoding (PDF parsing, decryption) is a collaborator behind
//! the [`PageDecoder`] trait; the extraction facade never raises, converting
//! decoder failures into empty record sets.

pub mod document;
pub mod error;
pub mod extract;
pub mod models;

pub use document::{DocumentInput, FirstPage, PageDecoder, Word};
pub use error::{DocumentError, Result};
pub use extract::{
    detect_generation, extract_bill, extract_from_page, Generation, GenerationParser, RawBill,
    RawRecord,
};
pub use models::{BillTables, FinancialItem, MeasurementItem};
