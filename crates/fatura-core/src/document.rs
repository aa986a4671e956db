//! Decoder boundary: positioned first-page content consumed by the extractor.
//!
//! Document decoding (PDF parsing, decryption) is an external collaborator.
//! The extractor only ever needs the first page, either as a best-effort
//! reading-order text block or as a list of positioned word tokens.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A word token with its position on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Text content of the word.
    pub text: String,

    /// Horizontal start offset on the page.
    pub x0: f32,

    /// Vertical top offset (baseline row coordinate).
    pub top: f32,
}

impl Word {
    pub fn new(text: impl Into<String>, x0: f32, top: f32) -> Self {
        Self {
            text: text.into(),
            x0,
            top,
        }
    }
}

/// Decoded content of a document's first page.
#[derive(Debug, Clone, Default)]
pub struct FirstPage {
    /// Best-effort reading-order text block.
    pub text: String,

    /// Word tokens with positions, for layouts whose reading-order text
    /// interleaves columns and has to be rebuilt row by row.
    pub words: Vec<Word>,
}

/// A document source handed to the decoder.
#[derive(Debug, Clone, Copy)]
pub enum DocumentInput<'a> {
    /// Path to a document on disk.
    Path(&'a Path),
    /// In-memory document bytes.
    Bytes(&'a [u8]),
}

/// Trait for the document decoding collaborator.
///
/// Implementations open the document read-only, decode only the first page,
/// and release the handle before returning on every exit path. One call is
/// one bounded parse; no state crosses invocations.
pub trait PageDecoder {
    /// Decode the first page of the document.
    fn first_page(&self, input: DocumentInput<'_>, password: Option<&str>) -> Result<FirstPage>;
}
