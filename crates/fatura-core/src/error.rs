//! Error types for the fatura-core library.

use thiserror::Error;

/// Errors raised by the document decoding collaborator.
///
/// The extraction facade converts every variant into empty output tables;
/// callers never see these unless they drive a [`crate::document::PageDecoder`]
/// directly. Wrong-password and corrupt-document failures stay distinct so
/// they can be logged with different messages.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document is encrypted and the password is wrong or missing.
    #[error("wrong or missing password")]
    WrongPassword,

    /// The document binary is corrupt or not a supported format.
    #[error("unreadable document: {0}")]
    Unreadable(String),

    /// The document could not be read from disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the fatura library.
pub type Result<T> = std::result::Result<T, DocumentError>;
