//! Document errors

use thiserror::Error;

/// Malformed document text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid document text at offset {offset}: {message}")]
pub struct ParseError {
    /// Byte offset where parsing stopped
    pub offset: usize,
    /// What the parser expected
    pub message: String,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// Failure converting foreign values into a [`crate::Document`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Top-level value was not an object
    #[error("Expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}
