//! Projection errors
//!
//! Error code ranges:
//! - DSH0001-DSH0099: Document text errors
//! - DSH0100-DSH0199: Construction (validation) errors
//! - DSH0200-DSH0299: Codec registry errors
//! - DSH0300-DSH0399: Expression translation errors

use docshape_codec::CodecError;
use docshape_document::ParseError;
use std::fmt;
use thiserror::Error;

/// Result type for projection operations
pub type ProjectionResult<T> = Result<T, ProjectionError>;

/// Stable error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DSH{:04}", self.0)
    }
}

/// Malformed document text
pub const DSH0001: ErrorCode = ErrorCode::new(1);
/// Missing or empty constructor argument
pub const DSH0100: ErrorCode = ErrorCode::new(100);
/// No encoder for a runtime type
pub const DSH0200: ErrorCode = ErrorCode::new(200);
/// No decoder for a result type
pub const DSH0201: ErrorCode = ErrorCode::new(201);
/// Decoder or encoder failure
pub const DSH0202: ErrorCode = ErrorCode::new(202);
/// Unsupported selector expression
pub const DSH0300: ErrorCode = ErrorCode::new(300);

/// Errors raised while constructing or rendering projections
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// A required argument was absent; raised at construction
    #[error("Invalid projection: {message}")]
    Validation { message: String },

    /// Projection text is not valid document syntax
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// No structural encoder for the value's runtime type
    #[error("No encoder registered for {type_name}")]
    EncoderNotFound { type_name: String },

    /// No decoder for the declared result type
    #[error("No decoder registered for {type_name}")]
    DecoderNotFound { type_name: String },

    /// Selector expression uses a construct the translator cannot express
    #[error("Cannot translate selector: {message}")]
    Translation { message: String },

    /// Any other codec failure
    #[error(transparent)]
    Codec(CodecError),
}

impl ProjectionError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a translation error
    pub fn translation(message: impl Into<String>) -> Self {
        Self::Translation {
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse(_) => DSH0001,
            Self::Validation { .. } => DSH0100,
            Self::EncoderNotFound { .. } => DSH0200,
            Self::DecoderNotFound { .. } => DSH0201,
            Self::Codec(_) => DSH0202,
            Self::Translation { .. } => DSH0300,
        }
    }
}

impl From<CodecError> for ProjectionError {
    fn from(error: CodecError) -> Self {
        match error {
            CodecError::DecoderNotFound { type_name } => Self::DecoderNotFound { type_name },
            CodecError::EncoderNotFound { type_name } => Self::EncoderNotFound { type_name },
            other => Self::Codec(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_lookup_errors_are_lifted() {
        let err: ProjectionError = CodecError::DecoderNotFound {
            type_name: "Person".to_string(),
        }
        .into();
        assert_eq!(
            err,
            ProjectionError::DecoderNotFound {
                type_name: "Person".to_string()
            }
        );
        assert_eq!(err.code(), DSH0201);

        let err: ProjectionError = CodecError::decode("Person", "missing field").into();
        assert_eq!(err.code(), DSH0202);
    }

    #[test]
    fn test_code_display() {
        assert_eq!(DSH0001.to_string(), "DSH0001");
        assert_eq!(DSH0300.to_string(), "DSH0300");
        assert_eq!(
            ProjectionError::from(ParseError::new(3, "expected ':'")).code(),
            DSH0001
        );
    }
}
