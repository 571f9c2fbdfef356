//! Codec errors

use thiserror::Error;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised by codec lookups and by decoders/encoders themselves
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// No decoder registered for the requested result type
    #[error("No decoder registered for {type_name}")]
    DecoderNotFound { type_name: String },

    /// No structural encoder registered for a runtime type
    #[error("No encoder registered for {type_name}")]
    EncoderNotFound { type_name: String },

    /// Document could not be turned into a value
    #[error("Cannot decode {type_name}: {message}")]
    Decode { type_name: String, message: String },

    /// Value could not be turned into a document
    #[error("Cannot encode {type_name}: {message}")]
    Encode { type_name: String, message: String },
}

impl CodecError {
    /// Create a decode error
    pub fn decode(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Create an encode error
    pub fn encode(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Encode {
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}
