//! Error types for the Core layer.

use prefkit_ll_store::LLError;
use thiserror::Error;

use crate::format::Format;

/// Errors at the Core layer.
///
/// These add codec failures to the persistence errors from the LL layer.
/// A missing entry, or a native entry of the wrong scalar kind, is not an
/// error: reads report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum Error {
    /// The codec could not serialize a value.
    #[error("encode error ({format}): {message}")]
    Encode { format: Format, message: String },

    /// Bytes were present but malformed or did not match the requested type.
    #[error("decode error ({format}): {message}")]
    Decode { format: Format, message: String },

    /// Error from the LL layer.
    #[error("store error: {0}")]
    Store(#[from] LLError),
}

impl Error {
    pub fn encode(format: Format, message: impl Into<String>) -> Self {
        Error::Encode {
            format,
            message: message.into(),
        }
    }

    pub fn decode(format: Format, message: impl Into<String>) -> Self {
        Error::Decode {
            format,
            message: message.into(),
        }
    }

    /// True for encode and decode failures, false for store failures.
    pub fn is_codec(&self) -> bool {
        matches!(self, Error::Encode { .. } | Error::Decode { .. })
    }
}
