//! Error types for the argument converter.
//!
//! Backends report a [`CodecError`]; the codec wraps it into either an
//! [`EncodingError`] or a [`DecodingError`] together with the call context.

use std::fmt;
use thiserror::Error;

use crate::payload::Payload;

/// Failure reported by a converter backend.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload was absent but arguments were expected
    #[error("Content doesn't match expected arguments: expected {expected}, payload is empty")]
    ArityMismatch { expected: usize },

    /// A trailing argument was absent and its type has no null value
    #[error("Missing argument {index} of type {type_name}")]
    MissingArgument {
        index: usize,
        type_name: &'static str,
    },

    #[error("{0}")]
    Other(String),
}

impl CodecError {
    pub fn other(message: impl Into<String>) -> Self {
        CodecError::Other(message.into())
    }
}

/// Error raised when a list of values cannot be encoded.
///
/// The offending values are identified by their type names in argument
/// order. The values themselves are not kept, since arguments only need to
/// be `Serialize` and may not implement `Debug`.
#[derive(Debug, Error)]
#[error("EncodingError: types={}, cause={source}", TypeNames(.type_names))]
pub struct EncodingError {
    pub type_names: Vec<&'static str>,
    #[source]
    pub source: CodecError,
}

impl EncodingError {
    pub fn new(type_names: Vec<&'static str>, source: CodecError) -> Self {
        Self { type_names, source }
    }

    pub fn type_names(&self) -> &[&'static str] {
        &self.type_names
    }
}

/// Error raised when a payload cannot be decoded into the expected types
#[derive(Debug, Error)]
#[error(
    "DecodingError: types={}, payload={payload}, cause={source}",
    TypeNames(.type_names)
)]
pub struct DecodingError {
    pub payload: Payload,
    pub type_names: Vec<&'static str>,
    #[source]
    pub source: CodecError,
}

impl DecodingError {
    pub fn new(payload: Payload, type_names: Vec<&'static str>, source: CodecError) -> Self {
        Self {
            payload,
            type_names,
            source,
        }
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn type_names(&self) -> &[&'static str] {
        &self.type_names
    }
}

/// Main converter error type
#[derive(Debug, Error)]
pub enum ConverterError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Decoding(#[from] DecodingError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type ConverterResult<T> = Result<T, ConverterError>;

pub fn is_encoding_error(err: &ConverterError) -> bool {
    matches!(err, ConverterError::Encoding(_))
}

pub fn is_decoding_error(err: &ConverterError) -> bool {
    matches!(err, ConverterError::Decoding(_))
}

struct TypeNames<'a>(&'a [&'static str]);

impl fmt::Display for TypeNames<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}
