//! Serialization backends.
//!
//! The argument codec talks to its backends only through these traits, so
//! the primary and fallback converters are interchangeable.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::descriptor::TypeDescriptor;
use crate::error::CodecError;

/// Trait for data converters/serializers
pub trait DataConverter: Send + Sync {
    /// Encode a single value to bytes
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Encode an ordered list of values to one array-shaped buffer.
    ///
    /// `values` must serialize as a sequence (a tuple, slice or `Vec`).
    fn encode_array<T: Serialize + ?Sized>(&self, values: &T) -> Result<Vec<u8>, CodecError> {
        self.encode(values)
    }

    /// Decode bytes to a value
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError>;
}

/// A converter that can also expose its payloads as a structured tree.
pub trait TreeConverter: DataConverter {
    /// Parse bytes into a tree without committing to a target type
    fn parse_tree(&self, data: &[u8]) -> Result<Value, CodecError>;

    /// Convert a tree node into the target type
    fn convert_node<T: DeserializeOwned>(&self, node: Value) -> Result<T, CodecError>;

    /// Describe a target type
    fn describe<T: ?Sized>(&self) -> TypeDescriptor {
        TypeDescriptor::of::<T>()
    }
}

/// Default JSON data converter
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDataConverter;

impl JsonDataConverter {
    pub fn new() -> Self {
        Self
    }
}

impl DataConverter for JsonDataConverter {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(value)?)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError> {
        Ok(serde_json::from_slice(data)?)
    }
}

impl TreeConverter for JsonDataConverter {
    fn parse_tree(&self, data: &[u8]) -> Result<Value, CodecError> {
        Ok(serde_json::from_slice(data)?)
    }

    fn convert_node<T: DeserializeOwned>(&self, node: Value) -> Result<T, CodecError> {
        Ok(serde_json::from_value(node)?)
    }
}
