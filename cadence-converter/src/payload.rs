//! Encoded argument payloads.

use std::fmt;

/// Encoded arguments of a single call.
///
/// A payload either holds bytes or is empty. The empty payload stands for
/// "no arguments" and is not the same thing as a zero-length byte buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Payload {
    data: Option<Vec<u8>>,
}

impl Payload {
    /// Create a payload holding the given bytes
    pub fn new(data: Vec<u8>) -> Self {
        Self { data: Some(data) }
    }

    /// The payload that carries no value at all
    pub fn empty() -> Self {
        Self { data: None }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }

    /// Get the raw bytes, if any
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Number of encoded bytes (zero for the empty payload)
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, Vec::len)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<Option<Vec<u8>>> for Payload {
    fn from(data: Option<Vec<u8>>) -> Self {
        Self { data }
    }
}

impl From<Payload> for Option<Vec<u8>> {
    fn from(payload: Payload) -> Self {
        payload.data
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            Some(data) => write!(f, "'{}'", String::from_utf8_lossy(data)),
            None => write!(f, "<empty>"),
        }
    }
}
