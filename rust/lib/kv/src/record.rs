use serde::de::IgnoredAny;
use serde_json::Value;

use crate::error::KVError;

/// Textual input for a record value, classified before it is stored.
///
/// Input that already parses as JSON is kept verbatim; anything else is a
/// plain string and gets JSON-encoded, so every stored value decodes as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawValue<'a> {
    Json(&'a str),
    Plain(&'a str),
}

impl<'a> RawValue<'a> {
    pub fn classify(input: &'a str) -> Self {
        if serde_json::from_str::<IgnoredAny>(input).is_ok() {
            RawValue::Json(input)
        } else {
            RawValue::Plain(input)
        }
    }

    /// The input text as the caller supplied it.
    pub fn as_str(&self) -> &'a str {
        match *self {
            RawValue::Json(s) | RawValue::Plain(s) => s,
        }
    }

    /// Bytes to store for this value.
    pub fn encode(&self) -> Result<Vec<u8>, KVError> {
        match self {
            RawValue::Json(s) => Ok(s.as_bytes().to_vec()),
            RawValue::Plain(s) => {
                serde_json::to_vec(s).map_err(|e| KVError::Encode(e.to_string()))
            }
        }
    }
}

/// Decode stored bytes into a generic JSON value.
pub fn decode(bytes: &[u8]) -> Result<Value, KVError> {
    serde_json::from_slice(bytes).map_err(|e| KVError::Decode(e.to_string()))
}
