//! Decode results and the short-circuit input guard.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::DecodeError;

/// A single decoded reading.
///
/// Serialized untagged so that results read as plain JSON scalars:
/// integers stay integers, scaled values become numbers, and booleans are
/// rendered as the strings `"true"` / `"false"`.
///
/// # Examples
/// ```
/// use uplink_core::Value;
///
/// let json = serde_json::to_string(&Value::Integer(3816)).unwrap();
/// assert_eq!(json, "3816");
/// assert_eq!(Value::flag(true), Value::Text("true".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl Value {
    pub fn flag(set: bool) -> Self {
        Value::Text(if set { "true" } else { "false" }.to_string())
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(value) => Some(*value as f64),
            Value::Number(value) => Some(*value),
            Value::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// Outcome of one decode call: `{data, warnings, errors}`.
///
/// A non-empty `errors` means the result carries no usable data.
///
/// # Examples
/// ```
/// use uplink_core::{DecodeResult, build_error};
///
/// let result: DecodeResult = build_error("Empty Payload Data");
/// assert!(result.data.is_empty());
/// assert_eq!(result.errors, vec!["Empty Payload Data".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodeResult {
    /// Readings keyed by output name, in key order.
    pub data: BTreeMap<String, Value>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl DecodeResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

pub fn build_success(data: BTreeMap<String, Value>, warnings: Vec<String>) -> DecodeResult {
    DecodeResult {
        data,
        warnings,
        errors: Vec::new(),
    }
}

pub fn build_error(message: impl Into<String>) -> DecodeResult {
    DecodeResult {
        data: BTreeMap::new(),
        warnings: Vec::new(),
        errors: vec![message.into()],
    }
}

/// Entry guard applied before the engine runs: rejects missing and empty
/// payloads.
pub fn check_input(input: Option<&[u8]>) -> Result<&[u8], DecodeError> {
    match input {
        None => Err(DecodeError::NullInput),
        Some([]) => Err(DecodeError::EmptyPayload),
        Some(payload) => Ok(payload),
    }
}
