use thiserror::Error;

use crate::primitives::ReadError;
use crate::registry::RegistryError;

/// Errors that terminate a decode call.
///
/// Display strings are the messages placed in a result's `errors` list.
///
/// # Examples
/// ```
/// use uplink_core::engine::DecodeError;
///
/// let err = DecodeError::FieldTooShort { field: "Battery Voltage", width: 2 };
/// assert_eq!(err.to_string(), "Payload Length too short for Battery Voltage (2 Bytes)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Uplink Input Variable was Null")]
    NullInput,
    #[error("Empty Payload Data")]
    EmptyPayload,
    #[error("Payload Length too short for {field} ({width} {unit})", unit = byte_unit(.width))]
    FieldTooShort { field: &'static str, width: usize },
    #[error("failed to read {field}: {source}")]
    Read {
        field: &'static str,
        #[source]
        source: ReadError,
    },
    #[error("invalid field table: {0}")]
    Registry(#[from] RegistryError),
}

fn byte_unit(width: &usize) -> &'static str {
    if *width == 1 { "Byte" } else { "Bytes" }
}

#[cfg(test)]
mod tests {
    use super::DecodeError;
    use crate::registry::{RegistryError, Tag};

    #[test]
    fn singular_byte_unit() {
        let err = DecodeError::FieldTooShort {
            field: "Digital Input States",
            width: 1,
        };
        assert_eq!(
            err.to_string(),
            "Payload Length too short for Digital Input States (1 Byte)"
        );
    }

    #[test]
    fn input_messages() {
        assert_eq!(DecodeError::NullInput.to_string(), "Uplink Input Variable was Null");
        assert_eq!(DecodeError::EmptyPayload.to_string(), "Empty Payload Data");
    }

    #[test]
    fn registry_errors_convert() {
        let err: DecodeError = RegistryError::DuplicateTag {
            tag: Tag::Field(20),
            first: "a",
            second: "b",
        }
        .into();
        assert!(err.to_string().starts_with("invalid field table: duplicate tag 20"));
    }
}
