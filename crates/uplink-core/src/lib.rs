//! Uplink core library for LoRaWAN payload decoding.
//!
//! This crate turns raw uplink bytes into named readings. A device family
//! selects a grammar and a static field table; the engine walks the payload,
//! reads a tag, dispatches to a fixed-width field definition and repeats
//! until the payload is exhausted or an unrecognised tag ends the stream.
//! Byte conventions live in `primitives`, field tables in `families`, and the
//! engine itself knows nothing about any particular device. For field-stream
//! families the envelope's fPort names the first field, so a bare buffer and
//! an envelope carry the same readings in slightly different shapes.
//!
//! Invariants:
//! - Decoding is pure: no I/O, no state carried between calls.
//! - The cursor only moves forward and never passes the end of the payload.
//! - A non-empty `errors` list means `data` is empty.
//!
//! # Examples
//! ```
//! use uplink_core::{Value, decode};
//! use uplink_core::families::Family;
//!
//! let result = decode(Family::SensorNode, &[20, 0xE8, 0x0E]);
//! assert_eq!(result.get("battery_voltage"), Some(&Value::Integer(3816)));
//! assert!(result.errors.is_empty());
//!
//! let uplink = uplink_core::Uplink { bytes: vec![0xE8, 0x0E], f_port: 20 };
//! let result = uplink_core::decode_uplink(Family::SensorNode, Some(&uplink));
//! assert_eq!(result.get("battery_voltage"), Some(&Value::Integer(3816)));
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub mod engine;
pub mod families;
pub mod primitives;
pub mod registry;
pub mod result;

use engine::DecodeError;
use families::Family;
use registry::Tag;

pub use result::{DecodeResult, Value, build_error, build_success};

/// Uplink envelope as delivered by the network server.
///
/// # Examples
/// ```
/// use uplink_core::Uplink;
///
/// let uplink: Uplink = serde_json::from_str(r#"{"bytes": [1, 117, 87], "fPort": 85}"#).unwrap();
/// assert_eq!(uplink.f_port, 85);
/// assert_eq!(uplink.bytes, vec![0x01, 0x75, 0x57]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uplink {
    pub bytes: Vec<u8>,
    /// LoRaWAN application port. Field-stream families read it as the id of
    /// the first field; 0 means the payload starts with a tag.
    #[serde(rename = "fPort", default)]
    pub f_port: u8,
}

/// Decode an uplink envelope. `None` stands for a null input.
pub fn decode_uplink(family: Family, uplink: Option<&Uplink>) -> DecodeResult {
    if let Some(uplink) = uplink {
        debug!(%family, f_port = uplink.f_port, len = uplink.bytes.len(), "decoding uplink");
    }
    let first_tag = uplink.and_then(|uplink| family.grammar().port_tag(Some(uplink.f_port)));
    decode_input(family, uplink.map(|uplink| uplink.bytes.as_slice()), first_tag)
}

/// Decode a bare payload buffer.
pub fn decode(family: Family, payload: &[u8]) -> DecodeResult {
    decode_input(family, Some(payload), None)
}

fn decode_input(family: Family, input: Option<&[u8]>, first_tag: Option<Tag>) -> DecodeResult {
    match try_decode(family, input, first_tag) {
        Ok(result) => result,
        Err(err) => {
            debug!(%family, error = %err, "decode failed");
            build_error(err.to_string())
        }
    }
}

fn try_decode(
    family: Family,
    input: Option<&[u8]>,
    first_tag: Option<Tag>,
) -> Result<DecodeResult, DecodeError> {
    let payload = result::check_input(input)?;
    let registry = family.registry().inspect_err(|err| {
        warn!(%family, error = %err, "field table failed validation");
    })?;
    let acc = engine::run_from(&family.grammar(), registry, payload, first_tag)?;
    Ok(build_success(acc.data, acc.warnings))
}

#[cfg(test)]
mod tests {
    use super::{Uplink, Value, decode, decode_uplink};
    use crate::families::Family;

    #[test]
    fn null_and_empty_input_for_every_family() {
        for family in Family::ALL {
            let null = decode_uplink(family, None);
            assert!(null.data.is_empty());
            assert!(null.warnings.is_empty());
            assert_eq!(null.errors, vec!["Uplink Input Variable was Null".to_string()]);

            let empty = decode(family, &[]);
            assert!(empty.data.is_empty());
            assert!(empty.warnings.is_empty());
            assert_eq!(empty.errors, vec!["Empty Payload Data".to_string()]);
        }
    }

    #[test]
    fn envelope_bytes_are_decoded() {
        let uplink = Uplink {
            bytes: vec![0x01, 0x75, 0x57, 0x99, 0x99],
            f_port: 85,
        };
        let result = decode_uplink(Family::Milesight, Some(&uplink));
        assert!(result.is_success());
        assert_eq!(result.get("battery"), Some(&Value::Integer(87)));
        assert_eq!(result.data.len(), 1);
    }

    #[test]
    fn missing_port_defaults_to_zero() {
        let uplink: Uplink = serde_json::from_str(r#"{"bytes": [20, 232, 14]}"#).unwrap();
        assert_eq!(uplink.f_port, 0);
        let result = decode_uplink(Family::SensorNode, Some(&uplink));
        assert_eq!(result.get("battery_voltage"), Some(&Value::Integer(3816)));
    }

    #[test]
    fn port_names_the_first_field() {
        let uplink = Uplink {
            bytes: vec![0xE8, 0x0E],
            f_port: 20,
        };
        let result = decode_uplink(Family::SensorNode, Some(&uplink));
        assert_eq!(result.get("battery_voltage"), Some(&Value::Integer(3816)));
        assert!(result.warnings.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn port_seeded_stream_continues_with_tags() {
        let uplink = Uplink {
            bytes: vec![0xE8, 0x0E, 21, 0x10, 0x00],
            f_port: 20,
        };
        let result = decode_uplink(Family::SensorNode, Some(&uplink));
        assert_eq!(result.get("battery_voltage"), Some(&Value::Integer(3816)));
        assert_eq!(result.get("analog_input1"), Some(&Value::Integer(16)));
        assert!(result.is_success());
    }

    #[test]
    fn port_seeded_value_too_short_is_error() {
        let uplink = Uplink {
            bytes: vec![0xE8],
            f_port: 20,
        };
        let result = decode_uplink(Family::SensorNode, Some(&uplink));
        assert!(result.data.is_empty());
        assert_eq!(
            result.errors,
            vec!["Payload Length too short for Battery Voltage (2 Bytes)".to_string()]
        );
    }

    #[test]
    fn channel_families_ignore_the_port() {
        let payload = [0x01, 0x75, 0x57];
        let uplink = Uplink {
            bytes: payload.to_vec(),
            f_port: 85,
        };
        assert_eq!(
            decode_uplink(Family::Milesight, Some(&uplink)),
            decode(Family::Milesight, &payload)
        );
    }

    #[test]
    fn appended_garbage_leaves_channel_fields_untouched() {
        let valid = [0x01, 0x75, 0x57, 0x03, 0x67, 0x10, 0x01, 0x04, 0x68, 0x57];
        let baseline = decode(Family::Milesight, &valid);

        let garbages: [&[u8]; 3] = [
            &[0xAB, 0xCD],
            &[0x99, 0x99, 0x01, 0x75, 0x00],
            &[0xEE, 0x00, 0xFF, 0xFF, 0xFF],
        ];
        for garbage in garbages {
            let mut payload = valid.to_vec();
            payload.extend_from_slice(garbage);
            let result = decode(Family::Milesight, &payload);
            assert_eq!(result, baseline, "garbage {garbage:02x?}");
            assert!(result.errors.is_empty());
        }
    }

    #[test]
    fn families_do_not_share_tag_meaning() {
        let payload = [0x01, 0x75, 0x57];
        assert_eq!(
            decode(Family::Milesight, &payload).get("battery"),
            Some(&Value::Integer(87))
        );
        let sensor = decode(Family::SensorNode, &payload);
        assert!(sensor.get("battery").is_none());
        assert!(!sensor.is_success());
    }

    #[test]
    fn decoding_is_thread_safe() {
        let handles: Vec<_> = Family::ALL
            .into_iter()
            .map(|family| std::thread::spawn(move || decode(family, &[0x01, 0x75, 0x57])))
            .collect();
        for handle in handles {
            handle.join().expect("decode thread");
        }
    }
}
