use tracing::debug;

use super::error::DecodeError;
use super::grammar::Grammar;
use super::step::{Accumulator, Control, Step, dispatch, step};
use crate::registry::{Registry, Tag};

/// Drive [`step`] from cursor 0 until a terminal state.
///
/// `Done` and `UnknownTag` return the accumulated readings; a length error
/// under the strict policy discards everything decoded so far.
///
/// # Examples
/// ```
/// use uplink_core::engine::{Grammar, run};
/// use uplink_core::families::Family;
///
/// let registry = Family::Milesight.registry().unwrap();
/// let acc = run(&Grammar::CHANNEL_TYPE, registry, &[0x01, 0x75, 0x57, 0x99, 0x99]).unwrap();
/// assert_eq!(acc.data["battery"].as_i64(), Some(87));
/// ```
pub fn run(grammar: &Grammar, registry: &Registry, payload: &[u8]) -> Result<Accumulator, DecodeError> {
    run_from(grammar, registry, payload, None)
}

/// Like [`run`], but when `first_tag` is given the payload starts with that
/// field's value instead of a tag.
///
/// # Examples
/// ```
/// use uplink_core::engine::{Grammar, run_from};
/// use uplink_core::families::Family;
/// use uplink_core::registry::Tag;
///
/// let registry = Family::SensorNode.registry().unwrap();
/// let acc = run_from(&Grammar::FIELD_STREAM, registry, &[0xE8, 0x0E], Some(Tag::Field(20))).unwrap();
/// assert_eq!(acc.data["battery_voltage"].as_i64(), Some(3816));
/// ```
pub fn run_from(
    grammar: &Grammar,
    registry: &Registry,
    payload: &[u8],
    first_tag: Option<Tag>,
) -> Result<Accumulator, DecodeError> {
    let mut cursor = 0;
    let mut acc = Accumulator::default();
    let mut pending = first_tag;

    loop {
        let Step {
            cursor: next,
            acc: updated,
            control,
        } = match pending.take() {
            Some(tag) => dispatch(grammar, registry, payload, cursor, tag, cursor, acc)?,
            None => step(grammar, registry, payload, cursor, acc)?,
        };
        debug_assert!(next >= cursor && next <= payload.len());
        cursor = next;
        acc = updated;

        match control {
            Control::Continue => {}
            Control::Done => break,
            Control::UnknownTag(tag) => {
                debug!(
                    family = registry.family(),
                    cursor,
                    %tag,
                    "unknown tag, ending stream"
                );
                break;
            }
        }
    }

    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::{run, run_from};
    use crate::engine::error::DecodeError;
    use crate::engine::grammar::Grammar;
    use crate::registry::{Extract, FieldDef, Registry, Tag, ValueKind};
    use crate::result::Value;

    static FIELDS: &[FieldDef] = &[
        FieldDef {
            tag: Tag::Field(20),
            name: "Battery Voltage",
            width: 2,
            values: &[Extract::new("battery_voltage", 0, ValueKind::U16Le)],
            sentinel: None,
        },
        FieldDef {
            tag: Tag::Field(21),
            name: "Analog Input #1",
            width: 2,
            values: &[Extract::new("analog_input1", 0, ValueKind::U16Le)],
            sentinel: None,
        },
    ];

    fn registry() -> Registry {
        Registry::new("test", FIELDS).unwrap()
    }

    #[test]
    fn runs_until_exhausted() {
        let acc = run(
            &Grammar::FIELD_STREAM,
            &registry(),
            &[20, 0xE8, 0x0E, 21, 0x01, 0x00],
        )
        .unwrap();
        assert_eq!(acc.data["battery_voltage"], Value::Integer(3816));
        assert_eq!(acc.data["analog_input1"], Value::Integer(1));
        assert!(acc.warnings.is_empty());
    }

    #[test]
    fn strict_error_discards_prior_fields() {
        let err = run(&Grammar::FIELD_STREAM, &registry(), &[20, 0xE8, 0x0E, 21, 0x01]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Payload Length too short for Analog Input #1 (2 Bytes)"
        );
    }

    #[test]
    fn later_key_overwrites_earlier() {
        let acc = run(
            &Grammar::FIELD_STREAM,
            &registry(),
            &[20, 0x01, 0x00, 20, 0x02, 0x00],
        )
        .unwrap();
        assert_eq!(acc.data["battery_voltage"], Value::Integer(2));
        assert_eq!(acc.data.len(), 1);
    }

    #[test]
    fn first_tag_precedes_the_payload() {
        let acc = run_from(
            &Grammar::FIELD_STREAM,
            &registry(),
            &[0xE8, 0x0E, 21, 0x01, 0x00],
            Some(Tag::Field(20)),
        )
        .unwrap();
        assert_eq!(acc.data["battery_voltage"], Value::Integer(3816));
        assert_eq!(acc.data["analog_input1"], Value::Integer(1));
        assert!(acc.warnings.is_empty());
    }

    #[test]
    fn unknown_first_tag_falls_through_to_payload() {
        let acc = run_from(
            &Grammar::FIELD_STREAM,
            &registry(),
            &[20, 0xE8, 0x0E],
            Some(Tag::Field(99)),
        )
        .unwrap();
        assert_eq!(acc.data["battery_voltage"], Value::Integer(3816));
        assert_eq!(acc.warnings, vec!["Unknown field id 99 skipped".to_string()]);
    }

    #[test]
    fn short_first_value_is_error() {
        let err = run_from(&Grammar::FIELD_STREAM, &registry(), &[0xE8], Some(Tag::Field(20)))
            .unwrap_err();
        assert_eq!(err, DecodeError::FieldTooShort { field: "Battery Voltage", width: 2 });
    }
}
