use std::collections::BTreeMap;

use tracing::trace;

use super::error::DecodeError;
use super::grammar::{Grammar, ShortReadPolicy, TagLayout, UnknownTagPolicy};
use crate::primitives::{PayloadReader, ReadError, format_version, hex_serial};
use crate::registry::{Extract, FieldDef, MAX_FIELD_WIDTH, Registry, Tag, ValueKind};
use crate::result::Value;

/// Readings and warnings gathered so far in one decode call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accumulator {
    pub data: BTreeMap<String, Value>,
    pub warnings: Vec<String>,
}

/// What the driver should do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Scan the next tag at the returned cursor.
    Continue,
    /// Payload exhausted (or only a truncated tag remained).
    Done,
    /// Tag without a registry entry under [`UnknownTagPolicy::Stop`].
    UnknownTag(Tag),
}

/// Result of one dispatch step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub cursor: usize,
    pub acc: Accumulator,
    pub control: Control,
}

/// Run one Scanning → Dispatching transition starting at `cursor`.
///
/// Consumes the accumulator and hands back the updated one, so steps can be
/// tested and replayed in isolation. The returned cursor is never less than
/// `cursor` and never greater than `payload.len()`.
///
/// # Examples
/// ```
/// use uplink_core::engine::{Accumulator, Control, Grammar, step};
/// use uplink_core::families::Family;
///
/// let registry = Family::SensorNode.registry().unwrap();
/// let payload = [20, 0xE8, 0x0E];
/// let next = step(&Grammar::FIELD_STREAM, registry, &payload, 0, Accumulator::default()).unwrap();
/// assert_eq!(next.cursor, 3);
/// assert_eq!(next.control, Control::Continue);
/// assert_eq!(next.acc.data["battery_voltage"].as_i64(), Some(3816));
/// ```
pub fn step(
    grammar: &Grammar,
    registry: &Registry,
    payload: &[u8],
    cursor: usize,
    acc: Accumulator,
) -> Result<Step, DecodeError> {
    let reader = PayloadReader::new(payload);
    let Some(tag) = read_tag(&reader, grammar.tag_layout, cursor) else {
        return Ok(Step {
            cursor: cursor.min(payload.len()),
            acc,
            control: Control::Done,
        });
    };
    dispatch(
        grammar,
        registry,
        payload,
        cursor,
        tag,
        cursor + grammar.tag_layout.width(),
        acc,
    )
}

/// Dispatch an already known `tag` whose value starts at `value_start`.
///
/// [`step`] calls this after reading the tag at `cursor`; a tag supplied by
/// the envelope (see [`Grammar::port_tag`]) is dispatched with
/// `cursor == value_start`. An unknown tag under [`UnknownTagPolicy::Stop`]
/// leaves the cursor at `cursor`; under [`UnknownTagPolicy::Skip`] scanning
/// resumes at `value_start`.
///
/// # Examples
/// ```
/// use uplink_core::engine::{Accumulator, Grammar, dispatch};
/// use uplink_core::families::Family;
/// use uplink_core::registry::Tag;
///
/// let registry = Family::SensorNode.registry().unwrap();
/// let payload = [0xE8, 0x0E];
/// let next = dispatch(&Grammar::FIELD_STREAM, registry, &payload, 0, Tag::Field(20), 0, Accumulator::default()).unwrap();
/// assert_eq!(next.cursor, 2);
/// assert_eq!(next.acc.data["battery_voltage"].as_i64(), Some(3816));
/// ```
pub fn dispatch(
    grammar: &Grammar,
    registry: &Registry,
    payload: &[u8],
    cursor: usize,
    tag: Tag,
    value_start: usize,
    mut acc: Accumulator,
) -> Result<Step, DecodeError> {
    let reader = PayloadReader::new(payload);
    let Some(field) = registry.lookup(tag) else {
        return Ok(match grammar.unknown_tag {
            UnknownTagPolicy::Stop => Step {
                cursor,
                acc,
                control: Control::UnknownTag(tag),
            },
            UnknownTagPolicy::Skip => {
                trace!(cursor, %tag, "skipping unknown field id");
                acc.warnings.push(format!("Unknown field id {tag} skipped"));
                Step {
                    cursor: value_start.min(payload.len()),
                    acc,
                    control: Control::Continue,
                }
            }
        });
    };

    let mut window = [0u8; MAX_FIELD_WIDTH];
    let present = match reader.require_len(value_start + field.width) {
        Ok(()) => field.width,
        Err(_) => match grammar.short_read {
            ShortReadPolicy::Strict => {
                return Err(DecodeError::FieldTooShort {
                    field: field.name,
                    width: field.width,
                });
            }
            ShortReadPolicy::ZeroFill => {
                let available = reader.remaining(value_start);
                acc.warnings.push(format!(
                    "{} truncated: {available} of {} bytes present, missing bytes read as zero",
                    field.name, field.width
                ));
                available
            }
        },
    };
    let bytes = read_field_bytes(&reader, field, value_start, present)?;
    window[..present].copy_from_slice(bytes);

    trace!(cursor, %tag, field = field.name, width = field.width, "dispatching field");
    emit_field(field, &window[..field.width], present, &mut acc)?;

    Ok(Step {
        cursor: (value_start + field.width).min(payload.len()),
        acc,
        control: Control::Continue,
    })
}

fn read_tag(reader: &PayloadReader<'_>, layout: TagLayout, cursor: usize) -> Option<Tag> {
    match layout {
        TagLayout::FieldId => reader.read_u8(cursor).ok().map(Tag::Field),
        TagLayout::ChannelType => {
            let id = reader.read_u8(cursor).ok()?;
            let kind = reader.read_u8(cursor + 1).ok()?;
            Some(Tag::Channel { id, kind })
        }
    }
}

fn read_field_bytes<'a>(
    reader: &PayloadReader<'a>,
    field: &FieldDef,
    start: usize,
    len: usize,
) -> Result<&'a [u8], DecodeError> {
    reader
        .read_slice(start..start + len)
        .map_err(|source| DecodeError::Read {
            field: field.name,
            source,
        })
}

/// Decode every extraction of `field` from its full-width window, of which
/// the first `present` bytes came from the payload.
fn emit_field(
    field: &FieldDef,
    raw: &[u8],
    present: usize,
    acc: &mut Accumulator,
) -> Result<(), DecodeError> {
    if let Some(sentinel) = field.sentinel {
        if sentinel.matches(raw) {
            acc.warnings.push(sentinel.warning.to_string());
            return Ok(());
        }
    }

    let reader = PayloadReader::new(raw);
    for value in field.values {
        match extract(&reader, value, present).map_err(|source| DecodeError::Read {
            field: field.name,
            source,
        })? {
            Extracted::Value(decoded) => {
                acc.data.insert(value.key.to_string(), decoded);
            }
            Extracted::Unmapped(byte) => {
                acc.warnings
                    .push(format!("Unrecognised {} value: {byte}", field.name));
            }
        }
    }
    Ok(())
}

enum Extracted {
    Value(Value),
    Unmapped(u8),
}

fn extract(
    reader: &PayloadReader<'_>,
    value: &Extract,
    present: usize,
) -> Result<Extracted, ReadError> {
    let offset = value.offset;
    let decoded = match value.kind {
        ValueKind::U8 => Raw::Int(i64::from(reader.read_u8(offset)?)),
        ValueKind::I8 => Raw::Int(i64::from(reader.read_i8(offset)?)),
        ValueKind::U16Le => Raw::Int(i64::from(reader.read_u16_le(offset)?)),
        ValueKind::I16Le => Raw::Int(i64::from(reader.read_i16_le(offset)?)),
        ValueKind::I24Le => Raw::Int(i64::from(reader.read_i24_le(offset)?)),
        ValueKind::U32Le => Raw::Int(i64::from(reader.read_u32_le(offset)?)),
        ValueKind::I32Le => Raw::Int(i64::from(reader.read_i32_le(offset)?)),
        ValueKind::F32Le => Raw::Float(f64::from(reader.read_f32_le(offset)?)),
        ValueKind::Hex(len) => {
            // Padding bytes never reach a serial number.
            let end = (offset + len).min(present.max(offset));
            let bytes = reader.read_slice(offset..end)?;
            return Ok(Extracted::Value(Value::Text(hex_serial(bytes))));
        }
        ValueKind::Flag { mask, invert } => {
            let set = reader.read_u8(offset)? & mask != 0;
            return Ok(Extracted::Value(Value::flag(set != invert)));
        }
        ValueKind::Enum(table) => {
            let byte = reader.read_u8(offset)?;
            return Ok(match table.iter().find(|(raw, _)| *raw == byte) {
                Some((_, label)) => Extracted::Value(Value::Text((*label).to_string())),
                None => Extracted::Unmapped(byte),
            });
        }
        ValueKind::Constant(text) => return Ok(Extracted::Value(Value::Text(text.to_string()))),
        ValueKind::Version(format) => {
            let bytes = reader.read_slice(offset..offset + format.width())?;
            let rendered = format_version(format, bytes).ok_or(ReadError::TooShort {
                needed: format.width(),
                actual: bytes.len(),
            })?;
            return Ok(Extracted::Value(Value::Text(rendered)));
        }
    };

    let value = match (decoded, value.transform) {
        (Raw::Int(raw), None) => Value::Integer(raw),
        (Raw::Float(raw), None) => Value::Number(raw),
        (Raw::Int(raw), Some(transform)) => Value::Number(transform.apply(raw as f64)),
        (Raw::Float(raw), Some(transform)) => Value::Number(transform.apply(raw)),
    };
    Ok(Extracted::Value(value))
}

enum Raw {
    Int(i64),
    Float(f64),
}
