use std::fmt;

use crate::primitives::VersionFormat;

/// Largest field payload a definition may declare.
pub const MAX_FIELD_WIDTH: usize = 8;

/// Identifier preceding a field in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    /// One field-id byte (field-stream grammar).
    Field(u8),
    /// A (channel-id, channel-type) pair (channel/type grammar).
    Channel { id: u8, kind: u8 },
}

impl Tag {
    /// Bytes the tag occupies in the payload.
    pub const fn width(self) -> usize {
        match self {
            Tag::Field(_) => 1,
            Tag::Channel { .. } => 2,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Field(id) => write!(f, "{id}"),
            Tag::Channel { id, kind } => write!(f, "0x{id:02x}/0x{kind:02x}"),
        }
    }
}

/// How the bytes of one extraction are interpreted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueKind {
    U8,
    I8,
    U16Le,
    I16Le,
    I24Le,
    U32Le,
    I32Le,
    F32Le,
    /// `n` raw bytes rendered as lowercase hex.
    Hex(usize),
    /// `"true"` when `byte & mask` is non-zero (inverted when `invert`).
    Flag { mask: u8, invert: bool },
    /// Byte looked up in a fixed table; unmapped values produce a warning.
    Enum(&'static [(u8, &'static str)]),
    /// Fixed text; reads no bytes.
    Constant(&'static str),
    Version(VersionFormat),
}

impl ValueKind {
    /// Bytes read by this kind, starting at the extraction offset.
    pub const fn width(self) -> usize {
        match self {
            ValueKind::U8 | ValueKind::I8 | ValueKind::Flag { .. } | ValueKind::Enum(_) => 1,
            ValueKind::U16Le | ValueKind::I16Le => 2,
            ValueKind::I24Le => 3,
            ValueKind::U32Le | ValueKind::I32Le | ValueKind::F32Le => 4,
            ValueKind::Hex(len) => len,
            ValueKind::Constant(_) => 0,
            ValueKind::Version(format) => format.width(),
        }
    }

    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            ValueKind::U8
                | ValueKind::I8
                | ValueKind::U16Le
                | ValueKind::I16Le
                | ValueKind::I24Le
                | ValueKind::U32Le
                | ValueKind::I32Le
                | ValueKind::F32Le
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    Multiply(f64),
    Divide(f64),
}

/// Fixed-point conversion applied to a numeric extraction:
/// `scaled(raw) + offset`.
///
/// Division is kept distinct from multiplication by the reciprocal so that
/// values such as `381 / 10` come out as the nearest double to `38.1`.
///
/// # Examples
/// ```
/// use uplink_core::registry::Transform;
///
/// assert_eq!(Transform::divide(10.0).apply(381.0), 38.1);
/// assert_eq!(Transform::divide(2.0).with_offset(-40.0).apply(100.0), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: Scale,
    pub offset: f64,
}

impl Transform {
    pub const fn divide(divisor: f64) -> Self {
        Self {
            scale: Scale::Divide(divisor),
            offset: 0.0,
        }
    }

    pub const fn multiply(factor: f64) -> Self {
        Self {
            scale: Scale::Multiply(factor),
            offset: 0.0,
        }
    }

    pub const fn with_offset(self, offset: f64) -> Self {
        Self { offset, ..self }
    }

    pub fn apply(&self, raw: f64) -> f64 {
        let scaled = match self.scale {
            Scale::Multiply(factor) => raw * factor,
            Scale::Divide(divisor) => raw / divisor,
        };
        if self.offset == 0.0 {
            scaled
        } else {
            scaled + self.offset
        }
    }
}

/// Byte pattern meaning "measurement unavailable".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentinel {
    /// Offset of the pattern within the field payload.
    pub offset: usize,
    pub pattern: &'static [u8],
    /// Warning recorded instead of the field's readings.
    pub warning: &'static str,
}

impl Sentinel {
    pub fn matches(&self, raw: &[u8]) -> bool {
        raw.get(self.offset..self.offset + self.pattern.len()) == Some(self.pattern)
    }
}

/// One output key produced from a field payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extract {
    pub key: &'static str,
    /// Offset within the field payload (the tag is not counted).
    pub offset: usize,
    pub kind: ValueKind,
    pub transform: Option<Transform>,
}

impl Extract {
    pub const fn new(key: &'static str, offset: usize, kind: ValueKind) -> Self {
        Self {
            key,
            offset,
            kind,
            transform: None,
        }
    }

    pub const fn scaled(self, transform: Transform) -> Self {
        Self {
            transform: Some(transform),
            ..self
        }
    }
}

/// Static description of one tagged field.
///
/// # Examples
/// ```
/// use uplink_core::registry::{Extract, FieldDef, Tag, ValueKind};
///
/// const BATTERY: FieldDef = FieldDef {
///     tag: Tag::Channel { id: 0x01, kind: 0x75 },
///     name: "Battery",
///     width: 1,
///     values: &[Extract::new("battery", 0, ValueKind::U8)],
///     sentinel: None,
/// };
/// assert_eq!(BATTERY.keys().collect::<Vec<_>>(), vec!["battery"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDef {
    pub tag: Tag,
    /// Human-readable label used in warnings and errors.
    pub name: &'static str,
    /// Payload bytes consumed after the tag.
    pub width: usize,
    pub values: &'static [Extract],
    pub sentinel: Option<Sentinel>,
}

impl FieldDef {
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.iter().map(|value| value.key)
    }
}
