//! Milesight uplinks (EM500, EM300, AM10x and the WS-series sensors).
//!
//! Channel/type grammar: each field is preceded by a channel-id byte and a
//! channel-type byte. Truncated trailing fields are read with the missing
//! bytes as zero, and decoding stops quietly at the first unknown pair.

pub mod device_info;
pub mod layout;
pub mod ws202;
pub mod ws301;

use crate::engine::Grammar;
use crate::primitives::VersionFormat;
use crate::registry::{Extract, FieldDef, Tag, Transform, ValueKind};

use device_info::info_tag;

pub const GRAMMAR: Grammar = Grammar::CHANNEL_TYPE;

/// Single-key channel/type field.
macro_rules! channel {
    ($id:expr, $kind:expr, $name:literal, $width:expr, $extract:expr) => {
        FieldDef {
            tag: Tag::Channel {
                id: $id,
                kind: $kind,
            },
            name: $name,
            width: $width,
            values: &[$extract],
            sentinel: None,
        }
    };
}
pub(crate) use channel;

/// `"true"` when the status byte is non-zero.
pub const NON_ZERO: ValueKind = ValueKind::Flag {
    mask: 0xFF,
    invert: false,
};

/// `"true"` when the status byte is zero.
pub const ZERO: ValueKind = ValueKind::Flag {
    mask: 0xFF,
    invert: true,
};

pub static FIELDS: &[FieldDef] = &[
    device_info::POWER_ON,
    channel!(
        layout::DEVICE_INFO,
        layout::TYPE_PROTOCOL_VERSION,
        "Protocol Version",
        1,
        Extract::new(
            "protocol_version",
            0,
            ValueKind::Version(VersionFormat::HexByte)
        )
    ),
    device_info::SERIAL_NUMBER,
    device_info::SERIAL_NUMBER_16,
    device_info::HARDWARE_VERSION,
    FieldDef {
        tag: info_tag(layout::TYPE_SOFTWARE_VERSION),
        name: "Software Version",
        width: layout::VERSION_LEN,
        values: &[Extract::new(
            "software_version",
            0,
            ValueKind::Version(VersionFormat::MajorMinorHex),
        )],
        sentinel: None,
    },
    device_info::CLASS_TYPE,
    device_info::BATTERY,
    channel!(
        layout::CHANNEL_3,
        layout::TYPE_TEMPERATURE,
        "Temperature",
        2,
        Extract::new("temperature", 0, ValueKind::I16Le).scaled(Transform::divide(10.0))
    ),
    channel!(
        layout::CHANNEL_3,
        layout::TYPE_DISTANCE,
        "Distance",
        2,
        Extract::new("distance", 0, ValueKind::I16Le).scaled(Transform::divide(1000.0))
    ),
    channel!(
        layout::CHANNEL_3,
        layout::TYPE_WATER_LEVEL,
        "Water Level",
        2,
        Extract::new("water_level", 0, ValueKind::U16Le)
    ),
    channel!(
        layout::CHANNEL_3,
        layout::TYPE_PRESSURE,
        "Pressure",
        2,
        Extract::new("pressure", 0, ValueKind::I16Le)
    ),
    channel!(
        layout::CHANNEL_3,
        layout::TYPE_ILLUMINATION,
        "Illumination",
        4,
        Extract::new("illumination", 0, ValueKind::U32Le)
    ),
    channel!(
        layout::CHANNEL_4,
        layout::TYPE_HUMIDITY,
        "Humidity",
        1,
        Extract::new("humidity", 0, ValueKind::U8).scaled(Transform::divide(2.0))
    ),
    channel!(
        layout::CHANNEL_5,
        layout::TYPE_DIGITAL,
        "Water Leak",
        1,
        Extract::new("water_leak", 0, NON_ZERO)
    ),
    channel!(
        layout::CHANNEL_5,
        layout::TYPE_ACTIVITY,
        "Activity",
        2,
        Extract::new("activity", 0, ValueKind::U16Le)
    ),
    channel!(
        layout::CHANNEL_5,
        layout::TYPE_CONCENTRATION,
        "CO2",
        2,
        Extract::new("co2", 0, ValueKind::I16Le)
    ),
    channel!(
        layout::CHANNEL_6,
        layout::TYPE_DIGITAL,
        "Door",
        1,
        Extract::new("door", 0, NON_ZERO)
    ),
    FieldDef {
        tag: Tag::Channel {
            id: layout::CHANNEL_6,
            kind: layout::TYPE_ILLUMINATION_SPECTRUM,
        },
        name: "Illumination Spectrum",
        width: layout::ILLUMINATION_SPECTRUM_LEN,
        values: &[
            Extract::new("illumination", 0, ValueKind::U16Le),
            Extract::new("infrared_and_visible", 2, ValueKind::U16Le),
            Extract::new("infrared", 4, ValueKind::U16Le),
        ],
        sentinel: None,
    },
    channel!(
        layout::CHANNEL_6,
        layout::TYPE_BAROMETRIC_PRESSURE,
        "Barometric Pressure",
        2,
        Extract::new("pressure", 0, ValueKind::I16Le).scaled(Transform::divide(10.0))
    ),
    channel!(
        layout::CHANNEL_7,
        layout::TYPE_CONCENTRATION,
        "CO2",
        2,
        Extract::new("co2", 0, ValueKind::U16Le)
    ),
    channel!(
        layout::CHANNEL_8,
        layout::TYPE_CONCENTRATION,
        "TVOC",
        2,
        Extract::new("tvoc", 0, ValueKind::U16Le)
    ),
    channel!(
        layout::CHANNEL_9,
        layout::TYPE_BAROMETRIC_PRESSURE,
        "Barometric Pressure",
        2,
        Extract::new("pressure", 0, ValueKind::U16Le).scaled(Transform::divide(10.0))
    ),
];
