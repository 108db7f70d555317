//! Digital Matter sensor node uplinks.
//!
//! Field-stream grammar: a field-id byte, a fixed-width value, then the next
//! field-id byte. A field that runs past the end of the payload aborts the
//! decode with a length error; unknown ids are skipped one byte at a time.
//!
//! The digital-input-state byte carries one input per bit (bits 0..=2) and is
//! reported as three separate keys.

pub mod layout;

use crate::engine::Grammar;
use crate::primitives::VersionFormat;
use crate::registry::{Extract, FieldDef, Sentinel, Tag, Transform, ValueKind};

pub const GRAMMAR: Grammar = Grammar::FIELD_STREAM;

/// Unsigned 16-bit little-endian field with a single key.
macro_rules! word {
    ($id:expr, $name:literal, $key:literal) => {
        FieldDef {
            tag: Tag::Field($id),
            name: $name,
            width: layout::WORD_LEN,
            values: &[Extract::new($key, 0, ValueKind::U16Le)],
            sentinel: None,
        }
    };
}

pub static FIELDS: &[FieldDef] = &[
    FieldDef {
        tag: Tag::Field(layout::FIRMWARE_VERSION),
        name: "System Firmware Version",
        width: layout::FIRMWARE_VERSION_LEN,
        values: &[
            Extract::new("product_type", 0, ValueKind::U8),
            Extract::new("hardware_revision", 1, ValueKind::U8),
            Extract::new(
                "firmware_version",
                2,
                ValueKind::Version(VersionFormat::Dotted),
            ),
        ],
        sentinel: None,
    },
    FieldDef {
        tag: Tag::Field(layout::GPS_POSITION),
        name: "GPS Position",
        width: layout::GPS_POSITION_LEN,
        values: &[
            Extract::new("gps_position_latitude", 0, ValueKind::I24Le)
                .scaled(Transform::multiply(layout::GPS_DEGREES_PER_LSB)),
            Extract::new("gps_position_longitude", 3, ValueKind::I24Le)
                .scaled(Transform::multiply(layout::GPS_DEGREES_PER_LSB)),
        ],
        sentinel: Some(Sentinel {
            offset: 0,
            pattern: layout::GPS_NO_FIX,
            warning: layout::GPS_NO_FIX_WARNING,
        }),
    },
    word!(layout::BATTERY_VOLTAGE, "Battery Voltage", "battery_voltage"),
    word!(layout::ANALOG_INPUT_1, "Analog Input #1", "analog_input1"),
    word!(layout::ANALOG_INPUT_2, "Analog Input #2", "analog_input2"),
    word!(layout::ANALOG_INPUT_3, "Analog Input #3", "analog_input3"),
    FieldDef {
        tag: Tag::Field(layout::DIGITAL_INPUT_STATES),
        name: "Digital Input States",
        width: layout::DIGITAL_INPUT_STATES_LEN,
        values: &[
            Extract::new("digital_input1_state", 0, ValueKind::Flag { mask: 0x01, invert: false }),
            Extract::new("digital_input2_state", 0, ValueKind::Flag { mask: 0x02, invert: false }),
            Extract::new("digital_input3_state", 0, ValueKind::Flag { mask: 0x04, invert: false }),
        ],
        sentinel: None,
    },
    word!(layout::PULSE_COUNT_1, "Digital Input #1 Pulse Count", "digital_input1_pulse_count"),
    word!(layout::PULSE_COUNT_2, "Digital Input #2 Pulse Count", "digital_input2_pulse_count"),
    word!(layout::PULSE_COUNT_3, "Digital Input #3 Pulse Count", "digital_input3_pulse_count"),
    FieldDef {
        tag: Tag::Field(layout::INTERNAL_TEMPERATURE),
        name: "Internal Temperature",
        width: layout::WORD_LEN,
        values: &[Extract::new("internal_temperature", 0, ValueKind::I16Le)
            .scaled(Transform::divide(layout::TEMPERATURE_DIVISOR))],
        sentinel: None,
    },
    FieldDef {
        tag: Tag::Field(layout::BATTERY_PERCENT_REMAINING),
        name: "Estimated Battery % Remaining",
        width: layout::WORD_LEN,
        values: &[Extract::new("battery_percent_remaining", 0, ValueKind::I16Le)],
        sentinel: None,
    },
];
