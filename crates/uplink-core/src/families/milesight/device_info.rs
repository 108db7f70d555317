//! `0xff` channel fields shared by Milesight devices.
//!
//! Protocol and software versions are rendered differently per product line,
//! so each family module declares those two itself.

use super::layout;
use crate::primitives::VersionFormat;
use crate::registry::{Extract, FieldDef, Tag, ValueKind};

pub const fn info_tag(kind: u8) -> Tag {
    Tag::Channel {
        id: layout::DEVICE_INFO,
        kind,
    }
}

pub const POWER_ON: FieldDef = FieldDef {
    tag: info_tag(layout::TYPE_POWER_ON),
    name: "Power State",
    width: 1,
    values: &[Extract::new("power", 0, ValueKind::Constant("true"))],
    sentinel: None,
};

pub const SERIAL_NUMBER: FieldDef = FieldDef {
    tag: info_tag(layout::TYPE_SERIAL_NUMBER),
    name: "Serial Number",
    width: layout::SERIAL_NUMBER_LEN,
    values: &[Extract::new("sn", 0, ValueKind::Hex(layout::SERIAL_NUMBER_LEN))],
    sentinel: None,
};

pub const SERIAL_NUMBER_16: FieldDef = FieldDef {
    tag: info_tag(layout::TYPE_SERIAL_NUMBER_16),
    name: "Serial Number (16)",
    width: layout::SERIAL_NUMBER_16_LEN,
    values: &[Extract::new("sn", 0, ValueKind::Hex(layout::SERIAL_NUMBER_16_LEN))],
    sentinel: None,
};

pub const HARDWARE_VERSION: FieldDef = FieldDef {
    tag: info_tag(layout::TYPE_HARDWARE_VERSION),
    name: "Hardware Version",
    width: layout::VERSION_LEN,
    values: &[Extract::new(
        "hardware_version",
        0,
        ValueKind::Version(VersionFormat::MajorHighNibble),
    )],
    sentinel: None,
};

pub const CLASS_TYPE: FieldDef = FieldDef {
    tag: info_tag(layout::TYPE_CLASS),
    name: "LoRaWAN Class Type",
    width: 1,
    values: &[Extract::new("class_type", 0, ValueKind::Enum(layout::LORAWAN_CLASSES))],
    sentinel: None,
};

pub const BATTERY: FieldDef = FieldDef {
    tag: Tag::Channel {
        id: layout::CHANNEL_BATTERY,
        kind: layout::TYPE_BATTERY,
    },
    name: "Battery",
    width: 1,
    values: &[Extract::new("battery", 0, ValueKind::U8)],
    sentinel: None,
};
