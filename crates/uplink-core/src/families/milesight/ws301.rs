//! WS301 magnetic contact switch.
//!
//! Reports the contact and installation states as inverted flags: a zero
//! byte means closed / installed.

use super::layout;
use super::{ZERO, channel, device_info};
use crate::engine::Grammar;
use crate::primitives::VersionFormat;
use crate::registry::{Extract, FieldDef, Tag, ValueKind};

use device_info::info_tag;

pub const GRAMMAR: Grammar = Grammar::CHANNEL_TYPE;

pub static FIELDS: &[FieldDef] = &[
    device_info::POWER_ON,
    FieldDef {
        tag: info_tag(layout::TYPE_PROTOCOL_VERSION),
        name: "Protocol Version",
        width: 1,
        values: &[Extract::new(
            "protocol_version",
            0,
            ValueKind::Version(VersionFormat::NibblePair),
        )],
        sentinel: None,
    },
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
            ValueKind::Version(VersionFormat::MajorMinorDecimal),
        )],
        sentinel: None,
    },
    device_info::CLASS_TYPE,
    device_info::BATTERY,
    channel!(
        layout::CHANNEL_3,
        layout::TYPE_DIGITAL,
        "Door State",
        1,
        Extract::new("state", 0, ZERO)
    ),
    channel!(
        layout::CHANNEL_4,
        layout::TYPE_DIGITAL,
        "Install State",
        1,
        Extract::new("install", 0, ZERO)
    ),
];
