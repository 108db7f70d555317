//! WS202 PIR and light sensor.

use super::layout;
use super::{NON_ZERO, channel, device_info};
use crate::engine::Grammar;
use crate::registry::{Extract, FieldDef, Tag};

pub const GRAMMAR: Grammar = Grammar::CHANNEL_TYPE;

pub static FIELDS: &[FieldDef] = &[
    device_info::BATTERY,
    channel!(
        layout::CHANNEL_3,
        layout::TYPE_DIGITAL,
        "PIR",
        1,
        Extract::new("pir", 0, NON_ZERO)
    ),
    channel!(
        layout::CHANNEL_4,
        layout::TYPE_DIGITAL,
        "Daylight",
        1,
        Extract::new("daylight", 0, NON_ZERO)
    ),
];
