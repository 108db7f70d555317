pub const FIRMWARE_VERSION: u8 = 1;
pub const GPS_POSITION: u8 = 10;
pub const BATTERY_VOLTAGE: u8 = 20;
pub const ANALOG_INPUT_1: u8 = 21;
pub const ANALOG_INPUT_2: u8 = 22;
pub const ANALOG_INPUT_3: u8 = 23;
pub const DIGITAL_INPUT_STATES: u8 = 30;
pub const PULSE_COUNT_1: u8 = 31;
pub const PULSE_COUNT_2: u8 = 32;
pub const PULSE_COUNT_3: u8 = 33;
pub const INTERNAL_TEMPERATURE: u8 = 40;
pub const BATTERY_PERCENT_REMAINING: u8 = 51;

pub const FIRMWARE_VERSION_LEN: usize = 4;
pub const GPS_POSITION_LEN: usize = 6;
pub const DIGITAL_INPUT_STATES_LEN: usize = 1;
pub const WORD_LEN: usize = 2;

/// Degrees per LSB of the 24-bit latitude/longitude values.
pub const GPS_DEGREES_PER_LSB: f64 = 0.0000256;
/// Latitude bytes reported while the receiver has no fix.
pub const GPS_NO_FIX: &[u8] = &[0xFF, 0xFF, 0xFF];
pub const GPS_NO_FIX_WARNING: &str = "GPS Position could not be determined";

pub const TEMPERATURE_DIVISOR: f64 = 100.0;
