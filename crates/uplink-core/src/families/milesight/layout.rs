/// Channel carrying device attributes (power-on, versions, serial number).
pub const DEVICE_INFO: u8 = 0xFF;

pub const TYPE_PROTOCOL_VERSION: u8 = 0x01;
pub const TYPE_SERIAL_NUMBER: u8 = 0x08;
pub const TYPE_HARDWARE_VERSION: u8 = 0x09;
pub const TYPE_SOFTWARE_VERSION: u8 = 0x0A;
pub const TYPE_POWER_ON: u8 = 0x0B;
pub const TYPE_CLASS: u8 = 0x0F;
pub const TYPE_SERIAL_NUMBER_16: u8 = 0x16;

pub const SERIAL_NUMBER_LEN: usize = 6;
pub const SERIAL_NUMBER_16_LEN: usize = 8;
pub const VERSION_LEN: usize = 2;

pub const CHANNEL_BATTERY: u8 = 0x01;
pub const TYPE_BATTERY: u8 = 0x75;

pub const CHANNEL_3: u8 = 0x03;
pub const CHANNEL_4: u8 = 0x04;
pub const CHANNEL_5: u8 = 0x05;
pub const CHANNEL_6: u8 = 0x06;
pub const CHANNEL_7: u8 = 0x07;
pub const CHANNEL_8: u8 = 0x08;
pub const CHANNEL_9: u8 = 0x09;

pub const TYPE_DIGITAL: u8 = 0x00;
pub const TYPE_ILLUMINATION_SPECTRUM: u8 = 0x65;
pub const TYPE_TEMPERATURE: u8 = 0x67;
pub const TYPE_HUMIDITY: u8 = 0x68;
pub const TYPE_ACTIVITY: u8 = 0x6A;
pub const TYPE_BAROMETRIC_PRESSURE: u8 = 0x73;
pub const TYPE_WATER_LEVEL: u8 = 0x77;
pub const TYPE_PRESSURE: u8 = 0x7B;
pub const TYPE_CONCENTRATION: u8 = 0x7D;
pub const TYPE_DISTANCE: u8 = 0x82;
pub const TYPE_ILLUMINATION: u8 = 0x94;

pub const ILLUMINATION_SPECTRUM_LEN: usize = 6;

pub const LORAWAN_CLASSES: &[(u8, &str)] = &[(0, "A"), (1, "B"), (2, "C")];
