use std::fmt::Write;

/// Version-string renderings used by the device families.
///
/// WS301 prints the software minor in decimal, the Milesight universal
/// decoder in hex; the two are separate variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionFormat {
    /// One byte, `v{high nibble}.{low nibble}`.
    NibblePair,
    /// One byte, `v{byte as lowercase hex}`.
    HexByte,
    /// Two bytes, `v{byte0}.{byte1 >> 4}`.
    MajorHighNibble,
    /// Two bytes, `v{byte0}.{byte1}`.
    MajorMinorDecimal,
    /// Two bytes, `v{byte0}.{byte1 as lowercase hex}`.
    MajorMinorHex,
    /// Two bytes, `{byte0}.{byte1}` without the `v` prefix.
    Dotted,
}

impl VersionFormat {
    /// Number of bytes consumed by the format.
    pub const fn width(self) -> usize {
        match self {
            VersionFormat::NibblePair | VersionFormat::HexByte => 1,
            VersionFormat::MajorHighNibble
            | VersionFormat::MajorMinorDecimal
            | VersionFormat::MajorMinorHex
            | VersionFormat::Dotted => 2,
        }
    }
}

/// Render `bytes` (at least `format.width()` long) as a version string.
///
/// Returns `None` when fewer bytes than the format needs are supplied.
///
/// # Examples
/// ```
/// use uplink_core::primitives::{VersionFormat, format_version};
///
/// assert_eq!(format_version(VersionFormat::NibblePair, &[0x12]).as_deref(), Some("v1.2"));
/// assert_eq!(format_version(VersionFormat::MajorMinorHex, &[1, 0x1a]).as_deref(), Some("v1.1a"));
/// ```
pub fn format_version(format: VersionFormat, bytes: &[u8]) -> Option<String> {
    let bytes = bytes.get(..format.width())?;
    let rendered = match format {
        VersionFormat::NibblePair => format!("v{}.{}", bytes[0] >> 4, bytes[0] & 0x0F),
        VersionFormat::HexByte => format!("v{:x}", bytes[0]),
        VersionFormat::MajorHighNibble => format!("v{}.{}", bytes[0], bytes[1] >> 4),
        VersionFormat::MajorMinorDecimal => format!("v{}.{}", bytes[0], bytes[1]),
        VersionFormat::MajorMinorHex => format!("v{}.{:x}", bytes[0], bytes[1]),
        VersionFormat::Dotted => format!("{}.{}", bytes[0], bytes[1]),
    };
    Some(rendered)
}

/// Render bytes as concatenated two-digit lowercase hex, in buffer order.
///
/// # Examples
/// ```
/// use uplink_core::primitives::hex_serial;
///
/// assert_eq!(hex_serial(&[0x6b, 0x50, 0x02, 0x17]), "6b500217");
/// ```
pub fn hex_serial(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut out, byte| {
            let _ = write!(out, "{:02x}", byte);
            out
        })
}

#[cfg(test)]
mod tests {
    use super::{VersionFormat, format_version, hex_serial};

    #[test]
    fn protocol_version_variants_differ() {
        assert_eq!(
            format_version(VersionFormat::NibblePair, &[0x11]).unwrap(),
            "v1.1"
        );
        assert_eq!(format_version(VersionFormat::HexByte, &[0x11]).unwrap(), "v11");
        assert_eq!(format_version(VersionFormat::HexByte, &[0x0a]).unwrap(), "va");
    }

    #[test]
    fn software_version_minor_decimal_vs_hex() {
        let bytes = [0x01, 0x14];
        assert_eq!(
            format_version(VersionFormat::MajorMinorDecimal, &bytes).unwrap(),
            "v1.20"
        );
        assert_eq!(
            format_version(VersionFormat::MajorMinorHex, &bytes).unwrap(),
            "v1.14"
        );
    }

    #[test]
    fn hardware_version_uses_high_nibble() {
        assert_eq!(
            format_version(VersionFormat::MajorHighNibble, &[0x03, 0x10]).unwrap(),
            "v3.1"
        );
    }

    #[test]
    fn dotted_has_no_prefix() {
        assert_eq!(format_version(VersionFormat::Dotted, &[2, 7]).unwrap(), "2.7");
    }

    #[test]
    fn short_input_yields_none() {
        assert!(format_version(VersionFormat::MajorMinorHex, &[1]).is_none());
        assert!(format_version(VersionFormat::HexByte, &[]).is_none());
    }

    #[test]
    fn hex_serial_pads_each_byte() {
        assert_eq!(hex_serial(&[0x00, 0x0f, 0xa0, 0xff]), "000fa0ff");
        assert_eq!(hex_serial(&[]), "");
    }
}
