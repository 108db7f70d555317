use super::error::ReadError;

/// Bounds-checked view over an uplink payload.
///
/// Offsets are absolute within the wrapped slice. Multi-byte integers are
/// little-endian; signed variants use two's-complement sign extension at the
/// declared width.
///
/// # Examples
/// ```
/// use uplink_core::primitives::PayloadReader;
///
/// let reader = PayloadReader::new(&[0xE8, 0x0E, 0xFF, 0xFF]);
/// assert_eq!(reader.read_u16_le(0).unwrap(), 3816);
/// assert_eq!(reader.read_i16_le(2).unwrap(), -1);
/// ```
pub struct PayloadReader<'a> {
    payload: &'a [u8],
}

impl<'a> PayloadReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    /// Bytes left from `offset` to the end of the payload (0 past the end).
    pub fn remaining(&self, offset: usize) -> usize {
        self.payload.len().saturating_sub(offset)
    }

    pub fn require_len(&self, needed: usize) -> Result<(), ReadError> {
        if self.payload.len() < needed {
            return Err(ReadError::TooShort {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, ReadError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(ReadError::TooShort {
                needed: offset.saturating_add(1),
                actual: self.payload.len(),
            })
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], ReadError> {
        self.payload.get(range.clone()).ok_or(ReadError::TooShort {
            needed: range.end,
            actual: self.payload.len(),
        })
    }

    /// Read `width` bytes (1..=4) at `offset` as an unsigned little-endian value.
    pub fn read_uint_le(&self, offset: usize, width: usize) -> Result<u32, ReadError> {
        if !(1..=4).contains(&width) {
            return Err(ReadError::UnsupportedWidth { width });
        }
        let end = offset.checked_add(width).ok_or(ReadError::TooShort {
            needed: usize::MAX,
            actual: self.payload.len(),
        })?;
        let bytes = self.read_slice(offset..end)?;
        Ok(bytes
            .iter()
            .rev()
            .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte)))
    }

    /// Read `width` bytes (1..=4) at `offset` as a signed little-endian value.
    pub fn read_int_le(&self, offset: usize, width: usize) -> Result<i32, ReadError> {
        let raw = self.read_uint_le(offset, width)?;
        Ok(sign_extend(raw, (width * 8) as u32))
    }

    pub fn read_i8(&self, offset: usize) -> Result<i8, ReadError> {
        self.read_u8(offset).map(|value| value as i8)
    }

    pub fn read_u16_le(&self, offset: usize) -> Result<u16, ReadError> {
        self.read_uint_le(offset, 2).map(|value| value as u16)
    }

    pub fn read_i16_le(&self, offset: usize) -> Result<i16, ReadError> {
        self.read_int_le(offset, 2).map(|value| value as i16)
    }

    /// 24-bit signed value, used for fixed-point coordinates.
    pub fn read_i24_le(&self, offset: usize) -> Result<i32, ReadError> {
        self.read_int_le(offset, 3)
    }

    pub fn read_u32_le(&self, offset: usize) -> Result<u32, ReadError> {
        self.read_uint_le(offset, 4)
    }

    pub fn read_i32_le(&self, offset: usize) -> Result<i32, ReadError> {
        self.read_int_le(offset, 4)
    }

    /// IEEE-754 single precision, subnormals included.
    pub fn read_f32_le(&self, offset: usize) -> Result<f32, ReadError> {
        self.read_u32_le(offset).map(f32::from_bits)
    }
}

/// Two's-complement sign extension of the low `bits` bits of `raw`.
///
/// # Examples
/// ```
/// use uplink_core::primitives::sign_extend;
///
/// assert_eq!(sign_extend(0xFF_FFFF, 24), -1);
/// assert_eq!(sign_extend(0x7F_FFFF, 24), 0x7F_FFFF);
/// ```
pub fn sign_extend(raw: u32, bits: u32) -> i32 {
    if bits == 0 || bits >= 32 {
        return raw as i32;
    }
    let shift = 32 - bits;
    ((raw << shift) as i32) >> shift
}
