use super::error::{EncodeError, SerResult, ShapeKind};
use super::integer::Integer;
use super::sink::Sink;

/// Encodes a `u8` as a single byte.
pub fn write_u8<S: Sink + ?Sized>(out: &mut S, value: u8) -> SerResult<()> {
    out.write_byte(value)?;
    Ok(())
}

/// Encodes a `u16` in little-endian order.
pub fn write_u16<S: Sink + ?Sized>(out: &mut S, value: u16) -> SerResult<()> {
    out.write_bytes(&value.to_le_bytes())?;
    Ok(())
}

/// Encodes a `u32` in little-endian order.
pub fn write_u32<S: Sink + ?Sized>(out: &mut S, value: u32) -> SerResult<()> {
    out.write_bytes(&value.to_le_bytes())?;
    Ok(())
}

/// Encodes a `u64` in little-endian order.
pub fn write_u64<S: Sink + ?Sized>(out: &mut S, value: u64) -> SerResult<()> {
    out.write_bytes(&value.to_le_bytes())?;
    Ok(())
}

/// Encodes a `u128` in little-endian order.
pub fn write_u128<S: Sink + ?Sized>(out: &mut S, value: u128) -> SerResult<()> {
    out.write_bytes(&value.to_le_bytes())?;
    Ok(())
}

/// Encodes an `i8` as its two's-complement byte.
pub fn write_i8<S: Sink + ?Sized>(out: &mut S, value: i8) -> SerResult<()> {
    out.write_byte(value as u8)?;
    Ok(())
}

/// Encodes an `i16` in little-endian two's complement.
pub fn write_i16<S: Sink + ?Sized>(out: &mut S, value: i16) -> SerResult<()> {
    out.write_bytes(&value.to_le_bytes())?;
    Ok(())
}

/// Encodes an `i32` in little-endian two's complement.
pub fn write_i32<S: Sink + ?Sized>(out: &mut S, value: i32) -> SerResult<()> {
    out.write_bytes(&value.to_le_bytes())?;
    Ok(())
}

/// Encodes an `i64` in little-endian two's complement.
pub fn write_i64<S: Sink + ?Sized>(out: &mut S, value: i64) -> SerResult<()> {
    out.write_bytes(&value.to_le_bytes())?;
    Ok(())
}

/// Encodes an `i128` in little-endian two's complement.
pub fn write_i128<S: Sink + ?Sized>(out: &mut S, value: i128) -> SerResult<()> {
    out.write_bytes(&value.to_le_bytes())?;
    Ok(())
}

/// Writes a boolean flag as a single byte (`0` or `1`).
pub fn write_bool<S: Sink + ?Sized>(out: &mut S, value: bool) -> SerResult<()> {
    write_u8(out, value as u8)
}

/// Range-checked fixed-width integer encoder.
///
/// Values are validated against the width and signedness before anything is
/// written, then emitted as exactly `width` little-endian bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedInt {
    width: usize,
    signed: bool,
    kind: ShapeKind,
}

/// Unsigned byte encoder accepting `0..=255`.
pub const U8: FixedInt = FixedInt::new(1, false, ShapeKind::U8);
/// Unsigned 16-bit encoder.
pub const U16: FixedInt = FixedInt::new(2, false, ShapeKind::U16);
/// Unsigned 32-bit encoder.
pub const U32: FixedInt = FixedInt::new(4, false, ShapeKind::U32);
/// Unsigned 64-bit encoder.
pub const U64: FixedInt = FixedInt::new(8, false, ShapeKind::U64);
/// Unsigned 128-bit encoder.
pub const U128: FixedInt = FixedInt::new(16, false, ShapeKind::U128);
/// Signed 8-bit encoder.
pub const I8: FixedInt = FixedInt::new(1, true, ShapeKind::I8);
/// Signed 16-bit encoder.
pub const I16: FixedInt = FixedInt::new(2, true, ShapeKind::I16);
/// Signed 32-bit encoder.
pub const I32: FixedInt = FixedInt::new(4, true, ShapeKind::I32);
/// Signed 64-bit encoder.
pub const I64: FixedInt = FixedInt::new(8, true, ShapeKind::I64);
/// Signed 128-bit encoder.
pub const I128: FixedInt = FixedInt::new(16, true, ShapeKind::I128);

impl FixedInt {
    const fn new(width: usize, signed: bool, kind: ShapeKind) -> Self {
        Self {
            width,
            signed,
            kind,
        }
    }

    /// Number of bytes written for every value.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Shape reported in range errors.
    pub const fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Validates `value` and returns its 16-byte little-endian image, of
    /// which the first `width` bytes are the encoding.
    pub fn to_le_image(&self, value: &Integer) -> SerResult<[u8; 16]> {
        let bits = 8 * self.width as u32;
        let image = if self.signed {
            value
                .to_i128()
                .filter(|v| {
                    bits == 128 || (*v >= -(1i128 << (bits - 1)) && *v < (1i128 << (bits - 1)))
                })
                .map(i128::to_le_bytes)
        } else {
            value
                .to_u128()
                .filter(|v| bits == 128 || *v >> bits == 0)
                .map(u128::to_le_bytes)
        };
        image.ok_or_else(|| EncodeError::out_of_range(self.kind, value))
    }

    /// Writes `value` as exactly `width` little-endian bytes.
    pub fn write<S: Sink + ?Sized>(&self, out: &mut S, value: &Integer) -> SerResult<()> {
        let image = self.to_le_image(value)?;
        out.write_bytes(&image[..self.width])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ubyte_accepts_full_range() {
        for raw in 0u16..=255 {
            let mut out = Vec::new();
            U8.write(&mut out, &Integer::from(raw)).unwrap();
            assert_eq!(out, vec![raw as u8]);
        }
    }

    #[test]
    fn ubyte_rejects_outside_range_without_writing() {
        for raw in [-1i64, 256, 1 << 40] {
            let mut out = Vec::new();
            let err = U8.write(&mut out, &Integer::from(raw)).expect_err("range");
            assert!(err.is_range());
            assert!(out.is_empty());
        }
    }

    #[test]
    fn signed_widths_use_twos_complement() {
        let mut out = Vec::new();
        I16.write(&mut out, &Integer::from(-2i32)).unwrap();
        I32.write(&mut out, &Integer::from(i32::MIN)).unwrap();
        assert_eq!(out, vec![0xfe, 0xff, 0x00, 0x00, 0x00, 0x80]);

        assert!(I8.write(&mut Vec::<u8>::new(), &Integer::from(128)).is_err());
        assert!(I8.write(&mut Vec::<u8>::new(), &Integer::from(-129)).is_err());
        assert!(I128.write(&mut Vec::<u8>::new(), &Integer::from(u128::MAX)).is_err());
    }

    #[test]
    fn wide_unsigned_bounds() {
        let mut out = Vec::new();
        U128.write(&mut out, &Integer::from(u128::MAX)).unwrap();
        assert_eq!(out, vec![0xff; 16]);
        assert!(U64.write(&mut Vec::<u8>::new(), &Integer::from(1u128 << 64)).is_err());
        assert!(U128.write(&mut Vec::<u8>::new(), &Integer::pow2(128)).is_err());
    }
}
