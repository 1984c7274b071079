use core::fmt;

/// Arbitrary-magnitude signed integer handed to range-checked encoders.
///
/// The magnitude is kept as little-endian bytes without trailing zero bytes,
/// so zero is the empty magnitude and is never negative. This lets the
/// compact encoder accept values beyond `u128` while fixed-width encoders
/// check the same representation against their own bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Integer {
    negative: bool,
    magnitude: Vec<u8>,
}

impl Integer {
    /// Builds a non-negative integer from little-endian magnitude bytes.
    pub fn from_le_magnitude(bytes: &[u8]) -> Self {
        let len = bytes.iter().rposition(|byte| *byte != 0).map_or(0, |i| i + 1);
        Self {
            negative: false,
            magnitude: bytes[..len].to_vec(),
        }
    }

    /// Returns `2^exp`.
    pub fn pow2(exp: u32) -> Self {
        let mut magnitude = vec![0u8; exp as usize / 8 + 1];
        magnitude[exp as usize / 8] = 1 << (exp % 8);
        Self {
            negative: false,
            magnitude,
        }
    }

    /// Returns the value with its sign flipped. Zero stays non-negative.
    #[must_use]
    pub fn negated(mut self) -> Self {
        if !self.magnitude.is_empty() {
            self.negative = !self.negative;
        }
        self
    }

    /// Returns `true` for values below zero.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Returns `true` for zero.
    pub fn is_zero(&self) -> bool {
        self.magnitude.is_empty()
    }

    /// Minimal little-endian bytes of the absolute value.
    pub fn magnitude_le(&self) -> &[u8] {
        &self.magnitude
    }

    /// Number of bytes in the minimal magnitude (zero for zero).
    pub fn byte_len(&self) -> usize {
        self.magnitude.len()
    }

    fn magnitude_u128(&self) -> Option<u128> {
        if self.magnitude.len() > 16 {
            return None;
        }
        let mut buf = [0u8; 16];
        buf[..self.magnitude.len()].copy_from_slice(&self.magnitude);
        Some(u128::from_le_bytes(buf))
    }

    /// Converts to `u128` when the value is non-negative and fits.
    pub fn to_u128(&self) -> Option<u128> {
        if self.negative {
            return None;
        }
        self.magnitude_u128()
    }

    /// Converts to `i128` when the value fits.
    pub fn to_i128(&self) -> Option<i128> {
        let magnitude = self.magnitude_u128()?;
        if !self.negative {
            return i128::try_from(magnitude).ok();
        }
        if magnitude == 1u128 << 127 {
            return Some(i128::MIN);
        }
        i128::try_from(magnitude).ok().map(|value| -value)
    }

    fn from_parts(negative: bool, magnitude: u128) -> Self {
        let bytes = magnitude.to_le_bytes();
        let mut value = Self::from_le_magnitude(&bytes);
        if negative {
            value = value.negated();
        }
        value
    }
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Integer {
            fn from(value: $ty) -> Self {
                Integer::from_parts(false, value as u128)
            }
        })*
    };
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Integer {
            fn from(value: $ty) -> Self {
                let value = value as i128;
                Integer::from_parts(value < 0, value.unsigned_abs())
            }
        })*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128, isize);

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        match self.magnitude_u128() {
            Some(magnitude) => write!(f, "{sign}{magnitude}"),
            None => {
                write!(f, "{sign}0x")?;
                for byte in self.magnitude.iter().rev() {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_magnitude() {
        let value = Integer::from_le_magnitude(&[0x01, 0x02, 0x00, 0x00]);
        assert_eq!(value.magnitude_le(), &[0x01, 0x02]);
        assert_eq!(value, Integer::from(0x0201u32));
        assert!(Integer::from(0u64).is_zero());
        assert!(!Integer::from(0i32).negated().is_negative());
    }

    #[test]
    fn signed_conversions_cover_extremes() {
        assert_eq!(Integer::from(i128::MIN).to_i128(), Some(i128::MIN));
        assert_eq!(Integer::from(i128::MAX).to_i128(), Some(i128::MAX));
        assert_eq!(Integer::from(u128::MAX).to_i128(), None);
        assert_eq!(Integer::from(-1i8).to_u128(), None);
        assert_eq!(Integer::from(-300i64).to_i128(), Some(-300));
    }

    #[test]
    fn display_switches_to_hex_beyond_u128() {
        assert_eq!(Integer::from(-42i32).to_string(), "-42");
        assert_eq!(Integer::pow2(128).to_string(), "0x0100000000000000000000000000000000");
    }
}
