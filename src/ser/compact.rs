//! Variable-length compact unsigned integers.
//!
//! The two low bits of the first byte select the tier, so a reader learns the
//! encoded length from that byte alone:
//!
//! | low bits | tier        | payload                                        |
//! |----------|-------------|------------------------------------------------|
//! | `00`     | single byte | `value << 2`, values `0..=63`                  |
//! | `01`     | two bytes   | LE `(value << 2) \| 1`, values `64..=16383`    |
//! | `10`     | four bytes  | LE `(value << 2) \| 2`, values `..=2^30 - 1`   |
//! | `11`     | big integer | mode byte `(n - 4) << 2 \| 3`, then `n` LE bytes |
//!
//! The smallest tier able to hold the value is always used. The big-integer
//! tier stores `n - 4` in six bits, capping `n` at
//! [`MAX_COMPACT_BYTES`] and the value at `2^536 - 1`.

use tracing::trace;

use super::error::{EncodeError, SerResult, ShapeKind};
use super::integer::Integer;
use super::ints;
use super::sink::Sink;
use crate::config::{
    COMPACT_FOUR_BYTE_MAX, COMPACT_SINGLE_BYTE_MAX, COMPACT_TWO_BYTE_MAX, MAX_COMPACT_BYTES,
};

const MODE_SINGLE: u8 = 0b00;
const MODE_TWO: u8 = 0b01;
const MODE_FOUR: u8 = 0b10;
const MODE_BIG: u8 = 0b11;

/// Size class picked for a compact integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompactTier {
    /// One byte, values `0..=63`.
    SingleByte,
    /// Two bytes, values `64..=16383`.
    TwoByte,
    /// Four bytes, values `16384..=2^30 - 1`.
    FourByte,
    /// Mode byte followed by `bytes` little-endian magnitude bytes.
    BigInteger {
        /// Minimal magnitude length, `4..=67`.
        bytes: u8,
    },
}

impl CompactTier {
    /// Total number of bytes an encoding in this tier occupies.
    pub const fn encoded_len(self) -> usize {
        match self {
            CompactTier::SingleByte => 1,
            CompactTier::TwoByte => 2,
            CompactTier::FourByte => 4,
            CompactTier::BigInteger { bytes } => 1 + bytes as usize,
        }
    }

    /// Low two bits of the first encoded byte.
    pub const fn mode_bits(self) -> u8 {
        match self {
            CompactTier::SingleByte => MODE_SINGLE,
            CompactTier::TwoByte => MODE_TWO,
            CompactTier::FourByte => MODE_FOUR,
            CompactTier::BigInteger { .. } => MODE_BIG,
        }
    }

    fn big(bytes: usize) -> Self {
        debug_assert!((4..=MAX_COMPACT_BYTES).contains(&bytes));
        CompactTier::BigInteger { bytes: bytes as u8 }
    }
}

fn minimal_le_len(value: u128) -> usize {
    (128 - value.leading_zeros() as usize + 7) / 8
}

/// Returns the tier used for `value`.
pub fn compact_tier(value: u128) -> CompactTier {
    if value <= COMPACT_SINGLE_BYTE_MAX as u128 {
        CompactTier::SingleByte
    } else if value <= COMPACT_TWO_BYTE_MAX as u128 {
        CompactTier::TwoByte
    } else if value <= COMPACT_FOUR_BYTE_MAX as u128 {
        CompactTier::FourByte
    } else {
        CompactTier::big(minimal_le_len(value))
    }
}

/// Returns the number of bytes [`write_compact`] emits for `value`.
pub fn compact_len(value: u128) -> usize {
    compact_tier(value).encoded_len()
}

/// Returns the tier used for an arbitrary-magnitude `value`.
///
/// Fails for negative values and for magnitudes longer than
/// [`MAX_COMPACT_BYTES`].
pub fn compact_tier_of(value: &Integer) -> SerResult<CompactTier> {
    if value.is_negative() || value.byte_len() > MAX_COMPACT_BYTES {
        return Err(EncodeError::out_of_range(ShapeKind::Compact, value));
    }
    Ok(match value.to_u128() {
        Some(small) => compact_tier(small),
        None => CompactTier::big(value.byte_len()),
    })
}

/// Writes `value` using the smallest compact tier that holds it.
pub fn write_compact<S: Sink + ?Sized>(out: &mut S, value: u128) -> SerResult<()> {
    let tier = compact_tier(value);
    trace!(?tier, %value, "compact tier selected");
    match tier {
        CompactTier::SingleByte => ints::write_u8(out, (value as u8) << 2 | tier.mode_bits()),
        CompactTier::TwoByte => {
            ints::write_u16(out, (value as u16) << 2 | u16::from(tier.mode_bits()))
        }
        CompactTier::FourByte => {
            ints::write_u32(out, (value as u32) << 2 | u32::from(tier.mode_bits()))
        }
        CompactTier::BigInteger { bytes } => {
            let len = bytes as usize;
            let mut buf = [0u8; 17];
            buf[0] = big_mode_byte(tier);
            buf[1..=len].copy_from_slice(&value.to_le_bytes()[..len]);
            out.write_bytes(&buf[..=len])?;
            Ok(())
        }
    }
}

/// Writes an arbitrary-magnitude `value` as a compact integer.
///
/// Values that fit `u128` take the same path as [`write_compact`]. Nothing
/// is written when the value is rejected.
pub fn write_compact_integer<S: Sink + ?Sized>(out: &mut S, value: &Integer) -> SerResult<()> {
    let tier = compact_tier_of(value)?;
    match value.to_u128() {
        Some(small) => write_compact(out, small),
        None => {
            trace!(?tier, "compact tier selected for wide magnitude");
            let mut buf = Vec::with_capacity(tier.encoded_len());
            buf.push(big_mode_byte(tier));
            buf.extend_from_slice(value.magnitude_le());
            out.write_bytes(&buf)?;
            Ok(())
        }
    }
}

/// Writes a `usize` length prefix as a compact integer.
pub fn write_compact_len<S: Sink + ?Sized>(out: &mut S, len: usize) -> SerResult<()> {
    write_compact(out, len as u128)
}

fn big_mode_byte(tier: CompactTier) -> u8 {
    let len = tier.encoded_len() - 1;
    ((len - 4) as u8) << 2 | tier.mode_bits()
}
