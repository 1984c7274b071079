//! Format constants and encoder limits.
//!
//! The constants below are part of the wire contract: any two conforming
//! writers must agree on them bit for bit. [`EncoderLimits`] is the only
//! tunable and never changes the bytes produced for a value, it only bounds
//! how many bytes a session may emit.

use serde::{Deserialize, Serialize};

use crate::ser::BoundedSink;

/// Largest value stored in the single-byte compact tier.
pub const COMPACT_SINGLE_BYTE_MAX: u32 = (1 << 6) - 1;

/// Largest value stored in the two-byte compact tier.
pub const COMPACT_TWO_BYTE_MAX: u32 = (1 << 14) - 1;

/// Largest value stored in the four-byte compact tier.
pub const COMPACT_FOUR_BYTE_MAX: u32 = (1 << 30) - 1;

/// Longest magnitude the big-integer compact tier can describe. The mode
/// byte holds `len - 4` in six bits, so `len <= 63 + 4`.
pub const MAX_COMPACT_BYTES: usize = 67;

/// Number of variants addressable by the single discriminant byte.
pub const MAX_ENUM_VARIANTS: usize = 256;

/// Discriminant written for an absent optional value.
pub const OPTION_NONE_TAG: u8 = 0x00;

/// Discriminant written ahead of a present optional value.
pub const OPTION_SOME_TAG: u8 = 0x01;

/// Default cap on bytes emitted by a bounded encoding session (4 MiB).
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 4 * 1024 * 1024;

/// Bounds applied to a single encoding session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderLimits {
    /// Maximum number of bytes a session may write.
    pub max_output_bytes: usize,
}

impl EncoderLimits {
    /// Limits with an explicit output cap.
    pub const fn with_max_output_bytes(max_output_bytes: usize) -> Self {
        Self { max_output_bytes }
    }

    /// Creates a fresh sink enforcing these limits.
    pub fn sink(&self) -> BoundedSink {
        BoundedSink::new(self.max_output_bytes)
    }
}

impl Default for EncoderLimits {
    fn default() -> Self {
        Self {
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }
}
