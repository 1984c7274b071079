//! Deterministic little-endian binary writer in the SCALE layout.
//!
//! Values are turned into an exact byte sequence with no padding and no type
//! tags beyond the discriminants of options and enums. The same value always
//! produces the same bytes, which makes the output suitable for hashing and
//! content addressing.
//!
//! Layers:
//! - [`ser`]: sinks, the error type and the primitive writers, including the
//!   compact integer algorithm.
//! - [`codec`]: the [`Encode`] trait for native Rust types and the composable
//!   [`ScaleWriter`] encoder objects.
//! - [`shape`]: dispatch-by-shape for values described at runtime.
//! - [`config`]: format constants and session limits.
//!
//! ```
//! use scale_writer::{encode, Compact};
//!
//! let bytes = encode(&(Compact(64u32), vec![true, false], Some(7u16))).unwrap();
//! assert_eq!(bytes, vec![0x01, 0x01, 0x08, 0x01, 0x00, 0x01, 0x07, 0x00]);
//! ```

pub mod codec;
pub mod config;
pub mod ser;
pub mod shape;

use tracing::{debug, trace};

pub use codec::{Compact, Encode, ScaleWriter};
pub use config::EncoderLimits;
pub use ser::{EncodeError, ErrorKind, Integer, SerResult, Sink};
pub use shape::{EnumShape, Shape, Value, Variant};

/// Encodes a native value into a fresh buffer.
///
/// The top-level `encode*` functions are where failures get logged; the
/// writers underneath only return errors.
pub fn encode<T: Encode + ?Sized>(value: &T) -> SerResult<Vec<u8>> {
    let bytes = value.encode().map_err(log_failure)?;
    trace!(len = bytes.len(), "encoded value");
    Ok(bytes)
}

/// Encodes a native value into a caller-owned sink.
pub fn encode_into<T: Encode + ?Sized>(value: &T, out: &mut dyn Sink) -> SerResult<()> {
    value.encode_to(out).map_err(log_failure)
}

/// Encodes a runtime value laid out as `shape`.
pub fn encode_value(shape: &Shape, value: &Value) -> SerResult<Vec<u8>> {
    let bytes = shape.encode_to_vec(value).map_err(log_failure)?;
    trace!(shape = %shape.kind(), len = bytes.len(), "encoded value");
    Ok(bytes)
}

/// Encodes a runtime value while enforcing `limits` on the output size.
pub fn encode_value_with_limits(
    shape: &Shape,
    value: &Value,
    limits: &EncoderLimits,
) -> SerResult<Vec<u8>> {
    let mut sink = limits.sink();
    shape.encode(&mut sink, value).map_err(log_failure)?;
    Ok(sink.into_inner())
}

/// BLAKE3 digest of the encoding of a native value.
pub fn content_digest<T: Encode + ?Sized>(value: &T) -> SerResult<[u8; ser::DIGEST_SIZE]> {
    Ok(ser::content_digest(&encode(value)?))
}

fn log_failure(err: EncodeError) -> EncodeError {
    debug!(kind = ?err.kind(), error = %err, "encoding failed");
    err
}
