use super::compact;
use super::error::{EncodeError, SerResult, ShapeKind};
use super::sink::Sink;

/// Appends raw bytes with no prefix.
pub fn write_bytes<S: Sink + ?Sized>(out: &mut S, bytes: &[u8]) -> SerResult<()> {
    out.write_bytes(bytes)?;
    Ok(())
}

/// Writes a compact length prefix followed by the provided bytes.
pub fn write_prefixed_bytes<S: Sink + ?Sized>(out: &mut S, bytes: &[u8]) -> SerResult<()> {
    compact::write_compact_len(out, bytes.len())?;
    write_bytes(out, bytes)
}

/// Writes a UTF-8 string as a compact-length prefixed byte string.
pub fn write_str<S: Sink + ?Sized>(out: &mut S, value: &str) -> SerResult<()> {
    write_prefixed_bytes(out, value.as_bytes())
}

/// Writes exactly `len` raw bytes, failing before any output when the slice
/// has a different length.
pub fn write_fixed_bytes<S: Sink + ?Sized>(
    out: &mut S,
    bytes: &[u8],
    len: usize,
) -> SerResult<()> {
    if bytes.len() != len {
        return Err(EncodeError::out_of_range(
            ShapeKind::FixedBytes,
            format_args!("{} bytes where {len} are required", bytes.len()),
        ));
    }
    write_bytes(out, bytes)
}
