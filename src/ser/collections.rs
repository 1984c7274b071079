use super::compact;
use super::error::{EncodeError, SerResult};
use super::ints;
use super::sink::Sink;
use crate::config::{MAX_ENUM_VARIANTS, OPTION_NONE_TAG, OPTION_SOME_TAG};

/// Writes a sequence as a compact item count followed by each item.
///
/// Items already written stay in the sink when a later item fails.
pub fn write_sequence<S, T, F>(out: &mut S, items: &[T], mut write_item: F) -> SerResult<()>
where
    S: Sink + ?Sized,
    F: FnMut(&mut S, &T) -> SerResult<()>,
{
    compact::write_compact_len(out, items.len())?;
    for item in items {
        write_item(out, item)?;
    }
    Ok(())
}

/// Writes an optional value with a `u8` discriminant (0 = None, 1 = Some).
pub fn write_option<S, T, F>(out: &mut S, value: Option<&T>, write: F) -> SerResult<()>
where
    S: Sink + ?Sized,
    T: ?Sized,
    F: FnOnce(&mut S, &T) -> SerResult<()>,
{
    match value {
        Some(inner) => {
            ints::write_u8(out, OPTION_SOME_TAG)?;
            write(out, inner)
        }
        None => ints::write_u8(out, OPTION_NONE_TAG),
    }
}

/// Checks that `index` addresses one of `count` variants and returns the
/// discriminant byte.
pub fn variant_tag(index: usize, count: usize) -> SerResult<u8> {
    if count > MAX_ENUM_VARIANTS {
        return Err(EncodeError::TooManyVariants { count });
    }
    if index >= count {
        return Err(EncodeError::InvalidVariant { index, count });
    }
    // count <= 256 so index <= 255.
    Ok(index as u8)
}

/// Writes the discriminant of variant `index` out of `count`, then the
/// payload produced by `write_payload`.
///
/// The discriminant is validated before anything is written.
pub fn write_variant<S, F>(
    out: &mut S,
    index: usize,
    count: usize,
    write_payload: F,
) -> SerResult<()>
where
    S: Sink + ?Sized,
    F: FnOnce(&mut S) -> SerResult<()>,
{
    let tag = variant_tag(index, count)?;
    ints::write_u8(out, tag)?;
    write_payload(out)
}

/// Writes a payload-free variant.
pub fn write_unit_variant<S: Sink + ?Sized>(
    out: &mut S,
    index: usize,
    count: usize,
) -> SerResult<()> {
    write_variant(out, index, count, |_| Ok(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ser::ErrorKind;

    #[test]
    fn option_layouts() {
        let mut out = Vec::new();
        write_option(&mut out, None::<&bool>, |out, v| ints::write_bool(out, *v)).unwrap();
        write_option(&mut out, Some(&true), |out, v| ints::write_bool(out, *v)).unwrap();
        assert_eq!(out, vec![0x00, 0x01, 0x01]);
    }

    #[test]
    fn variant_bounds() {
        assert_eq!(variant_tag(255, 256).unwrap(), 0xff);
        assert!(matches!(
            variant_tag(3, 3),
            Err(EncodeError::InvalidVariant { index: 3, count: 3 })
        ));
        let mut out = Vec::new();
        let err = write_unit_variant(&mut out, 0, 257).expect_err("too many");
        assert_eq!(err.kind(), ErrorKind::Range);
        assert!(out.is_empty());
    }

    #[test]
    fn sequence_prefixes_compact_count() {
        let mut out = Vec::new();
        write_sequence(&mut out, &[true, false], |out, v| ints::write_bool(out, *v)).unwrap();
        assert_eq!(out, vec![0x08, 0x01, 0x00]);
    }
}
