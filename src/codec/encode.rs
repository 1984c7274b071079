//! Encoding of native Rust values.

use crate::ser::{self, Integer, SerResult, Sink, DIGEST_SIZE};

/// Types with a canonical encoding.
///
/// Integers are little-endian, `bool` is one byte, `Option<T>` carries a
/// one-byte discriminant, slices, `Vec`, `str` and `String` carry a compact
/// length prefix, and tuples, arrays and `()` are plain concatenations.
pub trait Encode {
    /// Appends the encoding of `self` to `out`.
    fn encode_to(&self, out: &mut dyn Sink) -> SerResult<()>;

    /// Encodes `self` into a fresh buffer.
    fn encode(&self) -> SerResult<Vec<u8>> {
        let mut out = Vec::new();
        self.encode_to(&mut out)?;
        Ok(out)
    }

    /// BLAKE3 digest of the encoding of `self`.
    fn content_digest(&self) -> SerResult<[u8; DIGEST_SIZE]> {
        Ok(ser::content_digest(&self.encode()?))
    }
}

macro_rules! impl_encode_int {
    ($($ty:ty => $write:ident),* $(,)?) => {
        $(impl Encode for $ty {
            #[inline]
            fn encode_to(&self, out: &mut dyn Sink) -> SerResult<()> {
                ser::$write(out, *self)
            }
        })*
    };
}

impl_encode_int!(
    u8 => write_u8,
    u16 => write_u16,
    u32 => write_u32,
    u64 => write_u64,
    u128 => write_u128,
    i8 => write_i8,
    i16 => write_i16,
    i32 => write_i32,
    i64 => write_i64,
    i128 => write_i128,
    bool => write_bool,
);

impl Encode for () {
    fn encode_to(&self, _out: &mut dyn Sink) -> SerResult<()> {
        Ok(())
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode_to(&self, out: &mut dyn Sink) -> SerResult<()> {
        ser::write_option(out, self.as_ref(), |out, inner| inner.encode_to(out))
    }
}

impl<T: Encode> Encode for [T] {
    fn encode_to(&self, out: &mut dyn Sink) -> SerResult<()> {
        ser::write_sequence(out, self, |out, item| item.encode_to(out))
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode_to(&self, out: &mut dyn Sink) -> SerResult<()> {
        self.as_slice().encode_to(out)
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode_to(&self, out: &mut dyn Sink) -> SerResult<()> {
        for item in self {
            item.encode_to(out)?;
        }
        Ok(())
    }
}

impl Encode for str {
    fn encode_to(&self, out: &mut dyn Sink) -> SerResult<()> {
        ser::write_str(out, self)
    }
}

impl Encode for String {
    fn encode_to(&self, out: &mut dyn Sink) -> SerResult<()> {
        ser::write_str(out, self)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode_to(&self, out: &mut dyn Sink) -> SerResult<()> {
        (**self).encode_to(out)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode_to(&self, out: &mut dyn Sink) -> SerResult<()> {
        (**self).encode_to(out)
    }
}

macro_rules! impl_encode_tuple {
    ($(($ty:ident, $idx:tt)),+) => {
        impl<$($ty: Encode),+> Encode for ($($ty,)+) {
            fn encode_to(&self, out: &mut dyn Sink) -> SerResult<()> {
                $(self.$idx.encode_to(out)?;)+
                Ok(())
            }
        }
    };
}

impl_encode_tuple!((A, 0));
impl_encode_tuple!((A, 0), (B, 1));
impl_encode_tuple!((A, 0), (B, 1), (C, 2));
impl_encode_tuple!((A, 0), (B, 1), (C, 2), (D, 3));
impl_encode_tuple!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4));
impl_encode_tuple!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (F, 5));
impl_encode_tuple!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (F, 5), (G, 6));
impl_encode_tuple!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (F, 5), (G, 6), (H, 7));

/// Marks an unsigned value for the compact variable-length encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Compact<T>(pub T);

macro_rules! impl_encode_compact {
    ($($ty:ty),*) => {
        $(impl Encode for Compact<$ty> {
            #[inline]
            fn encode_to(&self, out: &mut dyn Sink) -> SerResult<()> {
                ser::write_compact(out, u128::from(self.0))
            }
        })*
    };
}

impl_encode_compact!(u8, u16, u32, u64, u128);

impl Encode for Compact<usize> {
    fn encode_to(&self, out: &mut dyn Sink) -> SerResult<()> {
        ser::write_compact_len(out, self.0)
    }
}

impl Encode for Compact<Integer> {
    fn encode_to(&self, out: &mut dyn Sink) -> SerResult<()> {
        ser::write_compact_integer(out, &self.0)
    }
}

impl<T> From<T> for Compact<T> {
    fn from(value: T) -> Self {
        Compact(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum Call {
        Transfer { to: [u8; 4], amount: Compact<u128> },
        Remark(Vec<u8>),
        Noop,
    }

    impl Encode for Call {
        fn encode_to(&self, out: &mut dyn Sink) -> SerResult<()> {
            match self {
                Call::Transfer { to, amount } => ser::write_variant(out, 0, 3, |out| {
                    to.encode_to(out)?;
                    amount.encode_to(out)
                }),
                Call::Remark(bytes) => ser::write_variant(out, 1, 3, |out| bytes.encode_to(out)),
                Call::Noop => ser::write_unit_variant(out, 2, 3),
            }
        }
    }

    #[test]
    fn primitives_are_little_endian() {
        assert_eq!(0x1234u16.encode().unwrap(), vec![0x34, 0x12]);
        assert_eq!((-1i32).encode().unwrap(), vec![0xff; 4]);
        assert_eq!(true.encode().unwrap(), vec![0x01]);
        assert_eq!(().encode().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn containers() {
        assert_eq!(vec![true, false].encode().unwrap(), vec![0x08, 0x01, 0x00]);
        assert_eq!(Some(true).encode().unwrap(), vec![0x01, 0x01]);
        assert_eq!(None::<bool>.encode().unwrap(), vec![0x00]);
        assert_eq!("abc".encode().unwrap(), vec![0x0c, b'a', b'b', b'c']);
        assert_eq!([1u8, 2].encode().unwrap(), vec![0x01, 0x02]);
        assert_eq!((1u8, 2u16).encode().unwrap(), vec![0x01, 0x02, 0x00]);
    }

    #[test]
    fn enum_variants() {
        let transfer = Call::Transfer {
            to: [0xaa; 4],
            amount: Compact(64),
        };
        assert_eq!(
            transfer.encode().unwrap(),
            vec![0x00, 0xaa, 0xaa, 0xaa, 0xaa, 0x01, 0x01]
        );
        assert_eq!(Call::Remark(vec![7]).encode().unwrap(), vec![0x01, 0x04, 0x07]);
        assert_eq!(Call::Noop.encode().unwrap(), vec![0x02]);
    }

    #[test]
    fn digest_follows_encoding() {
        let a = (1u32, Compact(5u8)).content_digest().unwrap();
        let b = (1u32, Compact(5u8)).content_digest().unwrap();
        let c = (1u32, Compact(6u8)).content_digest().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
