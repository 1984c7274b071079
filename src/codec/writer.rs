//! Stateless encoder objects sharing one calling convention.
//!
//! Every writer is a zero-sized or `Copy` value exposed as a `const`, so the
//! same instance can be used from any number of threads. Composite writers
//! wrap the writers of their elements and recurse through the same sink.

use crate::ser::{self, FixedInt, Integer, SerResult, Sink};

/// Uniform encoder contract: write `value` into `out` or fail.
pub trait ScaleWriter<T: ?Sized> {
    /// Appends the encoding of `value`.
    fn write(&self, out: &mut dyn Sink, value: &T) -> SerResult<()>;

    /// Encodes `value` into a fresh buffer.
    fn write_to_vec(&self, value: &T) -> SerResult<Vec<u8>> {
        let mut out = Vec::new();
        self.write(&mut out, value)?;
        Ok(out)
    }
}

impl ScaleWriter<Integer> for FixedInt {
    fn write(&self, out: &mut dyn Sink, value: &Integer) -> SerResult<()> {
        FixedInt::write(self, out, value)
    }
}

impl ScaleWriter<i128> for FixedInt {
    fn write(&self, out: &mut dyn Sink, value: &i128) -> SerResult<()> {
        FixedInt::write(self, out, &Integer::from(*value))
    }
}

impl ScaleWriter<u128> for FixedInt {
    fn write(&self, out: &mut dyn Sink, value: &u128) -> SerResult<()> {
        FixedInt::write(self, out, &Integer::from(*value))
    }
}

/// Boolean writer: `0x00` or `0x01`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolWriter;

/// Shared boolean writer.
pub const BOOL: BoolWriter = BoolWriter;

impl ScaleWriter<bool> for BoolWriter {
    fn write(&self, out: &mut dyn Sink, value: &bool) -> SerResult<()> {
        ser::write_bool(out, *value)
    }
}

/// Compact unsigned integer writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompactWriter;

/// Shared compact integer writer.
pub const COMPACT: CompactWriter = CompactWriter;

impl ScaleWriter<u128> for CompactWriter {
    fn write(&self, out: &mut dyn Sink, value: &u128) -> SerResult<()> {
        ser::write_compact(out, *value)
    }
}

impl ScaleWriter<u64> for CompactWriter {
    fn write(&self, out: &mut dyn Sink, value: &u64) -> SerResult<()> {
        ser::write_compact(out, u128::from(*value))
    }
}

impl ScaleWriter<Integer> for CompactWriter {
    fn write(&self, out: &mut dyn Sink, value: &Integer) -> SerResult<()> {
        ser::write_compact_integer(out, value)
    }
}

/// Compact-length prefixed byte string writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BytesWriter;

/// Shared byte string writer.
pub const BYTES: BytesWriter = BytesWriter;

impl ScaleWriter<[u8]> for BytesWriter {
    fn write(&self, out: &mut dyn Sink, value: &[u8]) -> SerResult<()> {
        ser::write_prefixed_bytes(out, value)
    }
}

impl ScaleWriter<Vec<u8>> for BytesWriter {
    fn write(&self, out: &mut dyn Sink, value: &Vec<u8>) -> SerResult<()> {
        ser::write_prefixed_bytes(out, value)
    }
}

impl ScaleWriter<str> for BytesWriter {
    fn write(&self, out: &mut dyn Sink, value: &str) -> SerResult<()> {
        ser::write_str(out, value)
    }
}

/// Option writer wrapping the writer of the inner value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionWriter<W>(pub W);

impl<T, W: ScaleWriter<T>> ScaleWriter<Option<T>> for OptionWriter<W> {
    fn write(&self, out: &mut dyn Sink, value: &Option<T>) -> SerResult<()> {
        ser::write_option(out, value.as_ref(), |out, inner| self.0.write(out, inner))
    }
}

/// Sequence writer wrapping the writer of its elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceWriter<W>(pub W);

impl<T, W: ScaleWriter<T>> ScaleWriter<[T]> for SequenceWriter<W> {
    fn write(&self, out: &mut dyn Sink, value: &[T]) -> SerResult<()> {
        ser::write_sequence(out, value, |out, item| self.0.write(out, item))
    }
}

impl<T, W: ScaleWriter<T>> ScaleWriter<Vec<T>> for SequenceWriter<W> {
    fn write(&self, out: &mut dyn Sink, value: &Vec<T>) -> SerResult<()> {
        ScaleWriter::<[T]>::write(self, out, value.as_slice())
    }
}

macro_rules! impl_tuple_writer {
    ($(($writer:ident, $value:ident, $idx:tt)),+) => {
        impl<$($value, $writer),+> ScaleWriter<($($value,)+)> for ($($writer,)+)
        where
            $($writer: ScaleWriter<$value>),+
        {
            fn write(&self, out: &mut dyn Sink, value: &($($value,)+)) -> SerResult<()> {
                $(self.$idx.write(out, &value.$idx)?;)+
                Ok(())
            }
        }
    };
}

impl_tuple_writer!((W0, T0, 0));
impl_tuple_writer!((W0, T0, 0), (W1, T1, 1));
impl_tuple_writer!((W0, T0, 0), (W1, T1, 1), (W2, T2, 2));
impl_tuple_writer!((W0, T0, 0), (W1, T1, 1), (W2, T2, 2), (W3, T3, 3));
impl_tuple_writer!((W0, T0, 0), (W1, T1, 1), (W2, T2, 2), (W3, T3, 3), (W4, T4, 4));
impl_tuple_writer!(
    (W0, T0, 0),
    (W1, T1, 1),
    (W2, T2, 2),
    (W3, T3, 3),
    (W4, T4, 4),
    (W5, T5, 5)
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ser::{BoundedSink, ErrorKind, U16, U8};
    use crate::shape::{EnumShape, Shape};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn writers_are_shareable_across_threads() {
        assert_send_sync::<FixedInt>();
        assert_send_sync::<BoolWriter>();
        assert_send_sync::<CompactWriter>();
        assert_send_sync::<BytesWriter>();
        assert_send_sync::<OptionWriter<BoolWriter>>();
        assert_send_sync::<SequenceWriter<FixedInt>>();
        assert_send_sync::<(FixedInt, CompactWriter)>();
        assert_send_sync::<Shape>();
        assert_send_sync::<EnumShape>();
    }

    #[test]
    fn shared_writer_used_from_several_threads() {
        let writer = SequenceWriter(COMPACT);
        let values: Vec<u64> = vec![0, 64, 1 << 30];
        let expected = writer.write_to_vec(&values).unwrap();
        let (writer, values) = (&writer, &values);
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(move || writer.write_to_vec(values).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn option_of_bool() {
        let writer = OptionWriter(BOOL);
        assert_eq!(writer.write_to_vec(&None::<bool>).unwrap(), vec![0x00]);
        assert_eq!(writer.write_to_vec(&Some(true)).unwrap(), vec![0x01, 0x01]);
    }

    #[test]
    fn nested_composition() {
        let writer = SequenceWriter((U8, OptionWriter(COMPACT)));
        let value: Vec<(u128, Option<u64>)> = vec![(1, Some(64)), (2, None)];
        assert_eq!(
            writer.write_to_vec(&value).unwrap(),
            vec![0x08, 0x01, 0x01, 0x01, 0x01, 0x02, 0x00]
        );
    }

    #[test]
    fn tuple_stops_at_first_failing_field() {
        let writer = (U16, U8, U16);
        let mut out = Vec::new();
        let err = writer
            .write(&mut out, &(Integer::from(7u8), Integer::from(300u16), Integer::from(1u8)))
            .expect_err("second field out of range");
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(out, vec![0x07, 0x00]);
    }

    #[test]
    fn sink_failure_propagates_from_nested_writer() {
        let writer = SequenceWriter(BYTES);
        let mut sink = BoundedSink::new(4);
        let value: Vec<Vec<u8>> = vec![vec![1], vec![2, 3, 4]];
        let err = writer.write(&mut sink, &value).expect_err("limit");
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(sink.as_slice(), &[0x08, 0x04, 0x01, 0x0c]);
    }
}
