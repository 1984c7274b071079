//! Dispatch-by-shape encoding for values whose type is only known at runtime.
//!
//! A [`Shape`] is the declared type of a value: a closed set of variants, one
//! per supported layout. Pairing a shape with a [`Value`] selects the writer
//! without reflection. Shapes are immutable and can be shared freely; they
//! also (de)serialize with serde so schemas can be loaded from JSON.

mod value;

pub use value::Value;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::ScaleWriter;
use crate::config::MAX_ENUM_VARIANTS;
use crate::ser::{self, EncodeError, FixedInt, SerResult, ShapeKind, Sink};

/// Declared layout of a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer.
    U16,
    /// Unsigned 32-bit integer.
    U32,
    /// Unsigned 64-bit integer.
    U64,
    /// Unsigned 128-bit integer.
    U128,
    /// Signed 8-bit integer.
    I8,
    /// Signed 16-bit integer.
    I16,
    /// Signed 32-bit integer.
    I32,
    /// Signed 64-bit integer.
    I64,
    /// Signed 128-bit integer.
    I128,
    /// Boolean flag.
    Bool,
    /// Compact unsigned integer.
    Compact,
    /// Compact-length prefixed bytes.
    Bytes,
    /// Compact-length prefixed UTF-8 string.
    Str,
    /// Exactly `n` raw bytes.
    FixedBytes(usize),
    /// Optional inner value.
    Option(Box<Shape>),
    /// Tagged union.
    Enum(EnumShape),
    /// Compact-length prefixed sequence of one element shape.
    Sequence(Box<Shape>),
    /// Concatenated fields in declared order.
    Tuple(Vec<Shape>),
}

impl Shape {
    /// Shorthand for [`Shape::Option`].
    pub fn option(inner: Shape) -> Self {
        Shape::Option(Box::new(inner))
    }

    /// Shorthand for [`Shape::Sequence`].
    pub fn sequence(element: Shape) -> Self {
        Shape::Sequence(Box::new(element))
    }

    /// Context marker used in errors raised for this shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::U8 => ShapeKind::U8,
            Shape::U16 => ShapeKind::U16,
            Shape::U32 => ShapeKind::U32,
            Shape::U64 => ShapeKind::U64,
            Shape::U128 => ShapeKind::U128,
            Shape::I8 => ShapeKind::I8,
            Shape::I16 => ShapeKind::I16,
            Shape::I32 => ShapeKind::I32,
            Shape::I64 => ShapeKind::I64,
            Shape::I128 => ShapeKind::I128,
            Shape::Bool => ShapeKind::Bool,
            Shape::Compact => ShapeKind::Compact,
            Shape::Bytes => ShapeKind::Bytes,
            Shape::Str => ShapeKind::Str,
            Shape::FixedBytes(_) => ShapeKind::FixedBytes,
            Shape::Option(_) => ShapeKind::Option,
            Shape::Enum(_) => ShapeKind::Enum,
            Shape::Sequence(_) => ShapeKind::Sequence,
            Shape::Tuple(_) => ShapeKind::Tuple,
        }
    }

    fn fixed_int(&self) -> Option<FixedInt> {
        Some(match self {
            Shape::U8 => ser::U8,
            Shape::U16 => ser::U16,
            Shape::U32 => ser::U32,
            Shape::U64 => ser::U64,
            Shape::U128 => ser::U128,
            Shape::I8 => ser::I8,
            Shape::I16 => ser::I16,
            Shape::I32 => ser::I32,
            Shape::I64 => ser::I64,
            Shape::I128 => ser::I128,
            _ => return None,
        })
    }

    /// Writes `value` laid out as `self`.
    pub fn encode(&self, out: &mut dyn Sink, value: &Value) -> SerResult<()> {
        if let (Some(fixed), Value::Int(int)) = (self.fixed_int(), value) {
            return fixed.write(out, int);
        }
        match (self, value) {
            (Shape::Bool, Value::Bool(flag)) => ser::write_bool(out, *flag),
            (Shape::Compact, Value::Int(int)) => ser::write_compact_integer(out, int),
            (Shape::Bytes, Value::Bytes(bytes)) => ser::write_prefixed_bytes(out, bytes),
            (Shape::Str, Value::Str(text)) => ser::write_str(out, text),
            (Shape::FixedBytes(len), Value::Bytes(bytes)) => {
                ser::write_fixed_bytes(out, bytes, *len)
            }
            (Shape::Option(inner), Value::Option(present)) => {
                ser::write_option(out, present.as_deref(), |out, v| inner.encode(out, v))
            }
            (Shape::Enum(shape), Value::Variant { index, payload }) => {
                shape.encode_variant(out, *index, payload.as_deref())
            }
            (Shape::Sequence(element), Value::Sequence(items)) => {
                ser::write_sequence(out, items, |out, item| element.encode(out, item))
            }
            (Shape::Tuple(fields), Value::Tuple(values)) => {
                if fields.len() != values.len() {
                    return Err(EncodeError::ArityMismatch {
                        expected: fields.len(),
                        found: values.len(),
                    });
                }
                for (field, value) in fields.iter().zip(values) {
                    field.encode(out, value)?;
                }
                Ok(())
            }
            _ => Err(EncodeError::shape_mismatch(self.kind(), value.type_name())),
        }
    }

    /// Encodes `value` into a fresh buffer.
    pub fn encode_to_vec(&self, value: &Value) -> SerResult<Vec<u8>> {
        let mut out = Vec::new();
        self.encode(&mut out, value)?;
        Ok(out)
    }
}

impl ScaleWriter<Value> for Shape {
    fn write(&self, out: &mut dyn Sink, value: &Value) -> SerResult<()> {
        self.encode(out, value)
    }
}

/// One member of an [`EnumShape`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant name, informational only.
    pub name: String,
    /// Payload layout, `None` for unit variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Shape>,
}

impl Variant {
    /// Variant without payload.
    pub fn unit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: None,
        }
    }

    /// Variant carrying a payload of the given shape.
    pub fn with_payload(name: impl Into<String>, payload: Shape) -> Self {
        Self {
            name: name.into(),
            payload: Some(payload),
        }
    }
}

/// Ordered variant set of a tagged union, at most 256 members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Variant>", into = "Vec<Variant>")]
pub struct EnumShape {
    variants: Vec<Variant>,
}

impl EnumShape {
    /// Declares a variant set, rejecting sets that do not fit one
    /// discriminant byte.
    pub fn new(variants: Vec<Variant>) -> SerResult<Self> {
        if variants.len() > MAX_ENUM_VARIANTS {
            debug!(count = variants.len(), "enum declares too many variants");
            return Err(EncodeError::TooManyVariants {
                count: variants.len(),
            });
        }
        Ok(Self { variants })
    }

    /// Declared variants in discriminant order.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Index of the variant called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|variant| variant.name == name)
    }

    /// Writes the discriminant of variant `index` and its payload.
    ///
    /// The index and payload presence are checked before anything is written.
    pub fn encode_variant(
        &self,
        out: &mut dyn Sink,
        index: usize,
        payload: Option<&Value>,
    ) -> SerResult<()> {
        let tag = ser::variant_tag(index, self.variants.len())?;
        match (&self.variants[index].payload, payload) {
            (Some(shape), Some(value)) => {
                ser::write_u8(out, tag)?;
                shape.encode(out, value)
            }
            (None, None) => ser::write_u8(out, tag),
            (Some(_), None) => Err(EncodeError::shape_mismatch(ShapeKind::Enum, "unit variant")),
            (None, Some(value)) => Err(EncodeError::shape_mismatch(
                ShapeKind::Enum,
                value.type_name(),
            )),
        }
    }
}

impl TryFrom<Vec<Variant>> for EnumShape {
    type Error = EncodeError;

    fn try_from(variants: Vec<Variant>) -> Result<Self, Self::Error> {
        EnumShape::new(variants)
    }
}

impl From<EnumShape> for Vec<Variant> {
    fn from(shape: EnumShape) -> Self {
        shape.variants
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ser::{ErrorKind, Integer};

    fn call_shape() -> Shape {
        Shape::Enum(
            EnumShape::new(vec![
                Variant::with_payload(
                    "transfer",
                    Shape::Tuple(vec![Shape::FixedBytes(2), Shape::Compact]),
                ),
                Variant::unit("noop"),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn enum_payload_and_unit() {
        let shape = call_shape();
        let transfer = Value::variant(
            0,
            Value::Tuple(vec![Value::Bytes(vec![9, 9]), Value::from(1u8)]),
        );
        assert_eq!(
            shape.encode_to_vec(&transfer).unwrap(),
            vec![0x00, 0x09, 0x09, 0x04]
        );
        assert_eq!(shape.encode_to_vec(&Value::unit_variant(1)).unwrap(), vec![0x01]);
    }

    #[test]
    fn enum_rejects_bad_index_and_payload_before_writing() {
        let shape = call_shape();
        for value in [
            Value::unit_variant(2),
            Value::unit_variant(0),
            Value::variant(1, true),
        ] {
            let mut out = Vec::new();
            let err = shape.encode(&mut out, &value).expect_err("invalid variant");
            assert_eq!(err.kind(), ErrorKind::Range);
            assert!(out.is_empty());
        }
    }

    #[test]
    fn enum_shape_caps_variant_count() {
        let variants = (0..257).map(|i| Variant::unit(format!("v{i}"))).collect();
        assert!(matches!(
            EnumShape::new(variants),
            Err(EncodeError::TooManyVariants { count: 257 })
        ));
        let variants: Vec<_> = (0..256).map(|i| Variant::unit(format!("v{i}"))).collect();
        let shape = EnumShape::new(variants).unwrap();
        assert_eq!(shape.index_of("v255"), Some(255));
        let mut out = Vec::new();
        shape.encode_variant(&mut out, 255, None).unwrap();
        assert_eq!(out, vec![0xff]);
    }

    #[test]
    fn mismatched_value_is_range_error() {
        let err = Shape::Bool.encode_to_vec(&Value::from(1u8)).expect_err("mismatch");
        assert!(matches!(
            err,
            EncodeError::ShapeMismatch { shape: ShapeKind::Bool, found: "integer" }
        ));
        let err = Shape::Tuple(vec![Shape::U8])
            .encode_to_vec(&Value::Tuple(vec![]))
            .expect_err("arity");
        assert!(matches!(err, EncodeError::ArityMismatch { expected: 1, found: 0 }));
    }

    #[test]
    fn unsigned_shapes_reject_negative_without_output() {
        for shape in [Shape::U8, Shape::U16, Shape::U32, Shape::U64, Shape::U128, Shape::Compact] {
            let mut out = Vec::new();
            let err = shape
                .encode(&mut out, &Value::Int(Integer::from(-1)))
                .expect_err("negative");
            assert!(err.is_range());
            assert!(out.is_empty());
        }
    }
}
