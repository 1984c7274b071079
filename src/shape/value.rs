use crate::ser::Integer;

/// Dynamically typed value paired with a [`super::Shape`] at encode time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Any integer, checked against the target width when encoded.
    Int(Integer),
    /// Boolean flag.
    Bool(bool),
    /// Raw bytes for byte-string and fixed-array shapes.
    Bytes(Vec<u8>),
    /// UTF-8 text.
    Str(String),
    /// Optional value.
    Option(Option<Box<Value>>),
    /// Enum variant by 0-based index with an optional payload.
    Variant {
        /// Variant index.
        index: usize,
        /// Associated value, absent for unit variants.
        payload: Option<Box<Value>>,
    },
    /// Homogeneous sequence.
    Sequence(Vec<Value>),
    /// Heterogeneous tuple or struct fields in declared order.
    Tuple(Vec<Value>),
}

impl Value {
    /// Present optional value.
    pub fn some(inner: impl Into<Value>) -> Self {
        Value::Option(Some(Box::new(inner.into())))
    }

    /// Absent optional value.
    pub fn none() -> Self {
        Value::Option(None)
    }

    /// Variant carrying a payload.
    pub fn variant(index: usize, payload: impl Into<Value>) -> Self {
        Value::Variant {
            index,
            payload: Some(Box::new(payload.into())),
        }
    }

    /// Variant without payload.
    pub fn unit_variant(index: usize) -> Self {
        Value::Variant {
            index,
            payload: None,
        }
    }

    /// Short structural name used in mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Bool(_) => "boolean",
            Value::Bytes(_) => "bytes",
            Value::Str(_) => "string",
            Value::Option(_) => "option",
            Value::Variant { .. } => "variant",
            Value::Sequence(_) => "sequence",
            Value::Tuple(_) => "tuple",
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::Int(Integer::from(value))
            }
        })*
    };
}

impl_from_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl From<Integer> for Value {
    fn from(value: Integer) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        Value::Option(value.map(|inner| Box::new(inner.into())))
    }
}
