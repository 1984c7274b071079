use core::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Value shapes used as context when reporting encoding failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
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
    /// Single-byte boolean flag.
    Bool,
    /// Variable-length compact unsigned integer.
    Compact,
    /// Compact-length prefixed byte string.
    Bytes,
    /// Compact-length prefixed UTF-8 string.
    Str,
    /// Fixed-length raw byte array.
    FixedBytes,
    /// Optional value with a one-byte discriminant.
    Option,
    /// Tagged union with a one-byte variant index.
    Enum,
    /// Compact-length prefixed sequence.
    Sequence,
    /// Fixed-arity tuple or struct.
    Tuple,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::U8 => write!(f, "u8"),
            ShapeKind::U16 => write!(f, "u16"),
            ShapeKind::U32 => write!(f, "u32"),
            ShapeKind::U64 => write!(f, "u64"),
            ShapeKind::U128 => write!(f, "u128"),
            ShapeKind::I8 => write!(f, "i8"),
            ShapeKind::I16 => write!(f, "i16"),
            ShapeKind::I32 => write!(f, "i32"),
            ShapeKind::I64 => write!(f, "i64"),
            ShapeKind::I128 => write!(f, "i128"),
            ShapeKind::Bool => write!(f, "bool"),
            ShapeKind::Compact => write!(f, "compact"),
            ShapeKind::Bytes => write!(f, "bytes"),
            ShapeKind::Str => write!(f, "string"),
            ShapeKind::FixedBytes => write!(f, "fixed bytes"),
            ShapeKind::Option => write!(f, "option"),
            ShapeKind::Enum => write!(f, "enum"),
            ShapeKind::Sequence => write!(f, "sequence"),
            ShapeKind::Tuple => write!(f, "tuple"),
        }
    }
}

/// Coarse classification of an [`EncodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The value cannot be represented by the target shape. Not retryable.
    Range,
    /// The sink rejected a write.
    Io,
}

/// Error surfaced while encoding a value into a sink.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The value lies outside the representable domain of the shape.
    #[error("{shape} cannot represent {value}")]
    OutOfRange {
        /// Shape that rejected the value.
        shape: ShapeKind,
        /// Rendered offending value.
        value: String,
    },
    /// The value does not have the structure the shape declares.
    #[error("{shape} cannot encode a {found} value")]
    ShapeMismatch {
        /// Declared shape.
        shape: ShapeKind,
        /// Structure of the supplied value.
        found: &'static str,
    },
    /// The variant index is not part of the declared variant set.
    #[error("variant index {index} is outside the {count} declared variants")]
    InvalidVariant {
        /// Requested variant index.
        index: usize,
        /// Number of declared variants.
        count: usize,
    },
    /// The variant set does not fit a single discriminant byte.
    #[error("{count} variants do not fit a single discriminant byte")]
    TooManyVariants {
        /// Number of declared variants.
        count: usize,
    },
    /// A tuple value carries a different number of fields than declared.
    #[error("tuple declares {expected} fields but the value has {found}")]
    ArityMismatch {
        /// Declared arity.
        expected: usize,
        /// Arity of the supplied value.
        found: usize,
    },
    /// The sink failed to accept bytes.
    #[error("sink rejected write: {0}")]
    Io(#[from] io::Error),
}

impl EncodeError {
    /// Creates an out-of-range error helper.
    pub fn out_of_range(shape: ShapeKind, value: impl fmt::Display) -> Self {
        EncodeError::OutOfRange {
            shape,
            value: value.to_string(),
        }
    }

    /// Creates a shape-mismatch error helper.
    pub fn shape_mismatch(shape: ShapeKind, found: &'static str) -> Self {
        EncodeError::ShapeMismatch { shape, found }
    }

    /// Returns whether the failure is a range violation or a sink failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncodeError::Io(_) => ErrorKind::Io,
            EncodeError::OutOfRange { .. }
            | EncodeError::ShapeMismatch { .. }
            | EncodeError::InvalidVariant { .. }
            | EncodeError::TooManyVariants { .. }
            | EncodeError::ArityMismatch { .. } => ErrorKind::Range,
        }
    }

    /// Shorthand for `self.kind() == ErrorKind::Range`.
    pub fn is_range(&self) -> bool {
        self.kind() == ErrorKind::Range
    }
}

/// Convenient alias for encoding results.
pub type SerResult<T> = core::result::Result<T, EncodeError>;
