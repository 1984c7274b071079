//! Typed encoding front-ends over the [`crate::ser`] writers.

mod encode;
mod writer;

pub use encode::{Compact, Encode};
pub use writer::{
    BoolWriter, BytesWriter, CompactWriter, OptionWriter, ScaleWriter, SequenceWriter, BOOL,
    BYTES, COMPACT,
};
