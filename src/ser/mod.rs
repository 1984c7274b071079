//! Canonical little-endian writers.
//!
//! Every function in this module appends to a [`Sink`] and either writes the
//! complete encoding of its value or fails. Range checks always run before
//! the first byte of an atomic value is written; composite writers propagate
//! inner failures untouched and leave earlier bytes in place.

mod bytes;
mod collections;
mod compact;
mod digest;
mod error;
mod integer;
mod ints;
mod sink;

pub use bytes::{write_bytes, write_fixed_bytes, write_prefixed_bytes, write_str};
pub use collections::{variant_tag, write_option, write_sequence, write_unit_variant, write_variant};
pub use compact::{
    compact_len, compact_tier, compact_tier_of, write_compact, write_compact_integer,
    write_compact_len, CompactTier,
};
pub use digest::{content_digest, DIGEST_SIZE};
pub use error::{EncodeError, ErrorKind, SerResult, ShapeKind};
pub use integer::Integer;
pub use ints::{
    write_bool, write_i128, write_i16, write_i32, write_i64, write_i8, write_u128, write_u16,
    write_u32, write_u64, write_u8, FixedInt, I128, I16, I32, I64, I8, U128, U16, U32, U64, U8,
};
pub use sink::{BoundedSink, IoSink, Sink};
