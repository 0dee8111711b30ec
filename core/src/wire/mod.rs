//! wire/mod.rs
//! Minimal protobuf-style wire codec.
//!
//! Industry notes:
//! - Only varint, length-delimited and fixed-64 values are produced; fixed-32 is skipped on read.
//! - Zero scalars and empty byte strings are never emitted. Remote verifiers hash the exact
//!   emitted bytes, so this is a compatibility rule rather than a size optimization.
//! - No schema layer; message builders write fields in explicit order.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
